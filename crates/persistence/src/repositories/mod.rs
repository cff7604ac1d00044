//! Repository implementations for database operations.

pub mod ai_query;
pub mod attendance;
pub mod book;
pub mod borrow_request;
pub mod homework;
pub mod message;
pub mod notice;
pub mod result;
pub mod settings;
pub mod student;
pub mod test;
pub mod voicelink;

pub use ai_query::AiQueryRepository;
pub use attendance::AttendanceRepository;
pub use book::{BookInput, BookRepository};
pub use borrow_request::BorrowRequestRepository;
pub use homework::HomeworkRepository;
pub use message::MessageRepository;
pub use notice::NoticeRepository;
pub use result::ExamResultRepository;
pub use settings::SettingsRepository;
pub use student::{StudentInput, StudentRepository};
pub use test::TestRepository;
pub use voicelink::VoiceLinkRepository;
