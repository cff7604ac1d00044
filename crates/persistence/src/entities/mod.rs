//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

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

pub use ai_query::AiQueryEntity;
pub use attendance::AttendanceEntity;
pub use book::BookEntity;
pub use borrow_request::{
    BorrowRequestEntity, BorrowRequestStatusDb, BorrowRequestWithBookEntity,
};
pub use homework::{HomeworkEntity, SubmissionEntity};
pub use message::{MessageEntity, MessageKindDb, SenderKindDb};
pub use notice::{NoticeEntity, NoticePriorityDb};
pub use result::ExamResultEntity;
pub use settings::SchoolSettingsEntity;
pub use student::{ClassRoomEntity, StudentEntity};
pub use test::{TestAttemptEntity, TestEntity};
pub use voicelink::{VoiceLinkRequestEntity, VoiceLinkStatusDb};
