//! Domain models for School Manager.

pub mod ai_query;
pub mod attendance;
pub mod book;
pub mod borrow_request;
pub mod homework;
pub mod message;
pub mod notice;
pub mod result;
pub mod session;
pub mod settings;
pub mod student;
pub mod voicelink;

pub use ai_query::{AiQuery, CreateAiQueryRequest, TeacherResponseRequest};
pub use attendance::{AttendanceRecord, BulkMarkRequest, MarkAttendanceRequest};
pub use book::{Book, CreateBookRequest, UpdateBookRequest};
pub use borrow_request::{BorrowRequest, BorrowRequestStatus, CreateBorrowRequest};
pub use homework::{
    CreateHomeworkRequest, GradeSubmissionRequest, Homework, Submission, SubmitHomeworkRequest,
};
pub use message::{Message, MessageKind, SendBroadcastRequest, SendMessageRequest, SenderKind};
pub use notice::{CreateNoticeRequest, Notice, NoticePriority};
pub use result::{letter_grade, CreateResultRequest, ExamResult};
pub use session::{SessionUser, UserRole};
pub use settings::{SchoolSettings, UpdateSettingsRequest};
pub use student::{ClassRoom, CreateStudentRequest, Student, UpdateProfileRequest};
pub use test::{
    AnswerRequest, CreateTestRequest, Test, TestAttempt, TestQuestion, TestSummary,
};
pub use voicelink::{
    CreateVoiceLinkRequest, ScheduleDetails, VoiceLinkRequest, VoiceLinkStatus,
};
