//! HTTP route handlers.

pub mod ai_queries;
pub mod attendance;
pub mod books;
pub mod borrow_requests;
pub mod health;
pub mod homework;
pub mod messages;
pub mod notices;
pub mod results;
pub mod settings;
pub mod students;
pub mod tests;
pub mod voicelink;
