//! Domain layer for School Manager backend.
//!
//! This crate contains:
//! - Domain models (students, books, homework, tests, requests)
//! - The workflow engine (legal status transitions per request-like entity)
//! - The timed test-session state machine

pub mod models;
pub mod test_session;
pub mod workflow;
