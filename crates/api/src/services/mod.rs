//! Background services owned by the API process.

pub mod test_runner;

pub use test_runner::{SessionRegistry, SessionStatus};
