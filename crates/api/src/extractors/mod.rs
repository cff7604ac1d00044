//! Request extractors for session identity.

pub mod session;

pub use session::{AdminUser, CurrentUser};
