//! Shared utilities and common types for School Manager backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Common validation logic (grades, marks, copy counts)
//! - Page/feed-limit helpers for list endpoints
//! - Student code generation

pub mod codes;
pub mod paging;
pub mod validation;
