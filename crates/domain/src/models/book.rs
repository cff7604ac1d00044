//! Library book domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A book in the library catalog.
///
/// Invariant: `0 <= available_copies <= total_copies`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    pub total_copies: i32,
    pub available_copies: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub is_active: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Book {
    pub fn in_stock(&self) -> bool {
        self.available_copies > 0
    }
}

/// Request to add a book to the catalog.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateBookRequest {
    #[validate(length(min = 1, max = 300, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, max = 200, message = "Author is required"))]
    pub author: String,
    pub subject: Option<String>,
    pub isbn: Option<String>,
    #[validate(custom(function = "shared::validation::validate_total_copies"))]
    #[serde(default = "default_copies")]
    pub total_copies: i32,
    pub description: Option<String>,
    pub pdf_url: Option<String>,
    pub cover_image: Option<String>,
}

fn default_copies() -> i32 {
    1
}

/// Request to update a catalog entry.
///
/// Changing `total_copies` re-bases `available_copies` so the stock invariant
/// keeps holding.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateBookRequest {
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub author: Option<String>,
    pub subject: Option<String>,
    pub isbn: Option<String>,
    #[validate(custom(function = "shared::validation::validate_total_copies"))]
    pub total_copies: Option<i32>,
    pub description: Option<String>,
    pub pdf_url: Option<String>,
    pub cover_image: Option<String>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn sample_create() -> CreateBookRequest {
        serde_json::from_str(r#"{"title":"Concepts of Physics","author":"H.C. Verma"}"#).unwrap()
    }

    #[test]
    fn test_create_defaults_to_one_copy() {
        let req = sample_create();
        assert_eq!(req.total_copies, 1);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_rejects_zero_copies() {
        let mut req = sample_create();
        req.total_copies = 0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_rejects_blank_title() {
        let mut req = sample_create();
        req.title = String::new();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_in_stock() {
        let book = Book {
            id: Uuid::new_v4(),
            title: "Book".into(),
            author: "Author".into(),
            subject: None,
            isbn: None,
            total_copies: 3,
            available_copies: 0,
            description: None,
            pdf_url: None,
            cover_image: None,
            is_active: true,
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
        };
        assert!(!book.in_stock());
    }
}
