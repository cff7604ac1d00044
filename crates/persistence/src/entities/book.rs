//! Book entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::Book;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the books table.
#[derive(Debug, Clone, FromRow)]
pub struct BookEntity {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub subject: Option<String>,
    pub isbn: Option<String>,
    pub total_copies: i32,
    pub available_copies: i32,
    pub description: Option<String>,
    pub pdf_url: Option<String>,
    pub cover_image: Option<String>,
    pub is_active: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<BookEntity> for Book {
    fn from(entity: BookEntity) -> Self {
        Book {
            id: entity.id,
            title: entity.title,
            author: entity.author,
            subject: entity.subject,
            isbn: entity.isbn,
            total_copies: entity.total_copies,
            available_copies: entity.available_copies,
            description: entity.description,
            pdf_url: entity.pdf_url,
            cover_image: entity.cover_image,
            is_active: entity.is_active,
            created_by: entity.created_by,
            created_at: entity.created_at,
        }
    }
}
