//! Book repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::BookEntity;
use crate::metrics::QueryTimer;

const BOOK_COLUMNS: &str = "id, title, author, subject, isbn, total_copies, available_copies, \
                            description, pdf_url, cover_image, is_active, created_by, created_at";

/// Input for creating a catalog entry.
#[derive(Debug, Clone)]
pub struct BookInput<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub subject: Option<&'a str>,
    pub isbn: Option<&'a str>,
    pub total_copies: i32,
    pub description: Option<&'a str>,
    pub pdf_url: Option<&'a str>,
    pub cover_image: Option<&'a str>,
}

/// Repository for book-related database operations.
#[derive(Clone)]
pub struct BookRepository {
    pool: PgPool,
}

impl BookRepository {
    /// Creates a new BookRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Add a book to the catalog. New books start with all copies available.
    pub async fn create(
        &self,
        input: &BookInput<'_>,
        created_by: Uuid,
    ) -> Result<BookEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_book");
        let result = sqlx::query_as::<_, BookEntity>(&format!(
            r#"
            INSERT INTO books (title, author, subject, isbn, total_copies, available_copies,
                               description, pdf_url, cover_image, created_by)
            VALUES ($1, $2, $3, $4, $5, $5, $6, $7, $8, $9)
            RETURNING {BOOK_COLUMNS}
            "#,
        ))
        .bind(input.title)
        .bind(input.author)
        .bind(input.subject)
        .bind(input.isbn)
        .bind(input.total_copies)
        .bind(input.description)
        .bind(input.pdf_url)
        .bind(input.cover_image)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a book by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<BookEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_book_by_id");
        let result = sqlx::query_as::<_, BookEntity>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List active books in the catalog.
    pub async fn list_active(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BookEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_active_books");
        let result = sqlx::query_as::<_, BookEntity>(&format!(
            r#"
            SELECT {BOOK_COLUMNS}
            FROM books
            WHERE is_active = TRUE
            ORDER BY title ASC
            LIMIT $1 OFFSET $2
            "#,
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Count active books.
    pub async fn count_active(&self) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_active_books");
        let result =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM books WHERE is_active = TRUE")
                .fetch_one(&self.pool)
                .await;
        timer.record();
        result
    }

    /// Update catalog fields. Changing `total_copies` shifts
    /// `available_copies` by the same amount, clamped at zero.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        title: Option<&str>,
        author: Option<&str>,
        subject: Option<&str>,
        isbn: Option<&str>,
        total_copies: Option<i32>,
        description: Option<&str>,
        pdf_url: Option<&str>,
        cover_image: Option<&str>,
        is_active: Option<bool>,
    ) -> Result<Option<BookEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_book");
        let result = sqlx::query_as::<_, BookEntity>(&format!(
            r#"
            UPDATE books
            SET title = COALESCE($2, title),
                author = COALESCE($3, author),
                subject = COALESCE($4, subject),
                isbn = COALESCE($5, isbn),
                available_copies = CASE
                    WHEN $6::INT IS NULL THEN available_copies
                    ELSE GREATEST(available_copies + $6 - total_copies, 0)
                END,
                total_copies = COALESCE($6, total_copies),
                description = COALESCE($7, description),
                pdf_url = COALESCE($8, pdf_url),
                cover_image = COALESCE($9, cover_image),
                is_active = COALESCE($10, is_active)
            WHERE id = $1
            RETURNING {BOOK_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(title)
        .bind(author)
        .bind(subject)
        .bind(isbn)
        .bind(total_copies)
        .bind(description)
        .bind(pdf_url)
        .bind(cover_image)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Retire a book from the catalog (soft delete).
    pub async fn deactivate(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("deactivate_book");
        let result = sqlx::query("UPDATE books SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0);
        timer.record();
        result
    }
}
