//! Library catalog route handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use persistence::repositories::{BookInput, BookRepository};
use serde::Serialize;
use shared::paging::PageParams;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::{Book, CreateBookRequest, UpdateBookRequest};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AdminUser, CurrentUser};

/// Create library catalog routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route(
            "/:book_id",
            get(get_book).put(update_book).delete(delete_book),
        )
}

#[derive(Debug, Serialize)]
struct BookListResponse {
    books: Vec<Book>,
    page: i64,
    per_page: i64,
    total: i64,
    total_pages: i64,
}

/// List active books in the catalog.
///
/// GET /api/v1/books
#[axum::debug_handler]
async fn list_books(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
    _user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = BookRepository::new(state.pool.clone());
    let params = params.clamped();

    let total = repo.count_active().await?;
    let entities = repo.list_active(params.limit(), params.offset()).await?;
    let books: Vec<Book> = entities.into_iter().map(Into::into).collect();

    Ok((
        StatusCode::OK,
        Json(BookListResponse {
            total_pages: params.total_pages(total),
            page: params.page,
            per_page: params.per_page,
            total,
            books,
        }),
    ))
}

/// Get a single book.
///
/// GET /api/v1/books/{book_id}
#[axum::debug_handler]
async fn get_book(
    State(state): State<AppState>,
    Path(book_id): Path<Uuid>,
    _user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = BookRepository::new(state.pool.clone());
    let book: Book = repo
        .find_by_id(book_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Book not found".to_string()))?
        .into();

    Ok((StatusCode::OK, Json(book)))
}

/// Add a book to the catalog.
///
/// POST /api/v1/books
#[axum::debug_handler]
async fn create_book(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(req): Json<CreateBookRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let repo = BookRepository::new(state.pool.clone());
    let input = BookInput {
        title: &req.title,
        author: &req.author,
        subject: req.subject.as_deref(),
        isbn: req.isbn.as_deref(),
        total_copies: req.total_copies,
        description: req.description.as_deref(),
        pdf_url: req.pdf_url.as_deref(),
        cover_image: req.cover_image.as_deref(),
    };
    let book: Book = repo.create(&input, admin.user_id()).await?.into();

    info!(
        book_id = %book.id,
        title = %book.title,
        total_copies = book.total_copies,
        "Book added to catalog"
    );

    Ok((StatusCode::CREATED, Json(book)))
}

/// Update catalog fields of a book.
///
/// PUT /api/v1/books/{book_id}
#[axum::debug_handler]
async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<Uuid>,
    _admin: AdminUser,
    Json(req): Json<UpdateBookRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let repo = BookRepository::new(state.pool.clone());
    let book: Book = repo
        .update(
            book_id,
            req.title.as_deref(),
            req.author.as_deref(),
            req.subject.as_deref(),
            req.isbn.as_deref(),
            req.total_copies,
            req.description.as_deref(),
            req.pdf_url.as_deref(),
            req.cover_image.as_deref(),
            req.is_active,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Book not found".to_string()))?
        .into();

    info!(book_id = %book.id, "Book updated");

    Ok((StatusCode::OK, Json(book)))
}

/// Retire a book from the catalog.
///
/// DELETE /api/v1/books/{book_id}
#[axum::debug_handler]
async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<Uuid>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = BookRepository::new(state.pool.clone());
    if !repo.deactivate(book_id).await? {
        return Err(ApiError::NotFound("Book not found".to_string()));
    }

    info!(book_id = %book_id, "Book retired");

    Ok(StatusCode::NO_CONTENT)
}
