//! Borrow request workflow route handlers.
//!
//! Students open requests; admins decide them. Every decision consults the
//! transition table first and then runs a guarded write, so a stale status
//! or an empty shelf turns into a 409 rather than a double decrement.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use persistence::entities::{BorrowRequestStatusDb, BorrowRequestWithBookEntity};
use persistence::repositories::{BookRepository, BorrowRequestRepository, SettingsRepository};
use serde::{Deserialize, Serialize};
use shared::paging::PageParams;
use tracing::info;
use uuid::Uuid;

use domain::models::{BorrowRequest, BorrowRequestStatus, CreateBorrowRequest};
use domain::workflow::borrow::{self, BorrowAction, BorrowTransition};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AdminUser, CurrentUser};
use crate::middleware::metrics::record_borrow_approved;

/// Create borrow request routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_requests).post(create_request))
        .route("/mine", get(list_my_requests))
        .route("/:request_id/approve", post(approve_request))
        .route("/:request_id/reject", post(reject_request))
        .route("/:request_id/return", post(return_request))
}

/// Borrow request row joined with its book, for listings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
struct BorrowRequestItem {
    id: Uuid,
    student_id: Uuid,
    book_id: Uuid,
    book_title: String,
    book_author: String,
    status: BorrowRequestStatus,
    request_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    issue_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    return_date: Option<DateTime<Utc>>,
}

impl From<BorrowRequestWithBookEntity> for BorrowRequestItem {
    fn from(entity: BorrowRequestWithBookEntity) -> Self {
        Self {
            id: entity.id,
            student_id: entity.student_id,
            book_id: entity.book_id,
            book_title: entity.book_title,
            book_author: entity.book_author,
            status: entity.status.into(),
            request_date: entity.request_date,
            issue_date: entity.issue_date,
            return_date: entity.return_date,
        }
    }
}

#[derive(Debug, Deserialize)]
struct StatusFilter {
    status: Option<String>,
}

/// Open a borrow request for a book.
///
/// POST /api/v1/borrow-requests
#[axum::debug_handler]
async fn create_request(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<CreateBorrowRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let book_repo = BookRepository::new(state.pool.clone());
    let borrow_repo = BorrowRequestRepository::new(state.pool.clone());
    let settings_repo = SettingsRepository::new(state.pool.clone());

    let book = book_repo
        .find_by_id(req.book_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Book not found".to_string()))?;
    if !book.is_active {
        return Err(ApiError::NotFound("Book not found".to_string()));
    }

    if borrow_repo
        .find_pending_for_student_book(user.user_id(), req.book_id)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "A pending request for this book already exists".to_string(),
        ));
    }

    let max_books = settings_repo
        .get()
        .await?
        .map(|s| s.max_books_per_student)
        .unwrap_or(state.config.library.max_books_per_student);
    let borrowed = borrow_repo.count_borrowed_by_student(user.user_id()).await?;
    if borrowed >= max_books as i64 {
        return Err(ApiError::Conflict(format!(
            "Borrow limit of {max_books} books reached"
        )));
    }

    let request: BorrowRequest = borrow_repo
        .create(user.user_id(), req.book_id)
        .await?
        .into();

    info!(
        request_id = %request.id,
        student_id = %request.student_id,
        book_id = %request.book_id,
        "Borrow request opened"
    );

    Ok((StatusCode::CREATED, Json(request)))
}

/// List the caller's borrow requests, newest first.
///
/// GET /api/v1/borrow-requests/mine
#[axum::debug_handler]
async fn list_my_requests(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = BorrowRequestRepository::new(state.pool.clone());
    let requests: Vec<BorrowRequestItem> = repo
        .list_for_student(user.user_id())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((StatusCode::OK, Json(requests)))
}

/// List borrow requests across the school, optionally filtered by status.
///
/// GET /api/v1/borrow-requests?status=pending
#[axum::debug_handler]
async fn list_requests(
    State(state): State<AppState>,
    Query(filter): Query<StatusFilter>,
    Query(params): Query<PageParams>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = BorrowRequestRepository::new(state.pool.clone());

    let status_filter = filter.status.as_deref().and_then(|s| match s {
        "pending" => Some(BorrowRequestStatusDb::Pending),
        "approved" => Some(BorrowRequestStatusDb::Approved),
        "rejected" => Some(BorrowRequestStatusDb::Rejected),
        "returned" => Some(BorrowRequestStatusDb::Returned),
        _ => None,
    });

    let page = params.clamped();
    let requests: Vec<BorrowRequestItem> = repo
        .list_all(status_filter, page.limit(), page.offset())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((StatusCode::OK, Json(requests)))
}

/// Approve a pending request, issuing the book.
///
/// POST /api/v1/borrow-requests/{request_id}/approve
#[axum::debug_handler]
async fn approve_request(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
    admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let borrow_repo = BorrowRequestRepository::new(state.pool.clone());
    let book_repo = BookRepository::new(state.pool.clone());

    let request = borrow_repo
        .find_by_id(request_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Borrow request not found".to_string()))?;
    let book = book_repo
        .find_by_id(request.book_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Book not found".to_string()))?;

    let transition = borrow::request_transition(
        request.status.into(),
        BorrowAction::Approve,
        book.available_copies,
        Utc::now(),
    )?;
    let effects = match transition {
        BorrowTransition::Approved(effects) => effects,
        _ => unreachable!("approve action yields an approval"),
    };

    // The guarded writes re-check stock and status at commit time; a miss
    // means someone else decided first.
    let approved: BorrowRequest = borrow_repo
        .approve(
            request_id,
            request.book_id,
            admin.user_id(),
            effects.issue_date,
            effects.return_date,
        )
        .await?
        .ok_or_else(|| {
            ApiError::Conflict("No copies available or request already decided".to_string())
        })?
        .into();

    record_borrow_approved();
    info!(
        request_id = %approved.id,
        book_id = %approved.book_id,
        approved_by = %admin.user_id(),
        "Borrow request approved"
    );

    Ok((StatusCode::OK, Json(approved)))
}

/// Reject a pending request. Stock is untouched.
///
/// POST /api/v1/borrow-requests/{request_id}/reject
#[axum::debug_handler]
async fn reject_request(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
    admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = BorrowRequestRepository::new(state.pool.clone());

    let request = repo
        .find_by_id(request_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Borrow request not found".to_string()))?;

    borrow::request_transition(request.status.into(), BorrowAction::Reject, 0, Utc::now())?;

    let rejected: BorrowRequest = repo
        .reject(request_id, admin.user_id())
        .await?
        .ok_or_else(|| ApiError::Conflict("Request already decided".to_string()))?
        .into();

    info!(request_id = %rejected.id, "Borrow request rejected");

    Ok((StatusCode::OK, Json(rejected)))
}

/// Mark an issued book returned, restoring stock.
///
/// POST /api/v1/borrow-requests/{request_id}/return
#[axum::debug_handler]
async fn return_request(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = BorrowRequestRepository::new(state.pool.clone());

    let request = repo
        .find_by_id(request_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Borrow request not found".to_string()))?;

    borrow::request_transition(request.status.into(), BorrowAction::Return, 0, Utc::now())?;

    let returned: BorrowRequest = repo
        .mark_returned(request_id, request.book_id)
        .await?
        .ok_or_else(|| ApiError::Conflict("Request is not currently issued".to_string()))?
        .into();

    info!(
        request_id = %returned.id,
        book_id = %returned.book_id,
        "Book returned"
    );

    Ok((StatusCode::OK, Json(returned)))
}
