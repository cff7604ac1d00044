//! Notice board route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use chrono::Utc;
use persistence::entities::NoticePriorityDb;
use persistence::repositories::{NoticeRepository, StudentRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::{CreateNoticeRequest, Notice};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AdminUser, CurrentUser};

/// Create notice board routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notices).post(create_notice))
        .route("/:notice_id", delete(delete_notice))
}

/// Unexpired notices visible to the caller. Students see school-wide
/// notices plus those targeting their class.
///
/// GET /api/v1/notices
#[axum::debug_handler]
async fn list_notices(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let notice_repo = NoticeRepository::new(state.pool.clone());
    let student_repo = StudentRepository::new(state.pool.clone());

    let class_id = student_repo
        .find_by_id(user.user_id())
        .await?
        .and_then(|s| s.class_id);

    let notices: Vec<Notice> = notice_repo
        .list_visible(class_id, Utc::now())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((StatusCode::OK, Json(notices)))
}

/// Publish a notice.
///
/// POST /api/v1/notices
#[axum::debug_handler]
async fn create_notice(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(req): Json<CreateNoticeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let repo = NoticeRepository::new(state.pool.clone());
    let notice: Notice = repo
        .create(
            &req.title,
            &req.content,
            NoticePriorityDb::from(req.priority),
            req.target_class,
            req.file_url.as_deref(),
            req.expiry_date,
            admin.user_id(),
        )
        .await?
        .into();

    info!(
        notice_id = %notice.id,
        priority = ?notice.priority,
        "Notice published"
    );

    Ok((StatusCode::CREATED, Json(notice)))
}

/// Take a notice down.
///
/// DELETE /api/v1/notices/{notice_id}
#[axum::debug_handler]
async fn delete_notice(
    State(state): State<AppState>,
    Path(notice_id): Path<Uuid>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = NoticeRepository::new(state.pool.clone());
    if !repo.deactivate(notice_id).await? {
        return Err(ApiError::NotFound("Notice not found".to_string()));
    }

    info!(notice_id = %notice_id, "Notice taken down");

    Ok(StatusCode::NO_CONTENT)
}
