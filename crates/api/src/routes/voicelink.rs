//! Counselling (voice link) request route handlers.
//!
//! Decisions consult the transition table first and then run a guarded
//! status swap, so a stale status turns into a 409.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use persistence::entities::VoiceLinkStatusDb;
use persistence::repositories::VoiceLinkRepository;
use serde::Deserialize;
use shared::paging::PageParams;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::{CreateVoiceLinkRequest, ScheduleDetails, VoiceLinkRequest, VoiceLinkStatus};
use domain::workflow::voicelink::{self, VoiceLinkAction};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AdminUser, CurrentUser};

/// Create counselling request routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_requests).post(create_request))
        .route("/mine", get(list_my_requests))
        .route("/:request_id/approve", post(approve_request))
        .route("/:request_id/reject", post(reject_request))
        .route("/:request_id/complete", post(complete_request))
}

#[derive(Debug, Deserialize)]
struct StatusFilter {
    status: Option<String>,
}

/// Open a counselling request.
///
/// POST /api/v1/voicelink
#[axum::debug_handler]
async fn create_request(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<CreateVoiceLinkRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let repo = VoiceLinkRepository::new(state.pool.clone());
    let request: VoiceLinkRequest = repo
        .create(user.user_id(), &req.request_type, req.reason.as_deref())
        .await?
        .into();

    info!(
        request_id = %request.id,
        student_id = %request.student_id,
        request_type = %request.request_type,
        "Counselling request opened"
    );

    Ok((StatusCode::CREATED, Json(request)))
}

/// The caller's counselling requests, newest first.
///
/// GET /api/v1/voicelink/mine
#[axum::debug_handler]
async fn list_my_requests(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = VoiceLinkRepository::new(state.pool.clone());
    let requests: Vec<VoiceLinkRequest> = repo
        .list_for_student(user.user_id())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((StatusCode::OK, Json(requests)))
}

/// All counselling requests, optionally filtered by status.
///
/// GET /api/v1/voicelink?status=pending
#[axum::debug_handler]
async fn list_requests(
    State(state): State<AppState>,
    Query(filter): Query<StatusFilter>,
    Query(params): Query<PageParams>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = VoiceLinkRepository::new(state.pool.clone());

    let status_filter = filter.status.as_deref().and_then(|s| match s {
        "pending" => Some(VoiceLinkStatusDb::Pending),
        "approved" => Some(VoiceLinkStatusDb::Approved),
        "completed" => Some(VoiceLinkStatusDb::Completed),
        "rejected" => Some(VoiceLinkStatusDb::Rejected),
        _ => None,
    });

    let page = params.clamped();
    let requests: Vec<VoiceLinkRequest> = repo
        .list_all(status_filter, page.limit(), page.offset())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((StatusCode::OK, Json(requests)))
}

async fn decide(
    state: AppState,
    request_id: Uuid,
    counsellor_id: Uuid,
    action: VoiceLinkAction,
    details: ScheduleDetails,
) -> Result<VoiceLinkRequest, ApiError> {
    let repo = VoiceLinkRepository::new(state.pool.clone());

    let request = repo
        .find_by_id(request_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Counselling request not found".to_string()))?;

    let current: VoiceLinkStatus = request.status.into();
    let next = voicelink::request_transition(current, action)?;
    let details = if voicelink::schedule_applies(action, &details) {
        details
    } else {
        ScheduleDetails::default()
    };

    // The guarded swap re-checks the status at commit time; a miss means
    // someone else decided first.
    let updated: VoiceLinkRequest = repo
        .transition(
            request_id,
            current.into(),
            next.into(),
            counsellor_id,
            details.scheduled_time,
            details.meeting_link.as_deref(),
            details.notes.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::Conflict("Request already decided".to_string()))?
        .into();

    info!(
        request_id = %updated.id,
        status = %updated.status,
        counsellor_id = %counsellor_id,
        "Counselling request updated"
    );

    Ok(updated)
}

/// Approve a request, optionally attaching scheduling details.
///
/// POST /api/v1/voicelink/{request_id}/approve
#[axum::debug_handler]
async fn approve_request(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
    admin: AdminUser,
    details: Option<Json<ScheduleDetails>>,
) -> Result<impl IntoResponse, ApiError> {
    let details = details.map(|Json(d)| d).unwrap_or_default();
    let updated = decide(
        state,
        request_id,
        admin.user_id(),
        VoiceLinkAction::Approve,
        details,
    )
    .await?;

    Ok((StatusCode::OK, Json(updated)))
}

/// Reject a pending or approved request.
///
/// POST /api/v1/voicelink/{request_id}/reject
#[axum::debug_handler]
async fn reject_request(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
    admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let updated = decide(
        state,
        request_id,
        admin.user_id(),
        VoiceLinkAction::Reject,
        ScheduleDetails::default(),
    )
    .await?;

    Ok((StatusCode::OK, Json(updated)))
}

/// Mark an approved session as held.
///
/// POST /api/v1/voicelink/{request_id}/complete
#[axum::debug_handler]
async fn complete_request(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
    admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let updated = decide(
        state,
        request_id,
        admin.user_id(),
        VoiceLinkAction::Complete,
        ScheduleDetails::default(),
    )
    .await?;

    Ok((StatusCode::OK, Json(updated)))
}
