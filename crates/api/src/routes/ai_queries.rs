//! AI doubt-solving query route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use persistence::repositories::AiQueryRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::{AiQuery, CreateAiQueryRequest, TeacherResponseRequest};
use domain::workflow::ai_query;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AdminUser, CurrentUser};

/// Create AI query routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_query))
        .route("/mine", get(list_my_queries))
        .route("/forwarded", get(list_forwarded))
        .route("/:query_id/forward", post(forward_query))
        .route("/:query_id/respond", post(respond_to_query))
}

/// Record a doubt with the AI's answer, if one was produced.
///
/// POST /api/v1/ai-queries
#[axum::debug_handler]
async fn create_query(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<CreateAiQueryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let repo = AiQueryRepository::new(state.pool.clone());
    let query: AiQuery = repo
        .create(user.user_id(), &req.query, req.ai_response.as_deref())
        .await?
        .into();

    info!(
        query_id = %query.id,
        student_id = %query.student_id,
        "AI query recorded"
    );

    Ok((StatusCode::CREATED, Json(query)))
}

/// The caller's doubts, newest first.
///
/// GET /api/v1/ai-queries/mine
#[axum::debug_handler]
async fn list_my_queries(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = AiQueryRepository::new(state.pool.clone());
    let queries: Vec<AiQuery> = repo
        .list_for_student(user.user_id())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((StatusCode::OK, Json(queries)))
}

/// Escalate one of the caller's own doubts to a teacher.
///
/// POST /api/v1/ai-queries/{query_id}/forward
#[axum::debug_handler]
async fn forward_query(
    State(state): State<AppState>,
    Path(query_id): Path<Uuid>,
    user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = AiQueryRepository::new(state.pool.clone());
    let query: AiQuery = repo
        .forward(query_id, user.user_id())
        .await?
        .ok_or_else(|| ApiError::NotFound("Query not found".to_string()))?
        .into();

    info!(query_id = %query.id, "AI query forwarded to teacher");

    Ok((StatusCode::OK, Json(query)))
}

/// Doubts escalated to teachers and awaiting an answer.
///
/// GET /api/v1/ai-queries/forwarded
#[axum::debug_handler]
async fn list_forwarded(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = AiQueryRepository::new(state.pool.clone());
    let queries: Vec<AiQuery> = repo
        .list_forwarded()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((StatusCode::OK, Json(queries)))
}

/// Answer a forwarded doubt. Unforwarded queries are rejected.
///
/// POST /api/v1/ai-queries/{query_id}/respond
#[axum::debug_handler]
async fn respond_to_query(
    State(state): State<AppState>,
    Path(query_id): Path<Uuid>,
    admin: AdminUser,
    Json(req): Json<TeacherResponseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let repo = AiQueryRepository::new(state.pool.clone());
    let query: AiQuery = repo
        .find_by_id(query_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Query not found".to_string()))?
        .into();

    let update = ai_query::respond(&query, admin.user_id(), &req.response, Utc::now())?;

    let answered: AiQuery = repo
        .respond(
            query_id,
            update.teacher_id,
            &update.teacher_response,
            update.resolved_at,
        )
        .await?
        .ok_or_else(|| ApiError::Conflict("Query is no longer awaiting a response".to_string()))?
        .into();

    info!(
        query_id = %answered.id,
        teacher_id = %admin.user_id(),
        "Forwarded query answered"
    );

    Ok((StatusCode::OK, Json(answered)))
}
