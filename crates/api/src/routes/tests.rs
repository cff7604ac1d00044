//! Online test and timed session route handlers.
//!
//! Session state lives in the in-process registry; only finished attempts
//! reach the database.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use chrono::Utc;
use persistence::repositories::{StudentRepository, TestRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::{AnswerRequest, CreateTestRequest, Test, TestAttempt, TestSummary};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AdminUser, CurrentUser};

/// Create test routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tests).post(create_test))
        .route("/:test_id", delete(delete_test))
        .route("/:test_id/attempts", get(list_attempts))
        .route("/:test_id/session", post(start_session).get(session_status))
        .route("/:test_id/session/answers", post(record_answer))
        .route("/:test_id/session/submit", post(submit_session))
        .route("/attempts/mine", get(list_my_attempts))
}

/// Schedule a test.
///
/// POST /api/v1/tests
#[axum::debug_handler]
async fn create_test(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(req): Json<CreateTestRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;
    if req.end_time <= req.start_time {
        return Err(ApiError::Validation(
            "End time must be after start time".to_string(),
        ));
    }

    let repo = TestRepository::new(state.pool.clone());
    let test: Test = repo
        .create(
            &req.title,
            &req.subject,
            req.class_id,
            &req.questions,
            req.duration_minutes,
            req.start_time,
            req.end_time,
            admin.user_id(),
        )
        .await?
        .into();

    info!(
        test_id = %test.id,
        subject = %test.subject,
        question_count = test.questions.len(),
        "Test scheduled"
    );

    Ok((StatusCode::CREATED, Json(test)))
}

/// Tests visible to the caller, without the answer key.
///
/// GET /api/v1/tests
#[axum::debug_handler]
async fn list_tests(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let test_repo = TestRepository::new(state.pool.clone());
    let student_repo = StudentRepository::new(state.pool.clone());

    let class_id = student_repo
        .find_by_id(user.user_id())
        .await?
        .and_then(|s| s.class_id);

    let summaries: Vec<TestSummary> = test_repo
        .list_active_for_class(class_id)
        .await?
        .into_iter()
        .map(|entity| {
            let test: Test = entity.into();
            TestSummary::from(&test)
        })
        .collect();

    Ok((StatusCode::OK, Json(summaries)))
}

/// Cancel a scheduled test.
///
/// DELETE /api/v1/tests/{test_id}
#[axum::debug_handler]
async fn delete_test(
    State(state): State<AppState>,
    Path(test_id): Path<Uuid>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = TestRepository::new(state.pool.clone());
    if !repo.deactivate(test_id).await? {
        return Err(ApiError::NotFound("Test not found".to_string()));
    }

    info!(test_id = %test_id, "Test cancelled");

    Ok(StatusCode::NO_CONTENT)
}

/// Begin a timed session for a test.
///
/// POST /api/v1/tests/{test_id}/session
#[axum::debug_handler]
async fn start_session(
    State(state): State<AppState>,
    Path(test_id): Path<Uuid>,
    user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = TestRepository::new(state.pool.clone());
    let test: Test = repo
        .find_by_id(test_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Test not found".to_string()))?
        .into();

    if !test.is_open(Utc::now()) {
        return Err(ApiError::Conflict("The test window is closed".to_string()));
    }

    let already_attempted = repo.attempt_exists(test_id, user.user_id()).await?;
    let status = state
        .sessions
        .start(&test, user.user_id(), already_attempted, repo.clone())
        .await?;

    Ok((StatusCode::CREATED, Json(status)))
}

/// Remaining time and answer count for the caller's live session.
///
/// GET /api/v1/tests/{test_id}/session
#[axum::debug_handler]
async fn session_status(
    State(state): State<AppState>,
    Path(test_id): Path<Uuid>,
    user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let status = state.sessions.status(test_id, user.user_id()).await?;

    Ok((StatusCode::OK, Json(status)))
}

/// Record an answer in the caller's live session. Answering the same
/// question again replaces the earlier choice.
///
/// POST /api/v1/tests/{test_id}/session/answers
#[axum::debug_handler]
async fn record_answer(
    State(state): State<AppState>,
    Path(test_id): Path<Uuid>,
    user: CurrentUser,
    Json(req): Json<AnswerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let status = state
        .sessions
        .record_answer(test_id, user.user_id(), req.question_index, req.selected_option)
        .await?;

    Ok((StatusCode::OK, Json(status)))
}

/// Submit the caller's live session for scoring.
///
/// POST /api/v1/tests/{test_id}/session/submit
#[axum::debug_handler]
async fn submit_session(
    State(state): State<AppState>,
    Path(test_id): Path<Uuid>,
    user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = TestRepository::new(state.pool.clone());
    let attempt = state.sessions.submit(test_id, user.user_id(), &repo).await?;

    Ok((StatusCode::OK, Json(attempt)))
}

/// The caller's finished attempts.
///
/// GET /api/v1/tests/attempts/mine
#[axum::debug_handler]
async fn list_my_attempts(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = TestRepository::new(state.pool.clone());
    let attempts: Vec<TestAttempt> = repo
        .list_attempts_for_student(user.user_id())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((StatusCode::OK, Json(attempts)))
}

/// All attempts for one test.
///
/// GET /api/v1/tests/{test_id}/attempts
#[axum::debug_handler]
async fn list_attempts(
    State(state): State<AppState>,
    Path(test_id): Path<Uuid>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = TestRepository::new(state.pool.clone());
    let attempts: Vec<TestAttempt> = repo
        .list_attempts_for_test(test_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((StatusCode::OK, Json(attempts)))
}
