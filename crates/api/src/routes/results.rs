//! Exam result route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use persistence::repositories::{ExamResultRepository, StudentRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::{CreateResultRequest, ExamResult};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AdminUser, CurrentUser};

/// Create exam result routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(record_result))
        .route("/mine", get(list_my_results))
        .route("/student/:student_id", get(list_student_results))
        .route("/:result_id", delete(delete_result))
}

/// Record a result. Re-recording the same (student, subject, term)
/// replaces the earlier marks.
///
/// POST /api/v1/results
#[axum::debug_handler]
async fn record_result(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(req): Json<CreateResultRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let student_repo = StudentRepository::new(state.pool.clone());
    student_repo
        .find_by_id(req.student_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;

    let repo = ExamResultRepository::new(state.pool.clone());
    let result: ExamResult = repo
        .upsert(
            req.student_id,
            &req.subject,
            &req.term,
            req.marks,
            req.max_marks,
            &req.effective_grade(),
            req.exam_date,
            admin.user_id(),
        )
        .await?
        .into();

    info!(
        result_id = %result.id,
        student_id = %result.student_id,
        subject = %result.subject,
        term = %result.term,
        "Exam result recorded"
    );

    Ok((StatusCode::CREATED, Json(result)))
}

/// The caller's own results.
///
/// GET /api/v1/results/mine
#[axum::debug_handler]
async fn list_my_results(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = ExamResultRepository::new(state.pool.clone());
    let results: Vec<ExamResult> = repo
        .list_for_student(user.user_id())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((StatusCode::OK, Json(results)))
}

/// All results for one student.
///
/// GET /api/v1/results/student/{student_id}
#[axum::debug_handler]
async fn list_student_results(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = ExamResultRepository::new(state.pool.clone());
    let results: Vec<ExamResult> = repo
        .list_for_student(student_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((StatusCode::OK, Json(results)))
}

/// Remove a recorded result.
///
/// DELETE /api/v1/results/{result_id}
#[axum::debug_handler]
async fn delete_result(
    State(state): State<AppState>,
    Path(result_id): Path<Uuid>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = ExamResultRepository::new(state.pool.clone());
    if !repo.delete(result_id).await? {
        return Err(ApiError::NotFound("Result not found".to_string()));
    }

    info!(result_id = %result_id, "Exam result removed");

    Ok(StatusCode::NO_CONTENT)
}
