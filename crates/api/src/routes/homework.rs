//! Homework assignment and submission route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use persistence::repositories::{HomeworkRepository, StudentRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::{CreateHomeworkRequest, GradeSubmissionRequest, Homework, Submission,
    SubmitHomeworkRequest};
use domain::workflow::grading;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AdminUser, CurrentUser};
use crate::middleware::metrics::record_homework_submitted;

/// Create homework routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_homework).post(create_homework))
        .route("/:homework_id", axum::routing::delete(delete_homework))
        .route("/:homework_id/submissions", get(list_submissions))
        .route("/submissions", post(submit_homework))
        .route("/submissions/mine", get(list_my_submissions))
        .route("/submissions/:submission_id/grade", post(grade_submission))
}

/// Assignments visible to the caller. Students see their own class plus
/// school-wide assignments; admins see school-wide ones.
///
/// GET /api/v1/homework
#[axum::debug_handler]
async fn list_homework(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let homework_repo = HomeworkRepository::new(state.pool.clone());
    let student_repo = StudentRepository::new(state.pool.clone());

    let class_id = student_repo
        .find_by_id(user.user_id())
        .await?
        .and_then(|s| s.class_id);

    let homework: Vec<Homework> = homework_repo
        .list_active_for_class(class_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((StatusCode::OK, Json(homework)))
}

/// Publish a homework assignment.
///
/// POST /api/v1/homework
#[axum::debug_handler]
async fn create_homework(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(req): Json<CreateHomeworkRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let repo = HomeworkRepository::new(state.pool.clone());
    let homework: Homework = repo
        .create(
            &req.title,
            req.description.as_deref(),
            &req.subject,
            req.class_id,
            req.deadline,
            req.attachment_url.as_deref(),
            admin.user_id(),
        )
        .await?
        .into();

    info!(
        homework_id = %homework.id,
        subject = %homework.subject,
        deadline = %homework.deadline,
        "Homework published"
    );

    Ok((StatusCode::CREATED, Json(homework)))
}

/// Withdraw an assignment.
///
/// DELETE /api/v1/homework/{homework_id}
#[axum::debug_handler]
async fn delete_homework(
    State(state): State<AppState>,
    Path(homework_id): Path<Uuid>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = HomeworkRepository::new(state.pool.clone());
    if !repo.deactivate(homework_id).await? {
        return Err(ApiError::NotFound("Homework not found".to_string()));
    }

    info!(homework_id = %homework_id, "Homework withdrawn");

    Ok(StatusCode::NO_CONTENT)
}

/// Hand in work for an assignment. The deadline is enforced here; late
/// submissions get a 409.
///
/// POST /api/v1/homework/submissions
#[axum::debug_handler]
async fn submit_homework(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<SubmitHomeworkRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let repo = HomeworkRepository::new(state.pool.clone());
    let homework = repo
        .find_by_id(req.homework_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Homework not found".to_string()))?;
    if !homework.is_active {
        return Err(ApiError::NotFound("Homework not found".to_string()));
    }
    if Utc::now() > homework.deadline {
        return Err(ApiError::Conflict("The deadline has passed".to_string()));
    }

    let submission: Submission = repo
        .submit(
            req.homework_id,
            user.user_id(),
            req.content.as_deref(),
            req.attachment_url.as_deref(),
        )
        .await?
        .into();

    record_homework_submitted();
    info!(
        submission_id = %submission.id,
        homework_id = %submission.homework_id,
        student_id = %submission.student_id,
        "Homework submitted"
    );

    Ok((StatusCode::CREATED, Json(submission)))
}

/// All submissions for one assignment.
///
/// GET /api/v1/homework/{homework_id}/submissions
#[axum::debug_handler]
async fn list_submissions(
    State(state): State<AppState>,
    Path(homework_id): Path<Uuid>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = HomeworkRepository::new(state.pool.clone());
    repo.find_by_id(homework_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Homework not found".to_string()))?;

    let submissions: Vec<Submission> = repo
        .list_submissions_for_homework(homework_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((StatusCode::OK, Json(submissions)))
}

/// The caller's own submissions, newest first.
///
/// GET /api/v1/homework/submissions/mine
#[axum::debug_handler]
async fn list_my_submissions(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = HomeworkRepository::new(state.pool.clone());
    let submissions: Vec<Submission> = repo
        .list_submissions_for_student(user.user_id())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((StatusCode::OK, Json(submissions)))
}

/// Grade a submission. Re-grading overwrites the previous grade.
///
/// POST /api/v1/homework/submissions/{submission_id}/grade
#[axum::debug_handler]
async fn grade_submission(
    State(state): State<AppState>,
    Path(submission_id): Path<Uuid>,
    admin: AdminUser,
    Json(req): Json<GradeSubmissionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let repo = HomeworkRepository::new(state.pool.clone());
    repo.find_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Submission not found".to_string()))?;

    let update =
        grading::grade_submission(req.grade, req.feedback.clone(), admin.user_id(), Utc::now())?;

    let graded: Submission = repo
        .grade(
            submission_id,
            update.grade,
            update.feedback.as_deref(),
            update.graded_by,
            update.graded_at,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Submission not found".to_string()))?
        .into();

    info!(
        submission_id = %graded.id,
        grade = graded.grade,
        graded_by = %admin.user_id(),
        "Submission graded"
    );

    Ok((StatusCode::OK, Json(graded)))
}
