//! Attendance route handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use persistence::repositories::{AttendanceRepository, StudentRepository};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::{AttendanceRecord, BulkMarkRequest, MarkAttendanceRequest};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AdminUser, CurrentUser};

/// Create attendance routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(mark_attendance))
        .route("/class", post(mark_class_attendance))
        .route("/mine", get(list_my_attendance))
        .route("/student/:student_id", get(list_student_attendance))
        .route("/class/:class_id", get(list_class_attendance))
}

#[derive(Debug, Deserialize)]
struct DateRange {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
struct DateFilter {
    date: NaiveDate,
}

#[derive(Debug, Serialize)]
struct BulkMarkResponse {
    marked: i64,
}

/// Mark one student present or absent. Re-marking the same
/// (student, date, subject) replaces the earlier value.
///
/// POST /api/v1/attendance
#[axum::debug_handler]
async fn mark_attendance(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(req): Json<MarkAttendanceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let student_repo = StudentRepository::new(state.pool.clone());
    student_repo
        .find_by_id(req.student_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;

    let repo = AttendanceRepository::new(state.pool.clone());
    let record: AttendanceRecord = repo
        .mark(
            req.student_id,
            req.date,
            &req.subject,
            req.is_present,
            admin.user_id(),
        )
        .await?
        .into();

    info!(
        student_id = %record.student_id,
        date = %record.date,
        is_present = record.is_present,
        "Attendance marked"
    );

    Ok((StatusCode::CREATED, Json(record)))
}

/// Mark every active student in a class at once.
///
/// POST /api/v1/attendance/class
#[axum::debug_handler]
async fn mark_class_attendance(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(req): Json<BulkMarkRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let student_repo = StudentRepository::new(state.pool.clone());
    student_repo
        .find_class_by_id(req.class_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Class not found".to_string()))?;

    let repo = AttendanceRepository::new(state.pool.clone());
    let marked = repo
        .mark_class(
            req.class_id,
            req.date,
            &req.subject,
            req.is_present,
            admin.user_id(),
        )
        .await?;

    info!(
        class_id = %req.class_id,
        date = %req.date,
        marked,
        "Class attendance marked"
    );

    Ok((StatusCode::CREATED, Json(BulkMarkResponse { marked })))
}

/// The caller's own attendance, optionally bounded by ?from and ?to.
///
/// GET /api/v1/attendance/mine
#[axum::debug_handler]
async fn list_my_attendance(
    State(state): State<AppState>,
    Query(range): Query<DateRange>,
    user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = AttendanceRepository::new(state.pool.clone());
    let records: Vec<AttendanceRecord> = repo
        .list_for_student(user.user_id(), range.from, range.to)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((StatusCode::OK, Json(records)))
}

/// One student's attendance history.
///
/// GET /api/v1/attendance/student/{student_id}
#[axum::debug_handler]
async fn list_student_attendance(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
    Query(range): Query<DateRange>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = AttendanceRepository::new(state.pool.clone());
    let records: Vec<AttendanceRecord> = repo
        .list_for_student(student_id, range.from, range.to)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((StatusCode::OK, Json(records)))
}

/// A class register for one day.
///
/// GET /api/v1/attendance/class/{class_id}?date=2026-03-01
#[axum::debug_handler]
async fn list_class_attendance(
    State(state): State<AppState>,
    Path(class_id): Path<Uuid>,
    Query(filter): Query<DateFilter>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = AttendanceRepository::new(state.pool.clone());
    let records: Vec<AttendanceRecord> = repo
        .list_for_class_on(class_id, filter.date)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((StatusCode::OK, Json(records)))
}
