//! Student roster and profile route handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use persistence::repositories::{StudentInput, StudentRepository};
use serde::{Deserialize, Serialize};
use shared::codes::generate_student_code;
use shared::paging::PageParams;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::{ClassRoom, CreateStudentRequest, Student, UpdateProfileRequest};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AdminUser, CurrentUser};

/// Create student roster routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_students).post(create_student))
        .route("/me", get(get_my_profile).put(update_my_profile))
        .route("/classes", get(list_classes))
        .route("/:student_id", get(get_student).delete(delete_student))
}

#[derive(Debug, Deserialize)]
struct ClassFilter {
    class_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
struct StudentListResponse {
    students: Vec<Student>,
    page: i64,
    per_page: i64,
    total: i64,
    total_pages: i64,
}

/// List active students, optionally scoped to one class.
///
/// GET /api/v1/students?class_id={uuid}
#[axum::debug_handler]
async fn list_students(
    State(state): State<AppState>,
    Query(filter): Query<ClassFilter>,
    Query(params): Query<PageParams>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = StudentRepository::new(state.pool.clone());
    let params = params.clamped();

    let total = repo.count_active(filter.class_id).await?;
    let entities = repo
        .list_active(filter.class_id, params.limit(), params.offset())
        .await?;
    let students: Vec<Student> = entities.into_iter().map(Into::into).collect();

    Ok((
        StatusCode::OK,
        Json(StudentListResponse {
            total_pages: params.total_pages(total),
            page: params.page,
            per_page: params.per_page,
            total,
            students,
        }),
    ))
}

/// Enroll a student. A registration code is generated when absent.
///
/// POST /api/v1/students
#[axum::debug_handler]
async fn create_student(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(req): Json<CreateStudentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let repo = StudentRepository::new(state.pool.clone());

    if let Some(class_id) = req.class_id {
        repo.find_class_by_id(class_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Class not found".to_string()))?;
    }

    let student_code = match &req.student_code {
        Some(code) if !code.trim().is_empty() => code.clone(),
        _ => generate_student_code(),
    };

    let input = StudentInput {
        student_code: &student_code,
        name: &req.name,
        dob: req.dob,
        class_id: req.class_id,
        roll_number: req.roll_number,
        fathers_name: req.fathers_name.as_deref(),
        mothers_name: req.mothers_name.as_deref(),
        address: req.address.as_deref(),
        email: req.email.as_deref(),
        phone: req.phone.as_deref(),
        bio: req.bio.as_deref(),
    };
    let student: Student = repo.create(&input).await?.into();

    info!(
        student_id = %student.id,
        student_code = %student.student_code,
        "Student enrolled"
    );

    Ok((StatusCode::CREATED, Json(student)))
}

/// Get a student record.
///
/// GET /api/v1/students/{student_id}
#[axum::debug_handler]
async fn get_student(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = StudentRepository::new(state.pool.clone());
    let student: Student = repo
        .find_by_id(student_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?
        .into();

    Ok((StatusCode::OK, Json(student)))
}

/// Remove a student from the roster.
///
/// DELETE /api/v1/students/{student_id}
#[axum::debug_handler]
async fn delete_student(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = StudentRepository::new(state.pool.clone());
    if !repo.deactivate(student_id).await? {
        return Err(ApiError::NotFound("Student not found".to_string()));
    }

    info!(student_id = %student_id, "Student removed from roster");

    Ok(StatusCode::NO_CONTENT)
}

/// The caller's own student record.
///
/// GET /api/v1/students/me
#[axum::debug_handler]
async fn get_my_profile(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = StudentRepository::new(state.pool.clone());
    let student: Student = repo
        .find_by_id(user.user_id())
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?
        .into();

    Ok((StatusCode::OK, Json(student)))
}

/// Self-service profile edit. Only bio, email and phone are writable.
///
/// PUT /api/v1/students/me
#[axum::debug_handler]
async fn update_my_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let repo = StudentRepository::new(state.pool.clone());
    let student: Student = repo
        .update_profile(
            user.user_id(),
            req.bio.as_deref(),
            req.email.as_deref(),
            req.phone.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?
        .into();

    info!(student_id = %student.id, "Profile updated");

    Ok((StatusCode::OK, Json(student)))
}

/// List all classes.
///
/// GET /api/v1/students/classes
#[axum::debug_handler]
async fn list_classes(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = StudentRepository::new(state.pool.clone());
    let classes: Vec<ClassRoom> = repo
        .list_classes()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((StatusCode::OK, Json(classes)))
}
