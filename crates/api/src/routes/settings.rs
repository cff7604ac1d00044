//! School settings route handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use persistence::repositories::SettingsRepository;
use tracing::info;
use validator::Validate;

use domain::models::{SchoolSettings, UpdateSettingsRequest};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AdminUser, CurrentUser};

/// Create settings routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_settings).put(update_settings))
}

/// Current school settings.
///
/// GET /api/v1/settings
#[axum::debug_handler]
async fn get_settings(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = SettingsRepository::new(state.pool.clone());
    let settings: SchoolSettings = repo
        .get()
        .await?
        .ok_or_else(|| ApiError::NotFound("Settings not configured".to_string()))?
        .into();

    Ok((StatusCode::OK, Json(settings)))
}

/// Save school settings. The single row is created on first save.
///
/// PUT /api/v1/settings
#[axum::debug_handler]
async fn update_settings(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(req): Json<UpdateSettingsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let repo = SettingsRepository::new(state.pool.clone());
    let settings: SchoolSettings = repo
        .upsert(
            &req.school_name,
            &req.academic_year,
            req.max_books_per_student,
            req.homework_submission_days,
            req.ai_provider_key.as_deref(),
            admin.user_id(),
        )
        .await?
        .into();

    info!(
        school_name = %settings.school_name,
        academic_year = %settings.academic_year,
        updated_by = %admin.user_id(),
        "School settings saved"
    );

    Ok((StatusCode::OK, Json(settings)))
}
