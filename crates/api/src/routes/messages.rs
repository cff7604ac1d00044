//! Class messaging route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use persistence::entities::{MessageKindDb, SenderKindDb};
use persistence::repositories::{MessageRepository, StudentRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::{Message, SendBroadcastRequest, SendMessageRequest, UserRole};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AdminUser, CurrentUser};

/// Create messaging routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(send_message))
        .route("/broadcast", post(send_broadcast))
        .route("/:class_id", get(class_feed))
}

/// Post to a class feed. Students may only post to their own class.
///
/// POST /api/v1/messages
#[axum::debug_handler]
async fn send_message(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let sender_type = match user.0.role {
        UserRole::Admin => SenderKindDb::Admin,
        UserRole::Student => {
            let student_repo = StudentRepository::new(state.pool.clone());
            let student = student_repo
                .find_by_id(user.user_id())
                .await?
                .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;
            if student.class_id != Some(req.class_id) {
                return Err(ApiError::Forbidden(
                    "Students may only post to their own class".to_string(),
                ));
            }
            SenderKindDb::Student
        }
    };

    let repo = MessageRepository::new(state.pool.clone());
    let message: Message = repo
        .create(
            user.user_id(),
            sender_type,
            req.class_id,
            MessageKindDb::Group,
            &req.content,
        )
        .await?
        .into();

    info!(
        message_id = %message.id,
        class_id = %message.class_id,
        "Message posted"
    );

    Ok((StatusCode::CREATED, Json(message)))
}

/// Broadcast a message to every class feed.
///
/// POST /api/v1/messages/broadcast
#[axum::debug_handler]
async fn send_broadcast(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(req): Json<SendBroadcastRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let repo = MessageRepository::new(state.pool.clone());
    let messages: Vec<Message> = repo
        .create_broadcast(admin.user_id(), &req.content)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    info!(
        sender_id = %admin.user_id(),
        class_count = messages.len(),
        "Broadcast sent"
    );

    Ok((StatusCode::CREATED, Json(messages)))
}

/// Recent messages for one class, oldest first.
///
/// GET /api/v1/messages/{class_id}
#[axum::debug_handler]
async fn class_feed(
    State(state): State<AppState>,
    Path(class_id): Path<Uuid>,
    user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    if !user.0.is_admin() {
        let student_repo = StudentRepository::new(state.pool.clone());
        let student = student_repo
            .find_by_id(user.user_id())
            .await?
            .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;
        if student.class_id != Some(class_id) {
            return Err(ApiError::Forbidden(
                "Students may only read their own class feed".to_string(),
            ));
        }
    }

    let repo = MessageRepository::new(state.pool.clone());
    let messages: Vec<Message> = repo
        .recent_for_class(class_id, state.config.messaging.feed_limit)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((StatusCode::OK, Json(messages)))
}
