//! Class messaging domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Who sent a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderKind {
    Student,
    Admin,
}

/// Whether a message is a class post or a school-wide broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Group,
    Broadcast,
}

/// One message in a class feed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub sender_type: SenderKind,
    pub class_id: Uuid,
    pub message_type: MessageKind,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

/// Request to post a message to one class feed.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct SendMessageRequest {
    pub class_id: Uuid,
    #[validate(length(min = 1, max = 2000, message = "Message content is required"))]
    pub content: String,
}

/// Admin request to broadcast a message to every class.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct SendBroadcastRequest {
    #[validate(length(min = 1, max = 2000, message = "Message content is required"))]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_send_message_requires_content() {
        let req = SendMessageRequest {
            class_id: Uuid::new_v4(),
            content: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_kinds_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&MessageKind::Broadcast).unwrap(),
            "\"broadcast\""
        );
        assert_eq!(
            serde_json::to_string(&SenderKind::Admin).unwrap(),
            "\"admin\""
        );
    }
}
