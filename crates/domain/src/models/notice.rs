//! Notice board domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Priority band for a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticePriority {
    Low,
    Medium,
    High,
}

impl Default for NoticePriority {
    fn default() -> Self {
        NoticePriority::Medium
    }
}

/// A published notice.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Notice {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub priority: NoticePriority,
    /// None targets the whole school.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_class: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    pub publish_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_by: Uuid,
}

impl Notice {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expiry_date, Some(expiry) if expiry < now)
    }
}

/// Admin request to publish or update a notice.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateNoticeRequest {
    #[validate(length(min = 1, max = 300, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, max = 10_000, message = "Content is required"))]
    pub content: String,
    #[serde(default)]
    pub priority: NoticePriority,
    pub target_class: Option<Uuid>,
    pub file_url: Option<String>,
    pub expiry_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_priority_default() {
        let req: CreateNoticeRequest =
            serde_json::from_str(r#"{"title":"Sports day","content":"Friday"}"#).unwrap();
        assert_eq!(req.priority, NoticePriority::Medium);
    }

    #[test]
    fn test_expiry() {
        let now = Utc::now();
        let notice = Notice {
            id: Uuid::new_v4(),
            title: "t".into(),
            content: "c".into(),
            priority: NoticePriority::High,
            target_class: None,
            file_url: None,
            publish_date: now - Duration::days(10),
            expiry_date: Some(now - Duration::days(1)),
            is_active: true,
            created_by: Uuid::new_v4(),
        };
        assert!(notice.is_expired(now));
    }
}
