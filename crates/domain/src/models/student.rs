//! Student and class roster domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A class (section) students belong to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ClassRoom {
    pub id: Uuid,
    pub class_number: i32,
    pub section: String,
}

/// A student record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Student {
    pub id: Uuid,
    /// Registration number printed on report cards.
    pub student_code: String,
    pub name: String,
    pub dob: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<Uuid>,
    pub roll_number: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fathers_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mothers_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Admin request to enroll a student.
///
/// When `student_code` is absent one is generated (year + 7 random digits).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateStudentRequest {
    pub student_code: Option<String>,
    #[validate(length(min = 1, max = 120, message = "Name is required"))]
    pub name: String,
    pub dob: NaiveDate,
    pub class_id: Option<Uuid>,
    #[serde(default)]
    pub roll_number: i32,
    pub fathers_name: Option<String>,
    pub mothers_name: Option<String>,
    pub address: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
}

/// Student self-service profile edit (bio/email/phone only).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateProfileRequest {
    #[validate(length(max = 500))]
    pub bio: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;

    #[test]
    fn test_create_student_validates() {
        let req = CreateStudentRequest {
            student_code: None,
            name: Name().fake(),
            dob: NaiveDate::from_ymd_opt(2012, 4, 1).unwrap(),
            class_id: None,
            roll_number: 12,
            fathers_name: None,
            mothers_name: None,
            address: None,
            email: Some(SafeEmail().fake()),
            phone: None,
            bio: None,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_student_rejects_bad_email() {
        let req = CreateStudentRequest {
            student_code: None,
            name: "Asha".into(),
            dob: NaiveDate::from_ymd_opt(2011, 9, 3).unwrap(),
            class_id: None,
            roll_number: 1,
            fathers_name: None,
            mothers_name: None,
            address: None,
            email: Some("not-an-email".into()),
            phone: None,
            bio: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_profile_edit_limits_bio() {
        let req = UpdateProfileRequest {
            bio: Some("x".repeat(501)),
            email: None,
            phone: None,
        };
        assert!(req.validate().is_err());
    }
}
