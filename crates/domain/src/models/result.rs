//! Exam result domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A recorded exam result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ExamResult {
    pub id: Uuid,
    pub student_id: Uuid,
    pub subject: String,
    pub term: String,
    pub marks: i32,
    pub max_marks: i32,
    pub grade: String,
    pub exam_date: NaiveDate,
    pub created_by: Uuid,
}

/// Admin request to record or update a result.
///
/// When `grade` is absent it is derived from the percentage bands.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
#[validate(schema(function = "marks_within_maximum"))]
pub struct CreateResultRequest {
    pub student_id: Uuid,
    #[validate(
        length(min = 1, max = 100, message = "Subject is required"),
        custom(function = "shared::validation::validate_non_blank")
    )]
    pub subject: String,
    #[validate(
        length(min = 1, max = 60, message = "Term is required"),
        custom(function = "shared::validation::validate_non_blank")
    )]
    pub term: String,
    pub marks: i32,
    #[serde(default = "default_max_marks")]
    pub max_marks: i32,
    pub grade: Option<String>,
    pub exam_date: NaiveDate,
}

fn default_max_marks() -> i32 {
    100
}

fn marks_within_maximum(req: &CreateResultRequest) -> Result<(), ValidationError> {
    shared::validation::validate_marks(req.marks, req.max_marks)
}

impl CreateResultRequest {
    /// The grade to store: explicit if supplied, derived otherwise.
    pub fn effective_grade(&self) -> String {
        match &self.grade {
            Some(grade) if !grade.trim().is_empty() => grade.clone(),
            _ => letter_grade(self.marks, self.max_marks).to_string(),
        }
    }
}

/// Maps a mark to the school's letter-grade bands.
pub fn letter_grade(marks: i32, max_marks: i32) -> &'static str {
    if max_marks <= 0 {
        return "F";
    }
    let percentage = (marks as f64 / max_marks as f64) * 100.0;
    if percentage >= 90.0 {
        "A+"
    } else if percentage >= 80.0 {
        "A"
    } else if percentage >= 70.0 {
        "B+"
    } else if percentage >= 60.0 {
        "B"
    } else if percentage >= 50.0 {
        "C+"
    } else if percentage >= 40.0 {
        "C"
    } else if percentage >= 33.0 {
        "D"
    } else {
        "F"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_grade_bands() {
        assert_eq!(letter_grade(95, 100), "A+");
        assert_eq!(letter_grade(90, 100), "A+");
        assert_eq!(letter_grade(89, 100), "A");
        assert_eq!(letter_grade(70, 100), "B+");
        assert_eq!(letter_grade(60, 100), "B");
        assert_eq!(letter_grade(50, 100), "C+");
        assert_eq!(letter_grade(40, 100), "C");
        assert_eq!(letter_grade(33, 100), "D");
        assert_eq!(letter_grade(32, 100), "F");
        assert_eq!(letter_grade(10, 0), "F");
    }

    fn request(marks: i32, max_marks: i32) -> CreateResultRequest {
        CreateResultRequest {
            student_id: Uuid::new_v4(),
            subject: "Maths".into(),
            term: "Term 1".into(),
            marks,
            max_marks,
            grade: None,
            exam_date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
        }
    }

    #[test]
    fn test_marks_must_stay_within_maximum() {
        assert!(request(100, 100).validate().is_ok());
        assert!(request(0, 100).validate().is_ok());
        assert!(request(150, 100).validate().is_err());
        assert!(request(-5, 100).validate().is_err());
        assert!(request(10, 0).validate().is_err());
    }

    #[test]
    fn test_blank_subject_rejected() {
        let mut req = request(50, 100);
        req.subject = "   ".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_effective_grade_prefers_explicit() {
        let req = CreateResultRequest {
            student_id: Uuid::new_v4(),
            subject: "Maths".into(),
            term: "Term 1".into(),
            marks: 95,
            max_marks: 100,
            grade: Some("A".into()),
            exam_date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
        };
        assert_eq!(req.effective_grade(), "A");
    }

    #[test]
    fn test_effective_grade_derives_when_blank() {
        let req = CreateResultRequest {
            student_id: Uuid::new_v4(),
            subject: "Maths".into(),
            term: "Term 1".into(),
            marks: 45,
            max_marks: 50,
            grade: Some("  ".into()),
            exam_date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
        };
        assert_eq!(req.effective_grade(), "A+");
    }
}
