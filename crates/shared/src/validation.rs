//! Common validation utilities.

use validator::ValidationError;

/// Maximum grade a submission can receive.
pub const MAX_GRADE: i32 = 100;

/// Number of answer options every test question must carry.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Validates that a grade is within the accepted range (0 to 100).
pub fn validate_grade(grade: i32) -> Result<(), ValidationError> {
    if (0..=MAX_GRADE).contains(&grade) {
        Ok(())
    } else {
        let mut err = ValidationError::new("grade_range");
        err.message = Some("Grade must be between 0 and 100".into());
        Err(err)
    }
}

/// Validates that a copy count is at least 1.
pub fn validate_total_copies(copies: i32) -> Result<(), ValidationError> {
    if copies >= 1 {
        Ok(())
    } else {
        let mut err = ValidationError::new("copies_range");
        err.message = Some("Total copies must be at least 1".into());
        Err(err)
    }
}

/// Validates that a test duration is at least 1 minute.
pub fn validate_duration_minutes(minutes: i32) -> Result<(), ValidationError> {
    if minutes >= 1 {
        Ok(())
    } else {
        let mut err = ValidationError::new("duration_range");
        err.message = Some("Duration must be at least 1 minute".into());
        Err(err)
    }
}

/// Validates that exam marks do not exceed the maximum for the exam.
pub fn validate_marks(marks: i32, max_marks: i32) -> Result<(), ValidationError> {
    if marks < 0 || max_marks < 1 || marks > max_marks {
        let mut err = ValidationError::new("marks_range");
        err.message = Some("Marks must be between 0 and the exam maximum".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates that a free-text field is non-empty after trimming.
pub fn validate_non_blank(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}
