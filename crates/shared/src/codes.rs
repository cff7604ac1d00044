//! Student code generation.

use chrono::{Datelike, Utc};
use rand::Rng;

/// Generates a student code: the current year followed by 7 random digits.
///
/// Matches the registration number format used on report cards, e.g.
/// `20260042917`.
pub fn generate_student_code() -> String {
    let year = Utc::now().year();
    let suffix: u32 = rand::thread_rng().gen_range(0..10_000_000);
    format!("{year}{suffix:07}")
}
