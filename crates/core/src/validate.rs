//! Pre-submission form validation.
//!
//! Validation runs *before* any network call; a failed check surfaces as a
//! blocking modal and no request is issued.

use crate::error::{DomainError, DomainResult};

/// Require a non-blank text field.
pub fn require(field: &'static str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        Err(DomainError::MissingField(field))
    } else {
        Ok(())
    }
}

/// Grades are entered on a 0–100 scale.
pub fn require_grade(grade: u32) -> DomainResult<()> {
    if grade > 100 {
        Err(DomainError::validation("grade must be between 0 and 100"))
    } else {
        Ok(())
    }
}
