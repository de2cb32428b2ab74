//! Pure functions for mapping submission errors to HTTP status codes.

use super::SubmissionError;

/// Maps a [`SubmissionError`] to an HTTP status code.
///
/// - `Rejected` -> 400 (Bad Request)
/// - `Failed` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use printorder_core::order::{submission_error_to_status_code, SubmissionError, ValidationError};
///
/// let error = SubmissionError::Rejected(ValidationError::MissingField("phone"));
/// assert_eq!(submission_error_to_status_code(&error), 400);
/// ```
pub fn submission_error_to_status_code(error: &SubmissionError) -> u16 {
    match error {
        SubmissionError::Rejected(_) => 400,
        SubmissionError::Failed(_) => 500,
    }
}
