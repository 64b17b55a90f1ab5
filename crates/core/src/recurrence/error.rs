//! Recurrence error types.

use chrono::NaiveDate;
use expensa_shared::AppError;
use thiserror::Error;

/// Recurring expense scheduling errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecurrenceError {
    /// Frequency string is not one of daily, weekly, monthly, yearly.
    #[error("Invalid recurrence frequency: '{0}'")]
    InvalidFrequency(String),

    /// Recurring expense has no frequency.
    #[error("Recurring expense requires a frequency")]
    MissingFrequency,

    /// Schedule fields contradict each other.
    #[error("Inconsistent schedule: {0}")]
    InconsistentSchedule(&'static str),

    /// Advancing the date would pass the last representable date.
    #[error("Cannot advance due date past {0}")]
    DateOverflow(NaiveDate),
}

impl From<RecurrenceError> for AppError {
    fn from(err: RecurrenceError) -> Self {
        match err {
            RecurrenceError::DateOverflow(_) => Self::BusinessRule(err.to_string()),
            RecurrenceError::InvalidFrequency(_)
            | RecurrenceError::MissingFrequency
            | RecurrenceError::InconsistentSchedule(_) => Self::Validation(err.to_string()),
        }
    }
}
