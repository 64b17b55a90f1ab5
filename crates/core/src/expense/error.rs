//! Expense error types.

use expensa_shared::AppError;
use thiserror::Error;

use crate::currency::CurrencyError;
use crate::recurrence::RecurrenceError;

/// Errors raised while preparing or rescheduling an expense.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExpenseError {
    /// Currency conversion failed.
    #[error(transparent)]
    Currency(#[from] CurrencyError),

    /// Recurrence scheduling failed.
    #[error(transparent)]
    Recurrence(#[from] RecurrenceError),
}

impl From<ExpenseError> for AppError {
    fn from(err: ExpenseError) -> Self {
        match err {
            ExpenseError::Currency(e) => e.into(),
            ExpenseError::Recurrence(e) => e.into(),
        }
    }
}
