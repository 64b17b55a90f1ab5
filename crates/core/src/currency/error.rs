//! Currency error types.

use expensa_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Currency and conversion errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurrencyError {
    /// Currency code is not in the rate table.
    #[error("Currency '{0}' not found")]
    CurrencyNotFound(String),

    /// Amounts to convert cannot be negative.
    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    /// Exchange rate is zero or negative, or the pivot is not 1.
    #[error("Invalid exchange rate for '{code}': {rate}")]
    InvalidRate {
        /// Currency code.
        code: String,
        /// Offending rate.
        rate: Decimal,
    },

    /// Currency code is malformed.
    #[error("Invalid currency code: '{0}'")]
    InvalidCode(String),

    /// Same currency listed twice in a seed list.
    #[error("Duplicate currency: {0}")]
    DuplicateCurrency(String),

    /// Arithmetic overflowed the decimal range.
    #[error("Conversion of {amount} from {from} to {to} overflows")]
    Overflow {
        /// Source amount.
        amount: Decimal,
        /// Source currency.
        from: String,
        /// Target currency.
        to: String,
    },
}

impl From<CurrencyError> for AppError {
    fn from(err: CurrencyError) -> Self {
        match err {
            CurrencyError::CurrencyNotFound(_) => Self::NotFound(err.to_string()),
            CurrencyError::NegativeAmount(_)
            | CurrencyError::InvalidCode(_)
            | CurrencyError::DuplicateCurrency(_) => Self::Validation(err.to_string()),
            CurrencyError::InvalidRate { .. } | CurrencyError::Overflow { .. } => {
                Self::BusinessRule(err.to_string())
            }
        }
    }
}
