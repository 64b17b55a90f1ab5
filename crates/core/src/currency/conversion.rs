//! Currency conversion logic.
//!
//! Every conversion pivots through USD: `amount / rate(from) * rate(to)`.
//! Rounding strategy:
//! - Converted amounts round to 2 decimal places
//! - Exchange rates round to 4 decimal places
//! - Use banker's rounding (round half to even)

use expensa_shared::types::{CurrencyCode, Money};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use super::error::CurrencyError;
use super::table::RateLookup;
use super::types::Conversion;

/// Decimal places kept on converted amounts.
pub const AMOUNT_DECIMAL_PLACES: u32 = 2;

/// Decimal places kept on exchange rates.
pub const RATE_DECIMAL_PLACES: u32 = 4;

/// Rounds using banker's rounding (MidpointNearestEven).
#[must_use]
pub fn round(value: Decimal, decimal_places: u32) -> Decimal {
    value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
}

fn normalize(code: &str) -> Result<CurrencyCode, CurrencyError> {
    code.parse()
        .map_err(|_| CurrencyError::CurrencyNotFound(code.to_string()))
}

fn lookup<R: RateLookup + ?Sized>(rates: &R, code: &CurrencyCode) -> Result<Decimal, CurrencyError> {
    let rate = rates
        .rate(code.as_str())
        .ok_or_else(|| CurrencyError::CurrencyNotFound(code.to_string()))?;

    if rate <= Decimal::ZERO {
        return Err(CurrencyError::InvalidRate {
            code: code.to_string(),
            rate,
        });
    }
    Ok(rate)
}

/// Converts `amount` from one currency to another through the USD pivot.
///
/// Same-currency conversions return the amount untouched with a rate of 1.
///
/// # Errors
///
/// - `CurrencyNotFound` if either code is missing from `rates`
/// - `NegativeAmount` if `amount` is below zero
/// - `InvalidRate` if a looked-up rate is not positive
/// - `Overflow` if the intermediate USD amount leaves the decimal range
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use expensa_core::currency::convert;
///
/// let rates: HashMap<String, Decimal> =
///     [("USD".to_string(), dec!(1)), ("COP".to_string(), dec!(4000))].into();
/// let result = convert(&rates, dec!(25), "USD", "COP").unwrap();
/// assert_eq!(result.converted_amount, dec!(100000));
/// assert_eq!(result.exchange_rate, dec!(4000));
/// ```
pub fn convert<R: RateLookup + ?Sized>(
    rates: &R,
    amount: Decimal,
    from: &str,
    to: &str,
) -> Result<Conversion, CurrencyError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(CurrencyError::NegativeAmount(amount));
    }

    let from = normalize(from)?;
    let to = normalize(to)?;
    let from_rate = lookup(rates, &from)?;
    let to_rate = lookup(rates, &to)?;

    if from == to {
        return Ok(Conversion {
            converted_amount: amount,
            exchange_rate: Decimal::ONE,
        });
    }

    let overflow = || CurrencyError::Overflow {
        amount,
        from: from.to_string(),
        to: to.to_string(),
    };

    let usd_amount = amount.checked_div(from_rate).ok_or_else(overflow)?;
    let converted = usd_amount.checked_mul(to_rate).ok_or_else(overflow)?;
    let exchange_rate = to_rate.checked_div(from_rate).ok_or_else(overflow)?;

    let result = Conversion {
        converted_amount: round(converted, AMOUNT_DECIMAL_PLACES),
        exchange_rate: round(exchange_rate, RATE_DECIMAL_PLACES),
    };

    debug!(
        %from,
        %to,
        %amount,
        converted = %result.converted_amount,
        rate = %result.exchange_rate,
        "Converted amount"
    );

    Ok(result)
}

/// Converts `money` into the reporting currency stored alongside each expense.
///
/// # Errors
///
/// Same as [`convert`].
pub fn to_reporting<R: RateLookup + ?Sized>(
    rates: &R,
    money: &Money,
    reporting: &CurrencyCode,
) -> Result<Conversion, CurrencyError> {
    convert(
        rates,
        money.amount,
        money.currency.as_str(),
        reporting.as_str(),
    )
}
