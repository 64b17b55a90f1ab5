//! Currency data types.

use chrono::{DateTime, Utc};
use expensa_shared::types::CurrencyCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A row of the currency rate table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// Unique currency code.
    pub code: CurrencyCode,
    /// Display name (e.g., "Colombian Peso").
    pub name: String,
    /// Display symbol (e.g., "$").
    pub symbol: String,
    /// Units of this currency per 1 USD. USD itself is always 1.
    pub exchange_rate: Decimal,
    /// When the rate was last written.
    pub updated_at: DateTime<Utc>,
}

/// Result of converting an amount between two currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    /// Amount in the target currency, rounded to 2 decimal places.
    pub converted_amount: Decimal,
    /// Units of target per unit of source, rounded to 4 decimal places.
    pub exchange_rate: Decimal,
}

/// Outcome of applying a batch of fetched rates to the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RefreshSummary {
    /// Number of currencies whose rate was written.
    pub updated: usize,
    /// Codes not present in the table. Refresh never inserts.
    pub unknown: Vec<String>,
    /// Codes whose fetched rate was unusable.
    pub rejected: Vec<String>,
}
