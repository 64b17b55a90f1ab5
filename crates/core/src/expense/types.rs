//! Expense data types.

use chrono::NaiveDate;
use expensa_shared::types::CurrencyCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::recurrence::{Frequency, RecurringSchedule};

/// Expense fields as submitted on create or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExpense {
    /// Amount in the expense's own currency.
    pub amount: Decimal,
    /// Currency the expense was paid in.
    pub currency: CurrencyCode,
    /// Date the expense was incurred.
    pub date: NaiveDate,
    /// Whether the expense repeats.
    #[serde(default)]
    pub is_recurring: bool,
    /// Cadence for recurring expenses.
    #[serde(default)]
    pub recurring_frequency: Option<Frequency>,
}

/// Expense ready to be stored: original amount, reporting-currency amount and schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedExpense {
    /// Amount in the expense's own currency.
    pub amount: Decimal,
    /// Currency the expense was paid in.
    pub currency: CurrencyCode,
    /// Amount in the reporting currency, 2 dp.
    pub converted_amount: Decimal,
    /// Reporting units per unit of `currency`, 4 dp.
    pub exchange_rate: Decimal,
    /// Reporting currency `converted_amount` is in.
    pub reporting_currency: CurrencyCode,
    /// Date the expense was incurred.
    pub date: NaiveDate,
    /// Recurrence fields.
    #[serde(flatten)]
    pub schedule: RecurringSchedule,
}
