//! Expense service combining conversion and scheduling.

use chrono::NaiveDate;
use expensa_shared::types::{CurrencyCode, Money};
use tracing::debug;

use super::error::ExpenseError;
use super::types::{NewExpense, PreparedExpense};
use crate::currency::{RateLookup, to_reporting};
use crate::recurrence::{RecurringSchedule, is_within_reminder_window};

/// Expense service for business logic.
pub struct ExpenseService;

impl ExpenseService {
    /// Prepares a created or edited expense for storage.
    ///
    /// Converts the amount into `reporting` and seeds `next_due_date` from the
    /// expense date. A frequency on a non-recurring expense is not kept.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::Currency` if either currency is unknown or the
    /// amount is negative, and `ExpenseError::Recurrence` if a recurring
    /// expense has no frequency.
    pub fn prepare<R: RateLookup + ?Sized>(
        input: NewExpense,
        rates: &R,
        reporting: &CurrencyCode,
    ) -> Result<PreparedExpense, ExpenseError> {
        let schedule =
            RecurringSchedule::seed(input.is_recurring, input.recurring_frequency, input.date)?;

        let money = Money::new(input.amount, input.currency);
        let conversion = to_reporting(rates, &money, reporting)?;

        debug!(
            currency = %money.currency,
            reporting = %reporting,
            next_due_date = ?schedule.next_due_date,
            "Prepared expense"
        );

        Ok(PreparedExpense {
            amount: money.amount,
            currency: money.currency,
            converted_amount: conversion.converted_amount,
            exchange_rate: conversion.exchange_rate,
            reporting_currency: reporting.clone(),
            date: input.date,
            schedule,
        })
    }

    /// Rolls a stored expense's due date forward if it has passed.
    ///
    /// Returns how many periods were skipped.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::Recurrence` for an inconsistent schedule or date overflow.
    pub fn roll_forward(expense: &mut PreparedExpense, today: NaiveDate) -> Result<u32, ExpenseError> {
        let (schedule, periods) = expense.schedule.rolled_forward(today)?;
        expense.schedule = schedule;
        Ok(periods)
    }

    /// Selects the expenses a reminder should go out for on `today`.
    pub fn reminders_due<'a, I>(
        expenses: I,
        today: NaiveDate,
        days_before: u32,
    ) -> impl Iterator<Item = &'a PreparedExpense>
    where
        I: IntoIterator<Item = &'a PreparedExpense>,
    {
        expenses.into_iter().filter(move |expense| {
            expense.schedule.is_recurring
                && expense
                    .schedule
                    .next_due_date
                    .is_some_and(|due| is_within_reminder_window(due, today, days_before))
        })
    }
}
