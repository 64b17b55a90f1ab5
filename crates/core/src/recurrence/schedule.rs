//! Due date arithmetic for recurring expenses.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::RecurrenceError;
use super::frequency::Frequency;
use super::rollover::roll_forward;

/// Computes the date a recurring expense next becomes due.
///
/// Monthly and yearly steps keep the day of month, clamped to the last day
/// of a shorter target month (Jan 31 -> Feb 28/29, Feb 29 -> Feb 28).
///
/// # Errors
///
/// Returns `DateOverflow` if the result is past the last representable date.
pub fn next_due_date(current: NaiveDate, frequency: Frequency) -> Result<NaiveDate, RecurrenceError> {
    let next = match frequency {
        Frequency::Daily => current.checked_add_days(Days::new(1)),
        Frequency::Weekly => current.checked_add_days(Days::new(7)),
        Frequency::Monthly => current.checked_add_months(Months::new(1)),
        Frequency::Yearly => current.checked_add_months(Months::new(12)),
    };
    next.ok_or(RecurrenceError::DateOverflow(current))
}

/// Like [`next_due_date`] for a frequency stored as text.
///
/// # Errors
///
/// Returns `InvalidFrequency` for unknown frequencies; never falls back to a default.
pub fn next_due_date_str(current: NaiveDate, frequency: &str) -> Result<NaiveDate, RecurrenceError> {
    next_due_date(current, frequency.parse()?)
}

/// The recurrence fields of an expense.
///
/// `next_due_date` is set exactly when the expense recurs and has a frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringSchedule {
    /// Whether the expense repeats.
    pub is_recurring: bool,
    /// Cadence, required when recurring.
    pub frequency: Option<Frequency>,
    /// Next date a reminder is due for.
    pub next_due_date: Option<NaiveDate>,
}

impl RecurringSchedule {
    /// Schedule of an expense that does not repeat.
    #[must_use]
    pub const fn one_off() -> Self {
        Self {
            is_recurring: false,
            frequency: None,
            next_due_date: None,
        }
    }

    /// Builds the schedule for a newly created or edited expense dated `expense_date`.
    ///
    /// A frequency on a non-recurring expense is dropped.
    ///
    /// # Errors
    ///
    /// Returns `MissingFrequency` for a recurring expense without frequency,
    /// or `DateOverflow` from the date arithmetic.
    pub fn seed(
        is_recurring: bool,
        frequency: Option<Frequency>,
        expense_date: NaiveDate,
    ) -> Result<Self, RecurrenceError> {
        if !is_recurring {
            return Ok(Self::one_off());
        }

        let frequency = frequency.ok_or(RecurrenceError::MissingFrequency)?;
        Ok(Self {
            is_recurring: true,
            frequency: Some(frequency),
            next_due_date: Some(next_due_date(expense_date, frequency)?),
        })
    }

    /// Checks the schedule invariant.
    ///
    /// # Errors
    ///
    /// Returns `InconsistentSchedule` or `MissingFrequency` when violated.
    pub fn validate(&self) -> Result<(), RecurrenceError> {
        match (self.is_recurring, self.frequency, self.next_due_date) {
            (false, _, Some(_)) => Err(RecurrenceError::InconsistentSchedule(
                "due date set on a non-recurring expense",
            )),
            (true, None, _) => Err(RecurrenceError::MissingFrequency),
            (true, Some(_), None) => Err(RecurrenceError::InconsistentSchedule(
                "recurring expense without a due date",
            )),
            _ => Ok(()),
        }
    }

    /// Advances a passed due date until it lies after `today`.
    ///
    /// Returns the new schedule and how many periods were skipped. Non-recurring
    /// schedules are returned as is.
    ///
    /// # Errors
    ///
    /// Returns an error if the schedule is invalid or the date overflows.
    pub fn rolled_forward(&self, today: NaiveDate) -> Result<(Self, u32), RecurrenceError> {
        self.validate()?;

        let (Some(frequency), Some(due)) = (self.frequency, self.next_due_date) else {
            return Ok((*self, 0));
        };

        let rollover = roll_forward(due, frequency, today)?;
        let next = Self {
            next_due_date: Some(rollover.next_due_date),
            ..*self
        };
        Ok((next, rollover.periods_advanced))
    }
}
