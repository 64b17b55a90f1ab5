//! Rolling recurring expenses forward once their due date passes.
//!
//! A recurring expense cycles Scheduled -> Due -> (reminder sent elsewhere)
//! -> rolled forward -> Scheduled. Only the date side of that cycle lives here.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::RecurrenceError;
use super::frequency::Frequency;
use super::schedule::next_due_date;

/// Where a recurring expense is in its cycle on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceState {
    /// Due date is still ahead.
    Scheduled,
    /// Due date is today or has passed.
    Due,
}

/// Classifies a due date relative to `today`.
#[must_use]
pub fn state_on(next_due: NaiveDate, today: NaiveDate) -> RecurrenceState {
    if next_due <= today {
        RecurrenceState::Due
    } else {
        RecurrenceState::Scheduled
    }
}

/// Result of rolling a due date forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rollover {
    /// First due date strictly after the sweep day.
    pub next_due_date: NaiveDate,
    /// How many periods were stepped over. Zero if nothing was due.
    pub periods_advanced: u32,
}

/// Advances `next_due` by whole periods until it is after `today`.
///
/// Catches up when sweeps were missed: a weekly expense last due three weeks
/// ago advances three or four periods in one call. Daily and weekly dates jump
/// straight to the result. Monthly and yearly dates step one period at a time
/// from the previous result, so dates that were clamped stay clamped.
///
/// # Errors
///
/// Returns `DateOverflow` if stepping passes the last representable date.
pub fn roll_forward(
    next_due: NaiveDate,
    frequency: Frequency,
    today: NaiveDate,
) -> Result<Rollover, RecurrenceError> {
    let (date, periods_advanced) = match frequency.fixed_days() {
        Some(period_days) => jump_fixed(next_due, period_days, today)?,
        None => step_calendar(next_due, frequency, today)?,
    };

    if periods_advanced > 0 {
        debug!(
            from = %next_due,
            to = %date,
            %frequency,
            periods_advanced,
            "Rolled recurring expense forward"
        );
    }

    Ok(Rollover {
        next_due_date: date,
        periods_advanced,
    })
}

fn jump_fixed(
    next_due: NaiveDate,
    period_days: u64,
    today: NaiveDate,
) -> Result<(NaiveDate, u32), RecurrenceError> {
    if next_due > today {
        return Ok((next_due, 0));
    }

    let behind = u64::try_from(today.signed_duration_since(next_due).num_days()).unwrap_or(0);
    let periods = behind / period_days + 1;
    let date = next_due
        .checked_add_days(Days::new(periods * period_days))
        .ok_or(RecurrenceError::DateOverflow(next_due))?;

    Ok((date, u32::try_from(periods).unwrap_or(u32::MAX)))
}

fn step_calendar(
    next_due: NaiveDate,
    frequency: Frequency,
    today: NaiveDate,
) -> Result<(NaiveDate, u32), RecurrenceError> {
    let mut date = next_due;
    let mut periods = 0u32;

    while date <= today {
        date = next_due_date(date, frequency)?;
        periods = periods.saturating_add(1);
    }

    Ok((date, periods))
}

/// Returns true if a reminder should go out for `next_due` on `today`.
///
/// The window is `today ..= today + days_before`; already-passed dates are
/// handled by [`roll_forward`], not reminded about.
#[must_use]
pub fn is_within_reminder_window(next_due: NaiveDate, today: NaiveDate, days_before: u32) -> bool {
    if next_due < today {
        return false;
    }
    match today.checked_add_days(Days::new(u64::from(days_before))) {
        Some(window_end) => next_due <= window_end,
        None => true,
    }
}
