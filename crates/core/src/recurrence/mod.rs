//! Recurring expense scheduling and due date rollover.

pub mod error;
pub mod frequency;
pub mod rollover;
pub mod schedule;

#[cfg(test)]
mod props;

pub use error::RecurrenceError;
pub use frequency::Frequency;
pub use rollover::{
    RecurrenceState, Rollover, is_within_reminder_window, roll_forward, state_on,
};
pub use schedule::{RecurringSchedule, next_due_date, next_due_date_str};
