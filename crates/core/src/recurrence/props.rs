//! Property-based tests for due date arithmetic.

use chrono::{Datelike, Days, NaiveDate};
use proptest::prelude::*;

use super::frequency::Frequency;
use super::rollover::{RecurrenceState, roll_forward, state_on};
use super::schedule::next_due_date;

/// Strategy to generate dates between 1970 and roughly 2100.
fn any_date() -> impl Strategy<Value = NaiveDate> {
    (0u64..47_000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(1970, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(offset))
            .unwrap()
    })
}

fn any_frequency() -> impl Strategy<Value = Frequency> {
    prop::sample::select(Frequency::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Seven daily steps equal one weekly step.
    #[test]
    fn prop_seven_days_is_one_week(date in any_date()) {
        let mut daily = date;
        for _ in 0..7 {
            daily = next_due_date(daily, Frequency::Daily).unwrap();
        }
        prop_assert_eq!(daily, next_due_date(date, Frequency::Weekly).unwrap());
    }

    /// The next due date is always strictly later.
    #[test]
    fn prop_next_is_later(date in any_date(), frequency in any_frequency()) {
        prop_assert!(next_due_date(date, frequency).unwrap() > date);
    }

    /// Monthly steps land in the following month and never move the day later.
    #[test]
    fn prop_monthly_lands_next_month(date in any_date()) {
        let next = next_due_date(date, Frequency::Monthly).unwrap();
        let months = |d: NaiveDate| d.year() * 12 + d.month0().cast_signed();
        prop_assert_eq!(months(next), months(date) + 1);
        prop_assert!(next.day() <= date.day());
        if date.day() <= 28 {
            prop_assert_eq!(next.day(), date.day());
        }
    }

    /// Yearly steps keep month and day except for Feb 29.
    #[test]
    fn prop_yearly_keeps_calendar_day(date in any_date()) {
        let next = next_due_date(date, Frequency::Yearly).unwrap();
        prop_assert_eq!(next.year(), date.year() + 1);
        prop_assert_eq!(next.month(), date.month());
        if date.month() == 2 && date.day() == 29 {
            prop_assert_eq!(next.day(), 28);
        } else {
            prop_assert_eq!(next.day(), date.day());
        }
    }

    /// After a rollover the expense is scheduled again, and rolling again is a no-op.
    #[test]
    fn prop_roll_forward_leaves_scheduled(
        due in any_date(),
        frequency in any_frequency(),
        lag in 0u64..400,
    ) {
        let today = due.checked_add_days(Days::new(lag)).unwrap();
        let rolled = roll_forward(due, frequency, today).unwrap();

        prop_assert_eq!(state_on(rolled.next_due_date, today), RecurrenceState::Scheduled);
        prop_assert!(rolled.periods_advanced >= 1);

        let again = roll_forward(rolled.next_due_date, frequency, today).unwrap();
        prop_assert_eq!(again.next_due_date, rolled.next_due_date);
        prop_assert_eq!(again.periods_advanced, 0);
    }

    /// Daily and weekly catch-up lands where stepping one period at a time would.
    #[test]
    fn prop_fixed_catch_up_matches_stepping(
        due in any_date(),
        weekly in any::<bool>(),
        lag in 0u64..400,
    ) {
        let frequency = if weekly { Frequency::Weekly } else { Frequency::Daily };
        let today = due.checked_add_days(Days::new(lag)).unwrap();

        let mut stepped = due;
        let mut steps = 0u32;
        while stepped <= today {
            stepped = next_due_date(stepped, frequency).unwrap();
            steps += 1;
        }

        let rolled = roll_forward(due, frequency, today).unwrap();
        prop_assert_eq!(rolled.next_due_date, stepped);
        prop_assert_eq!(rolled.periods_advanced, steps);
    }
}
