//! Property-based tests for currency conversion.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::conversion::{RATE_DECIMAL_PLACES, convert, round};
use super::table::{CurrencyTable, RateLookup, builtin_seeds};

fn table() -> CurrencyTable {
    CurrencyTable::seeded(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
}

/// Strategy to generate non-negative amounts (0.00 to 1,000,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to pick any seeded currency code.
fn code() -> impl Strategy<Value = String> {
    let codes: Vec<String> = builtin_seeds().into_iter().map(|s| s.code).collect();
    prop::sample::select(codes)
}

fn has_at_most_dp(value: Decimal, dp: u32) -> bool {
    value == value.round_dp(dp)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Converting into the same currency returns the amount and a rate of 1.
    #[test]
    fn prop_same_currency_identity(amount in amount(), code in code()) {
        let result = convert(&table(), amount, &code, &code).unwrap();
        prop_assert_eq!(result.converted_amount, amount);
        prop_assert_eq!(result.exchange_rate, Decimal::ONE);
    }

    /// Zero converts to zero and still reports the cross rate.
    #[test]
    fn prop_zero_amount_reports_cross_rate(from in code(), to in code()) {
        let rates = table();
        let result = convert(&rates, Decimal::ZERO, &from, &to).unwrap();
        prop_assert_eq!(result.converted_amount, Decimal::ZERO);

        let expected = if from == to {
            Decimal::ONE
        } else {
            round(rates.rate(&to).unwrap() / rates.rate(&from).unwrap(), RATE_DECIMAL_PLACES)
        };
        prop_assert_eq!(result.exchange_rate, expected);
    }

    /// Results carry currency precision on amounts and 4 dp on rates.
    #[test]
    fn prop_result_precision(amount in amount(), from in code(), to in code()) {
        prop_assume!(from != to);
        let result = convert(&table(), amount, &from, &to).unwrap();
        prop_assert!(has_at_most_dp(result.converted_amount, 2));
        prop_assert!(has_at_most_dp(result.exchange_rate, 4));
        prop_assert!(result.converted_amount >= Decimal::ZERO);
    }

    /// Converting there and back lands within one cent of the original.
    ///
    /// Holds when the first leg moves into a currency with an equal or larger
    /// per-USD rate, so the intermediate rounding loses no precision that the
    /// return leg would magnify.
    #[test]
    fn prop_round_trip_within_a_cent(amount in amount(), a in code(), b in code()) {
        let rates = table();
        prop_assume!(rates.rate(&a).unwrap() <= rates.rate(&b).unwrap());

        let there = convert(&rates, amount, &a, &b).unwrap();
        let back = convert(&rates, there.converted_amount, &b, &a).unwrap();
        let diff = (back.converted_amount - amount).abs();
        prop_assert!(diff <= Decimal::new(1, 2), "{} -> {} -> {}", amount, there.converted_amount, back.converted_amount);
    }

    /// Conversion is deterministic for a fixed snapshot.
    #[test]
    fn prop_convert_is_deterministic(amount in amount(), from in code(), to in code()) {
        let rates = table();
        prop_assert_eq!(
            convert(&rates, amount, &from, &to).unwrap(),
            convert(&rates, amount, &from, &to).unwrap()
        );
    }
}
