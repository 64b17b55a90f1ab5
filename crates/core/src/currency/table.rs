//! The USD-pivot currency rate table.
//!
//! Every currency stores a single rate relative to USD, so any pair can be
//! converted without keeping a cross-rate matrix.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use expensa_shared::config::{CurrencyConfig, CurrencySeed};
use expensa_shared::types::CurrencyCode;
use rust_decimal::Decimal;
use tracing::{info, warn};

use super::error::CurrencyError;
use super::types::{Currency, RefreshSummary};

/// Read access to USD-pivot rates.
///
/// Conversion only needs this capability, so tests and callers can pass a
/// plain map instead of a full [`CurrencyTable`]. Codes are looked up in
/// normalized (upper-case) form.
pub trait RateLookup {
    /// Returns units of `code` per 1 USD, or `None` if the code is unknown.
    fn rate(&self, code: &str) -> Option<Decimal>;
}

impl RateLookup for HashMap<String, Decimal> {
    fn rate(&self, code: &str) -> Option<Decimal> {
        self.get(code).copied()
    }
}

impl<T: RateLookup + ?Sized> RateLookup for &T {
    fn rate(&self, code: &str) -> Option<Decimal> {
        (**self).rate(code)
    }
}

impl<T: RateLookup + ?Sized> RateLookup for Arc<T> {
    fn rate(&self, code: &str) -> Option<Decimal> {
        (**self).rate(code)
    }
}

/// Built-in startup list: (code, name, symbol, rate mantissa, rate scale).
const BUILTIN_SEEDS: &[(&str, &str, &str, i64, u32)] = &[
    ("USD", "US Dollar", "$", 1, 0),
    ("COP", "Colombian Peso", "$", 400_000, 2),
    ("EUR", "Euro", "€", 92, 2),
    ("GBP", "British Pound", "£", 79, 2),
    ("MXN", "Mexican Peso", "$", 1_700, 2),
    ("BRL", "Brazilian Real", "R$", 500, 2),
    ("ARS", "Argentine Peso", "$", 85_000, 2),
    ("CAD", "Canadian Dollar", "$", 135, 2),
    ("JPY", "Japanese Yen", "¥", 15_000, 2),
    ("CLP", "Chilean Peso", "$", 90_000, 2),
    ("PEN", "Peruvian Sol", "S/", 375, 2),
];

/// Returns the built-in startup currency list.
#[must_use]
pub fn builtin_seeds() -> Vec<CurrencySeed> {
    BUILTIN_SEEDS
        .iter()
        .map(|&(code, name, symbol, mantissa, scale)| CurrencySeed {
            code: code.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            exchange_rate: Decimal::new(mantissa, scale),
        })
        .collect()
}

/// In-memory currency table keyed by code.
///
/// Rows are only ever added by seeding; refreshes overwrite rates in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyTable {
    currencies: BTreeMap<CurrencyCode, Currency>,
}

impl CurrencyTable {
    /// Builds the table from the built-in startup list.
    #[must_use]
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let currencies = builtin_seeds()
            .into_iter()
            .filter_map(|seed| {
                let code = seed.code.parse::<CurrencyCode>().ok()?;
                Some((
                    code.clone(),
                    Currency {
                        code,
                        name: seed.name,
                        symbol: seed.symbol,
                        exchange_rate: seed.exchange_rate,
                        updated_at: now,
                    },
                ))
            })
            .collect();

        Self { currencies }
    }

    /// Builds the table from an explicit seed list.
    ///
    /// USD is added at rate 1 when the list omits it.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed or duplicate codes, non-positive rates,
    /// or a USD seed whose rate is not 1.
    pub fn from_seeds(seeds: &[CurrencySeed], now: DateTime<Utc>) -> Result<Self, CurrencyError> {
        let mut currencies = BTreeMap::new();

        for seed in seeds {
            let code: CurrencyCode = seed
                .code
                .parse()
                .map_err(|_| CurrencyError::InvalidCode(seed.code.clone()))?;

            let pivot_mismatch = code.is_pivot() && seed.exchange_rate != Decimal::ONE;
            if seed.exchange_rate <= Decimal::ZERO || pivot_mismatch {
                return Err(CurrencyError::InvalidRate {
                    code: code.to_string(),
                    rate: seed.exchange_rate,
                });
            }

            if currencies.contains_key(&code) {
                return Err(CurrencyError::DuplicateCurrency(code.to_string()));
            }

            currencies.insert(
                code.clone(),
                Currency {
                    code,
                    name: seed.name.clone(),
                    symbol: seed.symbol.clone(),
                    exchange_rate: seed.exchange_rate,
                    updated_at: now,
                },
            );
        }

        currencies
            .entry(CurrencyCode::pivot())
            .or_insert_with(|| Currency {
                code: CurrencyCode::pivot(),
                name: "US Dollar".to_string(),
                symbol: "$".to_string(),
                exchange_rate: Decimal::ONE,
                updated_at: now,
            });

        Ok(Self { currencies })
    }

    /// Builds the table from configuration and checks the reporting currency exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the seeds are invalid or the reporting currency is
    /// missing from the table.
    pub fn from_config(config: &CurrencyConfig, now: DateTime<Utc>) -> Result<Self, CurrencyError> {
        let table = if config.seeds.is_empty() {
            Self::seeded(now)
        } else {
            Self::from_seeds(&config.seeds, now)?
        };

        if !table.contains(&config.reporting_currency) {
            return Err(CurrencyError::CurrencyNotFound(
                config.reporting_currency.clone(),
            ));
        }

        Ok(table)
    }

    /// Looks up a currency by code (case-insensitive).
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Currency> {
        let code = code.parse::<CurrencyCode>().ok()?;
        self.currencies.get(&code)
    }

    /// Returns true if the code is in the table.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Iterates currencies ordered by code.
    pub fn iter(&self) -> impl Iterator<Item = &Currency> {
        self.currencies.values()
    }

    /// Number of currencies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    /// Returns true if the table has no currencies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }

    /// Overwrites rates with freshly fetched values.
    ///
    /// Unknown codes are skipped, never inserted. Non-positive rates and any
    /// attempt to move the USD pivot away from 1 are rejected. Nothing is deleted.
    /// A code listed more than once keeps its last accepted rate and counts once.
    pub fn apply_rates<I, K>(&mut self, updates: I, at: DateTime<Utc>) -> RefreshSummary
    where
        I: IntoIterator<Item = (K, Decimal)>,
        K: AsRef<str>,
    {
        let mut summary = RefreshSummary::default();
        let mut written = BTreeSet::new();

        for (raw_code, rate) in updates {
            let raw_code = raw_code.as_ref();
            let currency = match raw_code.parse::<CurrencyCode>() {
                Ok(code) => self.currencies.get_mut(&code),
                Err(_) => None,
            };
            let Some(currency) = currency else {
                summary.unknown.push(raw_code.to_string());
                continue;
            };

            let pivot_mismatch = currency.code.is_pivot() && rate != Decimal::ONE;
            if rate <= Decimal::ZERO || pivot_mismatch {
                warn!(code = %currency.code, %rate, "Rejected fetched exchange rate");
                summary.rejected.push(currency.code.to_string());
                continue;
            }

            currency.exchange_rate = rate;
            currency.updated_at = at;
            written.insert(currency.code.clone());
        }
        summary.updated = written.len();

        info!(
            updated = summary.updated,
            unknown = summary.unknown.len(),
            rejected = summary.rejected.len(),
            "Applied exchange rate refresh"
        );

        summary
    }
}

impl RateLookup for CurrencyTable {
    fn rate(&self, code: &str) -> Option<Decimal> {
        self.get(code).map(|c| c.exchange_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn t1() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 6, 0, 0).unwrap()
    }

    fn seed(code: &str, rate: Decimal) -> CurrencySeed {
        CurrencySeed {
            code: code.to_string(),
            name: code.to_string(),
            symbol: "$".to_string(),
            exchange_rate: rate,
        }
    }

    #[test]
    fn test_seeded_table() {
        let table = CurrencyTable::seeded(t0());
        assert_eq!(table.len(), BUILTIN_SEEDS.len());
        assert_eq!(table.rate("USD"), Some(Decimal::ONE));
        assert_eq!(table.rate("COP"), Some(dec!(4000.00)));
        assert_eq!(table.rate("cop"), Some(dec!(4000.00)));
        assert_eq!(table.rate("ZZZ"), None);
        assert!(table.iter().all(|c| c.updated_at == t0()));
    }

    #[test]
    fn test_iter_is_ordered_by_code() {
        let table = CurrencyTable::seeded(t0());
        let codes: Vec<&str> = table.iter().map(|c| c.code.as_str()).collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        assert_eq!(codes, sorted);
    }

    #[test]
    fn test_from_seeds_adds_pivot() {
        let table = CurrencyTable::from_seeds(&[seed("cop", dec!(3900))], t0()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rate("USD"), Some(Decimal::ONE));
        assert_eq!(table.get("COP").unwrap().code.as_str(), "COP");
    }

    #[test]
    fn test_from_seeds_rejects_bad_input() {
        assert_eq!(
            CurrencyTable::from_seeds(&[seed("COP", dec!(1)), seed("cop", dec!(2))], t0()),
            Err(CurrencyError::DuplicateCurrency("COP".into()))
        );
        assert!(matches!(
            CurrencyTable::from_seeds(&[seed("EUR", Decimal::ZERO)], t0()),
            Err(CurrencyError::InvalidRate { .. })
        ));
        assert!(matches!(
            CurrencyTable::from_seeds(&[seed("USD", dec!(1.1))], t0()),
            Err(CurrencyError::InvalidRate { .. })
        ));
        assert_eq!(
            CurrencyTable::from_seeds(&[seed("€", dec!(1))], t0()),
            Err(CurrencyError::InvalidCode("€".into()))
        );
    }

    #[test]
    fn test_from_config() {
        let config = CurrencyConfig::default();
        let table = CurrencyTable::from_config(&config, t0()).unwrap();
        assert!(table.contains("COP"));

        let config = CurrencyConfig {
            reporting_currency: "COP".into(),
            seeds: vec![seed("EUR", dec!(0.9))],
        };
        assert_eq!(
            CurrencyTable::from_config(&config, t0()),
            Err(CurrencyError::CurrencyNotFound("COP".into()))
        );
    }

    #[test]
    fn test_apply_rates_overwrites_known_codes() {
        let mut table = CurrencyTable::seeded(t0());
        let summary = table.apply_rates([("COP", dec!(4100.25)), ("eur", dec!(0.95))], t1());

        assert_eq!(summary.updated, 2);
        assert!(summary.unknown.is_empty());
        assert!(summary.rejected.is_empty());
        assert_eq!(table.rate("COP"), Some(dec!(4100.25)));
        assert_eq!(table.get("EUR").unwrap().updated_at, t1());
        assert_eq!(table.get("GBP").unwrap().updated_at, t0());
    }

    #[test]
    fn test_apply_rates_counts_repeated_code_once() {
        let mut table = CurrencyTable::seeded(t0());
        let summary = table.apply_rates([("COP", dec!(1)), ("cop", dec!(2))], t1());

        assert_eq!(summary.updated, 1);
        assert_eq!(table.rate("COP"), Some(dec!(2)));
    }

    #[test]
    fn test_apply_rates_never_inserts_or_deletes() {
        let mut table = CurrencyTable::seeded(t0());
        let before = table.len();
        let summary = table.apply_rates(vec![("XYZ".to_string(), dec!(2))], t1());

        assert_eq!(summary.unknown, vec!["XYZ".to_string()]);
        assert_eq!(table.len(), before);
        assert!(!table.contains("XYZ"));
    }

    #[test]
    fn test_apply_rates_rejects_bad_rates() {
        let mut table = CurrencyTable::seeded(t0());
        let summary = table.apply_rates(
            [("COP", Decimal::ZERO), ("EUR", dec!(-1)), ("USD", dec!(1.01))],
            t1(),
        );

        assert_eq!(summary.updated, 0);
        assert_eq!(summary.rejected, vec!["COP", "EUR", "USD"]);
        assert_eq!(table, CurrencyTable::seeded(t0()));
    }

    #[test]
    fn test_map_fixture_lookup() {
        let rates: HashMap<String, Decimal> =
            [("USD".to_string(), Decimal::ONE), ("COP".to_string(), dec!(4000))].into();
        assert_eq!(rates.rate("COP"), Some(dec!(4000)));
        assert_eq!(rates.rate("EUR"), None);
    }
}
