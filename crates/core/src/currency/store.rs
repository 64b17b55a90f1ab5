//! Shared handle to the live currency table.
//!
//! Readers take an `Arc` snapshot and convert against it without holding the
//! lock. A refresh clones the table, applies the new rates and swaps the
//! snapshot, so every conversion sees one consistent set of rates.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::table::CurrencyTable;
use super::types::RefreshSummary;

/// Cloneable, thread-safe handle to the current rate table snapshot.
#[derive(Debug, Clone)]
pub struct SharedRates {
    inner: Arc<RwLock<Arc<CurrencyTable>>>,
}

impl SharedRates {
    /// Wraps a table.
    #[must_use]
    pub fn new(table: CurrencyTable) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(table))),
        }
    }

    /// Returns the current immutable snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<CurrencyTable> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Applies fetched rates to a copy of the table and publishes it.
    ///
    /// Snapshots taken before the call keep seeing the old rates.
    pub fn refresh<I, K>(&self, updates: I, at: DateTime<Utc>) -> RefreshSummary
    where
        I: IntoIterator<Item = (K, Decimal)>,
        K: AsRef<str>,
    {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = CurrencyTable::clone(&guard);
        let summary = next.apply_rates(updates, at);
        *guard = Arc::new(next);
        summary
    }
}
