//! Multi-currency handling through a USD-pivot rate table.

pub mod conversion;
pub mod error;
pub mod store;
pub mod table;
pub mod types;

#[cfg(test)]
mod props;

pub use conversion::{convert, to_reporting};
pub use error::CurrencyError;
pub use store::SharedRates;
pub use table::{CurrencyTable, RateLookup, builtin_seeds};
pub use types::{Conversion, Currency, RefreshSummary};
