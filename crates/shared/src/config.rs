//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Currency table configuration.
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Recurring payment reminder configuration.
    #[serde(default)]
    pub reminders: ReminderConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Currency table configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyConfig {
    /// Currency every expense amount is also stored in.
    #[serde(default = "default_reporting_currency")]
    pub reporting_currency: String,
    /// Startup seed list. Empty means the built-in list.
    #[serde(default)]
    pub seeds: Vec<CurrencySeed>,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            reporting_currency: default_reporting_currency(),
            seeds: Vec::new(),
        }
    }
}

fn default_reporting_currency() -> String {
    "COP".to_string()
}

/// A currency row used to seed the rate table at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CurrencySeed {
    /// Currency code (e.g., "COP").
    pub code: String,
    /// Display name.
    pub name: String,
    /// Display symbol.
    pub symbol: String,
    /// Units of this currency per 1 USD.
    pub exchange_rate: Decimal,
}

/// Recurring payment reminder configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReminderConfig {
    /// How many days ahead of the due date a reminder is sent.
    #[serde(default = "default_days_before")]
    pub days_before: u32,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            days_before: default_days_before(),
        }
    }
}

fn default_days_before() -> u32 {
    3
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive, overridden by `RUST_LOG` when set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "expensa=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, lowest priority first: `config/default`, `config/{RUN_MODE}`,
    /// then `EXPENSA__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("EXPENSA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
