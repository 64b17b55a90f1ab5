//! Shared types, errors, and configuration for Expensa.
//!
//! This crate provides common pieces used across all other crates:
//! - Money and currency-code types with decimal precision
//! - Application-wide error types
//! - Configuration management
//! - Tracing subscriber setup

pub mod config;
pub mod error;
pub mod telemetry;
pub mod types;

pub use self::config::AppConfig;
pub use error::{AppError, AppResult};
