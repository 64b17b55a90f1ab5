//! Core business logic for Expensa.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Rate tables are passed in explicitly, so every function here can be tested
//! against fixture maps.
//!
//! # Modules
//!
//! - `currency` - USD-pivot rate table and currency conversion
//! - `recurrence` - Recurring expense due dates and rollover
//! - `expense` - Preparing expenses for storage

pub mod currency;
pub mod expense;
pub mod recurrence;
