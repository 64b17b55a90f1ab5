//! Expense preparation: reporting-currency amounts and recurring schedules.

pub mod error;
pub mod service;
pub mod types;

pub use error::ExpenseError;
pub use service::ExpenseService;
pub use types::{NewExpense, PreparedExpense};
