//! Display formatting for terminal output
//!
//! Provides table formatting for the expense list and the category summary.

pub mod expense;

pub use expense::{format_category_summary, format_expense_list};
