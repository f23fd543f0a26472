//! Core data models for the expense tracker
//!
//! Expenses, their fixed category set, the category filter used to narrow
//! views, and the money type amounts are stored in.

pub mod category;
pub mod expense;
pub mod ids;
pub mod money;

pub use category::{Category, CategoryFilter, CategoryParseError};
pub use expense::{Expense, DESCRIPTION_PLACEHOLDER};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError};
