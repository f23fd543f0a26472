//! Reports module for the expense tracker
//!
//! Builds the printable expense report for the current filter selection and
//! draws it through a [`crate::render::Canvas`].

pub mod expense_report;
pub mod layout;

pub use expense_report::{export_report, ExpenseReport};
