//! Export module for the expense tracker
//!
//! CSV export of the filtered expense view. The printable report lives in
//! [`crate::reports`].

pub mod csv;

pub use self::csv::{export_expenses_csv, export_expenses_csv_file};
