//! Expense Tracker - personal expense logging from the terminal
//!
//! This library provides the core functionality for recording dated,
//! categorized expenses, viewing them through a category filter, and
//! exporting a printable report or a CSV file.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, categories, money)
//! - `storage`: Key-value persistence and the expense repository
//! - `services`: Business logic layer
//! - `render`: Paged document drawing
//! - `reports`: The printable expense report
//! - `export`: CSV export
//! - `display`: Terminal table formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::config::{ExpensePaths, Settings};
//! use expense_tracker::storage::Storage;
//!
//! let paths = ExpensePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod render;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
