//! Service layer for the expense tracker
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, the confirm-then-commit protocol for bulk deletes,
//! and the derived filtered views.

pub mod expense;
pub mod form;
pub mod view;

pub use expense::{BulkDeletion, DeletionScope, ExpenseService};
pub use form::ExpenseForm;
pub use view::{category_totals, filtered, total, CategoryTotal};
