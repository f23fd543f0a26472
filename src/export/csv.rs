//! CSV Export functionality
//!
//! Writes the filtered expense view as a spreadsheet-compatible table.

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::CategoryFilter;
use crate::services::ExpenseService;
use crate::storage::{write_atomic, Storage};

const HEADER: [&str; 4] = ["Date", "Category", "Amount", "Description"];

fn export_error(e: impl std::fmt::Display) -> ExpenseError {
    ExpenseError::Export(e.to_string())
}

/// Write the expenses matching `selection` to `writer`, newest first
///
/// Returns the number of rows written, header excluded.
pub fn export_expenses_csv<W: Write>(
    storage: &Storage,
    selection: &CategoryFilter,
    writer: W,
) -> ExpenseResult<usize> {
    let expenses = ExpenseService::new(storage).list(selection)?;

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER).map_err(export_error)?;

    for expense in &expenses {
        wtr.write_record([
            expense.date_display(),
            expense.category.to_string(),
            expense.amount.to_string(),
            expense.description.clone(),
        ])
        .map_err(export_error)?;
    }

    wtr.flush().map_err(export_error)?;
    Ok(expenses.len())
}

/// Export to a file, replacing it atomically
pub fn export_expenses_csv_file(
    storage: &Storage,
    selection: &CategoryFilter,
    path: &Path,
) -> ExpenseResult<usize> {
    let mut buffer = Vec::new();
    let count = export_expenses_csv(storage, selection, &mut buffer)?;
    write_atomic(path, &buffer)?;

    info!(path = %path.display(), count, "CSV export written");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExpensePaths;
    use crate::models::Category;
    use crate::services::ExpenseForm;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn add(storage: &Storage, category: &str, amount: &str, description: &str) {
        let mut form = ExpenseForm::filled("2024-01-05", category, amount, description);
        ExpenseService::new(storage).add(&mut form).unwrap();
    }

    #[test]
    fn test_export_expenses_csv() {
        let (_temp_dir, storage) = create_test_storage();
        add(&storage, "Food", "100", "Groceries, weekly");
        add(&storage, "Transport", "50", "");

        let mut csv_output = Vec::new();
        let count = export_expenses_csv(&storage, &CategoryFilter::All, &mut csv_output).unwrap();
        assert_eq!(count, 2);

        let csv_string = String::from_utf8(csv_output).unwrap();
        let lines: Vec<_> = csv_string.lines().collect();
        assert_eq!(lines[0], "Date,Category,Amount,Description");
        assert_eq!(lines[1], "2024-01-05,Transport,50.00,");
        assert_eq!(lines[2], "2024-01-05,Food,100.00,\"Groceries, weekly\"");
    }

    #[test]
    fn test_export_respects_filter() {
        let (_temp_dir, storage) = create_test_storage();
        add(&storage, "Food", "100", "");
        add(&storage, "Transport", "50", "");

        let mut csv_output = Vec::new();
        let count = export_expenses_csv(
            &storage,
            &CategoryFilter::Only(Category::Transport),
            &mut csv_output,
        )
        .unwrap();
        assert_eq!(count, 1);

        let csv_string = String::from_utf8(csv_output).unwrap();
        assert!(csv_string.contains("Transport"));
        assert!(!csv_string.contains("Food"));
    }

    #[test]
    fn test_export_to_file() {
        let (temp_dir, storage) = create_test_storage();
        add(&storage, "Utilities", "75.25", "Electricity");

        let path = temp_dir.path().join("out.csv");
        let count = export_expenses_csv_file(&storage, &CategoryFilter::All, &path).unwrap();
        assert_eq!(count, 1);

        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.contains("Utilities,75.25,Electricity"));
    }
}
