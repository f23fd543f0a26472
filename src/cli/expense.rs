//! Expense CLI commands
//!
//! Implements the commands for recording, listing, deleting, and exporting
//! expenses.

use std::path::PathBuf;

use chrono::Local;
use clap::Subcommand;

use super::prompt::{AssumeYes, Prompt};
use crate::config::{ExpensePaths, Settings};
use crate::display::{format_category_summary, format_expense_list};
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::export_expenses_csv_file;
use crate::models::CategoryFilter;
use crate::render::TextCanvas;
use crate::reports::export_report;
use crate::services::{category_totals, total, BulkDeletion, ExpenseForm, ExpenseService};
use crate::storage::Storage;

/// Expense commands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount (e.g., "250.50")
        #[arg(short, long)]
        amount: String,
        /// Category (defaults to the configured default category)
        #[arg(short, long)]
        category: Option<String>,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(long)]
        description: Option<String>,
    },

    /// List expenses, newest first
    List {
        /// Category to show, or "All"
        #[arg(short, long, default_value = CategoryFilter::ALL_LABEL)]
        category: CategoryFilter,
    },

    /// Delete one expense
    Delete {
        /// Expense ID (full or short form)
        id: String,
    },

    /// Delete every expense
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete every expense in a category
    #[command(name = "delete-category")]
    DeleteCategory {
        /// Category to delete
        category: CategoryFilter,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate the printable expense report
    Report {
        /// Category to include, or "All"
        #[arg(short, long, default_value = CategoryFilter::ALL_LABEL)]
        category: CategoryFilter,
        /// Directory to write the report into (defaults to the reports directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Export expenses as CSV
    Export {
        /// Output file path
        path: PathBuf,
        /// Category to include, or "All"
        #[arg(short, long, default_value = CategoryFilter::ALL_LABEL)]
        category: CategoryFilter,
    },

    /// Show spending per category
    Summary {
        /// Category to include, or "All"
        #[arg(short, long, default_value = CategoryFilter::ALL_LABEL)]
        category: CategoryFilter,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    paths: &ExpensePaths,
    settings: &Settings,
    cmd: ExpenseCommands,
    prompt: &mut dyn Prompt,
) -> ExpenseResult<()> {
    let service = ExpenseService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            date,
            description,
        } => {
            let mut form = ExpenseForm::new(Local::now().date_naive(), settings.default_category);
            form.amount = amount;
            if let Some(category) = category {
                form.category = category;
            }
            if let Some(date) = date {
                form.date = date;
            }
            if let Some(description) = description {
                form.description = description;
            }

            let expense = service.add(&mut form)?;
            println!("Added expense: {}", expense.id);
            println!("  Date:        {}", expense.date_display());
            println!("  Category:    {}", expense.category);
            println!(
                "  Amount:      {}",
                expense.amount.format_with_symbol(&settings.currency_symbol)
            );
            println!("  Description: {}", expense.description_display());
        }

        ExpenseCommands::List { category } => {
            let expenses = service.list(&category)?;
            print!(
                "{}",
                format_expense_list(
                    &expenses,
                    &category,
                    total(&expenses),
                    &settings.currency_symbol
                )
            );
        }

        ExpenseCommands::Delete { id } => {
            let expense = service
                .find(&id)?
                .ok_or_else(|| ExpenseError::expense_not_found(&id))?;
            service.remove(expense.id)?;
            println!("Deleted expense: {} ({})", expense.id, expense);
        }

        ExpenseCommands::Clear { yes } => {
            let plan = service.plan_remove_all()?;
            confirm_and_commit(&service, plan, yes, prompt)?;
        }

        ExpenseCommands::DeleteCategory { category, yes } => {
            let plan = service.plan_remove_by_category(&category)?;
            confirm_and_commit(&service, plan, yes, prompt)?;
        }

        ExpenseCommands::Report {
            category,
            output_dir,
        } => {
            let dir = output_dir.unwrap_or_else(|| paths.reports_dir());
            std::fs::create_dir_all(&dir).map_err(|e| {
                ExpenseError::Io(format!("Failed to create {}: {}", dir.display(), e))
            })?;

            let mut canvas = TextCanvas::new();
            let path = export_report(storage, settings, category, &mut canvas, &dir)?;
            println!("Report written to {}", path.display());
        }

        ExpenseCommands::Export { path, category } => {
            let count = export_expenses_csv_file(storage, &category, &path)?;
            println!("Exported {} expense(s) to {}", count, path.display());
        }

        ExpenseCommands::Summary { category } => {
            let expenses = service.list(&category)?;
            print!(
                "{}",
                format_category_summary(&category_totals(&expenses), &settings.currency_symbol)
            );
        }
    }

    Ok(())
}

/// Ask for confirmation unless `yes`, then run the deletion
fn confirm_and_commit(
    service: &ExpenseService,
    plan: BulkDeletion,
    yes: bool,
    prompt: &mut dyn Prompt,
) -> ExpenseResult<Option<usize>> {
    let mut assume_yes = AssumeYes;
    let prompt: &mut dyn Prompt = if yes { &mut assume_yes } else { prompt };

    if !prompt.confirm(&plan.confirmation_message())? {
        println!("Cancelled. No expenses were deleted.");
        return Ok(None);
    }

    let removed = service.commit(plan)?;
    println!("Deleted {} expense(s).", removed);
    Ok(Some(removed))
}
