//! Expense display formatting
//!
//! Formats the filtered expense view and the per-category breakdown as
//! terminal tables.

use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};

use crate::models::{CategoryFilter, Expense, Money};
use crate::services::CategoryTotal;

/// Format the expense view as a table followed by its total
pub fn format_expense_list(
    expenses: &[Expense],
    selection: &CategoryFilter,
    total: Money,
    currency: &str,
) -> String {
    if expenses.is_empty() {
        return match selection {
            CategoryFilter::All => {
                "No expenses recorded.\n\nRun 'expense add --amount <amount>' to record one.\n"
                    .to_string()
            }
            CategoryFilter::Only(category) => {
                format!("No expenses found in category \"{}\".\n", category)
            }
        };
    }

    let mut builder = Builder::default();
    builder.push_record([
        "ID".to_string(),
        "Date".to_string(),
        "Category".to_string(),
        format!("Amount ({})", currency),
        "Description".to_string(),
    ]);
    for expense in expenses {
        builder.push_record([
            expense.id.to_string(),
            expense.date_display(),
            expense.category.to_string(),
            expense.amount.to_string(),
            expense.description_display().to_string(),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::sharp())
        .modify(Columns::single(3), Alignment::right());

    format!(
        "{}\nTotal: {} ({} expense(s))\n",
        table,
        total.format_with_symbol(currency),
        expenses.len()
    )
}

/// Format per-category totals with their share of the overall total
pub fn format_category_summary(totals: &[CategoryTotal], currency: &str) -> String {
    if totals.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["Category", "Count", "Total", "Share"]);
    for row in totals {
        builder.push_record([
            row.category.to_string(),
            row.count.to_string(),
            row.total.format_with_symbol(currency),
            format!("{:.1}%", row.percentage),
        ]);
    }

    let grand_total: Money = totals.iter().map(|t| t.total).sum();
    let count: usize = totals.iter().map(|t| t.count).sum();

    let mut table = builder.build();
    table
        .with(Style::sharp())
        .modify(Columns::new(1..), Alignment::right());

    format!(
        "{}\nTotal: {} ({} expense(s))\n",
        table,
        grand_total.format_with_symbol(currency),
        count
    )
}
