//! Expense model
//!
//! One dated, categorized, amount-bearing record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::ExpenseId;
use super::money::Money;

/// Shown in place of an empty description
pub const DESCRIPTION_PLACEHOLDER: &str = "-";

/// A single logged expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Assigned at creation, never reused or changed
    pub id: ExpenseId,

    pub date: NaiveDate,

    pub category: Category,

    /// Non-negative amount
    pub amount: Money,

    #[serde(default)]
    pub description: String,
}

impl Expense {
    /// Create a new expense with a fresh ID
    pub fn new(
        date: NaiveDate,
        category: Category,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            date,
            category,
            amount,
            description: description.into(),
        }
    }

    /// Description as displayed in tables and reports
    pub fn description_display(&self) -> &str {
        if self.description.trim().is_empty() {
            DESCRIPTION_PLACEHOLDER
        } else {
            &self.description
        }
    }

    /// ISO `YYYY-MM-DD`
    pub fn date_display(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date_display(),
            self.category,
            self.amount,
            self.description_display()
        )
    }
}
