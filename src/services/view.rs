//! Filtering and aggregation over the expense collection
//!
//! Pure functions; nothing here mutates or persists.

use crate::models::{Category, CategoryFilter, Expense, Money};

/// The subsequence of `expenses` matching `filter`, order preserved
pub fn filtered(expenses: &[Expense], filter: &CategoryFilter) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| filter.matches(e.category))
        .cloned()
        .collect()
}

/// Sum of amounts; zero for an empty view
pub fn total(expenses: &[Expense]) -> Money {
    expenses.iter().map(|e| e.amount).sum()
}

/// Spending for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Money,
    pub count: usize,
    /// Share of the overall total, 0-100
    pub percentage: f64,
}

/// Per-category totals in category order, skipping categories with no expenses
pub fn category_totals(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let grand_total = total(expenses);

    Category::all()
        .iter()
        .filter_map(|&category| {
            let matching: Vec<_> = expenses.iter().filter(|e| e.category == category).collect();
            if matching.is_empty() {
                return None;
            }

            let total: Money = matching.iter().map(|e| e.amount).sum();
            let percentage = if grand_total.is_zero() {
                0.0
            } else {
                total.as_f64() / grand_total.as_f64() * 100.0
            };

            Some(CategoryTotal {
                category,
                total,
                count: matching.len(),
                percentage,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expense(category: Category, cents: i64) -> Expense {
        Expense::new(
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            category,
            Money::from_cents(cents),
            "",
        )
    }

    /// Newest first, as the collection stores them
    fn sample() -> Vec<Expense> {
        vec![
            expense(Category::Food, 7500),
            expense(Category::Transport, 5000),
            expense(Category::Food, 10000),
        ]
    }

    #[test]
    fn test_filter_all_returns_everything() {
        let expenses = sample();
        assert_eq!(filtered(&expenses, &CategoryFilter::All), expenses);
    }

    #[test]
    fn test_filter_by_category_preserves_order() {
        let expenses = sample();
        let food = filtered(&expenses, &CategoryFilter::Only(Category::Food));

        assert_eq!(food.len(), 2);
        assert_eq!(food[0].id, expenses[0].id);
        assert_eq!(food[1].id, expenses[2].id);
        assert_eq!(total(&food), Money::from_cents(17500));
    }

    #[test]
    fn test_filter_with_no_matches() {
        let expenses = sample();
        let health = filtered(&expenses, &CategoryFilter::Only(Category::Health));
        assert!(health.is_empty());
        assert_eq!(total(&health).to_string(), "0.00");
    }

    #[test]
    fn test_total_of_all() {
        assert_eq!(total(&sample()), Money::from_cents(22500));
        assert_eq!(total(&[]), Money::zero());
    }

    #[test]
    fn test_category_totals() {
        let totals = category_totals(&sample());
        assert_eq!(totals.len(), 2);

        assert_eq!(totals[0].category, Category::Food);
        assert_eq!(totals[0].count, 2);
        assert_eq!(totals[0].total, Money::from_cents(17500));
        assert!((totals[0].percentage - 77.777).abs() < 0.01);

        assert_eq!(totals[1].category, Category::Transport);
        assert_eq!(totals[1].count, 1);
    }

    #[test]
    fn test_category_totals_zero_amounts() {
        let totals = category_totals(&[expense(Category::Other, 0)]);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].percentage, 0.0);
    }
}
