//! Expense categories and the category filter
//!
//! The category set is fixed. A filter selects either every category
//! (the "All" sentinel) or exactly one of them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the fixed expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[default]
    Food,
    Transport,
    Entertainment,
    Utilities,
    Health,
    Shopping,
    Other,
}

impl Category {
    /// Get all categories in display order
    pub fn all() -> &'static [Self] {
        &[
            Self::Food,
            Self::Transport,
            Self::Entertainment,
            Self::Utilities,
            Self::Health,
            Self::Shopping,
            Self::Other,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Entertainment => "Entertainment",
            Self::Utilities => "Utilities",
            Self::Health => "Health",
            Self::Shopping => "Shopping",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    /// Case-insensitive match against the category names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CategoryParseError(s.to_string()))
    }
}

/// The category used to narrow the displayed/exported set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    /// Every category
    #[default]
    All,
    /// A single category
    Only(Category),
}

impl CategoryFilter {
    /// Label used for the sentinel value
    pub const ALL_LABEL: &'static str = "All";

    /// Check whether an expense in `category` passes this filter
    pub fn matches(&self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => *selected == category,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// The selected category, or `None` for "All"
    pub fn category(&self) -> Option<Category> {
        match self {
            Self::All => None,
            Self::Only(category) => Some(*category),
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        Self::Only(category)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(Self::ALL_LABEL),
            Self::Only(category) => write!(f, "{}", category),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(Self::ALL_LABEL) {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

/// Error for text that names no known category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryParseError(pub String);

impl fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = Category::all().iter().map(|c| c.name()).collect();
        write!(
            f,
            "Unknown category '{}' (expected one of: {})",
            self.0,
            names.join(", ")
        )
    }
}

impl std::error::Error for CategoryParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_categories() {
        let all = Category::all();
        assert_eq!(all.len(), 7);
        assert_eq!(all[0], Category::Food);
        assert_eq!(all[6], Category::Other);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("food".parse::<Category>().unwrap(), Category::Food);
        assert_eq!(" HEALTH ".parse::<Category>().unwrap(), Category::Health);
        assert!("Groceries".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("All".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "Shopping".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Shopping)
        );
        assert!("Rent".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn test_filter_matches() {
        assert!(CategoryFilter::All.matches(Category::Other));
        let food = CategoryFilter::from(Category::Food);
        assert!(food.matches(Category::Food));
        assert!(!food.matches(Category::Transport));
        assert_eq!(food.category(), Some(Category::Food));
        assert_eq!(CategoryFilter::All.category(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(CategoryFilter::All.to_string(), "All");
        assert_eq!(CategoryFilter::Only(Category::Utilities).to_string(), "Utilities");
    }

    #[test]
    fn test_serialized_as_name() {
        let json = serde_json::to_string(&Category::Entertainment).unwrap();
        assert_eq!(json, "\"Entertainment\"");
    }

    #[test]
    fn test_parse_error_lists_choices() {
        let err = "Rent".parse::<Category>().unwrap_err();
        assert!(err.to_string().contains("Food, Transport"));
    }
}
