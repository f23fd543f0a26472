//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Expense amounts are never negative and never above
//! [`Money::MAX`]; parsing and deserialization both enforce that.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// A monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Money(i64);

impl Money {
    /// Largest amount a single expense may carry (10 trillion units)
    pub const MAX: Money = Money(1_000_000_000_000_000);

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use expense_tracker::models::Money;
    /// let amount = Money::from_cents(25050);
    /// assert_eq!(amount.to_string(), "250.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn from_units_cents(units: i64, cents: i64) -> Self {
        Self(units * 100 + cents)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole currency units (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// The cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Amount as a float, for percentage math only
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parse an amount typed into the add form
    ///
    /// Accepts "250.50", "250.5", "250", ".75" and an optional leading `$`.
    /// A third decimal digit rounds half-up; further digits are ignored.
    /// Negative amounts are rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let raw = s.trim();
        if raw.is_empty() {
            return Err(MoneyParseError::Empty);
        }
        if raw.starts_with('-') {
            return Err(MoneyParseError::Negative(raw.to_string()));
        }

        let s = raw.strip_prefix('+').unwrap_or(raw);
        let s = s.strip_prefix('$').unwrap_or(s).trim();
        let invalid = || MoneyParseError::InvalidFormat(raw.to_string());

        let (whole, frac) = match s.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (s, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        let digits: Vec<i64> = frac
            .chars()
            .take(3)
            .map(|c| i64::from(c as u8 - b'0'))
            .collect();
        let tenths = digits.first().copied().unwrap_or(0);
        let hundredths = digits.get(1).copied().unwrap_or(0);
        let round_up = digits.get(2).is_some_and(|d| *d >= 5);

        let cents = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(tenths * 10 + hundredths + i64::from(round_up)))
            .ok_or_else(|| MoneyParseError::TooLarge(raw.to_string()))?;

        if cents > Self::MAX.0 {
            return Err(MoneyParseError::TooLarge(raw.to_string()));
        }

        Ok(Self(cents))
    }

    /// Format with a currency label, e.g. `$ 250.50`
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        format!("{} {}", symbol, self)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

/// Two decimal places, no currency label
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

/// Saturates at the `i64` bounds instead of overflowing
impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl TryFrom<i64> for Money {
    type Error = MoneyParseError;

    fn try_from(cents: i64) -> Result<Self, Self::Error> {
        if cents < 0 {
            Err(MoneyParseError::Negative(Self(cents).to_string()))
        } else if cents > Self::MAX.0 {
            Err(MoneyParseError::TooLarge(Self(cents).to_string()))
        } else {
            Ok(Self(cents))
        }
    }
}

impl From<Money> for i64 {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    Empty,
    Negative(String),
    TooLarge(String),
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Amount is required"),
            Self::Negative(s) => write!(f, "Amount cannot be negative: {}", s),
            Self::TooLarge(s) => write!(f, "Amount is too large: {}", s),
            Self::InvalidFormat(s) => write!(f, "Invalid amount: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
