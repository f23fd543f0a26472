//! Strongly-typed ID wrapper for expenses

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const DISPLAY_PREFIX: &str = "exp-";

/// Opaque unique identifier assigned to an expense at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(Uuid);

impl ExpenseId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Short form shown in listings, e.g. `exp-550e8400`
    pub fn short(&self) -> String {
        self.to_string()
    }

    /// Whether `prefix` (with or without `exp-`) identifies this ID
    ///
    /// Accepts either the full UUID or any leading slice of it, so listings
    /// that show the short form can be fed back into `delete`.
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        let prefix = prefix.strip_prefix(DISPLAY_PREFIX).unwrap_or(prefix);
        !prefix.is_empty() && self.0.to_string().starts_with(&prefix.to_lowercase())
    }
}

impl Default for ExpenseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", DISPLAY_PREFIX, &self.0.to_string()[..8])
    }
}

impl From<Uuid> for ExpenseId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for ExpenseId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix(DISPLAY_PREFIX).unwrap_or(s);
        Ok(Self(Uuid::parse_str(s)?))
    }
}
