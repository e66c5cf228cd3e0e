//! Ordering options for per-file results.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::stats::FileTokens;

/// Field to order results by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderBy {
    /// Order by file name (lexicographical)
    #[default]
    Name,
    /// Order by token count
    Tokens,
}

impl FromStr for OrderBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" | "file" | "path" => Ok(OrderBy::Name),
            "tokens" | "token" | "count" => Ok(OrderBy::Tokens),
            _ => Err(format!("Unknown order field: {}", s)),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderDirection {
    /// Ascending (A-Z, smallest first)
    #[default]
    Ascending,
    /// Descending (Z-A, largest first)
    Descending,
}

/// Ordering configuration for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ordering {
    /// Field to order by
    pub by: OrderBy,
    /// Sort direction
    pub direction: OrderDirection,
}

impl Ordering {
    /// Create ordering by name ascending (default)
    pub fn by_name() -> Self {
        Self::default()
    }

    /// Create ordering by token count, largest first
    pub fn by_tokens() -> Self {
        Self {
            by: OrderBy::Tokens,
            direction: OrderDirection::Descending,
        }
    }

    /// Set sort direction to ascending
    pub fn ascending(mut self) -> Self {
        self.direction = OrderDirection::Ascending;
        self
    }

    /// Set sort direction to descending
    pub fn descending(mut self) -> Self {
        self.direction = OrderDirection::Descending;
        self
    }

    /// Sort files in place. Ties on token count fall back to name.
    pub fn sort(&self, files: &mut [FileTokens]) {
        files.sort_by(|a, b| {
            let ord = match self.by {
                OrderBy::Name => a.name.cmp(&b.name),
                OrderBy::Tokens => a.tokens.cmp(&b.tokens).then_with(|| a.name.cmp(&b.name)),
            };
            match self.direction {
                OrderDirection::Ascending => ord,
                OrderDirection::Descending => ord.reverse(),
            }
        });
    }
}
