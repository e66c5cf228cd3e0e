//! Core data structures for token statistics

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The compiled-code token budget of a PICO-8 cartridge.
pub const TOKEN_LIMIT: u64 = 8192;

/// Token count for one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTokens {
    /// File name, as listed in the directory
    pub name: String,
    /// Full path to the file
    pub path: PathBuf,
    /// PICO-8 tokens in the file
    pub tokens: u64,
}

impl FileTokens {
    pub fn new(path: PathBuf, tokens: u64) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { name, path, tokens }
    }
}

/// Usage against a token limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBudget {
    /// Tokens consumed
    pub used: u64,
    /// Maximum allowed
    pub limit: u64,
}

impl Default for TokenBudget {
    fn default() -> Self {
        Self::new(0)
    }
}

impl TokenBudget {
    /// Budget against the standard PICO-8 limit.
    pub fn new(used: u64) -> Self {
        Self::with_limit(used, TOKEN_LIMIT)
    }

    pub fn with_limit(used: u64, limit: u64) -> Self {
        Self { used, limit }
    }

    /// Tokens left. Negative when over budget, saturating at the `i64` bounds.
    pub fn remaining(&self) -> i64 {
        let remaining = i128::from(self.limit) - i128::from(self.used);
        remaining.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
    }

    /// Percentage of the limit still free: `100 - used / limit * 100`.
    /// A zero limit has no free share and reports `0.0`.
    pub fn remaining_percent(&self) -> f64 {
        if self.limit == 0 {
            return 0.0;
        }
        100.0 - (self.used as f64 / self.limit as f64 * 100.0)
    }

    pub fn is_exceeded(&self) -> bool {
        self.used > self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_tokens_name() {
        let ft = FileTokens::new(PathBuf::from("/game/src/player.lua"), 12);
        assert_eq!(ft.name, "player.lua");
        assert_eq!(ft.tokens, 12);
    }

    #[test]
    fn test_budget_empty() {
        let budget = TokenBudget::default();
        assert_eq!(budget.limit, 8192);
        assert_eq!(budget.remaining(), 8192);
        assert_eq!(format!("{:.2}", budget.remaining_percent()), "100.00");
    }

    #[test]
    fn test_budget_partial() {
        let budget = TokenBudget::new(2048);
        assert_eq!(budget.remaining(), 6144);
        assert_eq!(format!("{:.2}", budget.remaining_percent()), "75.00");
        assert!(!budget.is_exceeded());
    }

    #[test]
    fn test_budget_rounding() {
        let budget = TokenBudget::new(1000);
        assert_eq!(budget.remaining(), 7192);
        // 100 - 1000/8192*100 = 87.79296875
        assert_eq!(format!("{:.2}", budget.remaining_percent()), "87.79");
    }

    #[test]
    fn test_budget_exceeded() {
        let budget = TokenBudget::new(8200);
        assert_eq!(budget.remaining(), -8);
        assert!(budget.is_exceeded());
        assert!(budget.remaining_percent() < 0.0);
    }

    #[test]
    fn test_budget_custom_limit() {
        let budget = TokenBudget::with_limit(50, 100);
        assert_eq!(budget.remaining(), 50);
        assert_eq!(format!("{:.2}", budget.remaining_percent()), "50.00");
    }

    #[test]
    fn test_budget_huge_limit_saturates() {
        let budget = TokenBudget::with_limit(5, 1u64 << 63);
        assert_eq!(budget.remaining(), i64::MAX);
        assert!(!budget.is_exceeded());

        let budget = TokenBudget::with_limit(u64::MAX, 0);
        assert_eq!(budget.remaining(), i64::MIN);
    }

    #[test]
    fn test_budget_zero_limit() {
        let budget = TokenBudget::with_limit(3, 0);
        assert_eq!(budget.remaining(), -3);
        assert!(budget.is_exceeded());
        assert_eq!(budget.remaining_percent(), 0.0);
    }
}
