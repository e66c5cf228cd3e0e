//! Presentation-ready token report.
//!
//! `TokenReport` is the last stop before output: rows, total and budget are
//! already computed, so a renderer only formats. It serializes directly for
//! JSON output; [`TokenReport::render_text`] gives the plain-text layout.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::counter::CountResult;
use crate::stats::TokenBudget;

/// One file row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// File name
    pub label: String,
    /// Tokens in the file
    pub tokens: u64,
}

/// Budget footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportFooter {
    pub total: u64,
    pub limit: u64,
    pub remaining: i64,
    /// Remaining percentage; rendered with two decimals
    pub remaining_percent: f64,
}

impl From<TokenBudget> for ReportFooter {
    fn from(budget: TokenBudget) -> Self {
        Self {
            total: budget.used,
            limit: budget.limit,
            remaining: budget.remaining(),
            remaining_percent: budget.remaining_percent(),
        }
    }
}

/// Table-ready token data for one directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenReport {
    /// Directory the files were read from, as given by the caller
    pub directory: String,
    /// Per-file rows, in result order
    pub rows: Vec<ReportRow>,
    /// Totals and budget
    pub footer: ReportFooter,
}

impl TokenReport {
    /// Build a report from a directory count.
    pub fn from_count(result: &CountResult, directory: impl Into<String>) -> Self {
        let rows = result
            .files
            .iter()
            .map(|f| ReportRow {
                label: f.name.clone(),
                tokens: f.tokens,
            })
            .collect();

        TokenReport {
            directory: directory.into(),
            rows,
            footer: ReportFooter::from(TokenBudget::with_limit(
                result.total,
                result.budget.limit,
            )),
        }
    }

    /// Render as plain text, one file per line, then the budget summary.
    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TokenReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Token count per file in '{}':", self.directory)?;
        for row in &self.rows {
            writeln!(f, "  {}: {}", row.label, row.tokens)?;
        }
        writeln!(f, "Total tokens in the directory: {}", self.footer.total)?;
        writeln!(f, "Max tokens for project: {}", self.footer.limit)?;
        writeln!(
            f,
            "Tokens remaining: {}, or {:.2}% of the total",
            self.footer.remaining, self.footer.remaining_percent
        )
    }
}
