//! Line-by-line cartridge comparison, stopping at the first difference.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{P8kitError, Result};

/// Outcome of comparing two texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    /// Same lines, same count
    Identical,
    /// First differing line (1-based), both sides trimmed for display
    LineMismatch {
        line: usize,
        left: String,
        right: String,
    },
    /// Common lines agree but one side has more (1-based index of the first extra line)
    LengthMismatch { line: usize },
}

impl Comparison {
    pub fn is_identical(&self) -> bool {
        matches!(self, Comparison::Identical)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparison::Identical => write!(f, "No differences found."),
            Comparison::LineMismatch { line, left, right } => write!(
                f,
                "Difference found at line {line}: \nFile 1: {left}\nFile 2: {right}"
            ),
            Comparison::LengthMismatch { line } => write!(
                f,
                "Difference found at line {line}: Files have different lengths."
            ),
        }
    }
}

/// Compare two texts line by line, line terminators included.
pub fn compare_text(left: &str, right: &str) -> Comparison {
    let mut left_lines = left.split_inclusive('\n');
    let mut right_lines = right.split_inclusive('\n');
    let mut line = 1;

    loop {
        match (left_lines.next(), right_lines.next()) {
            (None, None) => return Comparison::Identical,
            (Some(a), Some(b)) if a == b => line += 1,
            (Some(a), Some(b)) => {
                return Comparison::LineMismatch {
                    line,
                    left: a.trim().to_string(),
                    right: b.trim().to_string(),
                }
            }
            _ => return Comparison::LengthMismatch { line },
        }
    }
}

/// Compare two files. Either one missing or unreadable is an error.
pub fn compare_files(left: impl AsRef<Path>, right: impl AsRef<Path>) -> Result<Comparison> {
    let left = left.as_ref();
    let right = right.as_ref();
    let a = fs::read_to_string(left).map_err(|e| P8kitError::read(left, e))?;
    let b = fs::read_to_string(right).map_err(|e| P8kitError::read(right, e))?;
    Ok(compare_text(&a, &b))
}
