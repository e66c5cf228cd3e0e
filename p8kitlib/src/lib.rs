//! # p8kitlib
//!
//! A library for working with PICO-8 cartridge sources: counting tokens
//! against the 8192-token budget, splitting a `.p8` file into per-tab `.lua`
//! files, joining them back, and comparing two cartridges.
//!
//! ## Token counting
//!
//! PICO-8 charges code by its own notion of a token, not by bytes or lines.
//! Counting runs three stages per line:
//!
//! - **Scan** ([`lexer`]): cut the line into candidate lexemes
//! - **Merge** ([`merge`]): fold compound operators, split decimals and signed
//!   literals back into single units
//! - **Classify** ([`classify`]): decide per lexeme whether it is charged
//!
//! Closing brackets, commas, colons, `end` and `local` are free. Comments,
//! including `--[[ ]]` blocks, are removed first.
//!
//! ## Example
//!
//! ```rust
//! use p8kitlib::{count_directory, count_line, CountOptions};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! assert_eq!(count_line("x = 1.5"), 3);
//! assert_eq!(count_line("local x = 1"), 3);
//! assert_eq!(count_line("end"), 0);
//!
//! let dir = tempdir().unwrap();
//! fs::write(dir.path().join("main.lua"), "function _init()\n  t = 0\nend\n").unwrap();
//!
//! let result = count_directory(dir.path(), &CountOptions::new()).unwrap();
//! assert_eq!(result.total, 6);
//! assert_eq!(result.budget.remaining(), 8186);
//! ```

pub mod classify;
pub mod compare;
pub mod counter;
pub mod error;
pub mod filter;
pub mod join;
pub mod lexer;
pub mod merge;
pub mod options;
pub mod report;
pub mod split;
pub mod stats;

pub use classify::{classify, is_token, Category, Classification};
pub use compare::{compare_files, compare_text, Comparison};
pub use counter::{
    count_cartridge, count_directory, count_file, count_line, count_path, count_source,
    CountOptions, CountResult, CARTRIDGE_HEADER,
};
pub use error::P8kitError;
pub use filter::{discover_files, FilterConfig, GFX_FILE_NAME};
pub use join::{join_directory, join_to_file};
pub use lexer::scan;
pub use merge::{merge, MergeRule};
pub use options::{OrderBy, OrderDirection, Ordering};
pub use report::TokenReport;
pub use split::{split_cartridge, split_file, SplitCartridge, SplitOutput, MAPPING_FILE_NAME};
pub use stats::{FileTokens, TokenBudget, TOKEN_LIMIT};

/// Result type for p8kitlib operations
pub type Result<T> = std::result::Result<T, P8kitError>;
