//! High-level token counting API.
//!
//! Counting runs scan → merge → classify per line and sums upward:
//! line, file, directory. Lines are independent of each other; the only
//! construct that spans lines, the `--[[ ]]` block comment, is removed at
//! file scope before the content is split.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use crate::classify::classify;
use crate::filter::{discover_files, FilterConfig};
use crate::lexer::scan;
use crate::merge::merge;
use crate::options::Ordering;
use crate::stats::{FileTokens, TokenBudget, TOKEN_LIMIT};
use crate::{P8kitError, Result};

/// Preamble written at the top of every `.p8` file.
pub const CARTRIDGE_HEADER: &str =
    "pico-8 cartridge // http://www.pico-8.com\nversion 36\n__lua__\n";

/// Line comment markers, all treated alike.
const COMMENT_MARKERS: [&str; 3] = ["//", "--", "#"];

static BLOCK_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)--\[\[.*?\]\]").expect("block comment pattern is valid"));

/// Options for counting a directory.
#[derive(Debug, Clone)]
pub struct CountOptions {
    /// File filter configuration
    pub file_filter: FilterConfig,
    /// Token limit the total is measured against
    pub limit: u64,
    /// Order of the per-file breakdown
    pub ordering: Ordering,
}

impl Default for CountOptions {
    fn default() -> Self {
        Self {
            file_filter: FilterConfig::default(),
            limit: TOKEN_LIMIT,
            ordering: Ordering::default(),
        }
    }
}

impl CountOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set file filter.
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.file_filter = filter;
        self
    }

    /// Measure against a limit other than 8192.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Set ordering of the per-file breakdown.
    pub fn ordering(mut self, ordering: Ordering) -> Self {
        self.ordering = ordering;
        self
    }
}

/// Result of counting a directory.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CountResult {
    /// Sum over all files
    pub total: u64,
    /// Per-file counts
    pub files: Vec<FileTokens>,
    /// Total measured against the limit
    pub budget: TokenBudget,
}

impl CountResult {
    /// Token count for one file name, if it was counted.
    pub fn get(&self, name: &str) -> Option<u64> {
        self.files.iter().find(|f| f.name == name).map(|f| f.tokens)
    }
}

/// Cut a line at the leftmost comment marker.
pub fn strip_line_comment(line: &str) -> &str {
    let cut = COMMENT_MARKERS
        .iter()
        .filter_map(|marker| line.find(marker))
        .min()
        .unwrap_or(line.len());
    &line[..cut]
}

/// Count the PICO-8 tokens on one line.
///
/// Blank lines and lines starting with a comment marker cost nothing.
pub fn count_line(line: &str) -> u64 {
    let trimmed = line.trim();
    if trimmed.is_empty() || COMMENT_MARKERS.iter().any(|m| trimmed.starts_with(m)) {
        return 0;
    }

    let raw = scan(strip_line_comment(line));
    let merged = merge(&raw);

    merged
        .iter()
        .filter(|lexeme| {
            let classification = classify(lexeme);
            let counted = classification.counts();
            trace!(lexeme = %lexeme, rule = ?classification, counted, "classified");
            counted
        })
        .count() as u64
}

/// Count the tokens in Lua source text.
///
/// Strips the cartridge header if the text starts with it, drops block
/// comments, then sums the line counts.
pub fn count_source(content: &str) -> u64 {
    let content = content.strip_prefix(CARTRIDGE_HEADER).unwrap_or(content);
    let content = BLOCK_COMMENT.replace_all(content, "");

    content
        .split('\n')
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with("//")
        })
        .map(count_line)
        .sum()
}

fn is_section_header(line: &str) -> bool {
    let line = line.trim_end();
    line.len() > 4
        && line.starts_with("__")
        && line.ends_with("__")
        && line[2..line.len() - 2]
            .bytes()
            .all(|b| b.is_ascii_alphanumeric())
}

/// The code section of a full cartridge.
///
/// Text after the `__lua__` line up to the next section header. Content
/// without a `__lua__` line is returned whole.
pub fn lua_section(cart: &str) -> &str {
    let mut offset = 0;
    let mut start = None;

    for line in cart.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        match start {
            None if line.trim_end() == "__lua__" => start = Some(offset),
            Some(s) if is_section_header(line) => return &cart[s..line_start],
            _ => {}
        }
    }

    match start {
        Some(s) => &cart[s..],
        None => cart,
    }
}

/// Count the tokens in the code section of a `.p8` cartridge.
pub fn count_cartridge(content: &str) -> u64 {
    count_source(lua_section(content))
}

fn read(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(P8kitError::PathNotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|e| P8kitError::read(path, e))
}

/// Count the tokens in a Lua source file.
pub fn count_file(path: impl AsRef<Path>) -> Result<u64> {
    let path = path.as_ref();
    let tokens = count_source(&read(path)?);
    debug!(path = %path.display(), tokens, "counted file");
    Ok(tokens)
}

/// Count a file, treating `.p8` files as whole cartridges.
pub fn count_path(path: impl AsRef<Path>) -> Result<u64> {
    let path = path.as_ref();
    if path.extension().is_some_and(|ext| ext == "p8") {
        let tokens = count_cartridge(&read(path)?);
        debug!(path = %path.display(), tokens, "counted cartridge");
        Ok(tokens)
    } else {
        count_file(path)
    }
}

/// Count every eligible `.lua` file directly inside a directory.
///
/// Any file that cannot be read fails the whole count.
///
/// # Example
///
/// ```rust,ignore
/// use p8kitlib::{count_directory, CountOptions};
///
/// let result = count_directory("mygame/", &CountOptions::new())?;
/// println!("{} of {} tokens", result.total, result.budget.limit);
/// ```
pub fn count_directory(path: impl AsRef<Path>, options: &CountOptions) -> Result<CountResult> {
    let files = discover_files(path, &options.file_filter)?;

    let mut result = CountResult::default();

    for file_path in files {
        let tokens = count_file(&file_path)?;
        result.total += tokens;
        result.files.push(FileTokens::new(file_path, tokens));
    }

    options.ordering.sort(&mut result.files);
    result.budget = TokenBudget::with_limit(result.total, options.limit);

    Ok(result)
}
