//! Lua source discovery with glob pattern support.
//!
//! A file is eligible when it has a `.lua` extension and is not the
//! `__gfx__.lua` data dump written by the splitter. Include/exclude patterns
//! narrow that set further and are matched against the file name.

use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::error::P8kitError;
use crate::Result;

/// Graphics/data section written by the splitter. Never source code.
pub const GFX_FILE_NAME: &str = "__gfx__.lua";

/// Configuration for file filtering.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Glob patterns to include (if empty, include all eligible files)
    pub include: Vec<Pattern>,
    /// Glob patterns to exclude
    pub exclude: Vec<Pattern>,
}

impl FilterConfig {
    /// Create a new empty filter config (includes all eligible `.lua` files).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an include pattern.
    pub fn include(mut self, pattern: &str) -> Result<Self> {
        self.include.push(compile(pattern)?);
        Ok(self)
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        self.exclude.push(compile(pattern)?);
        Ok(self)
    }

    /// Add multiple exclude patterns.
    pub fn exclude_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.exclude(pattern)?;
        }
        Ok(self)
    }

    /// Check if a path matches the filter criteria.
    ///
    /// A path matches if:
    /// 1. It's an eligible Lua source file (see [`is_lua_source`])
    /// 2. Its name matches at least one include pattern (or include is empty)
    /// 3. Its name doesn't match any exclude pattern
    pub fn matches(&self, path: &Path) -> bool {
        if !is_lua_source(path) {
            return false;
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        if self.exclude.iter().any(|p| p.matches(&name)) {
            return false;
        }

        self.include.is_empty() || self.include.iter().any(|p| p.matches(&name))
    }
}

fn compile(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| P8kitError::InvalidGlob {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// `.lua` extension, and not `__gfx__.lua`.
pub fn is_lua_source(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "lua")
        && path.file_name().is_some_and(|name| name != GFX_FILE_NAME)
}

/// List the eligible Lua files directly inside `dir`.
///
/// Subdirectories are not descended into. Results are sorted by path. A
/// listing error is returned rather than skipped.
pub fn discover_files(dir: impl AsRef<Path>, filter: &FilterConfig) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();

    if !dir.exists() {
        return Err(P8kitError::PathNotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(P8kitError::NotADirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            P8kitError::read(path, e.into())
        })?;

        let path = entry.path();
        if path.is_file() && filter.matches(path) {
            files.push(path.to_path_buf());
        }
    }

    // Sort for deterministic output
    files.sort();

    Ok(files)
}
