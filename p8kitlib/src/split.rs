//! Cartridge splitting: one `.p8` file into per-tab `.lua` files.
//!
//! Section boundaries are line prefixes:
//!
//! - `--#name` starts a file `name.lua`
//! - `-->8` (PICO-8's tab separator) closes the current tab, which is then
//!   recorded in the mapping
//! - `__gfx__` closes the current tab and sends the rest of the cartridge to
//!   `__gfx__.lua`
//!
//! The marker line itself belongs to the section that is current after it is
//! seen, so concatenating the mapped sections plus `__gfx__.lua` under the
//! cartridge header reproduces the cartridge.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::counter::CARTRIDGE_HEADER;
use crate::filter::GFX_FILE_NAME;
use crate::{P8kitError, Result};

/// Name of the file listing tab order.
pub const MAPPING_FILE_NAME: &str = "mappings.txt";

/// Section that collects lines before the first `--#` marker.
pub const INITIAL_SECTION_NAME: &str = "initialization.lua";

/// One output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub content: String,
}

/// A cartridge cut into sections, plus the order the joiner needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitCartridge {
    /// Sections in order of first appearance
    pub sections: Vec<Section>,
    /// Names of the code sections, in cartridge order
    pub mapping: Vec<String>,
}

impl SplitCartridge {
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Make `name` current. A section seen before starts over.
    fn switch_to(&mut self, name: String) -> usize {
        match self.sections.iter().position(|s| s.name == name) {
            Some(index) => {
                self.sections[index].content.clear();
                index
            }
            None => {
                self.sections.push(Section {
                    name,
                    content: String::new(),
                });
                self.sections.len() - 1
            }
        }
    }

    fn record(&mut self, index: usize) {
        let name = &self.sections[index].name;
        if self.mapping.last() != Some(name) {
            self.mapping.push(name.clone());
        }
    }

    /// The `mappings.txt` body: one name per line.
    pub fn mapping_text(&self) -> String {
        self.mapping.iter().map(|m| format!("{m}\n")).collect()
    }
}

/// Split cartridge text into sections. No I/O.
pub fn split_cartridge(content: &str) -> SplitCartridge {
    let content = content.strip_prefix(CARTRIDGE_HEADER).unwrap_or(content);

    let mut split = SplitCartridge::default();
    let mut current = split.switch_to(INITIAL_SECTION_NAME.to_string());

    for line in content.split_inclusive('\n') {
        if line.starts_with("__gfx__") {
            split.record(current);
            current = split.switch_to(GFX_FILE_NAME.to_string());
        } else if let Some(name) = line.strip_prefix("--#") {
            current = split.switch_to(format!("{}.lua", name.trim()));
        } else if line.starts_with("-->8") {
            split.record(current);
        }

        split.sections[current].content.push_str(line);
    }

    // A cart without graphics ends on a tab no marker has recorded yet.
    if split.sections[current].name != GFX_FILE_NAME {
        split.record(current);
    }

    split
}

/// Where [`split_file`] wrote its output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitOutput {
    /// Directory named after the cartridge
    pub directory: PathBuf,
    /// Section files written, in order of first appearance
    pub files: Vec<PathBuf>,
}

/// Split a `.p8` file into a sibling directory named after its stem.
///
/// Refuses to touch an existing directory.
pub fn split_file(path: impl AsRef<Path>) -> Result<SplitOutput> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(P8kitError::PathNotFound(path.to_path_buf()));
    }

    let directory = path.with_extension("");
    if directory.exists() {
        return Err(P8kitError::DirectoryExists(directory));
    }

    let content = fs::read_to_string(path).map_err(|e| P8kitError::read(path, e))?;
    let split = split_cartridge(&content);

    fs::create_dir_all(&directory).map_err(|e| P8kitError::write(&directory, e))?;

    let mut files = Vec::with_capacity(split.sections.len());
    for section in &split.sections {
        let file = directory.join(&section.name);
        debug!(path = %file.display(), bytes = section.content.len(), "writing section");
        fs::write(&file, &section.content).map_err(|e| P8kitError::write(&file, e))?;
        files.push(file);
    }

    let mapping = directory.join(MAPPING_FILE_NAME);
    fs::write(&mapping, split.mapping_text()).map_err(|e| P8kitError::write(&mapping, e))?;

    Ok(SplitOutput { directory, files })
}
