//! Rebuilding a cartridge from a split directory.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::counter::CARTRIDGE_HEADER;
use crate::filter::GFX_FILE_NAME;
use crate::split::MAPPING_FILE_NAME;
use crate::{P8kitError, Result};

/// Concatenate a split directory back into cartridge text.
///
/// Output is the cartridge header, then every file named in `mappings.txt`
/// in order, then `__gfx__.lua` if present. Blank mapping lines are skipped.
/// A mapped file that cannot be read fails the join.
pub fn join_directory(dir: impl AsRef<Path>) -> Result<String> {
    let dir = dir.as_ref();
    let mapping_path = dir.join(MAPPING_FILE_NAME);

    if !mapping_path.is_file() {
        return Err(P8kitError::MappingNotFound(mapping_path));
    }

    let mapping =
        fs::read_to_string(&mapping_path).map_err(|e| P8kitError::read(&mapping_path, e))?;

    let mut content = String::from(CARTRIDGE_HEADER);

    for name in mapping.lines().map(str::trim).filter(|n| !n.is_empty()) {
        let path = dir.join(name);
        let section = fs::read_to_string(&path).map_err(|e| P8kitError::read(&path, e))?;
        debug!(path = %path.display(), bytes = section.len(), "appending section");
        content.push_str(&section);
    }

    let gfx_path = dir.join(GFX_FILE_NAME);
    if gfx_path.is_file() {
        let gfx = fs::read_to_string(&gfx_path).map_err(|e| P8kitError::read(&gfx_path, e))?;
        content.push_str(&gfx);
    }

    Ok(content)
}

/// Join a split directory and write the cartridge to `output`.
pub fn join_to_file(dir: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<()> {
    let output = output.as_ref();
    let content = join_directory(dir)?;
    fs::write(output, content).map_err(|e| P8kitError::write(output, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::{split_cartridge, split_file};
    use tempfile::tempdir;

    const CART: &str = "pico-8 cartridge // http://www.pico-8.com\nversion 36\n__lua__\n\
--#main\nfunction _init()\n  t = 0\nend\n-->8\n--#draw\nfunction _draw()\n  cls()\nend\n\
__gfx__\n00000000\n__sfx__\n0110\n";

    #[test]
    fn test_join_directory() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(MAPPING_FILE_NAME), "b.lua\n\na.lua\n").unwrap();
        fs::write(temp.path().join("a.lua"), "a = 1\n").unwrap();
        fs::write(temp.path().join("b.lua"), "b = 2\n").unwrap();
        fs::write(temp.path().join("unmapped.lua"), "c = 3\n").unwrap();

        let joined = join_directory(temp.path()).unwrap();
        assert_eq!(joined, format!("{CARTRIDGE_HEADER}b = 2\na = 1\n"));
    }

    #[test]
    fn test_join_appends_gfx() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(MAPPING_FILE_NAME), "a.lua\n").unwrap();
        fs::write(temp.path().join("a.lua"), "a = 1\n").unwrap();
        fs::write(temp.path().join(GFX_FILE_NAME), "__gfx__\n0000\n").unwrap();

        let joined = join_directory(temp.path()).unwrap();
        assert!(joined.ends_with("a = 1\n__gfx__\n0000\n"));
    }

    #[test]
    fn test_join_missing_mapping() {
        let temp = tempdir().unwrap();
        let result = join_directory(temp.path());
        assert!(matches!(result, Err(P8kitError::MappingNotFound(_))));
    }

    #[test]
    fn test_join_missing_mapped_file() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(MAPPING_FILE_NAME), "gone.lua\n").unwrap();

        let result = join_directory(temp.path());
        assert!(matches!(result, Err(P8kitError::FileRead { .. })));
    }

    #[test]
    fn test_split_then_join_round_trip() {
        let temp = tempdir().unwrap();
        let cart = temp.path().join("game.p8");
        fs::write(&cart, CART).unwrap();

        let out = split_file(&cart).unwrap();
        let rebuilt = temp.path().join("rebuilt.p8");
        join_to_file(&out.directory, &rebuilt).unwrap();

        assert_eq!(fs::read_to_string(rebuilt).unwrap(), CART);
    }

    #[test]
    fn test_round_trip_without_gfx_or_names() {
        let cart = format!("{CARTRIDGE_HEADER}x = 1\n-->8\ny = 2\n");
        let split = split_cartridge(&cart);

        let temp = tempdir().unwrap();
        for section in &split.sections {
            fs::write(temp.path().join(&section.name), &section.content).unwrap();
        }
        fs::write(temp.path().join(MAPPING_FILE_NAME), split.mapping_text()).unwrap();

        assert_eq!(join_directory(temp.path()).unwrap(), cart);
    }
}
