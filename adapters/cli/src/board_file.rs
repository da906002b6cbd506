//! Reading and writing board files on disk.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use tilecraft_core::BoardSnapshot;

/// Reads and validates a board file.
pub(crate) fn load(path: &Path) -> Result<BoardSnapshot> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read board file {}", path.display()))?;
    BoardSnapshot::from_json_str(&content)
        .with_context(|| format!("{} is not a valid board file", path.display()))
}

/// Writes a board as pretty-printed JSON.
pub(crate) fn save(path: &Path, snapshot: &BoardSnapshot) -> Result<()> {
    let json = snapshot
        .to_json_pretty()
        .context("failed to serialize board")?;
    fs::write(path, json).with_context(|| format!("failed to write board file {}", path.display()))
}
