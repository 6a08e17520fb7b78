//! Level loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable level files.

use std::fs;
use std::path::Path;
use thiserror::Error;
use super::Level;

/// Validation limits to keep hand-edited files sane
pub mod limits {
    /// Maximum number of blocks in a level
    pub const MAX_BLOCKS: usize = 10_000;
    /// Maximum block edge length
    pub const MAX_BLOCK_SIZE: i32 = 1024;
    /// Maximum coordinate magnitude (keeps arithmetic far from overflow)
    pub const MAX_COORD: i32 = 1_000_000;
}

/// Error type for level loading
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

fn is_valid_coord(v: i32) -> bool {
    v.abs() <= limits::MAX_COORD
}

/// Validate an entire level
pub fn validate_level(level: &Level) -> Result<(), LevelError> {
    if level.blocks.len() > limits::MAX_BLOCKS {
        return Err(LevelError::Validation(format!(
            "too many blocks ({} > {})", level.blocks.len(), limits::MAX_BLOCKS
        )));
    }

    let (sx, sy) = level.player_start;
    if !is_valid_coord(sx) || !is_valid_coord(sy) {
        return Err(LevelError::Validation(format!(
            "player start out of range: ({}, {})", sx, sy
        )));
    }

    for (i, block) in level.blocks.iter().enumerate() {
        if block.size <= 0 || block.size > limits::MAX_BLOCK_SIZE {
            return Err(LevelError::Validation(format!(
                "block {}: invalid size {}", i, block.size
            )));
        }
        if !is_valid_coord(block.x) || !is_valid_coord(block.y) {
            return Err(LevelError::Validation(format!(
                "block {}: position out of range ({}, {})", i, block.x, block.y
            )));
        }
    }

    Ok(())
}

/// Parse and validate level text
pub fn parse_level(contents: &str) -> Result<Level, LevelError> {
    let level: Level = match ron::from_str(contents) {
        Ok(l) => l,
        Err(e) => {
            let pos = e.position;
            if let Some(line) = contents.lines().nth(pos.line.saturating_sub(1)) {
                log::warn!("RON parse error at line {}: {}", pos.line, line.trim());
            }
            return Err(e.into());
        }
    };
    validate_level(&level)?;
    Ok(level)
}

/// Load a level from a RON file
pub fn load_level<P: AsRef<Path>>(path: P) -> Result<Level, LevelError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let level = parse_level(&contents)?;
    log::info!("Loaded level '{}' ({} blocks) from {}", level.name, level.blocks.len(), path.display());
    Ok(level)
}

/// Serialize a level to pretty RON text
pub fn serialize_level(level: &Level) -> Result<String, LevelError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .indentor("  ".to_string());
    Ok(ron::ser::to_string_pretty(level, config)?)
}

/// Save a level to a RON file, creating parent directories
pub fn save_level<P: AsRef<Path>>(level: &Level, path: P) -> Result<(), LevelError> {
    validate_level(level)?;
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serialize_level(level)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::level::BlockSpec;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("levels/test.ron");
        let level = Level::default_layout(&GameConfig::default());

        save_level(&level, &path).unwrap();
        let loaded = load_level(&path).unwrap();
        assert_eq!(loaded, level);
    }

    #[test]
    fn test_parse_hand_written() {
        let level = parse_level(
            "(player_start: (10, 20), blocks: [(x: 0, y: 700, size: 96), (x: 96, y: 700, size: 96)])",
        )
        .unwrap();
        assert_eq!(level.name, "");
        assert_eq!(level.blocks.len(), 2);
        assert_eq!(level.blocks[1], BlockSpec::new(96, 700, 96));
    }

    #[test]
    fn test_rejects_invalid_blocks() {
        let err = parse_level("(player_start: (0, 0), blocks: [(x: 0, y: 0, size: 0)])");
        assert!(matches!(err, Err(LevelError::Validation(_))));

        let err = parse_level("(player_start: (0, 0), blocks: [(x: 2000000, y: 0, size: 10)])");
        assert!(matches!(err, Err(LevelError::Validation(_))));

        let err = parse_level("(player_start: (0, 0), blocks: [");
        assert!(matches!(err, Err(LevelError::Parse(_))));
    }

    #[test]
    fn test_bundled_demo_level() {
        let level = parse_level(include_str!("../../assets/levels/demo.ron")).unwrap();
        assert_eq!(level.name, "demo");
        assert_eq!(level.player_start, (100, 100));
        assert!(level.blocks.iter().all(|b| b.size == 96));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(load_level(dir.path().join("none.ron")), Err(LevelError::Io(_))));
    }
}
