//! Configuration threaded through every stage of a palette run.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PaletteError, Result};

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "ewgpal.png";

/// Default bitmap font scale (5x7 glyphs drawn at 10x14 pixels).
pub const DEFAULT_FONT_SCALE: u32 = 2;

/// Configuration for a palette run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaletteConfig {
    /// World directory containing `settings/biomes/`
    pub world_dir: PathBuf,
    /// Path of the image to write
    pub output: PathBuf,
    /// Show the palette in a window after saving
    pub view: bool,
    /// Verbose logging and patch listing
    pub debug: bool,
    /// Skip biomes whose `enabled` flag is false
    pub enabled_only: bool,
    /// Integer scale applied to the bitmap font
    pub font_scale: u32,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            world_dir: PathBuf::from("."),
            output: PathBuf::from(DEFAULT_OUTPUT),
            view: false,
            debug: false,
            enabled_only: false,
            font_scale: DEFAULT_FONT_SCALE,
        }
    }
}

impl PaletteConfig {
    pub fn new(world_dir: impl Into<PathBuf>) -> Self {
        Self {
            world_dir: world_dir.into(),
            ..Self::default()
        }
    }

    /// Directory holding one sub-directory of biome files per group.
    pub fn biomes_dir(&self) -> PathBuf {
        self.world_dir.join("settings").join("biomes")
    }

    /// Check that the world directory exists and can be listed.
    pub fn validate(&self) -> Result<()> {
        check_readable_dir(&self.world_dir)
    }
}

/// Fails unless `path` is a directory whose entries can be read.
pub fn check_readable_dir(path: &Path) -> Result<()> {
    let world_dir_error = |reason: String| PaletteError::WorldDir {
        path: path.to_path_buf(),
        reason,
    };

    let meta = fs::metadata(path).map_err(|e| world_dir_error(format!("does not exist ({})", e)))?;
    if !meta.is_dir() {
        return Err(world_dir_error("is not a directory".to_string()));
    }
    fs::read_dir(path).map_err(|e| world_dir_error(format!("is not a readable dir ({})", e)))?;
    Ok(())
}

/// clap value parser for a world directory argument
pub fn parse_readable_dir(value: &str) -> std::result::Result<PathBuf, String> {
    let path = PathBuf::from(value);
    check_readable_dir(&path).map_err(|e| e.to_string())?;
    Ok(path)
}
