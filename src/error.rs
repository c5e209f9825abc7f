//! Palette generation error types.

use std::path::PathBuf;

/// Errors that stop a palette run.
///
/// Per-file parse problems are not errors; they are collected as
/// [`LoadDiagnostic`](crate::biomes::LoadDiagnostic)s and the run continues.
#[derive(Debug, thiserror::Error)]
pub enum PaletteError {
    /// The world directory is missing or cannot be read.
    #[error("world directory {path}: {reason}")]
    WorldDir { path: PathBuf, reason: String },

    /// Failed to scan a directory or open a file.
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No biome types survived loading, so there is nothing to render.
    #[error("no biomes found under {world_dir}/settings/biomes; nothing to render")]
    NoBiomes { world_dir: PathBuf },

    /// A biome color code could not be resolved to an RGB triple.
    #[error("biome {biome}: invalid color code {code:?}")]
    InvalidColor { biome: String, code: String },

    /// Failed to encode or write the palette image.
    #[error("failed to save palette image: {0}")]
    Image(#[from] image::ImageError),

    /// Failed to open or update the viewer window.
    #[error("viewer window: {0}")]
    Viewer(#[from] minifb::Error),
}

pub type Result<T> = std::result::Result<T, PaletteError>;
