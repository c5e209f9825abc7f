//! Grid layout for the palette image.
//!
//! Patches of a type fill one row left to right and wrap onto further rows once
//! `columns` is reached. The column count grows with the cube root of the
//! largest type so that big palettes stay roughly square.

use std::path::Path;

use tracing::debug;

use crate::error::{PaletteError, Result};
use crate::font::TextRenderer;
use crate::patches::{max_patches, BiomePatches};

/// Patch cell height in text lines: three lines of text, the gaps between them and margin
const PATCH_TEXT_ROWS: u32 = 7;

/// Pixel geometry of the palette grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridLayout {
    /// Patch columns, excluding the label column
    pub columns: usize,
    /// Wrapped row count of each biome type, in drawing order
    pub type_rows: Vec<(String, usize)>,
    /// Total rows over all types
    pub rows: usize,
    /// Margin inside cells (width of three spaces)
    pub patch_padding: u32,
    pub first_column_width: u32,
    pub patch_width: u32,
    pub patch_height: u32,
}

impl GridLayout {
    /// Plan the grid for `patches`, measuring text with `font`.
    ///
    /// Fails with [`PaletteError::NoBiomes`] when there is nothing to lay out.
    pub fn plan(patches: &BiomePatches, font: &impl TextRenderer, world_dir: &Path) -> Result<Self> {
        let max = max_patches(patches);
        if max == 0 {
            return Err(PaletteError::NoBiomes {
                world_dir: world_dir.to_path_buf(),
            });
        }

        let columns = grid_columns(max);
        let type_rows: Vec<(String, usize)> = patches
            .iter()
            .map(|(biome_type, list)| (biome_type.clone(), list.len().div_ceil(columns)))
            .collect();
        let rows = type_rows.iter().map(|(_, r)| r).sum();

        let patch_padding = font.text_size("   ").0;
        let label_width = patches.keys().map(|t| font.text_size(t).0).max().unwrap_or(0);
        let first_column_width = 2 * patch_padding + label_width;

        let mut patch_width = 0;
        let mut patch_height = 0;
        for patch in patches.values().flatten() {
            let (w, h) = font.text_size(&patch.biome_name);
            patch_width = patch_width.max(w + 2 * patch_padding);
            patch_height = patch_height.max(PATCH_TEXT_ROWS * h + 2 * patch_padding);
        }

        let layout = Self {
            columns,
            type_rows,
            rows,
            patch_padding,
            first_column_width,
            patch_width,
            patch_height,
        };
        debug!(
            "Layout: max patches {}, {} columns x {} rows, cell {}x{}, label column {}, image {}x{}",
            max,
            layout.columns,
            layout.rows,
            layout.patch_width,
            layout.patch_height,
            layout.first_column_width,
            layout.width(),
            layout.height()
        );
        Ok(layout)
    }

    /// Canvas width in pixels (the extra pixel holds the right-hand outline)
    pub fn width(&self) -> u32 {
        1 + self.first_column_width + self.patch_width * self.columns as u32
    }

    /// Canvas height in pixels
    pub fn height(&self) -> u32 {
        1 + self.patch_height * self.rows as u32
    }

    /// Wrapped rows for one biome type
    pub fn rows_for(&self, biome_type: &str) -> usize {
        self.type_rows
            .iter()
            .find(|(t, _)| t == biome_type)
            .map_or(0, |(_, r)| *r)
    }
}

/// Smallest `n` with `n^3 >= value`
pub fn cube_root_ceil(value: usize) -> usize {
    let mut n = 0;
    while n * n * n < value {
        n += 1;
    }
    n
}

/// Column count at which long rows wrap
pub fn wrap_columns(max_patches: usize) -> usize {
    3 * cube_root_ceil(max_patches)
}

/// Columns actually used: never more than the largest type needs
pub fn grid_columns(max_patches: usize) -> usize {
    max_patches.min(wrap_columns(max_patches))
}
