//! End-to-end palette generation: load, extract, lay out, render, save, show.

use image::RgbImage;
use tracing::{debug, info, warn};

use crate::biomes::{self, LoadReport};
use crate::config::PaletteConfig;
use crate::error::Result;
use crate::font::BitmapFont;
use crate::layout::GridLayout;
use crate::patches::{self, BiomePatches};
use crate::render;
use crate::viewer;

/// What a palette run produced
#[derive(Debug)]
pub struct PaletteSummary {
    pub biome_types: usize,
    pub biomes: usize,
    pub patches: usize,
    /// Files reported and skipped while loading
    pub skipped_files: usize,
    pub width: u32,
    pub height: u32,
}

/// Build the palette image in memory without writing anything.
pub fn build_palette(config: &PaletteConfig) -> Result<(RgbImage, PaletteSummary)> {
    config.validate()?;

    let report = biomes::load_biomes(config)?;
    info!(
        "Loaded {} biomes in {} types from {} files",
        report.biome_count(),
        report.biomes.len(),
        report.files_scanned
    );

    let patches = patches::extract_patches(&report.biomes);
    if config.debug {
        patches::log_patches(&patches);
    }

    let font = BitmapFont::new(config.font_scale);
    let layout = GridLayout::plan(&patches, &font, &config.world_dir)?;
    let img = render::render_palette(&patches, &layout, &font)?;

    let summary = summarize(&report, &patches, &img);
    Ok((img, summary))
}

fn summarize(report: &LoadReport, patches: &BiomePatches, img: &RgbImage) -> PaletteSummary {
    PaletteSummary {
        biome_types: patches.len(),
        biomes: report.biome_count(),
        patches: patches.values().map(Vec::len).sum(),
        skipped_files: report.diagnostics.len(),
        width: img.width(),
        height: img.height(),
    }
}

/// Generate the palette, save it to `config.output` and optionally show it.
///
/// Nothing is written if any stage before saving fails. A viewer failure is
/// logged; the saved image stands.
pub fn export_palette(config: &PaletteConfig) -> Result<PaletteSummary> {
    let (img, summary) = build_palette(config)?;

    img.save(&config.output)?;
    info!(
        "Exported palette to {} ({}x{}, {} patches)",
        config.output.display(),
        summary.width,
        summary.height,
        summary.patches
    );

    if config.view {
        debug!("Opening viewer");
        let title = format!("ewgpal - {}", config.output.display());
        if let Err(e) = viewer::show_palette(&img, &title) {
            warn!("Could not show palette: {}", e);
        }
    }

    Ok(summary)
}
