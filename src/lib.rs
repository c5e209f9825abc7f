//! Biome palette generator library
//!
//! Re-exports modules for use by binaries and tools.

pub mod biomes;
pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod font;
pub mod layout;
pub mod logging;
pub mod patches;
pub mod render;
pub mod viewer;

pub use config::PaletteConfig;
pub use error::PaletteError;
pub use export::{build_palette, export_palette, PaletteSummary};
