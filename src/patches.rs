//! Flatten grouped biomes into the ordered color patches drawn on the palette.

use std::collections::BTreeMap;

use tracing::debug;

use crate::biomes::BiomesByType;
use crate::color::color_code;

/// One color swatch: a biome name and one of its normalized color codes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Patch {
    pub biome_name: String,
    pub biome_color: String,
}

/// biomeType -> patches, in drawing order
pub type BiomePatches = BTreeMap<String, Vec<Patch>>;

/// Expand each biome's color list into patches.
///
/// Types and biome names come out sorted; colors keep their file order. A type
/// whose biomes have no colors at all does not appear in the result.
pub fn extract_patches(biomes: &BiomesByType) -> BiomePatches {
    let mut patches = BiomePatches::new();

    for (biome_type, by_name) in biomes {
        for (biome_name, record) in by_name {
            for code in &record.biome_colors {
                patches.entry(biome_type.clone()).or_default().push(Patch {
                    biome_name: biome_name.clone(),
                    biome_color: color_code(code),
                });
            }
        }
    }

    patches
}

/// Largest number of patches in any one type (0 when there are none)
pub fn max_patches(patches: &BiomePatches) -> usize {
    patches.values().map(Vec::len).max().unwrap_or(0)
}

/// One line per type: `Type (n): Name (#color) Name (#color) ...`
pub fn describe_patches(patches: &BiomePatches) -> Vec<String> {
    patches
        .iter()
        .map(|(biome_type, list)| {
            let mut line = format!("{} ({}): ", biome_type, list.len());
            for patch in list {
                line.push_str(&format!("{} ({}) ", patch.biome_name, patch.biome_color));
            }
            line
        })
        .collect()
}

/// Emit the patch listing at debug level
pub fn log_patches(patches: &BiomePatches) {
    for line in describe_patches(patches) {
        debug!("{}", line.trim_end());
    }
}
