//! Biome configuration loading.
//!
//! Reads `<world>/settings/biomes/<group>/<name>.json`, one biome per file,
//! and groups the records by their declared `biomeType`, keyed by file stem.
//! A file that fails to parse is reported and skipped; it never aborts the run.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::PaletteConfig;
use crate::error::{PaletteError, Result};

/// Extension of biome definition files
pub const BIOME_FILE_EXTENSION: &str = "json";

/// One biome definition file.
///
/// Only the fields the palette needs are read; everything else is ignored.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiomeRecord {
    pub enabled: Option<bool>,
    pub biome_type: Option<String>,
    #[serde(default)]
    pub biome_colors: Vec<String>,
}

impl BiomeRecord {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(false)
    }
}

/// biomeType -> base file name -> record
pub type BiomesByType = BTreeMap<String, BTreeMap<String, BiomeRecord>>;

/// Why a file was left out of the palette
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// JSON syntax or shape error at a position in the file
    Parse { line: usize, column: usize, message: String },
    /// Valid JSON but a required field is absent
    MissingField(&'static str),
}

/// A file that was reported and skipped during loading
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadDiagnostic {
    pub path: PathBuf,
    pub base_name: String,
    pub kind: DiagnosticKind,
}

impl std::fmt::Display for LoadDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            DiagnosticKind::Parse { line, column, message } => write!(
                f,
                "JSON error: {}: line {}, column {}: {}",
                self.path.display(),
                line,
                column,
                message
            ),
            DiagnosticKind::MissingField(field) => write!(
                f,
                "{}: missing \"{}\"; biome skipped",
                self.path.display(),
                field
            ),
        }
    }
}

/// Result of scanning a world's biome directory
#[derive(Debug, Default)]
pub struct LoadReport {
    pub biomes: BiomesByType,
    pub diagnostics: Vec<LoadDiagnostic>,
    /// Number of biome files found, including skipped ones
    pub files_scanned: usize,
}

impl LoadReport {
    /// Total number of biomes across all types
    pub fn biome_count(&self) -> usize {
        self.biomes.values().map(|names| names.len()).sum()
    }
}

/// Collect `settings/biomes/*/*.json` under the world directory, in sorted order.
///
/// A missing `settings/biomes` directory yields no files rather than an error.
pub fn find_biome_files(biomes_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if !biomes_dir.is_dir() {
        return Ok(files);
    }

    for group in read_dir_sorted(biomes_dir)? {
        if is_hidden(&group) || !group.is_dir() {
            continue;
        }
        for path in read_dir_sorted(&group)? {
            let is_biome_file = !is_hidden(&path)
                && path.is_file()
                && path.extension().and_then(|e| e.to_str()) == Some(BIOME_FILE_EXTENSION);
            if is_biome_file {
                files.push(path);
            }
        }
    }

    Ok(files)
}

/// Dotfiles such as macOS `._Name.json` sidecars
fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}

fn read_dir_sorted(dir: &Path) -> Result<Vec<PathBuf>> {
    let io_error = |source| PaletteError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = fs::read_dir(dir)
        .map_err(io_error)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(io_error)?;
    paths.sort();
    Ok(paths)
}

/// Base name of a biome file (file name without extension)
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// A successfully parsed biome file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedBiome {
    pub name: String,
    pub biome_type: String,
    pub record: BiomeRecord,
}

/// Parse one biome file.
///
/// The inner `Err` is a diagnostic for a malformed file or one lacking a
/// required field. Only failing to read the file is an outer error.
pub fn load_biome_file(path: &Path) -> Result<std::result::Result<LoadedBiome, LoadDiagnostic>> {
    let file = File::open(path).map_err(|source| PaletteError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let diagnostic = |kind| LoadDiagnostic {
        path: path.to_path_buf(),
        base_name: base_name(path),
        kind,
    };

    let record: BiomeRecord = match serde_json::from_reader(BufReader::new(file)) {
        Ok(record) => record,
        Err(e) => {
            if e.is_io() {
                return Err(PaletteError::Io {
                    path: path.to_path_buf(),
                    source: e.into(),
                });
            }
            return Ok(Err(diagnostic(DiagnosticKind::Parse {
                line: e.line(),
                column: e.column(),
                message: parse_message(&e),
            })));
        }
    };

    if record.enabled.is_none() {
        return Ok(Err(diagnostic(DiagnosticKind::MissingField("enabled"))));
    }
    let Some(biome_type) = record.biome_type.clone() else {
        return Ok(Err(diagnostic(DiagnosticKind::MissingField("biomeType"))));
    };

    Ok(Ok(LoadedBiome {
        name: base_name(path),
        biome_type,
        record,
    }))
}

/// serde_json appends " at line L column C"; the diagnostic prints the position itself.
fn parse_message(e: &serde_json::Error) -> String {
    let full = e.to_string();
    let suffix = format!(" at line {} column {}", e.line(), e.column());
    full.strip_suffix(&suffix).unwrap_or(&full).to_string()
}

/// Load every biome file under the configured world directory and group by type.
pub fn load_biomes(config: &PaletteConfig) -> Result<LoadReport> {
    let biomes_dir = config.biomes_dir();
    let files = find_biome_files(&biomes_dir)?;
    debug!("Found {} biome files in {}", files.len(), biomes_dir.display());

    let mut report = LoadReport {
        files_scanned: files.len(),
        ..LoadReport::default()
    };

    for path in &files {
        let LoadedBiome { name, biome_type, record } = match load_biome_file(path)? {
            Ok(loaded) => loaded,
            Err(diagnostic) => {
                warn!("{}", diagnostic);
                report.diagnostics.push(diagnostic);
                continue;
            }
        };

        let status = if record.is_enabled() { "Enabled" } else { "Disabled" };
        debug!("{:<30} {:<8} {:<25}", name, status, biome_type);

        if config.enabled_only && !record.is_enabled() {
            debug!("Skipping disabled biome {}", name);
            continue;
        }

        let by_name = report.biomes.entry(biome_type.clone()).or_default();
        if by_name.insert(name.clone(), record).is_some() {
            debug!("{} ({}) replaces an earlier biome with the same name", name, biome_type);
        }
    }

    Ok(report)
}
