//! Style folder scanner
//!
//! Walks exactly one level of style folders under the styles directory and
//! collects the `.mp3` files directly inside each one. Both levels are visited
//! in lexicographic order so the resulting catalog is deterministic.

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

use crate::catalog::{Catalog, Track};
use crate::classifier::{classify, track_id};

/// Public base URL the catalog links to by default
pub const DEFAULT_BASE_URL: &str = "https://hassanvfx.github.io/jsmaker";

/// Catalog scanner errors
#[derive(Debug, Error)]
pub enum ScanError {
    /// Styles directory does not exist
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// Styles path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Directory traversal failure
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Result of a scan, with the tracks the catalog did not accept
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub catalog: Catalog,
    /// Filenames classified into an undeclared category
    pub skipped: Vec<PathBuf>,
}

/// Builds a catalog from a styles directory
#[derive(Debug, Clone)]
pub struct CatalogScanner {
    base_url: String,
}

impl Default for CatalogScanner {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl CatalogScanner {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Scan `styles_dir` and build the catalog
    pub fn scan(&self, styles_dir: &Path) -> Result<ScanOutcome, ScanError> {
        if !styles_dir.exists() {
            return Err(ScanError::PathNotFound(styles_dir.to_path_buf()));
        }
        if !styles_dir.is_dir() {
            return Err(ScanError::NotADirectory(styles_dir.to_path_buf()));
        }

        let mut catalog = Catalog::new();
        let mut skipped = Vec::new();

        for style_dir in style_folders(styles_dir)? {
            let style_name = style_dir.file_name().to_string_lossy().into_owned();
            let files = mp3_files(style_dir.path())?;
            tracing::debug!("{}: {} mp3 files", style_name, files.len());

            for file in files {
                let filename = file.file_name().to_string_lossy().into_owned();
                let meta = classify(&filename);
                let category = meta.category.clone();
                let url = format!("{}/data/styles/{}/{}", self.base_url, style_name, filename);
                let track = Track::new(track_id(&filename), filename, url, meta);

                if !catalog.add_track(&category, track) {
                    tracing::debug!(
                        "Skipping {} (category '{}' not in catalog)",
                        file.path().display(),
                        category
                    );
                    skipped.push(file.into_path());
                }
            }
        }

        Ok(ScanOutcome { catalog, skipped })
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// Non-hidden directories directly under `styles_dir`, sorted by name
fn style_folders(styles_dir: &Path) -> Result<Vec<DirEntry>, ScanError> {
    let mut dirs = Vec::new();
    for entry in WalkDir::new(styles_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        // Follow symlinked style folders like a plain directory test would
        if entry.path().is_dir() && !is_hidden(&entry) {
            dirs.push(entry);
        }
    }
    Ok(dirs)
}

/// Regular files named `*.mp3` directly under `dir`, sorted by name
fn mp3_files(dir: &Path) -> Result<Vec<DirEntry>, ScanError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        let is_mp3 = entry.file_name().to_string_lossy().ends_with(".mp3");
        if is_mp3 && entry.path().is_file() {
            files.push(entry);
        }
    }
    Ok(files)
}
