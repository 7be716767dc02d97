//! JSON persistence of harvest artifacts

use crate::crawler::{Harvest, PageRecord};
use crate::manifest::ManifestEntry;
use crate::HarvestError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File receiving the sitemap entries
pub const MANIFEST_FILE: &str = "sitemap.json";

/// File receiving the page records
pub const PAGES_FILE: &str = "site-context.json";

/// Paths written by [`write_harvest`]
#[derive(Debug, Clone)]
pub struct WrittenFiles {
    pub manifest: PathBuf,
    pub pages: PathBuf,
}

/// Writes the sitemap entries and page records into `dir`
///
/// The directory is created if needed; existing files are replaced.
pub fn write_harvest(dir: &Path, harvest: &Harvest) -> Result<WrittenFiles, HarvestError> {
    fs::create_dir_all(dir)?;

    let pages = write_pages(dir, &harvest.pages)?;
    let manifest = write_manifest(dir, &harvest.manifest)?;

    tracing::info!(
        "Wrote {} pages to {} and {} sitemap entries to {}",
        harvest.pages.len(),
        pages.display(),
        harvest.manifest.len(),
        manifest.display()
    );

    Ok(WrittenFiles { manifest, pages })
}

pub fn write_manifest(dir: &Path, manifest: &[ManifestEntry]) -> Result<PathBuf, HarvestError> {
    write_json(&dir.join(MANIFEST_FILE), manifest)
}

pub fn write_pages(dir: &Path, pages: &[PageRecord]) -> Result<PathBuf, HarvestError> {
    write_json(&dir.join(PAGES_FILE), pages)
}

/// Reads previously written sitemap entries
///
/// A missing or unreadable file yields an empty list.
pub fn read_manifest(dir: &Path) -> Vec<ManifestEntry> {
    let path = dir.join(MANIFEST_FILE);
    let Ok(content) = fs::read_to_string(&path) else {
        return Vec::new();
    };

    serde_json::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!("Ignoring unreadable {}: {}", path.display(), e);
        Vec::new()
    })
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<PathBuf, HarvestError> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(path.to_path_buf())
}
