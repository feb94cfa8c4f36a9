//! Document loading.
//!
//! Turns a file path into raw per-page text. The PDF loader wraps
//! `pdf-extract`; anything that can produce an ordered list of page
//! strings can stand in for it through [`DocumentLoader`].
//!
//! Choosing *which* document to load when the caller gives no path is
//! a separate, caller-side concern handled by [`resolve_document`].

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{FolioError, Result};

/// Source of raw page text for a document.
pub trait DocumentLoader: Send + Sync {
    /// Return raw (unnormalized) text for every page, in reading order.
    fn load_pages(&self, path: &Path) -> Result<Vec<String>>;
}

/// PDF loader backed by `pdf-extract`
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfLoader;

impl PdfLoader {
    pub fn new() -> Self {
        Self
    }

    fn check_path(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(FolioError::FileNotFound(path.to_path_buf()));
        }

        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if !is_pdf {
            return Err(FolioError::InvalidFormat(format!(
                "expected a .pdf file, got {}",
                path.display()
            )));
        }

        Ok(())
    }
}

impl DocumentLoader for PdfLoader {
    fn load_pages(&self, path: &Path) -> Result<Vec<String>> {
        Self::check_path(path)?;

        let bytes = fs::read(path)?;
        let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes).map_err(|e| {
            FolioError::InvalidFormat(format!("Failed to parse PDF {}: {e}", path.display()))
        })?;

        tracing::info!("Loaded {} pages from {:?}", pages.len(), path);
        Ok(pages)
    }
}

/// Find the first PDF in `data_dir`, sorted by path.
///
/// Sorting makes the choice deterministic when several PDFs exist.
pub fn find_first_pdf(data_dir: &Path) -> Result<PathBuf> {
    let pattern = data_dir.join("*.pdf");
    let pattern = pattern.to_string_lossy();

    let mut candidates: Vec<PathBuf> = glob::glob(&pattern)
        .map_err(|e| FolioError::ConfigError(format!("Invalid data dir pattern '{pattern}': {e}")))?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();

    candidates.sort();

    candidates
        .into_iter()
        .next()
        .ok_or_else(|| FolioError::FileNotFound(data_dir.join("*.pdf")))
}

/// Pick the document to ingest: the explicit path if given, otherwise
/// the first PDF in `data_dir`.
pub fn resolve_document(explicit: Option<&Path>, data_dir: &Path) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => {
            let found = find_first_pdf(data_dir)?;
            tracing::debug!("No path given, using {:?}", found);
            Ok(found)
        }
    }
}
