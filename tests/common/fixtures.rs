// Test fixtures for integration testing

use folio::core::error::{FolioError, Result};
use folio::core::ingest::DocumentLoader;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Pages of a small equipment manual, as raw extracted text
#[allow(dead_code)] // Used in integration tests
pub fn manual_pages() -> Vec<String> {
    vec![
        "Safety Instructions\n\nRead all   warnings before\tuse.\nKeep the unit away from water."
            .to_string(),
        "   \n\t  ".to_string(),
        "Warranty\nThe warranty covers manufacturing defects for two years. \
         Damage caused by misuse, unauthorized repair or water exposure is not covered. \
         To file a warranty claim, contact support with your serial number and proof of purchase."
            .to_string(),
        "Cleaning\nRemove the filter and rinse it under warm water every month. \
         Let the filter dry completely before reinserting it."
            .to_string(),
    ]
}

/// Loader serving in-memory pages keyed by path
///
/// Unknown paths fail with `FileNotFound`, like a missing PDF.
#[allow(dead_code)] // Used in integration tests
#[derive(Default)]
pub struct StaticLoader {
    documents: HashMap<PathBuf, Vec<String>>,
    calls: Mutex<Vec<PathBuf>>,
}

#[allow(dead_code)] // Used in integration tests
impl StaticLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document
    pub fn with_document(mut self, path: impl Into<PathBuf>, pages: Vec<String>) -> Self {
        self.documents.insert(path.into(), pages);
        self
    }

    /// Paths that were loaded, in call order
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }
}

impl DocumentLoader for StaticLoader {
    fn load_pages(&self, path: &Path) -> Result<Vec<String>> {
        self.calls.lock().unwrap().push(path.to_path_buf());
        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| FolioError::FileNotFound(path.to_path_buf()))
    }
}
