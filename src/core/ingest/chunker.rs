//! Overlapping fixed-size page chunking.
//!
//! Each page's normalized text is cut into windows of `chunk_size`
//! characters whose start positions advance by
//! `chunk_size - overlap`. Chunks never span pages: the sequence
//! counter restarts at every page and the chunk id is
//! `"<page>-<sequence>"`.
//!
//! All sizes are measured in **characters**, not bytes. Window
//! boundaries are taken from `char_indices()`, so slicing never lands
//! inside a multi-byte UTF-8 sequence.
//!
//! # Example
//!
//! ```
//! use folio::core::ingest::Chunker;
//!
//! let chunker = Chunker::new(4, 2).unwrap();
//! let chunks = chunker.chunk_pages(&["abcdefghij"], "doc.pdf");
//!
//! let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
//! assert_eq!(texts, ["abcd", "cdef", "efgh", "ghij", "ij"]);
//! assert_eq!(chunks[4].chunk_id, "1-4");
//! ```

use crate::core::error::{FolioError, Result};
use crate::core::types::ChunkRecord;

/// Validated page chunker.
///
/// Construction is the only place parameters are checked; a
/// `Chunker` that exists always has `chunk_size > 0` and
/// `overlap < chunk_size`, so the step between windows is at least
/// one character and every loop terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunker {
    /// Number of characters per chunk
    chunk_size: usize,

    /// Number of characters shared by consecutive chunks on a page
    overlap: usize,
}

impl Chunker {
    /// Create a new chunker.
    ///
    /// Parameters are signed so that out-of-range values coming from
    /// a CLI or config file are rejected here instead of wrapping.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::InvalidParameter`] if `chunk_size <= 0`
    /// or if `overlap` is outside `[0, chunk_size)`.
    ///
    /// # Example
    ///
    /// ```
    /// use folio::core::ingest::Chunker;
    ///
    /// let chunker = Chunker::new(800, 120).unwrap();
    /// assert_eq!(chunker.step(), 680);
    /// assert!(Chunker::new(10, 10).is_err());
    /// ```
    pub fn new(chunk_size: i64, overlap: i64) -> Result<Self> {
        if chunk_size <= 0 {
            return Err(FolioError::InvalidParameter(format!(
                "chunk_size must be > 0 (got {chunk_size})"
            )));
        }
        if overlap < 0 || overlap >= chunk_size {
            return Err(FolioError::InvalidParameter(format!(
                "overlap must be >= 0 and < chunk_size (got overlap={overlap}, chunk_size={chunk_size})"
            )));
        }

        let chunk_size = usize::try_from(chunk_size).map_err(|_| {
            FolioError::InvalidParameter(format!("chunk_size {chunk_size} is too large"))
        })?;
        let overlap = usize::try_from(overlap)
            .map_err(|_| FolioError::InvalidParameter(format!("overlap {overlap} is too large")))?;

        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    /// Get the chunk size in characters.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Get the overlap in characters.
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Distance in characters between consecutive chunk starts.
    pub fn step(&self) -> usize {
        self.chunk_size - self.overlap
    }

    /// Chunk a single page.
    ///
    /// `page` is the 1-based page number written into every record.
    /// An empty page yields no chunks.
    pub fn chunk_page(&self, page: usize, text: &str, source: &str) -> Vec<ChunkRecord> {
        // (byte offset, char) pairs; windows are addressed by char
        // position and sliced by the matching byte offsets
        let char_indices: Vec<(usize, char)> = text.char_indices().collect();
        let len = char_indices.len();

        let mut chunks = Vec::with_capacity(self.expected_chunks(len));
        let mut position = 0;

        while position < len {
            let end = (position + self.chunk_size).min(len);

            let byte_start = char_indices[position].0;
            let byte_end = if end < len {
                char_indices[end].0
            } else {
                text.len()
            };

            let part = &text[byte_start..byte_end];
            if part.is_empty() {
                break;
            }

            chunks.push(ChunkRecord {
                text: part.to_string(),
                page,
                chunk_id: format!("{page}-{}", chunks.len()),
                source: source.to_string(),
            });

            position += self.step();
        }

        chunks
    }

    /// Chunk an ordered sequence of normalized pages.
    ///
    /// Pages are numbered from 1 by position. Output is ordered by
    /// page, then by sequence within the page.
    pub fn chunk_pages<S: AsRef<str>>(&self, pages: &[S], source: &str) -> Vec<ChunkRecord> {
        let mut chunks = Vec::new();

        for (idx, text) in pages.iter().enumerate() {
            let page = idx + 1;
            let page_chunks = self.chunk_page(page, text.as_ref(), source);
            tracing::debug!("Page {} produced {} chunks", page, page_chunks.len());
            chunks.extend(page_chunks);
        }

        chunks
    }

    /// Number of chunks a page of `len` characters produces.
    pub fn expected_chunks(&self, len: usize) -> usize {
        len.div_ceil(self.step())
    }
}

/// Validate the parameters and chunk all pages in one call.
///
/// Validation happens before any page is touched, so an invalid
/// parameter never yields a partial result.
pub fn chunk<S: AsRef<str>>(
    pages: &[S],
    chunk_size: i64,
    overlap: i64,
    source: &str,
) -> Result<Vec<ChunkRecord>> {
    let chunker = Chunker::new(chunk_size, overlap)?;
    Ok(chunker.chunk_pages(pages, source))
}
