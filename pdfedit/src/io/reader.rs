//! Opening PDF documents.
//!
//! [`LopdfCodec::open`] reads the source through a file handle scoped to the
//! call and parses it into memory. The returned [`LoadedPdf`] keeps the page
//! ids in document order so pages can be fetched by 0-based index.

use lopdf::{Document, ObjectId};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use super::{Codec, CodecError, DocumentView, LopdfBuilder};
use crate::pages::PageIndex;

static NEXT_SOURCE_ID: AtomicU64 = AtomicU64::new(1);

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    document: Document,

    /// Page object ids in document order.
    page_ids: Vec<ObjectId>,

    /// Path to the source file.
    path: PathBuf,

    /// Time taken to load the document.
    load_time: Duration,

    /// File size in bytes.
    file_size: u64,

    /// Distinguishes views when a builder copies from several documents.
    source_id: u64,
}

impl LoadedPdf {
    fn new(document: Document, path: PathBuf, load_time: Duration, file_size: u64) -> Self {
        let page_ids = document.get_pages().into_values().collect();

        Self {
            document,
            page_ids,
            path,
            load_time,
            file_size,
            source_id: NEXT_SOURCE_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Path the document was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The parsed document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// PDF version string, e.g. `"1.7"`.
    pub fn version(&self) -> &str {
        &self.document.version
    }

    pub fn load_time(&self) -> Duration {
        self.load_time
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Object id of the page at `index`.
    pub fn page_id(&self, index: PageIndex) -> Result<ObjectId, CodecError> {
        self.page_ids
            .get(index.get())
            .copied()
            .ok_or(CodecError::PageOutOfRange {
                index: index.get(),
                page_count: self.page_ids.len(),
            })
    }

    pub(crate) fn source_id(&self) -> u64 {
        self.source_id
    }
}

impl DocumentView for LoadedPdf {
    fn page_count(&self) -> usize {
        self.page_ids.len()
    }
}

/// [`Codec`] implementation backed by `lopdf`.
#[derive(Debug, Clone)]
pub struct LopdfCodec {
    /// Compress streams when serializing.
    compress: bool,
}

impl LopdfCodec {
    /// Create a codec with default settings (compression on).
    pub fn new() -> Self {
        Self { compress: true }
    }

    /// Create a codec with explicit stream compression.
    pub fn with_compression(compress: bool) -> Self {
        Self { compress }
    }

    pub fn compresses(&self) -> bool {
        self.compress
    }
}

impl Default for LopdfCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for LopdfCodec {
    type View = LoadedPdf;
    type Builder = LopdfBuilder;

    fn open(&self, path: &Path) -> Result<LoadedPdf, CodecError> {
        let start = Instant::now();

        // The handle only lives for this block; the view owns no OS resources.
        let (document, file_size) = {
            let file = File::open(path)?;
            let file_size = file.metadata().map(|m| m.len()).unwrap_or(0);
            let document = Document::load_from(BufReader::new(file))?;
            (document, file_size)
        };

        if document.is_encrypted() {
            return Err(CodecError::Encrypted);
        }

        let loaded = LoadedPdf::new(document, path.to_path_buf(), start.elapsed(), file_size);

        log::debug!(
            "Opened {} (PDF {}, {} page(s), {} bytes) in {:?}",
            path.display(),
            loaded.version(),
            loaded.page_count(),
            loaded.file_size,
            loaded.load_time
        );

        Ok(loaded)
    }

    fn new_builder(&self) -> LopdfBuilder {
        LopdfBuilder::new(self.compress)
    }
}
