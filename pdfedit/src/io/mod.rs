//! PDF codec and file I/O for pdfedit.
//!
//! Every operation copies pages through one capability interface:
//!
//! - [`Codec::open`] turns a path into a [`DocumentView`] with random access
//!   to its pages
//! - [`Codec::new_builder`] starts an empty [`DocumentBuilder`]
//! - [`DocumentBuilder::append`] copies one page from a view, in call order
//! - [`DocumentBuilder::import_outline`] brings a view's bookmarks along
//! - [`DocumentBuilder::serialize`] writes the finished document to a sink
//!
//! [`LopdfCodec`] implements the interface on top of `lopdf`. The
//! [`writer`] module stages serialized documents in temporary files and swaps
//! them into place.
//!
//! # Examples
//!
//! ```no_run
//! use pdfedit::io::{Codec, DocumentBuilder, DocumentView, LopdfCodec};
//! use pdfedit::pages::PageIndex;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let codec = LopdfCodec::new();
//! let view = codec.open(Path::new("input.pdf"))?;
//!
//! let mut builder = codec.new_builder();
//! builder.append(&view, PageIndex::new(view.page_count() - 1))?;
//!
//! let mut out = Vec::new();
//! builder.serialize(&mut out)?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
mod outline;
pub mod reader;
pub mod writer;

pub use builder::LopdfBuilder;
pub use reader::{LoadedPdf, LopdfCodec};
pub use writer::{FileOps, PdfWriter, StagedFile, StdFileOps, TEMP_PREFIX};

use std::io::{self, Write};
use std::path::Path;

use thiserror::Error;

use crate::pages::PageIndex;

/// Errors reported by the PDF codec.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The bytes could not be parsed as a PDF document.
    #[error("invalid PDF: {0}")]
    Parse(String),

    /// The document is encrypted and cannot be processed.
    #[error(
        "PDF is encrypted and cannot be processed\n  Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools"
    )]
    Encrypted,

    /// The document parsed but its object structure is unusable.
    #[error("malformed document structure: {0}")]
    Structure(String),

    /// A page index outside the document was requested.
    #[error("page index {index} is out of range for a document with {page_count} page(s)")]
    PageOutOfRange {
        /// The requested 0-based index.
        index: usize,
        /// Number of pages in the document.
        page_count: usize,
    },

    /// Reading or writing failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<lopdf::Error> for CodecError {
    fn from(err: lopdf::Error) -> Self {
        let message = err.to_string();
        let lowered = message.to_lowercase();
        if lowered.contains("encrypt") || lowered.contains("password") {
            Self::Encrypted
        } else {
            Self::Parse(message)
        }
    }
}

/// Read-only view of an opened document.
///
/// A view holds no OS file handle: the source file is free to be removed or
/// renamed while the view is alive.
pub trait DocumentView {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;
}

/// Accumulates pages copied from views and serializes the result.
pub trait DocumentBuilder {
    /// The view type pages are copied from.
    type View: DocumentView;

    /// Append the page at `index` of `view` after the pages already added.
    ///
    /// The same page may be appended more than once.
    fn append(&mut self, view: &Self::View, index: PageIndex) -> Result<(), CodecError>;

    /// Carry the outline of `view` over to the pages appended from it so far.
    ///
    /// Entries whose page was not appended are dropped. With a `heading`
    /// the imported entries are nested under a new top-level entry with that
    /// title, opening the given output page.
    fn import_outline(
        &mut self,
        view: &Self::View,
        heading: Option<(&str, PageIndex)>,
    ) -> Result<(), CodecError>;

    /// Number of pages appended so far.
    fn page_count(&self) -> usize;

    /// Serialize the document into `sink`, returning the number of bytes written.
    fn serialize<W: Write>(self, sink: &mut W) -> Result<u64, CodecError>;
}

/// The PDF library capability used by every operation.
pub trait Codec {
    /// Opened document type.
    type View: DocumentView;
    /// Builder type producing new documents from views.
    type Builder: DocumentBuilder<View = Self::View>;

    /// Open the document at `path`.
    fn open(&self, path: &Path) -> Result<Self::View, CodecError>;

    /// Start an empty destination document.
    fn new_builder(&self) -> Self::Builder;
}

/// Write adapter counting the bytes passed through it.
pub(crate) struct CountingWriter<'a, W: Write> {
    inner: &'a mut W,
    written: u64,
}

impl<'a, W: Write> CountingWriter<'a, W> {
    pub(crate) fn new(inner: &'a mut W) -> Self {
        Self { inner, written: 0 }
    }

    pub(crate) fn written(&self) -> u64 {
        self.written
    }
}

impl<W: Write> Write for CountingWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
