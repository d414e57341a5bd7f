//! The document operations.
//!
//! [`Editor`] bundles the codec, the file writer and the options, and exposes
//! one method per operation:
//!
//! - [`Editor::reorder`] rewrites a file in place with its pages in a new order
//! - [`Editor::split`] writes each page to its own file
//! - [`Editor::merge`] concatenates several files into one
//! - [`Editor::list_pages`] enumerates the pages of a file
//!
//! Operations receive everything they need as arguments and hold no state
//! between calls.
//!
//! # Examples
//!
//! ```no_run
//! use pdfedit::edit::Editor;
//! use pdfedit::pages::PageOrder;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let editor = Editor::new();
//! let listing = editor.list_pages(Some(Path::new("report.pdf")))?;
//!
//! // Move the last page to the front.
//! let mut order = vec![listing.page_count - 1];
//! order.extend(0..listing.page_count - 1);
//! let outcome = editor.reorder(Some(Path::new("report.pdf")), &PageOrder::from(order))?;
//! println!("Rewrote {} pages", outcome.page_count);
//! # Ok(())
//! # }
//! ```

mod listing;
mod merge;
mod reorder;
mod split;

pub use merge::MergeOutcome;
pub use reorder::ReorderOutcome;
pub use split::{SplitOutcome, split_file_name};

use std::path::Path;

use crate::config::EditorOptions;
use crate::error::{PdfEditError, Result};
use crate::io::{Codec, DocumentBuilder, FileOps, LopdfCodec, PdfWriter, StagedFile, StdFileOps};
use crate::validation;

/// Runs document operations with a fixed codec, filesystem and options.
#[derive(Debug, Clone)]
pub struct Editor<C: Codec = LopdfCodec, F: FileOps = StdFileOps> {
    codec: C,
    writer: PdfWriter<F>,
    options: EditorOptions,
}

impl Editor {
    /// Create an editor with default options.
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    /// Create an editor backed by `lopdf` and the real filesystem.
    pub fn with_options(options: EditorOptions) -> Self {
        Self {
            codec: LopdfCodec::with_compression(options.compress),
            writer: PdfWriter::new(),
            options,
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Codec, F: FileOps> Editor<C, F> {
    /// Create an editor from explicit parts.
    ///
    /// `options.compress` is not applied to `codec`; configure the codec
    /// directly.
    pub fn with_parts(codec: C, file_ops: F, options: EditorOptions) -> Self {
        Self {
            codec,
            writer: PdfWriter::with_file_ops(file_ops),
            options,
        }
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Open a source document after checking the path.
    fn open(&self, path: &Path) -> Result<C::View> {
        validation::validate_file(path)?;
        self.codec
            .open(path)
            .map_err(|e| PdfEditError::open_failed(path, e))
    }

    /// Serialize `builder` into a temporary file for `target`.
    fn stage<B: DocumentBuilder>(&self, builder: B, target: &Path) -> Result<StagedFile> {
        let dir = self.options.temp_dir_for(target);
        self.writer.stage(builder, &dir)
    }
}
