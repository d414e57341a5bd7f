//! In-place page reordering.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::Editor;
use crate::error::{PdfEditError, Result};
use crate::io::{Codec, DocumentBuilder, DocumentView, FileOps};
use crate::pages::PageOrder;
use crate::utils::format_file_size;
use crate::validation;

/// Result of a successful reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderOutcome {
    /// The rewritten file.
    pub path: PathBuf,

    /// Pages in the rewritten file.
    pub page_count: usize,

    /// Size of the rewritten file in bytes.
    pub bytes_written: u64,
}

impl<C: Codec, F: FileOps> Editor<C, F> {
    /// Rewrite `source` so it holds exactly the pages of `order`, in that
    /// order.
    ///
    /// Pages may repeat. Outline entries and the document information
    /// dictionary are kept; entries for pages left out are dropped.
    ///
    /// The new document is staged in a temporary file and then swapped in
    /// for the original: the original is removed and the temporary file is
    /// moved into its place. The rewritten file keeps the original's
    /// permissions.
    ///
    /// # Errors
    ///
    /// Checked before anything is written, leaving the file untouched:
    /// - [`PdfEditError::NoFileSelected`] if `source` is `None`
    /// - [`PdfEditError::EmptyPageList`] if `order` is empty
    /// - [`PdfEditError::FileNotFound`] / [`PdfEditError::NotAFile`]
    /// - [`PdfEditError::CodecOpenFailed`] if the document cannot be opened
    /// - [`PdfEditError::IndexOutOfRange`] for the first entry past the last
    ///   page
    ///
    /// During writing:
    /// - [`PdfEditError::CodecWriteFailed`] if building or serializing fails;
    ///   the original is untouched
    /// - [`PdfEditError::ReplaceAborted`] if the original cannot be removed;
    ///   the original is untouched
    /// - [`PdfEditError::ReplaceFailed`] if the original was removed but the
    ///   new file could not be moved into place. The new document survives
    ///   at [`PdfEditError::recovery_path`].
    pub fn reorder(&self, source: Option<&Path>, order: &PageOrder) -> Result<ReorderOutcome> {
        let path = validation::require_source(source)?;
        if order.is_empty() {
            return Err(PdfEditError::EmptyPageList);
        }

        let start = Instant::now();

        // The view is released before the original is touched.
        let staged = {
            let view = self.open(path)?;
            order.validate(view.page_count())?;

            log::info!(
                "Reordering {} ({} page(s)) to [{}]",
                path.display(),
                view.page_count(),
                order
            );

            let mut builder = self.codec.new_builder();
            for index in order {
                builder
                    .append(&view, index)
                    .map_err(|e| PdfEditError::write_failed(path, e))?;
            }
            builder
                .import_outline(&view, None)
                .map_err(|e| PdfEditError::write_failed(path, e))?;
            self.stage(builder, path)?
        };

        let bytes_written = self.writer.replace(staged, path)?;

        log::info!(
            "Rewrote {} with {} page(s), {} in {:?}",
            path.display(),
            order.len(),
            format_file_size(bytes_written),
            start.elapsed()
        );

        Ok(ReorderOutcome {
            path: path.to_path_buf(),
            page_count: order.len(),
            bytes_written,
        })
    }
}
