//! Splitting a document into single-page files.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::Editor;
use crate::error::{PdfEditError, Result};
use crate::io::{Codec, DocumentBuilder, DocumentView, FileOps};
use crate::pages::PageIndex;
use crate::utils::digit_width;
use crate::validation;

/// Result of a successful split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitOutcome {
    pub output_dir: PathBuf,

    /// Written files, first page first.
    pub files: Vec<PathBuf>,

    pub page_count: usize,
}

/// File name of the single-page file for `index`, e.g. `page_07.pdf`.
///
/// The page number is 1-based and zero-padded to the width of `page_count`
/// so the files sort in page order.
pub fn split_file_name(index: PageIndex, page_count: usize) -> String {
    let width = digit_width(page_count);
    format!("page_{:0width$}.pdf", index.page_number(), width = width)
}

impl<C: Codec, F: FileOps> Editor<C, F> {
    /// Write every page of `source` to its own file in `output_dir`.
    ///
    /// See [`Editor::split_with_progress`].
    pub fn split(&self, source: Option<&Path>, output_dir: &Path) -> Result<SplitOutcome> {
        self.split_with_progress(source, output_dir, |_, _| {})
    }

    /// Write every page of `source` to its own file in `output_dir`,
    /// calling `progress(done, total)` after each file.
    ///
    /// `output_dir` is created if needed. Existing page files are only
    /// replaced when the overwrite mode is `Force`; otherwise the first one
    /// found is reported before any page is written.
    ///
    /// # Errors
    ///
    /// - [`PdfEditError::NoFileSelected`] if `source` is `None`
    /// - [`PdfEditError::FileNotFound`] / [`PdfEditError::CodecOpenFailed`]
    /// - [`PdfEditError::EmptyPageList`] if the document has no pages
    /// - [`PdfEditError::OutputExists`] for an existing page file
    /// - [`PdfEditError::FailedToCreateOutput`] if `output_dir` cannot be
    ///   created
    pub fn split_with_progress<P>(
        &self,
        source: Option<&Path>,
        output_dir: &Path,
        mut progress: P,
    ) -> Result<SplitOutcome>
    where
        P: FnMut(usize, usize),
    {
        let path = validation::require_source(source)?;
        let view = self.open(path)?;
        let page_count = view.page_count();
        if page_count == 0 {
            return Err(PdfEditError::EmptyPageList);
        }

        let files: Vec<PathBuf> = (0..page_count)
            .map(|i| output_dir.join(split_file_name(PageIndex::new(i), page_count)))
            .collect();
        validation::validate_outputs(&files, self.options.overwrite_mode)?;

        fs::create_dir_all(output_dir).map_err(|source| PdfEditError::FailedToCreateOutput {
            path: output_dir.to_path_buf(),
            source,
        })?;

        log::info!(
            "Splitting {} into {} file(s) in {}",
            path.display(),
            page_count,
            output_dir.display()
        );

        let overwrite = self.options.overwrite_mode.allows_overwrite();
        for (i, target) in files.iter().enumerate() {
            let mut builder = self.codec.new_builder();
            builder
                .append(&view, PageIndex::new(i))
                .map_err(|e| PdfEditError::write_failed(target, e))?;

            let staged = self.stage(builder, target)?;
            let bytes_written = self.writer.persist(staged, target, overwrite)?;
            log::debug!("Wrote {} ({} bytes)", target.display(), bytes_written);

            progress(i + 1, page_count);
        }

        Ok(SplitOutcome {
            output_dir: output_dir.to_path_buf(),
            files,
            page_count,
        })
    }
}
