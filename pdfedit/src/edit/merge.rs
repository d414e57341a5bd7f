//! Concatenating documents.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::Editor;
use crate::config::is_same_file;
use crate::error::{PdfEditError, Result};
use crate::io::{Codec, DocumentBuilder, DocumentView, FileOps};
use crate::pages::PageIndex;
use crate::utils::format_file_size;
use crate::validation;

/// Result of a successful merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeOutcome {
    /// The written file.
    pub output: PathBuf,

    /// Number of input files merged.
    pub files_merged: usize,

    /// Total number of pages in the merged document.
    pub page_count: usize,

    /// Size of the written file in bytes.
    pub bytes_written: u64,
}

impl<C: Codec, F: FileOps> Editor<C, F> {
    /// Merge `inputs` into a new file at `output`.
    ///
    /// Inputs are appended in the given order, each with all of its pages in
    /// document order. The same input may be listed more than once.
    ///
    /// The merged outline has one entry per input, titled with its file name
    /// and opening its first page. The input's own outline is nested below
    /// that entry.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `inputs` is empty ([`PdfEditError::NoFilesToMerge`])
    /// - `output` is one of the inputs ([`PdfEditError::InvalidConfig`])
    /// - an input is missing or cannot be opened
    /// - `output` exists and the overwrite mode is not `Force`
    /// - the inputs hold no pages at all ([`PdfEditError::EmptyPageList`])
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfedit::edit::Editor;
    /// # use std::path::{Path, PathBuf};
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let inputs = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
    /// let outcome = Editor::new().merge(&inputs, Path::new("merged.pdf"))?;
    /// println!("Merged {} files into {} pages", outcome.files_merged, outcome.page_count);
    /// # Ok(())
    /// # }
    /// ```
    pub fn merge(&self, inputs: &[PathBuf], output: &Path) -> Result<MergeOutcome> {
        if inputs.is_empty() {
            return Err(PdfEditError::NoFilesToMerge);
        }

        if inputs.iter().any(|input| is_same_file(input, output)) {
            return Err(PdfEditError::invalid_config(format!(
                "Output file cannot be the same as an input file: {}",
                output.display()
            )));
        }

        validation::validate_files(inputs)?;
        validation::validate_output(output, self.options.overwrite_mode)?;

        let start = Instant::now();
        let mut builder = self.codec.new_builder();

        for input in inputs {
            let view = self.open(input)?;
            let page_count = view.page_count();
            let first_page = PageIndex::new(builder.page_count());

            for i in 0..page_count {
                builder
                    .append(&view, PageIndex::new(i))
                    .map_err(|e| PdfEditError::write_failed(output, e))?;
            }

            if page_count > 0 {
                let title = outline_title(input);
                builder
                    .import_outline(&view, Some((title.as_str(), first_page)))
                    .map_err(|e| PdfEditError::write_failed(output, e))?;
            }

            log::debug!("Added {} page(s) from {}", page_count, input.display());
        }

        let page_count = builder.page_count();
        if page_count == 0 {
            return Err(PdfEditError::EmptyPageList);
        }

        let staged = self.stage(builder, output)?;
        let bytes_written = self.writer.persist(
            staged,
            output,
            self.options.overwrite_mode.allows_overwrite(),
        )?;

        log::info!(
            "Merged {} file(s) into {} ({} page(s), {}) in {:?}",
            inputs.len(),
            output.display(),
            page_count,
            format_file_size(bytes_written),
            start.elapsed()
        );

        Ok(MergeOutcome {
            output: output.to_path_buf(),
            files_merged: inputs.len(),
            page_count,
            bytes_written,
        })
    }
}

/// Title of the outline entry for a merged input: its file name.
fn outline_title(input: &Path) -> String {
    input
        .file_name()
        .unwrap_or(input.as_os_str())
        .to_string_lossy()
        .into_owned()
}
