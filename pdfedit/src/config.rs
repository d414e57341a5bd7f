//! Configuration module for pdfedit.
//!
//! This module holds the validated settings the CLI hands to the library:
//! - [`EditorOptions`] shared by every operation
//! - one config struct per subcommand
//! - [`PageSelection`], the 1-based page list typed by a user

use anyhow::{Context, bail};

use crate::error::{PdfEditError, Result};
use crate::pages::{PageIndex, PageOrder};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Output file overwrite behavior.
///
/// Only applies to files pdfedit creates (split pages, merge output).
/// Reorder always replaces its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

impl OverwriteMode {
    /// Whether an existing output may be replaced without asking.
    ///
    /// `Prompt` is resolved by the caller; the library treats it like
    /// `NoClobber`.
    pub fn allows_overwrite(self) -> bool {
        self == Self::Force
    }
}

/// Settings shared by every operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorOptions {
    /// Directory for temporary files. `None` uses the directory of the file
    /// being written, which keeps the final rename on one filesystem.
    pub temp_dir: Option<PathBuf>,

    /// Compress streams in written documents.
    pub compress: bool,

    /// What to do when an output file already exists.
    pub overwrite_mode: OverwriteMode,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            temp_dir: None,
            compress: true,
            overwrite_mode: OverwriteMode::default(),
        }
    }
}

impl EditorOptions {
    /// Validate the options.
    ///
    /// # Errors
    ///
    /// Returns [`PdfEditError::InvalidConfig`] if `temp_dir` is set but is
    /// not an existing directory.
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.temp_dir
            && !dir.is_dir()
        {
            return Err(PdfEditError::invalid_config(format!(
                "Temporary directory does not exist: {}",
                dir.display()
            )));
        }
        Ok(())
    }

    /// Directory to stage a temporary file for `target` in.
    pub fn temp_dir_for(&self, target: &Path) -> PathBuf {
        match &self.temp_dir {
            Some(dir) => dir.clone(),
            None => parent_dir(target),
        }
    }
}

/// Parent directory of `path`, `.` for bare file names.
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// One element of a [`PageSelection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageRef {
    /// 1-based page number.
    Number(usize),
    /// The last page.
    End,
}

impl PageRef {
    fn parse(s: &str) -> anyhow::Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("end") {
            return Ok(Self::End);
        }

        let number: usize = s
            .parse()
            .with_context(|| format!("Invalid page number: {s}"))?;
        if number == 0 {
            bail!("Page numbers must be positive (1-indexed)");
        }
        Ok(Self::Number(number))
    }

    fn resolve(self, page_count: usize) -> usize {
        match self {
            Self::Number(number) => number,
            Self::End => page_count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SelectionItem {
    Single(PageRef),
    /// Inclusive; runs backwards when the start is after the end.
    Range(PageRef, PageRef),
}

/// Pages typed by a user, e.g. `3,1,2`, `1-4`, `end-1` or `2,end`.
///
/// Page numbers are 1-based. Order is kept and duplicates are allowed.
/// [`PageSelection::resolve`] turns the selection into a 0-based
/// [`PageOrder`] once the page count is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelection {
    items: Vec<SelectionItem>,
}

impl PageSelection {
    /// Parse a page selection string.
    ///
    /// # Errors
    ///
    /// Returns an error for empty input, zero, or anything that is not a
    /// page number, `end`, or a range of those.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfedit::config::PageSelection;
    ///
    /// let selection = PageSelection::parse("3,1-2").unwrap();
    /// let order = selection.resolve(3).unwrap();
    /// assert_eq!(order.to_string(), "3,1,2");
    /// ```
    pub fn parse(s: &str) -> anyhow::Result<Self> {
        let mut items = Vec::new();

        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            if let Some((start, end)) = part.split_once('-') {
                if end.contains('-') {
                    bail!("Invalid page range format: {part}. Expected format like '1-5'");
                }
                items.push(SelectionItem::Range(
                    PageRef::parse(start)?,
                    PageRef::parse(end)?,
                ));
            } else {
                items.push(SelectionItem::Single(PageRef::parse(part)?));
            }
        }

        if items.is_empty() {
            bail!("Page selection cannot be empty");
        }

        Ok(Self { items })
    }

    /// Expand the selection for a document with `page_count` pages.
    ///
    /// # Errors
    ///
    /// Returns [`PdfEditError::IndexOutOfRange`] for the first page number
    /// past the end of the document.
    pub fn resolve(&self, page_count: usize) -> Result<PageOrder> {
        let mut order = Vec::new();

        for item in &self.items {
            let (start, end) = match *item {
                SelectionItem::Single(page) => {
                    let number = page.resolve(page_count);
                    (number, number)
                }
                SelectionItem::Range(start, end) => {
                    (start.resolve(page_count), end.resolve(page_count))
                }
            };

            for number in [start, end] {
                if number == 0 || number > page_count {
                    return Err(PdfEditError::IndexOutOfRange {
                        index: number.saturating_sub(1),
                        position: order.len(),
                        page_count,
                    });
                }
            }

            if start <= end {
                order.extend((start..=end).filter_map(PageIndex::from_page_number));
            } else {
                order.extend((end..=start).rev().filter_map(PageIndex::from_page_number));
            }
        }

        Ok(PageOrder::new(order))
    }
}

impl FromStr for PageSelection {
    type Err = PdfEditError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self::parse(s)?)
    }
}

/// Configuration for reordering the pages of a file in place.
#[derive(Debug, Clone)]
pub struct ReorderConfig {
    /// File to rewrite. `None` when no file was given.
    pub source: Option<PathBuf>,

    /// New page order, 1-based.
    pub selection: PageSelection,
}

/// Configuration for splitting a file into one file per page.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// File to split. `None` when no file was given.
    pub source: Option<PathBuf>,

    /// Directory receiving `page_<n>.pdf` files.
    pub output_dir: PathBuf,
}

impl SplitConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PdfEditError::InvalidConfig`] if `output_dir` exists and is
    /// not a directory.
    pub fn validate(&self) -> Result<()> {
        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(PdfEditError::invalid_config(format!(
                "Output path is not a directory: {}",
                self.output_dir.display()
            )));
        }
        Ok(())
    }
}

/// Configuration for merging files into one.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Input PDF file paths (in merge order).
    pub inputs: Vec<PathBuf>,

    /// Output PDF file path.
    pub output: PathBuf,
}

impl MergeConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// - [`PdfEditError::NoFilesToMerge`] if there are no inputs
    /// - [`PdfEditError::InvalidConfig`] if the output is also an input
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(PdfEditError::NoFilesToMerge);
        }

        for input in &self.inputs {
            if is_same_file(input, &self.output) {
                return Err(PdfEditError::invalid_config(format!(
                    "Output file cannot be the same as an input file: {}",
                    self.output.display()
                )));
            }
        }

        Ok(())
    }
}

/// Compare two paths, resolving them when both exist.
pub(crate) fn is_same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
