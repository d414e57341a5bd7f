//! pdfedit - Merge, split and reorder the pages of PDF documents.
//!
//! This library provides the operations behind the `pdfedit` command:
//!
//! - Reordering the pages of a file in place (pages may be dropped or repeated)
//! - Splitting a file into one file per page
//! - Merging several files into one
//! - Listing the pages of a file
//!
//! Pages are addressed by 0-based [`PageIndex`]. Every operation copies pages
//! through the [`io::Codec`] interface, and every file it writes is staged in
//! a temporary file first, so a failed operation never leaves a half-written
//! document under a real name.
//!
//! # Examples
//!
//! ## Reorder in place
//!
//! ```no_run
//! use pdfedit::PageOrder;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // [A, B, C] becomes [C, A, B]
//! let order = PageOrder::from(vec![2, 0, 1]);
//! let outcome = pdfedit::reorder(Some(Path::new("abc.pdf")), &order)?;
//! println!("Rewrote {} pages", outcome.page_count);
//! # Ok(())
//! # }
//! ```
//!
//! ## With options
//!
//! ```no_run
//! use pdfedit::config::{EditorOptions, OverwriteMode};
//! use pdfedit::edit::Editor;
//! use std::path::{Path, PathBuf};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let editor = Editor::with_options(EditorOptions {
//!     temp_dir: Some(PathBuf::from("/var/tmp")),
//!     compress: false,
//!     overwrite_mode: OverwriteMode::Force,
//! });
//!
//! let outcome = editor.split(Some(Path::new("report.pdf")), Path::new("pages"))?;
//! for file in &outcome.files {
//!     println!("{}", file.display());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod edit;
pub mod error;
pub mod io;
pub mod output;
pub mod pages;
pub mod utils;
pub mod validation;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use edit::{Editor, MergeOutcome, ReorderOutcome, SplitOutcome};
pub use error::{PdfEditError, Result};
pub use pages::{PageIndex, PageListing, PageOrder};

use std::path::{Path, PathBuf};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Rewrite `source` with its pages in `order`, using default options.
///
/// See [`Editor::reorder`].
pub fn reorder(source: Option<&Path>, order: &PageOrder) -> Result<ReorderOutcome> {
    Editor::new().reorder(source, order)
}

/// Write each page of `source` to `output_dir`, using default options.
///
/// See [`Editor::split`].
pub fn split(source: Option<&Path>, output_dir: &Path) -> Result<SplitOutcome> {
    Editor::new().split(source, output_dir)
}

/// Merge `inputs` into `output`, using default options.
///
/// See [`Editor::merge`].
pub fn merge(inputs: &[PathBuf], output: &Path) -> Result<MergeOutcome> {
    Editor::new().merge(inputs, output)
}

/// List the pages of `source`.
///
/// See [`Editor::list_pages`].
pub fn list_pages(source: Option<&Path>) -> Result<PageListing> {
    Editor::new().list_pages(source)
}
