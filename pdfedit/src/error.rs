//! Error types for pdfedit.
//!
//! Every operation reports failures through [`PdfEditError`]. The variants are
//! split so a caller can tell bad input (nothing was touched, fix the input
//! and retry) from I/O failures, and can single out the one failure that puts
//! data at risk: [`PdfEditError::ReplaceFailed`].
//!
//! # Error Categories
//!
//! - **Input errors**: no file selected, empty page list, page index out of range
//! - **Codec errors**: the PDF could not be parsed or serialized
//! - **Replace errors**: the remove-then-rename swap did not complete
//! - **Configuration errors**: invalid arguments, conflicting outputs

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::io::CodecError;

/// Result type alias for pdfedit operations.
pub type Result<T> = std::result::Result<T, PdfEditError>;

/// Main error type for pdfedit operations.
#[derive(Debug, Error)]
pub enum PdfEditError {
    /// An operation that needs a source document was invoked without one.
    #[error("No PDF file selected\n  Hint: select a PDF file first")]
    NoFileSelected,

    /// The requested page order is empty, or the document has no pages.
    #[error("No pages to write")]
    EmptyPageList,

    /// A requested page index does not exist in the source document.
    ///
    /// `index` is 0-based; the message shows the 1-based page number.
    #[error(
        "Page {} does not exist (entry {} of the page order)\n  Document has {page_count} page(s)",
        .index + 1,
        .position + 1
    )]
    IndexOutOfRange {
        /// The offending 0-based page index.
        index: usize,
        /// Position of the offending entry within the page order.
        position: usize,
        /// Number of pages in the source document.
        page_count: usize,
    },

    /// Input file was not found.
    #[error("File not found: {}", .path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Path exists but is not a regular file.
    #[error("Not a file: {}", .path.display())]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// The PDF library could not open or parse the source document.
    #[error("Failed to open PDF: {}\n  Reason: {source}", .path.display())]
    CodecOpenFailed {
        /// Path to the PDF file.
        path: PathBuf,
        /// Underlying codec error.
        #[source]
        source: CodecError,
    },

    /// The PDF library could not build or serialize the destination document.
    #[error("Failed to write PDF: {}\n  Reason: {source}", .path.display())]
    CodecWriteFailed {
        /// Path being written (the temporary file, or its directory).
        path: PathBuf,
        /// Underlying codec error.
        #[source]
        source: CodecError,
    },

    /// Removing the original file failed. The original is intact and the
    /// temporary file has been discarded.
    #[error("Could not replace {}: removing the original failed\n  Reason: {source}\n  The original file is unchanged", .path.display())]
    ReplaceAborted {
        /// Path of the original file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The original file was removed but the new document could not be moved
    /// into its place. `temp_path` holds the only copy of the data.
    #[error(
        "Could not replace {}: the original was removed but the new file could not be moved into place\n  Reason: {source}\n  Your data is saved at: {}",
        .path.display(),
        .temp_path.display()
    )]
    ReplaceFailed {
        /// Path of the original file (no longer present).
        path: PathBuf,
        /// Temporary file holding the rewritten document.
        temp_path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// No files were provided for merging.
    #[error("No input files specified for merging")]
    NoFilesToMerge,

    /// Output file already exists and overwrite is not allowed.
    #[error("Output file already exists: {}\n  Use --force to overwrite or choose a different output path", .path.display())]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create an output file or directory.
    #[error("Failed to create output: {}\n  Reason: {source}", .path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The user declined to overwrite an existing file.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Invalid configuration or arguments.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },
}

impl From<anyhow::Error> for PdfEditError {
    fn from(err: anyhow::Error) -> Self {
        Self::invalid_config(format!("{err:#}"))
    }
}

impl PdfEditError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: impl Into<PathBuf>) -> Self {
        Self::NotAFile { path: path.into() }
    }

    /// Create a CodecOpenFailed error.
    pub fn open_failed(path: impl Into<PathBuf>, source: CodecError) -> Self {
        Self::CodecOpenFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a CodecWriteFailed error.
    pub fn write_failed(path: impl Into<PathBuf>, source: CodecError) -> Self {
        Self::CodecWriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: impl Into<PathBuf>) -> Self {
        Self::OutputExists { path: path.into() }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// True when the failure was caused by the input rather than by I/O.
    ///
    /// Input errors never touch the filesystem.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::NoFileSelected
                | Self::EmptyPageList
                | Self::IndexOutOfRange { .. }
                | Self::NoFilesToMerge
                | Self::InvalidConfig { .. }
        )
    }

    /// True when the original file may have been lost.
    ///
    /// Only [`PdfEditError::ReplaceFailed`] qualifies; every other failure
    /// leaves the original file as it was.
    pub fn is_data_at_risk(&self) -> bool {
        matches!(self, Self::ReplaceFailed { .. })
    }

    /// Path of the file holding data that must not be discarded, if any.
    pub fn recovery_path(&self) -> Option<&Path> {
        match self {
            Self::ReplaceFailed { temp_path, .. } => Some(temp_path),
            _ => None,
        }
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoFileSelected => 1,
            Self::EmptyPageList => 1,
            Self::IndexOutOfRange { .. } => 1,
            Self::NoFilesToMerge => 1,
            Self::InvalidConfig { .. } => 1,
            Self::FileNotFound { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::CodecOpenFailed { .. } => 3,
            Self::OutputExists { .. } => 4,
            Self::CodecWriteFailed { .. } => 5,
            Self::FailedToCreateOutput { .. } => 5,
            Self::Io { .. } => 5,
            Self::ReplaceAborted { .. } => 6,
            Self::ReplaceFailed { .. } => 7,
            Self::Cancelled => 130,
        }
    }
}
