//! Input validation for pdfedit.
//!
//! Cheap filesystem checks that run before a document is opened or a byte is
//! written, so bad input is reported without touching anything:
//! - a source was selected at all
//! - source paths exist and are regular files
//! - output paths do not clash with existing files

use std::path::{Path, PathBuf};

use crate::config::OverwriteMode;
use crate::error::{PdfEditError, Result};

/// Unwrap the selected source, rejecting "no file selected".
pub fn require_source(source: Option<&Path>) -> Result<&Path> {
    source.ok_or(PdfEditError::NoFileSelected)
}

/// Check that `path` exists and is a regular file.
///
/// # Errors
///
/// - [`PdfEditError::FileNotFound`] if nothing exists at `path`
/// - [`PdfEditError::NotAFile`] if `path` is a directory or other non-file
pub fn validate_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(PdfEditError::file_not_found(path));
    }

    if !path.is_file() {
        return Err(PdfEditError::not_a_file(path));
    }

    Ok(())
}

/// Validate every input of a merge, stopping at the first bad one.
pub fn validate_files(paths: &[PathBuf]) -> Result<()> {
    if paths.is_empty() {
        return Err(PdfEditError::NoFilesToMerge);
    }

    paths.iter().try_for_each(|path| validate_file(path))
}

/// Validate an output path.
///
/// # Errors
///
/// - [`PdfEditError::OutputExists`] if the file exists and `mode` does not
///   allow overwriting it
/// - [`PdfEditError::NotAFile`] if a directory sits at `path`
/// - [`PdfEditError::InvalidConfig`] if the parent directory is missing
pub fn validate_output(path: &Path, mode: OverwriteMode) -> Result<()> {
    if path.is_dir() {
        return Err(PdfEditError::not_a_file(path));
    }

    if path.exists() && !mode.allows_overwrite() {
        return Err(PdfEditError::output_exists(path));
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.is_dir()
    {
        return Err(PdfEditError::invalid_config(format!(
            "Output directory does not exist: {}",
            parent.display()
        )));
    }

    Ok(())
}

/// Check a batch of output files before any of them is written.
///
/// Returns the first existing file when overwriting is not allowed.
pub fn validate_outputs<'a, I>(paths: I, mode: OverwriteMode) -> Result<()>
where
    I: IntoIterator<Item = &'a PathBuf>,
{
    if mode.allows_overwrite() {
        return Ok(());
    }

    match paths.into_iter().find(|path| path.exists()) {
        Some(existing) => Err(PdfEditError::output_exists(existing)),
        None => Ok(()),
    }
}
