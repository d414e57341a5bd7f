//! Staging serialized documents and moving them into place.
//!
//! A destination document is never written straight to its final path.
//! [`PdfWriter::stage`] serializes it into a hidden temporary file next to
//! the target, and the staged file is then either persisted under a new name
//! ([`PdfWriter::persist`]) or swapped in for an existing file
//! ([`PdfWriter::replace`]). Staged files delete themselves when dropped, so
//! a failed write leaves no residue.
//!
//! The swap goes through the [`FileOps`] trait so its two steps can fail
//! independently in tests.
//!
//! # Examples
//!
//! ```no_run
//! use pdfedit::io::{Codec, DocumentBuilder, LopdfCodec, PdfWriter};
//! use pdfedit::pages::PageIndex;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let codec = LopdfCodec::new();
//! let view = codec.open(Path::new("input.pdf"))?;
//! let mut builder = codec.new_builder();
//! builder.append(&view, PageIndex::new(0))?;
//!
//! let writer = PdfWriter::new();
//! let staged = writer.stage(builder, Path::new("."))?;
//! writer.persist(staged, Path::new("first-page.pdf"), false)?;
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{CodecError, DocumentBuilder};
use crate::error::{PdfEditError, Result};

/// Prefix of every temporary file pdfedit creates.
pub const TEMP_PREFIX: &str = ".pdfedit-";

const TEMP_SUFFIX: &str = ".pdf";

/// Filesystem steps of the in-place replace.
pub trait FileOps {
    /// Remove the file at `path`.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Move the file at `from` to `to`.
    fn move_file(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// [`FileOps`] on the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileOps;

impl FileOps for StdFileOps {
    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn move_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        match fs::rename(from, to) {
            Err(err) if err.kind() == io::ErrorKind::CrossesDevices => {
                log::debug!(
                    "Rename of {} crosses filesystems, copying instead",
                    from.display()
                );
                copy_across(from, to, |from| fs::remove_file(from))
            }
            result => result,
        }
    }
}

/// Copy `from` to `to`, then remove `from` with `remove`.
///
/// Once the copy has landed the move counts as done: a source that cannot
/// be removed is only worth a warning.
fn copy_across<R>(from: &Path, to: &Path, remove: R) -> io::Result<()>
where
    R: FnOnce(&Path) -> io::Result<()>,
{
    fs::copy(from, to)?;
    if let Err(err) = remove(from) {
        log::warn!(
            "Copied {} to {} but could not remove the original: {}",
            from.display(),
            to.display(),
            err
        );
    }
    Ok(())
}

/// A serialized document waiting in a temporary file.
#[derive(Debug)]
pub struct StagedFile {
    file: NamedTempFile,
    bytes_written: u64,
}

impl StagedFile {
    /// Current location of the temporary file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

/// Writes builders to disk through temporary files.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter<F: FileOps = StdFileOps> {
    fs: F,
}

impl PdfWriter {
    /// Create a writer operating on the real filesystem.
    pub fn new() -> Self {
        Self { fs: StdFileOps }
    }
}

impl<F: FileOps> PdfWriter<F> {
    /// Create a writer with custom filesystem operations.
    pub fn with_file_ops(fs: F) -> Self {
        Self { fs }
    }

    /// Serialize `builder` into a new temporary file inside `dir`.
    ///
    /// The data is flushed and synced before this returns.
    ///
    /// # Errors
    ///
    /// - [`PdfEditError::FailedToCreateOutput`] if the temporary file cannot
    ///   be created in `dir`
    /// - [`PdfEditError::CodecWriteFailed`] if serializing or flushing fails;
    ///   the partial temporary file is removed
    pub fn stage<B: DocumentBuilder>(&self, builder: B, dir: &Path) -> Result<StagedFile> {
        let mut options = tempfile::Builder::new();
        options.prefix(TEMP_PREFIX).suffix(TEMP_SUFFIX);
        // Ask for the usual 0666 so the umask decides, not tempfile's 0600.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            options.permissions(fs::Permissions::from_mode(0o666));
        }

        let mut file = options
            .tempfile_in(dir)
            .map_err(|source| PdfEditError::FailedToCreateOutput {
                path: dir.to_path_buf(),
                source,
            })?;
        let temp_path = file.path().to_path_buf();

        let bytes_written = {
            let mut sink = BufWriter::new(file.as_file_mut());
            let written = builder
                .serialize(&mut sink)
                .map_err(|e| PdfEditError::write_failed(&temp_path, e))?;
            sink.flush()
                .map_err(|e| PdfEditError::write_failed(&temp_path, CodecError::Io(e)))?;
            written
        };

        file.as_file()
            .sync_all()
            .map_err(|e| PdfEditError::write_failed(&temp_path, CodecError::Io(e)))?;

        log::debug!(
            "Staged {} bytes in {}",
            bytes_written,
            temp_path.display()
        );

        Ok(StagedFile {
            file,
            bytes_written,
        })
    }

    /// Move a staged file to `target`, a path that is not being replaced.
    ///
    /// With `overwrite` false an existing `target` is left alone and
    /// reported as [`PdfEditError::OutputExists`]. A staged file on another
    /// filesystem is copied instead of renamed.
    pub fn persist(&self, staged: StagedFile, target: &Path, overwrite: bool) -> Result<u64> {
        let bytes_written = staged.bytes_written;

        let result = if overwrite {
            staged.file.persist(target)
        } else {
            staged.file.persist_noclobber(target)
        };

        match result {
            Ok(_) => {}
            Err(err) if err.error.kind() == io::ErrorKind::CrossesDevices => {
                // Staged outside the target's filesystem; the temp file is
                // dropped with `err` once copied.
                if !overwrite && target.exists() {
                    return Err(PdfEditError::output_exists(target));
                }
                fs::copy(err.file.path(), target).map_err(|source| {
                    PdfEditError::FailedToCreateOutput {
                        path: target.to_path_buf(),
                        source,
                    }
                })?;
            }
            Err(err) if !overwrite && err.error.kind() == io::ErrorKind::AlreadyExists => {
                return Err(PdfEditError::output_exists(target));
            }
            Err(err) => {
                return Err(PdfEditError::FailedToCreateOutput {
                    path: target.to_path_buf(),
                    source: err.error,
                });
            }
        }

        log::debug!("Wrote {}", target.display());
        Ok(bytes_written)
    }

    /// Replace the existing file at `target` with a staged file.
    ///
    /// The original is removed first and the staged file is then moved into
    /// its place. The replacement takes over the original's permissions.
    ///
    /// # Errors
    ///
    /// - [`PdfEditError::ReplaceAborted`] if removing the original fails. The
    ///   original is untouched and the staged file is deleted.
    /// - [`PdfEditError::ReplaceFailed`] if the move fails after the original
    ///   was removed. The staged file is kept and its path is reported.
    pub fn replace(&self, staged: StagedFile, target: &Path) -> Result<u64> {
        let bytes_written = staged.bytes_written;

        match fs::metadata(target) {
            Ok(metadata) => {
                let permissions = metadata.permissions();
                if let Err(err) = staged.file.as_file().set_permissions(permissions) {
                    log::warn!(
                        "Could not copy the permissions of {}: {}",
                        target.display(),
                        err
                    );
                }
            }
            Err(err) => log::warn!("Could not read {}: {}", target.display(), err),
        }

        let temp_path = staged
            .file
            .into_temp_path()
            .keep()
            .map_err(|err| PdfEditError::FailedToCreateOutput {
                path: target.to_path_buf(),
                source: err.error,
            })?;

        if let Err(source) = self.fs.remove_file(target) {
            discard(&temp_path);
            return Err(PdfEditError::ReplaceAborted {
                path: target.to_path_buf(),
                source,
            });
        }

        if let Err(source) = self.fs.move_file(&temp_path, target) {
            log::error!(
                "{} was removed but {} could not be moved into its place: {}",
                target.display(),
                temp_path.display(),
                source
            );
            return Err(PdfEditError::ReplaceFailed {
                path: target.to_path_buf(),
                temp_path,
                source,
            });
        }

        log::debug!("Replaced {}", target.display());
        Ok(bytes_written)
    }
}

fn discard(temp_path: &Path) {
    if let Err(err) = fs::remove_file(temp_path) {
        log::warn!(
            "Could not remove temporary file {}: {}",
            temp_path.display(),
            err
        );
    }
}
