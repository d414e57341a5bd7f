//! CLI argument parsing for pdfedit.
//!
//! This module defines the command-line interface structure using `clap`
//! and turns parsed arguments into the library's config structs.
//!
//! Page numbers on the command line are 1-based.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use pdfedit::config::{
    EditorOptions, MergeConfig, OverwriteMode, PageSelection, ReorderConfig, SplitConfig,
};
use pdfedit::error::{PdfEditError, Result};
use pdfedit::utils::collect_paths_for_patterns;

/// Merge, split and reorder the pages of PDF documents.
#[derive(Parser, Debug)]
#[command(name = "pdfedit")]
#[command(version)]
#[command(about = "Merge, split and reorder the pages of PDF documents", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory for temporary files
    ///
    /// Defaults to the directory of the file being written, which keeps the
    /// final rename on the same filesystem.
    #[arg(long, global = true, value_name = "DIR", env = "PDFEDIT_TEMP_DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Write streams uncompressed
    #[arg(long, global = true)]
    pub no_compress: bool,

    /// Overwrite existing output files without confirmation
    ///
    /// Applies to the files written by split and merge. Reorder always
    /// replaces the file it edits.
    #[arg(short, long, global = true)]
    pub force: bool,

    /// Never overwrite existing output files
    #[arg(long, global = true, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Suppress all non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show detailed information and info-level logs
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the pages of a PDF file
    List(ListArgs),

    /// Rewrite a PDF file in place with its pages in a new order
    ///
    /// Pages not named are dropped; pages named twice are duplicated.
    ///
    /// Examples:
    ///   pdfedit reorder report.pdf --order 3,1,2
    ///   pdfedit reorder report.pdf --order end-1
    ///   pdfedit reorder report.pdf --order 2-end,1
    Reorder(ReorderArgs),

    /// Write every page of a PDF file to its own file
    Split(SplitArgs),

    /// Merge PDF files into one, in the order given
    ///
    /// Examples:
    ///   pdfedit merge a.pdf b.pdf -o ab.pdf
    ///   pdfedit merge 'chapters/*.pdf' -o book.pdf
    Merge(MergeArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// PDF file to inspect
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Print the listing as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ReorderArgs {
    /// PDF file to rewrite
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// New page order as 1-based page numbers
    ///
    /// Comma-separated numbers and ranges. A range runs backwards when its
    /// start is after its end; `end` names the last page.
    #[arg(short, long, value_name = "PAGES", allow_hyphen_values = true)]
    pub order: String,
}

#[derive(Args, Debug)]
pub struct SplitArgs {
    /// PDF file to split
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Directory for the page files (created if missing)
    #[arg(short = 'd', long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Input PDF files or glob patterns (in order)
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<String>,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,
}

impl Cli {
    /// Resolve the overwrite flags.
    pub fn overwrite_mode(&self) -> OverwriteMode {
        if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        }
    }

    /// Build and validate the options shared by every subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if `--temp-dir` is not an existing directory.
    pub fn editor_options(&self) -> Result<EditorOptions> {
        let options = EditorOptions {
            temp_dir: self.temp_dir.clone(),
            compress: !self.no_compress,
            overwrite_mode: self.overwrite_mode(),
        };
        options.validate()?;
        Ok(options)
    }
}

impl ReorderArgs {
    /// Parse the page order into a [`ReorderConfig`].
    pub fn to_config(&self) -> Result<ReorderConfig> {
        let selection = PageSelection::parse(&self.order)
            .map_err(|e| PdfEditError::invalid_config(format!("--order: {e:#}")))?;

        Ok(ReorderConfig {
            source: self.file.clone(),
            selection,
        })
    }
}

impl SplitArgs {
    pub fn to_config(&self) -> Result<SplitConfig> {
        let config = SplitConfig {
            source: self.file.clone(),
            output_dir: self.output_dir.clone(),
        };
        config.validate()?;
        Ok(config)
    }
}

impl MergeArgs {
    /// Expand glob patterns and build a validated [`MergeConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`PdfEditError::NoFilesToMerge`] when the patterns match
    /// nothing.
    pub fn to_config(&self) -> Result<MergeConfig> {
        let config = MergeConfig {
            inputs: collect_paths_for_patterns(&self.inputs)?,
            output: self.output.clone(),
        };
        config.validate()?;
        Ok(config)
    }
}
