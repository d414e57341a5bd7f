//! Output formatting and display for pdfedit.
//!
//! This module handles all user-facing output including:
//! - Formatted status messages
//! - Per-page progress
//! - Operation summaries
//! - Quiet and verbose modes
//!
//! Diagnostics for developers go through the `log` facade instead.
//!
//! # Examples
//!
//! ```no_run
//! use pdfedit::output::OutputFormatter;
//!
//! let formatter = OutputFormatter::new(false, true);
//! formatter.info("Reordering report.pdf");
//! formatter.success("Saved report.pdf");
//! ```

pub mod formatter;
pub mod progress;

pub use formatter::{MessageLevel, OutputFormatter};
pub use progress::{ProgressBar, ProgressStyle};

use crate::edit::{MergeOutcome, ReorderOutcome, SplitOutcome};
use crate::pages::PageListing;
use crate::utils::format_file_size;

/// Display the pages of a document, one label per line.
pub fn display_listing(formatter: &OutputFormatter, listing: &PageListing) {
    formatter.info(&format!(
        "{}: {} page(s)",
        listing.path.display(),
        listing.page_count
    ));
    for page in &listing.pages {
        formatter.list_item(&page.label);
    }
}

pub fn display_reorder_outcome(formatter: &OutputFormatter, outcome: &ReorderOutcome) {
    formatter.success(&format!(
        "Saved {} with {} page(s)",
        outcome.path.display(),
        outcome.page_count
    ));
    formatter.detail("Size", &format_file_size(outcome.bytes_written));
}

pub fn display_split_outcome(formatter: &OutputFormatter, outcome: &SplitOutcome) {
    formatter.success(&format!(
        "Split {} page(s) into {}",
        outcome.page_count,
        outcome.output_dir.display()
    ));
    if formatter.is_verbose() {
        for file in &outcome.files {
            formatter.list_item(&file.display().to_string());
        }
    }
}

pub fn display_merge_outcome(formatter: &OutputFormatter, outcome: &MergeOutcome) {
    formatter.success(&format!(
        "Merged {} file(s) into {} ({} page(s))",
        outcome.files_merged,
        outcome.output.display(),
        outcome.page_count
    ));
    formatter.detail("Size", &format_file_size(outcome.bytes_written));
}
