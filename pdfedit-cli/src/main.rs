//! pdfedit - Merge, split and reorder the pages of PDF documents.

mod cli;

use clap::Parser;
use std::io::{self, Write};
use std::path::Path;
use std::process;

use crate::cli::{Cli, Command, ListArgs, MergeArgs, ReorderArgs, SplitArgs};
use pdfedit::config::{EditorOptions, OverwriteMode};
use pdfedit::edit::{Editor, SplitOutcome};
use pdfedit::error::PdfEditError;
use pdfedit::output::{
    OutputFormatter, ProgressBar, ProgressStyle, display_listing, display_merge_outcome,
    display_reorder_outcome, display_split_outcome,
};

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let formatter = OutputFormatter::new(cli.quiet, cli.verbose);

    if let Err(err) = run(&cli, &formatter) {
        formatter.report_error(&err);
        process::exit(err.exit_code());
    }
}

/// Route `log` records to stderr. `RUST_LOG` overrides the flag-derived level.
fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        log::LevelFilter::Info
    } else if cli.quiet {
        log::LevelFilter::Error
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// Main application logic.
fn run(cli: &Cli, formatter: &OutputFormatter) -> Result<(), PdfEditError> {
    let options = cli.editor_options()?;
    log::debug!("Options: {options:?}");

    match &cli.command {
        Command::List(args) => run_list(args, options, formatter),
        Command::Reorder(args) => run_reorder(args, options, formatter),
        Command::Split(args) => run_split(args, options, formatter),
        Command::Merge(args) => run_merge(args, options, formatter),
    }
}

fn run_list(
    args: &ListArgs,
    options: EditorOptions,
    formatter: &OutputFormatter,
) -> Result<(), PdfEditError> {
    let listing = Editor::with_options(options).list_pages(args.file.as_deref())?;

    if args.json {
        let json = serde_json::to_string_pretty(&listing)
            .map_err(|e| PdfEditError::Io { source: e.into() })?;
        println!("{json}");
    } else {
        display_listing(formatter, &listing);
    }

    Ok(())
}

fn run_reorder(
    args: &ReorderArgs,
    options: EditorOptions,
    formatter: &OutputFormatter,
) -> Result<(), PdfEditError> {
    let config = args.to_config()?;
    let editor = Editor::with_options(options);
    let source = config.source.as_deref();

    // Ranges and `end` need the page count.
    let listing = editor.list_pages(source)?;
    let order = config.selection.resolve(listing.page_count)?;

    formatter.info(&format!(
        "Reordering {} ({} page(s)) to {}",
        listing.path.display(),
        listing.page_count,
        order
    ));

    let outcome = editor.reorder(source, &order)?;
    display_reorder_outcome(formatter, &outcome);
    Ok(())
}

fn run_split(
    args: &SplitArgs,
    options: EditorOptions,
    formatter: &OutputFormatter,
) -> Result<(), PdfEditError> {
    let config = args.to_config()?;
    let source = config.source.as_deref();
    let prompt = options.overwrite_mode == OverwriteMode::Prompt;

    // Existing page files are detected before anything is written, so a
    // declined prompt leaves the directory as it was.
    let editor = Editor::with_options(options.clone());
    let outcome = match split_with_progress(&editor, source, &config.output_dir, formatter) {
        Err(PdfEditError::OutputExists { path }) if prompt => {
            confirm_overwrite(&path, formatter)?;
            let editor = Editor::with_options(EditorOptions {
                overwrite_mode: OverwriteMode::Force,
                ..options
            });
            split_with_progress(&editor, source, &config.output_dir, formatter)?
        }
        result => result?,
    };

    display_split_outcome(formatter, &outcome);
    Ok(())
}

fn split_with_progress(
    editor: &Editor,
    source: Option<&Path>,
    output_dir: &Path,
    formatter: &OutputFormatter,
) -> Result<SplitOutcome, PdfEditError> {
    let mut progress: Option<ProgressBar> = None;

    let result = editor.split_with_progress(source, output_dir, |done, total| {
        if formatter.is_quiet() {
            return;
        }
        progress
            .get_or_insert_with(|| {
                let mut bar = ProgressBar::new(total, ProgressStyle::Bar);
                bar.set_message("Splitting");
                bar
            })
            .update(done);
    });

    if let Some(mut bar) = progress {
        if result.is_ok() {
            bar.finish();
        } else {
            bar.clear();
        }
    }

    result
}

fn run_merge(
    args: &MergeArgs,
    mut options: EditorOptions,
    formatter: &OutputFormatter,
) -> Result<(), PdfEditError> {
    let config = args.to_config()?;

    if config.output.exists() && options.overwrite_mode == OverwriteMode::Prompt {
        confirm_overwrite(&config.output, formatter)?;
        options.overwrite_mode = OverwriteMode::Force;
    }

    formatter.info(&format!(
        "Merging {} file(s) into {}",
        config.inputs.len(),
        config.output.display()
    ));
    if formatter.is_verbose() {
        formatter.section("Inputs");
        for input in &config.inputs {
            formatter.list_item(&input.display().to_string());
        }
        formatter.blank_line();
    }

    let outcome = Editor::with_options(options).merge(&config.inputs, &config.output)?;
    display_merge_outcome(formatter, &outcome);
    Ok(())
}

/// Ask before overwriting `path`.
///
/// Quiet mode never prompts and keeps the existing file.
fn confirm_overwrite(path: &Path, formatter: &OutputFormatter) -> Result<(), PdfEditError> {
    if formatter.is_quiet() {
        return Err(PdfEditError::output_exists(path));
    }

    formatter.warning(&format!("Output file already exists: {}", path.display()));
    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;

    if is_yes(&response) {
        Ok(())
    } else {
        Err(PdfEditError::Cancelled)
    }
}

fn is_yes(response: &str) -> bool {
    matches!(response.trim().to_lowercase().as_str(), "y" | "yes")
}
