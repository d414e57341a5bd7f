//! Integration tests for merging documents.

use pdfedit::config::{EditorOptions, OverwriteMode};
use pdfedit::edit::Editor;
use pdfedit::error::PdfEditError;
use std::fs;
use tempfile::TempDir;

use crate::common::{
    OutlineEntry, read_letters, read_outline, temp_residue, write_fixture, write_lettered,
    write_outlined,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_merge_keeps_input_and_page_order() {
    let dir = TempDir::new().unwrap();
    let first = write_lettered(dir.path(), "first.pdf", &strings(&["A", "B"]));
    let second = write_lettered(dir.path(), "second.pdf", &strings(&["X", "Y", "Z"]));
    let output = dir.path().join("merged.pdf");

    let outcome = pdfedit::merge(&[second.clone(), first.clone()], &output).unwrap();

    assert_eq!(outcome.files_merged, 2);
    assert_eq!(outcome.page_count, 5);
    assert_eq!(outcome.output, output);
    assert_eq!(outcome.bytes_written, fs::metadata(&output).unwrap().len());
    assert_eq!(read_letters(&output), vec!["X", "Y", "Z", "A", "B"]);
    assert!(temp_residue(dir.path()).is_empty());
}

#[test]
fn test_merge_nests_each_input_outline() {
    let dir = TempDir::new().unwrap();
    let first = write_outlined(dir.path(), "first.pdf", &strings(&["A", "B"]));
    let second = write_lettered(dir.path(), "second.pdf", &strings(&["X"]));
    let output = dir.path().join("merged.pdf");

    pdfedit::merge(&[first, second], &output).unwrap();

    assert_eq!(
        read_outline(&output),
        vec![
            OutlineEntry::new(0, "first.pdf", 1),
            OutlineEntry::new(1, "Chapter A", 1),
            OutlineEntry::new(2, "Section A", 1),
            OutlineEntry::new(1, "Chapter B", 2),
            OutlineEntry::new(0, "second.pdf", 3),
        ]
    );
}

#[test]
fn test_merge_repeated_input_gets_entry_per_occurrence() {
    let dir = TempDir::new().unwrap();
    let input = write_outlined(dir.path(), "doc.pdf", &strings(&["A"]));
    let output = dir.path().join("twice.pdf");

    pdfedit::merge(&[input.clone(), input], &output).unwrap();

    let top_level: Vec<OutlineEntry> = read_outline(&output)
        .into_iter()
        .filter(|entry| entry.depth == 0)
        .collect();
    assert_eq!(
        top_level,
        vec![
            OutlineEntry::new(0, "doc.pdf", 1),
            OutlineEntry::new(0, "doc.pdf", 2),
        ]
    );
}

#[test]
fn test_merge_same_file_twice() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path(), "doc.pdf", 2);
    let output = dir.path().join("twice.pdf");

    let outcome = pdfedit::merge(&[input.clone(), input], &output).unwrap();

    assert_eq!(outcome.page_count, 4);
    assert_eq!(read_letters(&output), vec!["A", "B", "A", "B"]);
}

#[test]
fn test_merge_single_input() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path(), "doc.pdf", 3);
    let output = dir.path().join("copy.pdf");

    pdfedit::merge(&[input], &output).unwrap();

    assert_eq!(read_letters(&output), vec!["A", "B", "C"]);
}

#[test]
fn test_merge_empty_inputs() {
    let dir = TempDir::new().unwrap();
    let err = pdfedit::merge(&[], &dir.path().join("out.pdf")).unwrap_err();
    assert!(matches!(err, PdfEditError::NoFilesToMerge));
}

#[test]
fn test_merge_output_cannot_be_an_input() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path(), "doc.pdf", 2);
    let before = fs::read(&input).unwrap();

    let err = pdfedit::merge(&[input.clone()], &input).unwrap_err();

    assert!(matches!(err, PdfEditError::InvalidConfig { .. }));
    assert_eq!(fs::read(&input).unwrap(), before);
}

#[test]
fn test_merge_missing_input_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path(), "doc.pdf", 2);
    let missing = dir.path().join("missing.pdf");
    let output = dir.path().join("out.pdf");

    let err = pdfedit::merge(&[input, missing], &output).unwrap_err();

    assert!(matches!(err, PdfEditError::FileNotFound { .. }));
    assert!(!output.exists());
}

#[test]
fn test_merge_no_clobber() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path(), "doc.pdf", 2);
    let output = dir.path().join("out.pdf");
    fs::write(&output, b"existing").unwrap();

    let editor = Editor::with_options(EditorOptions {
        overwrite_mode: OverwriteMode::NoClobber,
        ..EditorOptions::default()
    });
    let err = editor.merge(&[input], &output).unwrap_err();

    assert!(matches!(err, PdfEditError::OutputExists { .. }));
    assert_eq!(fs::read(&output).unwrap(), b"existing");
}

#[test]
fn test_merge_force_overwrites() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path(), "doc.pdf", 2);
    let output = dir.path().join("out.pdf");
    fs::write(&output, b"existing").unwrap();

    let editor = Editor::with_options(EditorOptions {
        overwrite_mode: OverwriteMode::Force,
        ..EditorOptions::default()
    });
    editor.merge(&[input], &output).unwrap();

    assert_eq!(read_letters(&output), vec!["A", "B"]);
}
