//! Integration tests for in-place reordering.

use pdfedit::config::{EditorOptions, OverwriteMode};
use pdfedit::edit::Editor;
use pdfedit::error::PdfEditError;
use pdfedit::io::{FileOps, LopdfCodec, StdFileOps};
use pdfedit::pages::PageOrder;
use rstest::rstest;
use std::fs;
use std::io;
use std::path::Path;
use tempfile::TempDir;

use crate::common::{
    OutlineEntry, expected_letters, letters, read_info_title, read_letters, read_outline,
    temp_residue, write_fixture, write_outlined,
};

fn reorder_fixture(pages: usize, order: &[usize]) {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "doc.pdf", pages);

    let outcome = pdfedit::reorder(Some(path.as_path()), &PageOrder::from(order.to_vec())).unwrap();

    assert_eq!(outcome.path, path);
    assert_eq!(outcome.page_count, order.len());
    assert_eq!(outcome.bytes_written, fs::metadata(&path).unwrap().len());
    assert_eq!(read_letters(&path), expected_letters(&letters(pages), order));
    assert!(temp_residue(dir.path()).is_empty());
}

#[test]
fn test_move_last_page_to_front() {
    // [A, B, C] with [2, 0, 1] becomes [C, A, B]
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "abc.pdf", 3);

    pdfedit::reorder(Some(path.as_path()), &PageOrder::from(vec![2, 0, 1])).unwrap();

    assert_eq!(read_letters(&path), vec!["C", "A", "B"]);
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(12)]
fn test_identity_order_preserves_pages(#[case] pages: usize) {
    let order: Vec<usize> = (0..pages).collect();
    reorder_fixture(pages, &order);
}

#[rstest]
fn test_all_permutations_of_three(
    #[values(0, 1, 2)] a: usize,
    #[values(0, 1, 2)] b: usize,
    #[values(0, 1, 2)] c: usize,
) {
    if a == b || b == c || a == c {
        return;
    }
    reorder_fixture(3, &[a, b, c]);
}

#[rstest]
fn test_all_permutations_of_four(
    #[values(0, 1, 2, 3)] a: usize,
    #[values(0, 1, 2, 3)] b: usize,
    #[values(0, 1, 2, 3)] c: usize,
    #[values(0, 1, 2, 3)] d: usize,
) {
    let order = [a, b, c, d];
    let mut seen = order;
    seen.sort_unstable();
    if seen != [0, 1, 2, 3] {
        return;
    }
    reorder_fixture(4, &order);
}

#[rstest]
#[case(&[0, 0, 1])]
#[case(&[2, 2, 2, 2])]
#[case(&[1, 0, 1, 0])]
fn test_duplicate_pages_are_copied(#[case] order: &[usize]) {
    reorder_fixture(3, order);
}

#[rstest]
#[case(&[1])]
#[case(&[0, 2])]
fn test_omitted_pages_are_dropped(#[case] order: &[usize]) {
    reorder_fixture(3, order);
}

#[test]
fn test_first_and_last_page_boundaries() {
    reorder_fixture(5, &[4, 1, 2, 3, 0]);
    reorder_fixture(5, &[0]);
    reorder_fixture(5, &[4]);
}

#[test]
fn test_reorder_twice() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "doc.pdf", 4);

    pdfedit::reorder(Some(path.as_path()), &PageOrder::from(vec![3, 2, 1, 0])).unwrap();
    pdfedit::reorder(Some(path.as_path()), &PageOrder::from(vec![3, 2, 1, 0])).unwrap();

    assert_eq!(read_letters(&path), letters(4));
}

#[test]
fn test_outline_follows_pages() {
    let dir = TempDir::new().unwrap();
    let path = write_outlined(dir.path(), "doc.pdf", &letters(3));

    pdfedit::reorder(Some(path.as_path()), &PageOrder::from(vec![2, 0])).unwrap();

    assert_eq!(read_letters(&path), vec!["C", "A"]);
    assert_eq!(
        read_outline(&path),
        vec![
            OutlineEntry::new(0, "Chapter A", 2),
            OutlineEntry::new(1, "Section A", 2),
            OutlineEntry::new(0, "Chapter C", 1),
        ]
    );
}

#[test]
fn test_document_info_is_kept() {
    let dir = TempDir::new().unwrap();
    let path = write_outlined(dir.path(), "doc.pdf", &letters(2));

    pdfedit::reorder(Some(path.as_path()), &PageOrder::from(vec![1, 0])).unwrap();

    assert_eq!(read_info_title(&path).as_deref(), Some("Lettered"));
}

#[cfg(unix)]
#[rstest]
#[case(0o644)]
#[case(0o600)]
#[case(0o664)]
fn test_file_mode_survives_reorder(#[case] mode: u32) {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "doc.pdf", 3);
    fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();

    pdfedit::reorder(Some(path.as_path()), &PageOrder::from(vec![2, 1, 0])).unwrap();

    let after = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(after, mode);
}

#[test]
fn test_uncompressed_output_is_readable() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "doc.pdf", 3);
    let editor = Editor::with_options(EditorOptions {
        compress: false,
        ..EditorOptions::default()
    });

    editor
        .reorder(Some(path.as_path()), &PageOrder::from(vec![1, 2, 0]))
        .unwrap();

    assert_eq!(read_letters(&path), vec!["B", "C", "A"]);
}

#[test]
fn test_custom_temp_dir_leaves_no_residue() {
    let dir = TempDir::new().unwrap();
    let scratch = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "doc.pdf", 3);
    let editor = Editor::with_options(EditorOptions {
        temp_dir: Some(scratch.path().to_path_buf()),
        compress: true,
        overwrite_mode: OverwriteMode::Prompt,
    });

    editor
        .reorder(Some(path.as_path()), &PageOrder::from(vec![2, 1, 0]))
        .unwrap();

    assert_eq!(read_letters(&path), vec!["C", "B", "A"]);
    assert!(temp_residue(dir.path()).is_empty());
    assert!(temp_residue(scratch.path()).is_empty());
}

/// Real filesystem, except that one step of the swap fails.
#[derive(Debug, Clone, Copy)]
enum FailingOps {
    Remove,
    Move,
}

impl FileOps for FailingOps {
    fn remove_file(&self, path: &Path) -> io::Result<()> {
        match self {
            FailingOps::Remove => Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "file is locked",
            )),
            FailingOps::Move => StdFileOps.remove_file(path),
        }
    }

    fn move_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        match self {
            FailingOps::Remove => StdFileOps.move_file(from, to),
            FailingOps::Move => Err(io::Error::other("disk unplugged")),
        }
    }
}

fn failing_editor(ops: FailingOps) -> Editor<LopdfCodec, FailingOps> {
    Editor::with_parts(LopdfCodec::new(), ops, EditorOptions::default())
}

#[test]
fn test_remove_failure_keeps_original() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "doc.pdf", 3);
    let before = fs::read(&path).unwrap();

    let err = failing_editor(FailingOps::Remove)
        .reorder(Some(path.as_path()), &PageOrder::from(vec![2, 0, 1]))
        .unwrap_err();

    assert!(matches!(err, PdfEditError::ReplaceAborted { .. }));
    assert!(!err.is_data_at_risk());
    assert_eq!(fs::read(&path).unwrap(), before);
    assert!(temp_residue(dir.path()).is_empty());
}

#[test]
fn test_move_failure_reports_recovery_path() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "doc.pdf", 3);

    let err = failing_editor(FailingOps::Move)
        .reorder(Some(path.as_path()), &PageOrder::from(vec![2, 0, 1]))
        .unwrap_err();

    let PdfEditError::ReplaceFailed {
        path: failed_path,
        temp_path,
        ..
    } = &err
    else {
        panic!("expected ReplaceFailed, got {err:?}");
    };
    assert_eq!(failed_path, &path);
    assert!(!path.exists());
    assert!(err.is_data_at_risk());
    assert_eq!(err.recovery_path(), Some(temp_path.as_path()));

    // The reordered document survives in the temporary file.
    assert_eq!(read_letters(temp_path), vec!["C", "A", "B"]);
}
