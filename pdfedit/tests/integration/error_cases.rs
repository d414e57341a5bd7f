//! Integration tests for error handling and edge cases.
//!
//! Every rejected reorder must leave the source file byte-for-byte intact.

use pdfedit::error::PdfEditError;
use pdfedit::io::CodecError;
use pdfedit::pages::PageOrder;
use rstest::rstest;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::common::{temp_residue, write_fixture};

#[test]
fn test_no_file_selected() {
    let order = PageOrder::from(vec![0]);
    assert!(matches!(
        pdfedit::reorder(None, &order),
        Err(PdfEditError::NoFileSelected)
    ));
    assert!(matches!(
        pdfedit::list_pages(None),
        Err(PdfEditError::NoFileSelected)
    ));

    let dir = TempDir::new().unwrap();
    assert!(matches!(
        pdfedit::split(None, dir.path()),
        Err(PdfEditError::NoFileSelected)
    ));
}

#[test]
fn test_empty_order_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "doc.pdf", 3);
    let before = fs::read(&path).unwrap();

    let err = pdfedit::reorder(Some(path.as_path()), &PageOrder::from(vec![])).unwrap_err();

    assert!(matches!(err, PdfEditError::EmptyPageList));
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[rstest]
#[case(&[3], 3, 0)]
#[case(&[0, 1, 3], 3, 2)]
#[case(&[0, 1_000_000], 1_000_000, 1)]
fn test_out_of_range_leaves_file_untouched(
    #[case] order: &[usize],
    #[case] bad_index: usize,
    #[case] bad_position: usize,
) {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "doc.pdf", 3);
    let before = fs::read(&path).unwrap();

    let err = pdfedit::reorder(Some(path.as_path()), &PageOrder::from(order.to_vec())).unwrap_err();

    match err {
        PdfEditError::IndexOutOfRange {
            index,
            position,
            page_count,
        } => {
            assert_eq!(index, bad_index);
            assert_eq!(position, bad_position);
            assert_eq!(page_count, 3);
        }
        other => panic!("expected IndexOutOfRange, got {other:?}"),
    }
    assert_eq!(fs::read(&path).unwrap(), before);
    assert!(temp_residue(dir.path()).is_empty());
}

#[test]
fn test_missing_file() {
    let err = pdfedit::reorder(
        Some(Path::new("/nonexistent/doc.pdf")),
        &PageOrder::from(vec![0]),
    )
    .unwrap_err();

    assert!(matches!(err, PdfEditError::FileNotFound { .. }));
    assert!(err.is_input_error());
}

#[test]
fn test_directory_is_not_a_file() {
    let dir = TempDir::new().unwrap();
    let err = pdfedit::list_pages(Some(dir.path())).unwrap_err();
    assert!(matches!(err, PdfEditError::NotAFile { .. }));
}

#[rstest]
#[case::empty(b"")]
#[case::garbage(b"this is not a pdf at all")]
fn test_unparseable_file_leaves_file_untouched(#[case] content: &[u8]) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.pdf");
    fs::write(&path, content).unwrap();

    let err = pdfedit::reorder(Some(path.as_path()), &PageOrder::from(vec![0])).unwrap_err();

    assert!(matches!(err, PdfEditError::CodecOpenFailed { .. }));
    assert_eq!(fs::read(&path).unwrap(), content);
    assert!(temp_residue(dir.path()).is_empty());
}

#[test]
fn test_open_failure_carries_codec_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.pdf");
    fs::write(&path, b"garbage").unwrap();

    let err = pdfedit::list_pages(Some(path.as_path())).unwrap_err();

    let PdfEditError::CodecOpenFailed { path: failed, source } = err else {
        panic!("expected CodecOpenFailed");
    };
    assert_eq!(failed, path);
    assert!(!matches!(source, CodecError::Encrypted));
    assert!(!source.to_string().is_empty());
}

#[test]
fn test_exit_codes_separate_data_loss() {
    let codes = [
        PdfEditError::NoFileSelected.exit_code(),
        PdfEditError::file_not_found("x.pdf").exit_code(),
        PdfEditError::output_exists("x.pdf").exit_code(),
    ];
    let replace_failed = PdfEditError::ReplaceFailed {
        path: "x.pdf".into(),
        temp_path: ".pdfedit-1.pdf".into(),
        source: std::io::Error::other("boom"),
    };

    assert!(!codes.contains(&replace_failed.exit_code()));
    assert_eq!(
        replace_failed.recovery_path(),
        Some(Path::new(".pdfedit-1.pdf"))
    );
}
