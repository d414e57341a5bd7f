//! Integration tests for page listing.

use rstest::rstest;
use tempfile::TempDir;

use crate::common::write_fixture;

#[rstest]
#[case(1, "Page 1 / 1", "Page 1 / 1")]
#[case(3, "Page 1 / 3", "Page 3 / 3")]
#[case(12, "Page 01 / 12", "Page 12 / 12")]
fn test_listing_covers_first_and_last_page(
    #[case] pages: usize,
    #[case] first: &str,
    #[case] last: &str,
) {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "doc.pdf", pages);

    let listing = pdfedit::list_pages(Some(path.as_path())).unwrap();

    assert_eq!(listing.path, path);
    assert_eq!(listing.page_count, pages);
    assert_eq!(listing.pages.len(), pages);
    assert_eq!(listing.pages[0].index.get(), 0);
    assert_eq!(listing.pages[0].label, first);
    assert_eq!(listing.pages[pages - 1].index.get(), pages - 1);
    assert_eq!(listing.pages[pages - 1].label, last);
}

#[test]
fn test_identity_order_from_listing_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "doc.pdf", 4);
    let before = crate::common::read_letters(&path);

    let listing = pdfedit::list_pages(Some(path.as_path())).unwrap();
    pdfedit::reorder(Some(path.as_path()), &listing.identity_order()).unwrap();

    assert_eq!(crate::common::read_letters(&path), before);
}

#[test]
fn test_listing_serializes_camel_case() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "doc.pdf", 2);

    let listing = pdfedit::list_pages(Some(path.as_path())).unwrap();
    let json = serde_json::to_value(&listing).unwrap();

    assert_eq!(json["pageCount"], 2);
    assert_eq!(json["pages"][1]["index"], 1);
    assert_eq!(json["pages"][1]["pageNumber"], 2);
    assert_eq!(json["pages"][1]["label"], "Page 2 / 2");
}
