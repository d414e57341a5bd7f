#![no_main]

use libfuzzer_sys::fuzz_target;
use pdfedit::PageOrder;
use std::fs;

fuzz_target!(|data: &[u8]| {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("fuzz.pdf");
    fs::write(&path, data).unwrap();

    // Arbitrary bytes must fail cleanly, and a failed reorder must not touch
    // the file.
    let order = PageOrder::from(vec![0, 0]);
    if pdfedit::reorder(Some(path.as_path()), &order).is_err() {
        assert_eq!(fs::read(&path).unwrap(), data);
    }
});
