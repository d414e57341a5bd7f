#![no_main]

use libfuzzer_sys::fuzz_target;
use pdfedit::config::PageSelection;

fuzz_target!(|data: &[u8]| {
    let Some((&count, text)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(text) else {
        return;
    };
    let Ok(selection) = PageSelection::parse(text) else {
        return;
    };

    // Whatever resolves must address real pages.
    let page_count = usize::from(count);
    if let Ok(order) = selection.resolve(page_count) {
        assert!(!order.is_empty());
        assert!(order.iter().all(|index| index.get() < page_count));
    }
});
