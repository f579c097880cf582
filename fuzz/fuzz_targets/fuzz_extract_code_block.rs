#![no_main]

use libfuzzer_sys::fuzz_target;
use solidbook_docs::extract::{extract_code_block, has_marker};

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };

    let block = extract_code_block(raw);

    // Extraction only ever removes a prefix.
    assert!(raw.ends_with(&block.code));

    if !has_marker(raw) {
        assert!(block.file_name.is_empty());
        assert_eq!(block.code, raw);
    }
});
