#![no_main]

use libfuzzer_sys::fuzz_target;
use solidbook_core::viewer::ViewerOptions;
use solidbook_docs::markdown::render_markdown;

fuzz_target!(|data: &[u8]| {
    // Arbitrary markdown must render without panicking
    if let Ok(source) = std::str::from_utf8(data) {
        let _ = render_markdown(source, &ViewerOptions::default());
    }
});
