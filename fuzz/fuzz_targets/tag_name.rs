#![no_main]

use libfuzzer_sys::fuzz_target;
use scanner::internal::scan_tag_name;
use scanner::{HtmlTags, StrLexer, TagClassifier};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let mut lexer = StrLexer::new(&text);
    let name = scan_tag_name(&mut lexer);
    assert!(lexer.position() <= text.len());
    let tag = HtmlTags.classify(&name);
    if tag.custom_name().is_none() {
        assert_eq!(tag.name(), name);
    }
});
