#![no_main]

use libfuzzer_sys::fuzz_target;
use scanner::host::{HostConfig, parse};
use scanner::{ScannerConfig, TokenFmt};

fuzz_target!(|data: &[u8]| {
    // Element nesting recurses in the host; keep inputs modest.
    if data.len() > 16 * 1024 {
        return;
    }
    let Some((&flags, rest)) = data.split_first() else {
        return;
    };
    let text = String::from_utf8_lossy(rest);
    let config = HostConfig {
        scanner: ScannerConfig {
            delimiter_changes: flags & 1 == 0,
            codec_capacity: if flags & 2 == 0 { 1024 } else { 16 + usize::from(flags >> 2) },
        },
        checkpoint: flags & 2 != 0,
    };
    let output = parse(&text, config);

    let mut last_end = 0usize;
    for token in &output.tokens {
        assert!(token.span.start <= token.span.end);
        assert!(token.span.end <= text.len());
        assert!(token.span.start >= last_end);
        last_end = token.span.end;
    }
    if let Err(err) = TokenFmt::new(&text).format_tokens(&output.tokens) {
        panic!("unformattable token stream: {err}");
    }
});
