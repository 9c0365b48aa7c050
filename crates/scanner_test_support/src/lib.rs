//! Shared helpers for the scanner's golden and checkpoint tests.

pub mod fixtures;

pub use fixtures::{
    ExpectedTokens, FixtureCase, FixtureFilter, FixtureStatus, TOKEN_FORMAT_V1, load_manifest,
    parse_tokens_file,
};

/// Token lines shown on each side of the first difference.
const DIFF_CONTEXT: usize = 2;

fn line_at(lines: &[String], idx: usize) -> &str {
    lines.get(idx).map_or("<missing>", String::as_str)
}

/// Render the first difference between an expected and an actual token
/// listing, with a little context on either side.
pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    use std::fmt::Write;

    let len = expected.len().max(actual.len());
    let mut out = String::new();
    let Some(first) = (0..len).find(|&idx| line_at(expected, idx) != line_at(actual, idx)) else {
        let _ = writeln!(out, "token listings match ({len} lines)");
        return out;
    };

    let _ = writeln!(out, "token {} differs:", first + 1);
    for idx in first.saturating_sub(DIFF_CONTEXT)..(first + DIFF_CONTEXT + 1).min(len) {
        let marker = if idx == first { '>' } else { ' ' };
        let _ = writeln!(out, "{marker} {:>4} - {}", idx + 1, line_at(expected, idx));
        let _ = writeln!(out, "{marker} {:>4} + {}", idx + 1, line_at(actual, idx));
    }
    let _ = writeln!(
        out,
        "expected {} tokens, got {}",
        expected.len(),
        actual.len()
    );
    out
}
