//! Deterministic token formatting for golden tests and the dump tool.
//!
//! One line per token: `<label> "<escaped source text>"`. Zero-width tokens
//! (implicit end tags) print an empty string.

use crate::cursor::Span;
use crate::token::{ScannedToken, TokenKind};

#[derive(Debug)]
pub enum TokenFmtError {
    InvalidSpan { kind: TokenKind, span: Span },
}

impl std::fmt::Display for TokenFmtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenFmtError::InvalidSpan { kind, span } => write!(
                f,
                "invalid span for {}: {}..{}",
                kind.label(),
                span.start,
                span.end
            ),
        }
    }
}

impl std::error::Error for TokenFmtError {}

/// Formatter bound to the source text the tokens were scanned from.
pub struct TokenFmt<'a> {
    source: &'a str,
}

impl<'a> TokenFmt<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    pub fn resolve(&self, token: &ScannedToken) -> Result<&'a str, TokenFmtError> {
        self.source
            .get(token.span.start..token.span.end)
            .ok_or(TokenFmtError::InvalidSpan {
                kind: token.kind,
                span: token.span,
            })
    }

    pub fn format_token(&self, token: &ScannedToken) -> Result<String, TokenFmtError> {
        let text = self.resolve(token)?;
        Ok(format!("{} \"{}\"", token.kind.label(), escape_text(text)))
    }

    pub fn format_tokens(&self, tokens: &[ScannedToken]) -> Result<Vec<String>, TokenFmtError> {
        tokens.iter().map(|token| self.format_token(token)).collect()
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch < ' ' || ch == '\u{7f}' => {
                use std::fmt::Write;
                let _ = write!(&mut out, "\\u{{{:02X}}}", ch as u32);
            }
            _ => out.push(ch),
        }
    }
    out
}
