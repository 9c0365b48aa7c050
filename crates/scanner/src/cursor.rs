//! Lookahead cursor consumed by the recognizers.
//!
//! The cursor is forward-only with a single character of lookahead. A token's
//! end is the last `mark_end` position, or the current position when
//! `mark_end` was never called; characters consumed past the mark are handed
//! back to the host when the scan returns.

/// Byte span into the scanned text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start must be <= end");
        Self { start, end }
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    pub fn len(self) -> usize {
        self.end - self.start
    }
}

/// Lexer interface the recognizers are written against.
pub trait Lexer {
    /// Current lookahead character, `None` at end of input.
    fn lookahead(&self) -> Option<char>;

    /// Consume the lookahead and include it in the token.
    fn advance(&mut self);

    /// Consume the lookahead without including it in the token.
    ///
    /// Only meaningful before the first `advance`; afterwards it behaves like
    /// `advance`.
    fn skip(&mut self);

    /// Commit the current position as the token end without stopping consumption.
    fn mark_end(&mut self);

    fn is_eof(&self) -> bool {
        self.lookahead().is_none()
    }
}

/// `Lexer` over an in-memory string.
///
/// Invariant: `pos`, `token_start` and `marked_end` always sit on UTF-8
/// character boundaries of `text`.
#[derive(Debug)]
pub struct StrLexer<'a> {
    text: &'a str,
    pos: usize,
    token_start: usize,
    marked_end: Option<usize>,
    advanced: bool,
}

impl<'a> StrLexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self::at(text, 0)
    }

    /// Start a scan at byte offset `pos`.
    pub fn at(text: &'a str, pos: usize) -> Self {
        assert!(
            text.is_char_boundary(pos),
            "lexer start must be on a UTF-8 boundary"
        );
        Self {
            text,
            pos,
            token_start: pos,
            marked_end: None,
            advanced: false,
        }
    }

    /// Current read position (may be past the token end).
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Span of the token produced by the last scan.
    pub fn token_span(&self) -> Span {
        let end = self.marked_end.unwrap_or(self.pos).max(self.token_start);
        Span::new(self.token_start, end)
    }

    pub fn text(&self) -> &'a str {
        self.text
    }
}

impl Lexer for StrLexer<'_> {
    fn lookahead(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.lookahead() {
            self.pos += ch.len_utf8();
        }
        self.advanced = true;
    }

    fn skip(&mut self) {
        if let Some(ch) = self.lookahead() {
            self.pos += ch.len_utf8();
        }
        if !self.advanced {
            self.token_start = self.pos;
        }
    }

    fn mark_end(&mut self) {
        self.marked_end = Some(self.pos);
    }
}
