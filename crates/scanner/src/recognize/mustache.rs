//! Mustache delimiter, directive, identifier, section and comment recognizers.
//!
//! Every delimiter comparison goes through `Delimiters`, so a directive takes
//! effect for all tokens scanned after it.

use crate::cursor::Lexer;
use crate::scanner::Scanner;
use crate::state::{Delimiters, Section};
use crate::token::TokenKind;
use tags::TagClassifier;

impl<C: TagClassifier> Scanner<C> {
    pub(crate) fn scan_start_delimiter(&mut self, lexer: &mut impl Lexer) -> Option<TokenKind> {
        self.scan_start_delimiter_from(lexer, 0)
    }

    /// Match the start delimiter from character `from` on; earlier characters
    /// were already consumed by the dispatcher.
    pub(crate) fn scan_start_delimiter_from(
        &mut self,
        lexer: &mut impl Lexer,
        from: usize,
    ) -> Option<TokenKind> {
        match_delimiter(lexer, &self.state.delimiters, from, Delimiters::start_char)
            .then_some(TokenKind::MustacheStartDelimiter)
    }

    pub(crate) fn scan_end_delimiter(&mut self, lexer: &mut impl Lexer) -> Option<TokenKind> {
        match_delimiter(lexer, &self.state.delimiters, 0, Delimiters::end_char)
            .then_some(TokenKind::MustacheEndDelimiter)
    }

    /// Closing marker of a set-delimiter directive, written in the end
    /// delimiter that was active before the directive.
    pub(crate) fn scan_old_end_delimiter(&mut self, lexer: &mut impl Lexer) -> Option<TokenKind> {
        if !match_delimiter(lexer, &self.state.delimiters, 0, Delimiters::old_end_char) {
            return None;
        }
        self.state.delimiters.release_old_end();
        Some(TokenKind::MustacheOldEndDelimiter)
    }

    /// New start delimiter inside `{{=... ...=}}`: non-whitespace up to the
    /// first whitespace or `=`.
    pub(crate) fn scan_set_start_delimiter(&mut self, lexer: &mut impl Lexer) -> Option<TokenKind> {
        if !self.config.delimiter_changes {
            return None;
        }
        let mut text = String::new();
        loop {
            match lexer.lookahead() {
                None => return None,
                Some(ch) if ch.is_whitespace() || ch == '=' => break,
                Some(ch) => {
                    text.push(ch);
                    lexer.advance();
                }
            }
        }
        if text.is_empty() {
            return None;
        }
        log::debug!(target: "scanner.state", "start delimiter -> {text:?}");
        self.state.delimiters.set_start(&text);
        lexer.mark_end();
        Some(TokenKind::MustacheSetStartDelimiter)
    }

    /// New end delimiter: non-whitespace up to `=`. The previous end
    /// delimiter is kept so the directive itself can still be closed.
    pub(crate) fn scan_set_end_delimiter(&mut self, lexer: &mut impl Lexer) -> Option<TokenKind> {
        if !self.config.delimiter_changes {
            return None;
        }
        let mut text = String::new();
        loop {
            match lexer.lookahead() {
                None => return None,
                Some('=') => break,
                Some(ch) if ch.is_whitespace() => return None,
                Some(ch) => {
                    text.push(ch);
                    lexer.advance();
                }
            }
        }
        if text.is_empty() {
            return None;
        }
        log::debug!(target: "scanner.state", "end delimiter -> {text:?}");
        self.state.delimiters.set_end(&text);
        lexer.mark_end();
        Some(TokenKind::MustacheSetEndDelimiter)
    }

    /// One path segment of `{{name.path}}`.
    pub(crate) fn scan_identifier(&mut self, lexer: &mut impl Lexer) -> Option<TokenKind> {
        let mut has_content = false;
        loop {
            let ch = lexer.lookahead()?;
            if ch == '.' || ch.is_whitespace() || Some(ch) == self.state.delimiters.end_char(0) {
                break;
            }
            has_content = true;
            lexer.advance();
        }
        has_content.then_some(TokenKind::MustacheIdentifier)
    }

    pub(crate) fn scan_section_start_name(&mut self, lexer: &mut impl Lexer) -> Option<TokenKind> {
        let name = self.scan_section_name(lexer);
        if name.is_empty() {
            return None;
        }
        log::trace!(target: "scanner.state", "open section {name}");
        self.state.sections.push(Section::new(name));
        Some(TokenKind::MustacheSectionName)
    }

    pub(crate) fn scan_section_end_name(&mut self, lexer: &mut impl Lexer) -> Option<TokenKind> {
        let name = self.scan_section_name(lexer);
        if name.is_empty() {
            return None;
        }
        if self.state.sections.close(&Section::new(name)) {
            Some(TokenKind::MustacheEndSectionName)
        } else {
            Some(TokenKind::MustacheErroneousEndSectionName)
        }
    }

    /// `{{! ... }}` body up to the first character of the end delimiter.
    pub(crate) fn scan_mustache_comment(&mut self, lexer: &mut impl Lexer) -> Option<TokenKind> {
        loop {
            let ch = lexer.lookahead()?;
            if Some(ch) == self.state.delimiters.end_char(0) {
                break;
            }
            lexer.advance();
        }
        Some(TokenKind::MustacheComment)
    }

    fn scan_section_name(&self, lexer: &mut impl Lexer) -> String {
        let mut name = String::new();
        while let Some(ch) = lexer.lookahead() {
            if ch.is_whitespace() || Some(ch) == self.state.delimiters.end_char(0) {
                break;
            }
            name.push(ch);
            lexer.advance();
        }
        name
    }
}

/// Match the full delimiter character by character; any mismatch fails the
/// whole token.
fn match_delimiter(
    lexer: &mut impl Lexer,
    delimiters: &Delimiters,
    from: usize,
    char_at: fn(&Delimiters, usize) -> Option<char>,
) -> bool {
    let mut index = from;
    while let Some(expected) = char_at(delimiters, index) {
        if lexer.lookahead() != Some(expected) {
            return false;
        }
        lexer.advance();
        index += 1;
    }
    lexer.mark_end();
    true
}
