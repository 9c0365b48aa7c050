//! Scanner entry point and dispatch policy.
//!
//! The grammar calls `Scanner::scan` at every position where an external token
//! may appear, passing the set of token kinds it would accept. The dispatcher
//! picks at most one recognizer, in priority order:
//!
//! 1. raw text, when tag-name tokens are excluded (inside `<script>`/`<style>`);
//! 2. leading whitespace is skipped, never emitted;
//! 3. mustache tokens (delimiter directives, comment, identifier, section names,
//!    end delimiter), then mustache text / start delimiter;
//! 4. `<`-prefixed tokens (start delimiter beginning with `<`, comment, implicit
//!    end tag);
//! 5. implicit end tag at end of input;
//! 6. self-closing delimiter on `/`;
//! 7. bare start/end tag names.
//!
//! Invariant: a declined scan produces no token and leaves the lexer state
//! untouched except where a recognizer documents otherwise; the host rewinds
//! the cursor to the scan entry point.

use crate::codec::{EncodeOutcome, SERIALIZATION_BUFFER_SIZE, StateCodec};
use crate::cursor::Lexer;
use crate::state::LexerState;
use crate::token::{TokenKind, ValidTokens};
use tags::{HtmlTags, Tag, TagClassifier};

/// Scanner configuration.
#[derive(Clone, Debug)]
pub struct ScannerConfig {
    /// Honor `{{=<% %>=}}`-style directives. When disabled the set-delimiter
    /// recognizers always decline and the delimiters stay at `{{`/`}}`.
    pub delimiter_changes: bool,
    /// Upper bound for serialized state, in bytes.
    pub codec_capacity: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            delimiter_changes: true,
            codec_capacity: SERIALIZATION_BUFFER_SIZE,
        }
    }
}

/// Minimal scanner instrumentation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScannerStats {
    pub scans: u64,
    pub tokens: u64,
    pub declines: u64,
    pub implicit_closes: u64,
}

/// Context-sensitive scanner for html-mustache documents.
#[derive(Debug)]
pub struct Scanner<C = HtmlTags> {
    pub(crate) config: ScannerConfig,
    pub(crate) classifier: C,
    pub(crate) state: LexerState,
    pub(crate) stats: ScannerStats,
}

impl Scanner<HtmlTags> {
    pub fn new(config: ScannerConfig) -> Self {
        Self::with_classifier(config, HtmlTags)
    }
}

impl Default for Scanner<HtmlTags> {
    fn default() -> Self {
        Self::new(ScannerConfig::default())
    }
}

impl<C: TagClassifier> Scanner<C> {
    pub fn with_classifier(config: ScannerConfig, classifier: C) -> Self {
        Self {
            config,
            classifier,
            state: LexerState::new(),
            stats: ScannerStats::default(),
        }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn state(&self) -> &LexerState {
        &self.state
    }

    pub fn stats(&self) -> ScannerStats {
        self.stats
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Drops all open tags, sections and custom delimiters.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    pub fn codec(&self) -> StateCodec {
        StateCodec::new(self.config.codec_capacity)
    }

    /// Snapshot the lexer state into `buffer`.
    pub fn serialize(&self, buffer: &mut [u8]) -> EncodeOutcome {
        let outcome = self.codec().encode(&self.state, buffer);
        if !outcome.is_lossless() {
            log::debug!(
                target: "scanner.codec",
                "state truncated: dropped_tags={} dropped_sections={} delimiters_dropped={}",
                outcome.dropped_tags,
                outcome.dropped_sections,
                outcome.delimiters_dropped
            );
        }
        outcome
    }

    /// Replace the lexer state with the one encoded in `buffer`.
    ///
    /// An empty buffer restores the freshly constructed state.
    pub fn deserialize(&mut self, buffer: &[u8]) {
        self.state = self.codec().decode(buffer);
    }

    /// Try to produce one of the `valid` token kinds at the lexer position.
    pub fn scan(&mut self, lexer: &mut impl Lexer, valid: ValidTokens) -> Option<TokenKind> {
        self.stats.scans = self.stats.scans.saturating_add(1);
        let result = self.dispatch(lexer, valid);
        match result {
            Some(kind) => {
                self.stats.tokens = self.stats.tokens.saturating_add(1);
                #[cfg(any(test, feature = "debug-stats"))]
                log::trace!(target: "scanner.dispatch", "emit {} valid={valid:?}", kind.label());
                #[cfg(not(any(test, feature = "debug-stats")))]
                let _ = kind;
            }
            None => {
                self.stats.declines = self.stats.declines.saturating_add(1);
                #[cfg(any(test, feature = "debug-stats"))]
                log::trace!(target: "scanner.dispatch", "decline valid={valid:?}");
            }
        }
        result
    }

    fn dispatch(&mut self, lexer: &mut impl Lexer, valid: ValidTokens) -> Option<TokenKind> {
        if valid.contains(TokenKind::RawText)
            && !valid.contains(TokenKind::StartTagName)
            && !valid.contains(TokenKind::EndTagName)
        {
            return self.scan_raw_text(lexer);
        }

        while lexer.lookahead().is_some_and(char::is_whitespace) {
            lexer.skip();
        }

        if valid.contains(TokenKind::MustacheSetStartDelimiter) {
            return self.scan_set_start_delimiter(lexer);
        }
        if valid.contains(TokenKind::MustacheSetEndDelimiter) {
            return self.scan_set_end_delimiter(lexer);
        }
        if valid.contains(TokenKind::MustacheOldEndDelimiter) {
            return self.scan_old_end_delimiter(lexer);
        }
        if valid.contains(TokenKind::MustacheComment) {
            return self.scan_mustache_comment(lexer);
        }
        if valid.contains(TokenKind::MustacheIdentifier) {
            return self.scan_identifier(lexer);
        }
        if valid.contains(TokenKind::MustacheSectionName) {
            return self.scan_section_start_name(lexer);
        }
        if valid.contains(TokenKind::MustacheEndSectionName)
            || valid.contains(TokenKind::MustacheErroneousEndSectionName)
        {
            return self.scan_section_end_name(lexer);
        }

        let lookahead = lexer.lookahead();
        if valid.contains(TokenKind::MustacheEndDelimiter)
            && lookahead.is_some()
            && lookahead == self.state.delimiters.end_char(0)
        {
            return self.scan_end_delimiter(lexer);
        }

        let start_first = self.state.delimiters.start_char(0);
        if lookahead.is_some() && lookahead != Some('<') {
            if valid.contains(TokenKind::MustacheText) {
                return self.scan_text(lexer, valid);
            }
            if valid.contains(TokenKind::MustacheStartDelimiter) && lookahead == start_first {
                return self.scan_start_delimiter(lexer);
            }
        }

        match lookahead {
            Some('<') => {
                lexer.mark_end();
                lexer.advance();

                if valid.contains(TokenKind::MustacheStartDelimiter) && start_first == Some('<') {
                    match self.state.delimiters.start_char(1) {
                        None => {
                            lexer.mark_end();
                            return Some(TokenKind::MustacheStartDelimiter);
                        }
                        Some(second) if lexer.lookahead() == Some(second) => {
                            return self.scan_start_delimiter_from(lexer, 1);
                        }
                        Some(_) => {}
                    }
                }

                if lexer.lookahead() == Some('!') {
                    lexer.advance();
                    return self.scan_comment(lexer);
                }

                if valid.contains(TokenKind::ImplicitEndTag) {
                    return self.scan_implicit_end_tag(lexer);
                }
                None
            }
            None => {
                if valid.contains(TokenKind::ImplicitEndTag) {
                    return self.scan_implicit_end_tag(lexer);
                }
                None
            }
            Some('/') => {
                if valid.contains(TokenKind::SelfClosingTagDelimiter) {
                    return self.scan_self_closing_tag_delimiter(lexer);
                }
                None
            }
            Some(_) => {
                let wants_start = valid.contains(TokenKind::StartTagName);
                let wants_end = valid.contains(TokenKind::EndTagName);
                if (wants_start || wants_end) && !valid.contains(TokenKind::RawText) {
                    return if wants_start {
                        self.scan_start_tag_name(lexer)
                    } else {
                        self.scan_end_tag_name(lexer)
                    };
                }
                None
            }
        }
    }

    pub(crate) fn push_tag(&mut self, tag: Tag) {
        log::trace!(target: "scanner.state", "push tag {}", tag.name());
        self.state.tags.push(tag);
    }

    pub(crate) fn pop_tag(&mut self) -> Option<Tag> {
        let popped = self.state.tags.pop();
        if let Some(tag) = &popped {
            log::trace!(target: "scanner.state", "pop tag {}", tag.name());
        }
        popped
    }
}

#[cfg(test)]
mod tests;
