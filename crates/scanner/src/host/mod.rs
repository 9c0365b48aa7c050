//! Reference grammar host.
//!
//! A stand-in for the html-mustache grammar. It consults the
//! scanner with the token sets the grammar presents at each position, lexes
//! the grammar's own punctuation (`<`, `</`, `>`, attributes, mustache sigils)
//! itself, and records a `ParseError` wherever the grammar would build an
//! ERROR or MISSING node.
//!
//! Invariants:
//! - The host never inspects or mutates lexer state directly; open tags and
//!   sections are whatever the scanner left behind.
//! - A declined scan consumes nothing: the host restarts at the entry offset.
//! - Every loop iteration consumes at least one byte or exits, so parsing is
//!   bounded by the input length.

use crate::cursor::StrLexer;
use crate::scanner::{Scanner, ScannerConfig};
use crate::state::Section;
use crate::token::{ScannedToken, TokenKind, ValidTokens};
use tags::{HtmlTags, Tag, TagClassifier};

mod error;

pub use error::{ParseError, ParseErrorCode};

#[derive(Clone, Debug, Default)]
pub struct HostConfig {
    pub scanner: ScannerConfig,
    /// Round-trip the lexer state through the codec before every scanner
    /// call, as an incremental reparse would.
    pub checkpoint: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HostOutput {
    pub tokens: Vec<ScannedToken>,
    pub errors: Vec<ParseError>,
    pub open_tags: Vec<Tag>,
    pub open_sections: Vec<Section>,
}

/// Parse `text` with a fresh scanner over the standard HTML tag table.
pub fn parse(text: &str, config: HostConfig) -> HostOutput {
    let mut scanner = Scanner::new(config.scanner);
    parse_with_scanner(text, &mut scanner, config.checkpoint)
}

/// Parse `text` with an existing scanner, continuing from its current state.
pub fn parse_with_scanner<C: TagClassifier>(
    text: &str,
    scanner: &mut Scanner<C>,
    checkpoint: bool,
) -> HostOutput {
    let mut host = Host {
        text,
        pos: 0,
        scanner,
        checkpoint,
        checkpoint_buffer: Vec::new(),
        tokens: Vec::new(),
        errors: Vec::new(),
    };
    host.parse_document();
    let Host {
        tokens,
        errors,
        scanner,
        ..
    } = host;
    log::debug!(
        target: "scanner.dispatch",
        "host done: tokens={} errors={} open_tags={} open_sections={}",
        tokens.len(),
        errors.len(),
        scanner.state().tags.len(),
        scanner.state().sections.len()
    );
    HostOutput {
        tokens,
        errors,
        open_tags: scanner.state().tags.iter().cloned().collect(),
        open_sections: scanner.state().sections.iter().cloned().collect(),
    }
}

/// Outcome of one content step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Continue,
    Eof,
    /// `</` that the enclosing element must handle.
    ElementEnd,
    ImplicitEnd,
    /// A start tag whose children follow.
    Opened,
}

struct Host<'a, 's, C = HtmlTags> {
    text: &'a str,
    pos: usize,
    scanner: &'s mut Scanner<C>,
    checkpoint: bool,
    checkpoint_buffer: Vec<u8>,
    tokens: Vec<ScannedToken>,
    errors: Vec<ParseError>,
}

impl<C: TagClassifier> Host<'_, '_, C> {
    /// Element nesting is tracked as a depth counter rather than recursion, so
    /// deeply nested input cannot exhaust the call stack.
    fn parse_document(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.step(depth > 0) {
                Step::Continue => {}
                Step::Opened => depth += 1,
                Step::ImplicitEnd => depth = depth.saturating_sub(1),
                // At depth 0 `</x>` has no element to close; it can only be erroneous.
                Step::ElementEnd => {
                    if self.parse_end_tag() == Some(TokenKind::EndTagName) {
                        depth = depth.saturating_sub(1);
                    }
                }
                Step::Eof if depth > 0 => {
                    self.error(ParseErrorCode::MissingEndTag);
                    depth -= 1;
                }
                Step::Eof => return,
            }
        }
    }

    fn step(&mut self, in_element: bool) -> Step {
        let mut valid = ValidTokens::of(&[
            TokenKind::Comment,
            TokenKind::MustacheStartDelimiter,
            TokenKind::MustacheText,
        ]);
        if in_element {
            valid = valid.with(TokenKind::ImplicitEndTag);
        }

        self.skip_whitespace();
        if let Some(token) = self.scan(valid) {
            return match token.kind {
                TokenKind::ImplicitEndTag => Step::ImplicitEnd,
                TokenKind::MustacheStartDelimiter => {
                    self.parse_mustache();
                    Step::Continue
                }
                _ => Step::Continue,
            };
        }

        let rest = self.rest();
        if rest.is_empty() {
            return Step::Eof;
        }
        if rest.starts_with("</") {
            return Step::ElementEnd;
        }
        if rest.starts_with("<!--") {
            self.error(ParseErrorCode::UnterminatedComment);
            self.pos = self.text.len();
        } else if rest.starts_with("<!") {
            self.skip_declaration();
        } else if rest.starts_with('<') {
            if self.parse_element() {
                return Step::Opened;
            }
        } else {
            self.error(ParseErrorCode::UnexpectedCharacter);
            self.bump_char();
        }
        Step::Continue
    }

    /// `<!DOCTYPE ...>` and other markup declarations carry no scanner tokens.
    fn skip_declaration(&mut self) {
        let rest = self.rest().as_bytes();
        match memchr::memchr(b'>', rest) {
            Some(at) => self.pos += at + 1,
            None => {
                self.error(ParseErrorCode::MissingCloseAngle);
                self.pos = self.text.len();
            }
        }
    }

    /// Start tag through `>`; true when element content follows.
    fn parse_element(&mut self) -> bool {
        self.bump_char();
        let start = self.scan(ValidTokens::of(&[
            TokenKind::StartTagName,
            TokenKind::ScriptStartTagName,
            TokenKind::StyleStartTagName,
        ]));
        let Some(start) = start else {
            self.error(ParseErrorCode::MissingTagName);
            return false;
        };

        if !self.parse_attributes() {
            return false;
        }

        match start.kind {
            TokenKind::ScriptStartTagName | TokenKind::StyleStartTagName => {
                self.parse_raw_text_body();
                false
            }
            _ => true,
        }
    }

    /// Returns false when the start tag closed itself or never closed.
    fn parse_attributes(&mut self) -> bool {
        loop {
            self.skip_whitespace();
            let Some(ch) = self.peek() else {
                self.error(ParseErrorCode::UnterminatedStartTag);
                return false;
            };
            match ch {
                '>' => {
                    self.pos += 1;
                    return true;
                }
                '/' => {
                    if self
                        .scan(ValidTokens::none().with(TokenKind::SelfClosingTagDelimiter))
                        .is_some()
                    {
                        return false;
                    }
                    self.error(ParseErrorCode::UnexpectedCharacter);
                    self.pos += 1;
                }
                _ if self.at_start_delimiter() => {
                    if self
                        .scan(ValidTokens::none().with(TokenKind::MustacheStartDelimiter))
                        .is_some()
                    {
                        self.parse_mustache();
                    } else {
                        self.bump_char();
                    }
                }
                _ => self.parse_attribute(),
            }
        }
    }

    fn parse_attribute(&mut self) {
        let name_len =
            self.take_while(|ch| !(ch.is_whitespace() || matches!(ch, '=' | '>' | '/')));
        if name_len == 0 {
            self.error(ParseErrorCode::UnexpectedCharacter);
            self.bump_char();
            return;
        }
        self.skip_whitespace();
        if self.peek() != Some('=') {
            return;
        }
        self.pos += 1;
        self.skip_whitespace();
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let rest = self.rest().as_bytes();
                match memchr::memchr(quote as u8, rest) {
                    Some(at) => self.pos += at + 1,
                    None => {
                        self.error(ParseErrorCode::UnterminatedStartTag);
                        self.pos = self.text.len();
                    }
                }
            }
            Some(_) => {
                self.take_while(|ch| !(ch.is_whitespace() || ch == '>'));
            }
            None => {}
        }
    }

    fn parse_raw_text_body(&mut self) {
        self.scan(ValidTokens::none().with(TokenKind::RawText));
        if !self.rest().starts_with("</") {
            self.error(ParseErrorCode::MissingEndTag);
            return;
        }
        self.parse_end_tag();
    }

    /// `</name>`, entered at `</`.
    fn parse_end_tag(&mut self) -> Option<TokenKind> {
        self.pos += 2;
        let kind = self
            .scan(ValidTokens::of(&[
                TokenKind::EndTagName,
                TokenKind::ErroneousEndTagName,
            ]))
            .map(|token| token.kind);
        if kind.is_none() {
            self.error(ParseErrorCode::MissingTagName);
        }
        self.expect_close_angle();
        kind
    }

    fn expect_close_angle(&mut self) {
        self.skip_whitespace();
        if self.peek() == Some('>') {
            self.pos += 1;
        } else {
            self.error(ParseErrorCode::MissingCloseAngle);
        }
    }

    /// Body of a mustache tag, entered just past the start delimiter.
    fn parse_mustache(&mut self) {
        self.skip_whitespace();
        match self.peek() {
            Some('#' | '^') => {
                self.pos += 1;
                if self
                    .scan(ValidTokens::none().with(TokenKind::MustacheSectionName))
                    .is_none()
                {
                    self.error(ParseErrorCode::MissingSectionName);
                }
            }
            Some('/') => {
                self.pos += 1;
                let valid = ValidTokens::of(&[
                    TokenKind::MustacheEndSectionName,
                    TokenKind::MustacheErroneousEndSectionName,
                ]);
                if self.scan(valid).is_none() {
                    self.error(ParseErrorCode::MissingSectionName);
                }
            }
            Some('!') => {
                self.pos += 1;
                if self
                    .scan(ValidTokens::none().with(TokenKind::MustacheComment))
                    .is_none()
                {
                    self.error(ParseErrorCode::MissingEndDelimiter);
                    self.pos = self.text.len();
                    return;
                }
            }
            Some('=') => {
                self.pos += 1;
                self.parse_delimiter_change();
                return;
            }
            Some('{') => {
                self.pos += 1;
                self.parse_path();
                self.skip_whitespace();
                if self.peek() == Some('}') {
                    self.pos += 1;
                }
            }
            Some('&' | '>') => {
                self.pos += 1;
                self.parse_path();
            }
            Some('.') if self.rest()[1..].starts_with(|ch: char| !ch.is_alphanumeric()) => {
                self.pos += 1;
            }
            _ => self.parse_path(),
        }
        self.expect_end_delimiter();
    }

    /// `name(.name)*`
    fn parse_path(&mut self) {
        loop {
            if self
                .scan(ValidTokens::none().with(TokenKind::MustacheIdentifier))
                .is_none()
            {
                self.error(ParseErrorCode::MissingIdentifier);
                return;
            }
            if self.peek() != Some('.') {
                return;
            }
            self.pos += 1;
        }
    }

    /// `{{=<start> <end>=}}`, entered past the first `=`. The directive is
    /// closed with the end delimiter that was active before it.
    fn parse_delimiter_change(&mut self) {
        let start = self.scan(ValidTokens::none().with(TokenKind::MustacheSetStartDelimiter));
        let end = start.and_then(|_| {
            self.scan(ValidTokens::none().with(TokenKind::MustacheSetEndDelimiter))
        });
        if end.is_none() {
            self.error(ParseErrorCode::RejectedDelimiterChange);
            self.skip_past_end_delimiter();
            return;
        }

        if self.peek() == Some('=') {
            self.pos += 1;
        } else {
            self.error(ParseErrorCode::UnexpectedCharacter);
        }
        if self
            .scan(ValidTokens::none().with(TokenKind::MustacheOldEndDelimiter))
            .is_none()
        {
            self.error(ParseErrorCode::MissingEndDelimiter);
        }
    }

    fn expect_end_delimiter(&mut self) {
        if self
            .scan(ValidTokens::none().with(TokenKind::MustacheEndDelimiter))
            .is_none()
        {
            self.error(ParseErrorCode::MissingEndDelimiter);
        }
    }

    /// Recovery for a rejected directive: resume after the next occurrence of
    /// the current end delimiter, or at end of input.
    fn skip_past_end_delimiter(&mut self) {
        let end = self.scanner.state().delimiters.end();
        let skip = self.rest().find(end).map(|at| at + end.len());
        self.pos = skip.map_or(self.text.len(), |skip| self.pos + skip);
    }

    fn scan(&mut self, valid: ValidTokens) -> Option<ScannedToken> {
        if self.checkpoint {
            self.round_trip_state();
        }
        let mut lexer = StrLexer::at(self.text, self.pos);
        let kind = self.scanner.scan(&mut lexer, valid)?;
        let token = ScannedToken {
            kind,
            span: lexer.token_span(),
        };
        self.pos = token.span.end;
        self.tokens.push(token);
        Some(token)
    }

    fn round_trip_state(&mut self) {
        let capacity = self.scanner.config().codec_capacity;
        self.checkpoint_buffer.resize(capacity, 0);
        let outcome = self.scanner.serialize(&mut self.checkpoint_buffer);
        self.scanner
            .deserialize(&self.checkpoint_buffer[..outcome.written]);
    }

    fn at_start_delimiter(&self) -> bool {
        self.rest()
            .starts_with(self.scanner.state().delimiters.start())
    }

    fn rest(&self) -> &str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump_char(&mut self) {
        if let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    /// Consume the longest prefix whose characters satisfy `pred`; returns
    /// its byte length.
    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let len = self
            .rest()
            .find(|ch: char| !pred(ch))
            .unwrap_or(self.rest().len());
        self.pos += len;
        len
    }

    fn error(&mut self, code: ParseErrorCode) {
        log::debug!(target: "scanner.dispatch", "host error {} at {}", code.as_str(), self.pos);
        self.errors.push(ParseError {
            code,
            position: self.pos,
        });
    }
}

#[cfg(test)]
mod tests;
