//! Raw-text bodies of `<script>` and `<style>`.

use crate::cursor::Lexer;
use crate::scanner::Scanner;
use crate::token::TokenKind;
use tags::{TagCategory, TagClassifier};

const SCRIPT_CLOSE_TAG: &[u8] = b"</SCRIPT";
const STYLE_CLOSE_TAG: &[u8] = b"</STYLE";

impl<C: TagClassifier> Scanner<C> {
    /// Consume everything up to (not including) the case-insensitive closing
    /// sequence of the innermost open element.
    ///
    /// The closing literal is picked once from the stack top; the body may be
    /// empty, and an unterminated body runs to end of input minus any trailing
    /// partial match of the closing literal.
    pub(crate) fn scan_raw_text(&mut self, lexer: &mut impl Lexer) -> Option<TokenKind> {
        let top = self.state.tags.top()?;
        let close_tag = if top.category() == TagCategory::Script {
            SCRIPT_CLOSE_TAG
        } else {
            STYLE_CLOSE_TAG
        };

        lexer.mark_end();
        let mut matched = 0usize;
        while let Some(ch) = lexer.lookahead() {
            if ch.to_ascii_uppercase() == close_tag[matched] as char {
                matched += 1;
                if matched == close_tag.len() {
                    break;
                }
                lexer.advance();
            } else if ch == '<' {
                // `<` restarts the match; everything before it is body text.
                lexer.mark_end();
                matched = 1;
                lexer.advance();
            } else {
                matched = 0;
                lexer.advance();
                lexer.mark_end();
            }
        }

        Some(TokenKind::RawText)
    }
}
