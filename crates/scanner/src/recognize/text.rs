//! Plain text runs between markup and mustache tags.
//!
//! A run ends at the earliest complete occurrence of either the start or the
//! end delimiter, or before a `<`. With a single character of lookahead the
//! token end can only be marked while the cursor stands on it, so the end is
//! marked at the earliest position that may still turn out to be a boundary.
//! When overlapping partial matches hide the boundary behind the mark, the run
//! stops early at the mark; the next run picks up from there. Text is never
//! dropped and a delimiter occurrence never lands inside a run.

use crate::cursor::Lexer;
use crate::scanner::Scanner;
use crate::token::{TokenKind, ValidTokens};
use tags::TagClassifier;

/// Incremental matcher for one delimiter literal.
///
/// Every run offset where an occurrence may begin stays live until the
/// literal diverges, so overlapping occurrences (`[[%` in `[[[%`) are found.
#[derive(Debug)]
struct LiteralMatch {
    literal: Vec<char>,
    /// Start offsets of partial matches, ascending.
    live: Vec<usize>,
}

impl LiteralMatch {
    fn new(literal: &str) -> Self {
        Self {
            literal: literal.chars().collect(),
            live: Vec::new(),
        }
    }

    /// Feed the character at run offset `at`; returns the start offset of an
    /// occurrence completed by it.
    fn feed(&mut self, ch: char, at: usize) -> Option<usize> {
        let literal = &self.literal;
        self.live.retain(|&from| literal.get(at - from) == Some(&ch));
        if literal.first() == Some(&ch) {
            self.live.push(at);
        }
        let done = self
            .live
            .first()
            .copied()
            .filter(|&from| at + 1 - from == literal.len());
        if done.is_some() {
            self.live.remove(0);
        }
        done
    }

    fn live_at(&self, offset: usize) -> bool {
        self.live.first() == Some(&offset)
    }

    /// Earliest live partial match that does not start the run.
    fn earliest_inner(&self) -> Option<usize> {
        self.live.iter().copied().find(|&from| from > 0)
    }
}

fn earliest(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

impl<C: TagClassifier> Scanner<C> {
    pub(crate) fn scan_text(
        &mut self,
        lexer: &mut impl Lexer,
        valid: ValidTokens,
    ) -> Option<TokenKind> {
        let mut start = LiteralMatch::new(self.state.delimiters.start());
        let mut end = LiteralMatch::new(self.state.delimiters.end());

        let mut offset = 0usize;
        let mut marked = 0usize;
        // Earliest known boundary after the run head.
        let mut boundary: Option<usize> = None;

        while let Some(ch) = lexer.lookahead() {
            let start_done = start.feed(ch, offset);
            let end_done = end.feed(ch, offset);

            if start_done == Some(0) && valid.contains(TokenKind::MustacheStartDelimiter) {
                lexer.advance();
                lexer.mark_end();
                return Some(TokenKind::MustacheStartDelimiter);
            }
            // A delimiter at the head is never text.
            if start_done == Some(0) || end_done == Some(0) || (offset == 0 && ch == '<') {
                return None;
            }
            for found in [start_done, end_done, (ch == '<').then_some(offset)] {
                boundary = earliest(boundary, found);
            }

            let pending = earliest(
                boundary,
                earliest(start.earliest_inner(), end.earliest_inner()),
            );
            if offset > 0 && pending.is_none_or(|at| at >= offset) {
                lexer.mark_end();
                marked = offset;
            }

            // Until the head is settled a boundary there would void the run.
            if !start.live_at(0) && !end.live_at(0) {
                if let Some(at) = pending {
                    if boundary == Some(at) || at > marked {
                        break;
                    }
                }
            }

            lexer.advance();
            offset += 1;
        }

        // Partial matches cut off by end of input are text.
        if lexer.is_eof() && boundary.is_none() {
            lexer.mark_end();
            marked = offset;
        }

        (marked > 0).then_some(TokenKind::MustacheText)
    }
}
