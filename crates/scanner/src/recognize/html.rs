//! HTML tag-name, implicit end-tag and self-closing recognizers.

use crate::cursor::Lexer;
use crate::scanner::Scanner;
use crate::token::TokenKind;
use tags::{TagCategory, TagClassifier};

/// Consume a maximal run of `[alnum - :]`, case-folded to uppercase.
///
/// Returns an empty string without consuming anything when the lookahead does
/// not start a tag name.
pub fn scan_tag_name(lexer: &mut impl Lexer) -> String {
    let mut name = String::new();
    while let Some(ch) = lexer.lookahead() {
        if !(ch.is_alphanumeric() || ch == '-' || ch == ':') {
            break;
        }
        name.extend(ch.to_uppercase());
        lexer.advance();
    }
    name
}

impl<C: TagClassifier> Scanner<C> {
    /// Decide whether the innermost open element ends here without an end tag.
    ///
    /// Called with the lexer just past `<`, or at end of input. Closes at most
    /// one element per call; the grammar re-invokes it to peel further levels.
    pub(crate) fn scan_implicit_end_tag(&mut self, lexer: &mut impl Lexer) -> Option<TokenKind> {
        let is_closing_tag = lexer.lookahead() == Some('/');
        if is_closing_tag {
            lexer.advance();
        } else if self
            .state
            .tags
            .top()
            .is_some_and(|parent| self.classifier.is_void(parent))
        {
            return Some(self.close_implicitly());
        }

        let name = scan_tag_name(lexer);
        if name.is_empty() && !lexer.is_eof() {
            return None;
        }
        let next = self.classifier.classify(&name);

        if is_closing_tag {
            // `</x>` that closes the current element is handled by the end-tag rule.
            if self.state.tags.top() == Some(&next) {
                return None;
            }
            let kind = next.kind();
            if self.state.tags.find_from_top(|tag| tag.kind() == kind).is_some() {
                return Some(self.close_implicitly());
            }
            return None;
        }

        let parent = self.state.tags.top()?;
        let closes = !self.classifier.can_contain(parent, &next)
            || (matches!(
                parent.category(),
                TagCategory::Html | TagCategory::Head | TagCategory::Body
            ) && lexer.is_eof());
        closes.then(|| self.close_implicitly())
    }

    fn close_implicitly(&mut self) -> TokenKind {
        self.pop_tag();
        self.stats.implicit_closes = self.stats.implicit_closes.saturating_add(1);
        TokenKind::ImplicitEndTag
    }

    pub(crate) fn scan_start_tag_name(&mut self, lexer: &mut impl Lexer) -> Option<TokenKind> {
        let name = scan_tag_name(lexer);
        if name.is_empty() {
            return None;
        }
        let tag = self.classifier.classify(&name);
        let kind = match tag.category() {
            TagCategory::Script => TokenKind::ScriptStartTagName,
            TagCategory::Style => TokenKind::StyleStartTagName,
            _ => TokenKind::StartTagName,
        };
        self.push_tag(tag);
        Some(kind)
    }

    pub(crate) fn scan_end_tag_name(&mut self, lexer: &mut impl Lexer) -> Option<TokenKind> {
        let name = scan_tag_name(lexer);
        if name.is_empty() {
            return None;
        }
        let tag = self.classifier.classify(&name);
        if self.state.tags.close(&tag) {
            log::trace!(target: "scanner.state", "close tag {}", tag.name());
            Some(TokenKind::EndTagName)
        } else {
            Some(TokenKind::ErroneousEndTagName)
        }
    }

    /// `/>`: closes the element whose start tag is being scanned.
    ///
    /// With no open element the two characters are still consumed but no
    /// token is produced.
    pub(crate) fn scan_self_closing_tag_delimiter(
        &mut self,
        lexer: &mut impl Lexer,
    ) -> Option<TokenKind> {
        lexer.advance();
        if lexer.lookahead() != Some('>') {
            return None;
        }
        lexer.advance();
        self.pop_tag().map(|_| TokenKind::SelfClosingTagDelimiter)
    }
}
