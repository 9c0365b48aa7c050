use crate::cursor::Lexer;
use crate::scanner::Scanner;
use crate::token::TokenKind;
use tags::TagClassifier;

impl<C: TagClassifier> Scanner<C> {
    /// HTML comment body, entered just past `<!`.
    pub(crate) fn scan_comment(&mut self, lexer: &mut impl Lexer) -> Option<TokenKind> {
        for _ in 0..2 {
            if lexer.lookahead() != Some('-') {
                return None;
            }
            lexer.advance();
        }

        let mut dashes = 0u32;
        while let Some(ch) = lexer.lookahead() {
            match ch {
                '-' => dashes += 1,
                '>' if dashes >= 2 => {
                    lexer.advance();
                    lexer.mark_end();
                    return Some(TokenKind::Comment);
                }
                _ => dashes = 0,
            }
            lexer.advance();
        }
        None
    }
}
