//! External token kinds and the valid-token set passed in by the grammar.

use crate::cursor::Span;

/// Token kinds the scanner can produce.
///
/// Order matches the grammar's external token table; `ValidTokens` bit
/// positions are the discriminants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    StartTagName,
    ScriptStartTagName,
    StyleStartTagName,
    EndTagName,
    ErroneousEndTagName,
    SelfClosingTagDelimiter,
    ImplicitEndTag,
    RawText,
    Comment,
    MustacheStartDelimiter,
    MustacheEndDelimiter,
    MustacheSetStartDelimiter,
    MustacheSetEndDelimiter,
    MustacheOldEndDelimiter,
    MustacheSectionName,
    MustacheEndSectionName,
    MustacheErroneousEndSectionName,
    MustacheIdentifier,
    MustacheComment,
    MustacheText,
}

impl TokenKind {
    pub const ALL: [TokenKind; 20] = [
        TokenKind::StartTagName,
        TokenKind::ScriptStartTagName,
        TokenKind::StyleStartTagName,
        TokenKind::EndTagName,
        TokenKind::ErroneousEndTagName,
        TokenKind::SelfClosingTagDelimiter,
        TokenKind::ImplicitEndTag,
        TokenKind::RawText,
        TokenKind::Comment,
        TokenKind::MustacheStartDelimiter,
        TokenKind::MustacheEndDelimiter,
        TokenKind::MustacheSetStartDelimiter,
        TokenKind::MustacheSetEndDelimiter,
        TokenKind::MustacheOldEndDelimiter,
        TokenKind::MustacheSectionName,
        TokenKind::MustacheEndSectionName,
        TokenKind::MustacheErroneousEndSectionName,
        TokenKind::MustacheIdentifier,
        TokenKind::MustacheComment,
        TokenKind::MustacheText,
    ];

    /// Stable snake-case label used in token snapshots.
    pub fn label(self) -> &'static str {
        match self {
            TokenKind::StartTagName => "start_tag_name",
            TokenKind::ScriptStartTagName => "script_start_tag_name",
            TokenKind::StyleStartTagName => "style_start_tag_name",
            TokenKind::EndTagName => "end_tag_name",
            TokenKind::ErroneousEndTagName => "erroneous_end_tag_name",
            TokenKind::SelfClosingTagDelimiter => "self_closing_tag_delimiter",
            TokenKind::ImplicitEndTag => "implicit_end_tag",
            TokenKind::RawText => "raw_text",
            TokenKind::Comment => "comment",
            TokenKind::MustacheStartDelimiter => "mustache_start_delimiter",
            TokenKind::MustacheEndDelimiter => "mustache_end_delimiter",
            TokenKind::MustacheSetStartDelimiter => "mustache_set_start_delimiter",
            TokenKind::MustacheSetEndDelimiter => "mustache_set_end_delimiter",
            TokenKind::MustacheOldEndDelimiter => "mustache_old_end_delimiter",
            TokenKind::MustacheSectionName => "mustache_section_name",
            TokenKind::MustacheEndSectionName => "mustache_end_section_name",
            TokenKind::MustacheErroneousEndSectionName => "mustache_erroneous_end_section_name",
            TokenKind::MustacheIdentifier => "mustache_identifier",
            TokenKind::MustacheComment => "mustache_comment",
            TokenKind::MustacheText => "mustache_text",
        }
    }

    pub fn from_label(label: &str) -> Option<TokenKind> {
        TokenKind::ALL.into_iter().find(|kind| kind.label() == label)
    }

    fn bit(self) -> u32 {
        1 << (self as u8)
    }
}

/// Set of token kinds the grammar accepts at the current position.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ValidTokens(u32);

impl ValidTokens {
    pub const fn none() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        TokenKind::ALL.into_iter().collect()
    }

    pub fn of(kinds: &[TokenKind]) -> Self {
        kinds.iter().copied().collect()
    }

    #[must_use]
    pub fn with(self, kind: TokenKind) -> Self {
        Self(self.0 | kind.bit())
    }

    #[must_use]
    pub fn without(self, kind: TokenKind) -> Self {
        Self(self.0 & !kind.bit())
    }

    pub fn contains(self, kind: TokenKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = TokenKind> {
        TokenKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }
}

impl FromIterator<TokenKind> for ValidTokens {
    fn from_iter<I: IntoIterator<Item = TokenKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::none(), Self::with)
    }
}

impl std::fmt::Debug for ValidTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set()
            .entries(self.iter().map(TokenKind::label))
            .finish()
    }
}

/// A committed external token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScannedToken {
    pub kind: TokenKind,
    pub span: Span,
}
