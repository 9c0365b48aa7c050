//! External scanner for html-mustache templates.
//!
//! The scanner produces the context-sensitive tokens a context-free grammar
//! cannot: tag names tied to an open-element stack, implicit end tags,
//! raw-text bodies, comments, and mustache tokens whose delimiters can be
//! changed mid-document. Its state is small and serializable so an
//! incremental parser can checkpoint it between tokens.
//!
//! Entry points:
//! - [`Scanner::scan`] for a single token decision against a [`Lexer`];
//! - [`StateCodec`] for checkpoints;
//! - [`host::parse`] for a whole document through the reference grammar host.

mod codec;
mod cursor;
mod recognize;
mod scanner;
mod state;
mod token;
mod token_fmt;

pub mod host;

pub use crate::codec::{EncodeOutcome, SERIALIZATION_BUFFER_SIZE, StateCodec};
pub use crate::cursor::{Lexer, Span, StrLexer};
pub use crate::scanner::{Scanner, ScannerConfig, ScannerStats};
pub use crate::state::{
    DEFAULT_END_DELIMITER, DEFAULT_START_DELIMITER, Delimiter, Delimiters, LexerState, Scope,
    ScopeStack, Section,
};
pub use crate::token::{ScannedToken, TokenKind, ValidTokens};
pub use crate::token_fmt::{TokenFmt, TokenFmtError};

pub use tags::{HtmlTags, Tag, TagCategory, TagClassifier, TagKind};

#[cfg(feature = "internal-api")]
pub mod internal {
    pub use crate::recognize::scan_tag_name;
}
