//! Persistent lexer state carried between scanner invocations.

mod delimiter;
mod stack;

pub use delimiter::{DEFAULT_END_DELIMITER, DEFAULT_START_DELIMITER, Delimiter, Delimiters};
pub use stack::{Scope, ScopeStack, Section};

use tags::Tag;

/// The unit of persistence: open HTML elements, open mustache sections and
/// the active delimiters.
///
/// HTML nesting and section nesting are tracked independently; neither stack
/// constrains the other.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LexerState {
    pub tags: ScopeStack<Tag>,
    pub sections: ScopeStack<Section>,
    pub delimiters: Delimiters,
}

impl LexerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Releases every owned buffer and returns to the freshly constructed state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_fresh(&self) -> bool {
        self.tags.is_empty() && self.sections.is_empty() && self.delimiters == Delimiters::default()
    }
}
