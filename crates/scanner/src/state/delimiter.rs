//! Mustache delimiter slots.

pub const DEFAULT_START_DELIMITER: &str = "{{";
pub const DEFAULT_END_DELIMITER: &str = "}}";

/// One delimiter slot.
///
/// `Default` means "use the compiled-in delimiter" and is distinct from a
/// custom delimiter spelled like the default: only custom values are persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Delimiter {
    #[default]
    Default,
    Custom(Box<str>),
}

impl Delimiter {
    /// Custom delimiter; an empty string falls back to the default.
    pub fn custom(text: &str) -> Self {
        if text.is_empty() {
            Delimiter::Default
        } else {
            Delimiter::Custom(Box::from(text))
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Delimiter::Default)
    }

    /// The persisted spelling: empty for `Default`.
    pub fn custom_text(&self) -> &str {
        match self {
            Delimiter::Default => "",
            Delimiter::Custom(text) => text,
        }
    }

    /// Effective text, resolving `Default` against `fallback`.
    pub fn resolve<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            Delimiter::Default => fallback,
            Delimiter::Custom(text) => text,
        }
    }
}

/// Current start/end delimiters plus the end delimiter that was active
/// before the last set-delimiter directive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Delimiters {
    pub(crate) start: Delimiter,
    pub(crate) end: Delimiter,
    pub(crate) old_end: Delimiter,
}

impl Delimiters {
    pub fn new(start: Delimiter, end: Delimiter, old_end: Delimiter) -> Self {
        Self {
            start,
            end,
            old_end,
        }
    }

    pub fn start(&self) -> &str {
        self.start.resolve(DEFAULT_START_DELIMITER)
    }

    pub fn end(&self) -> &str {
        self.end.resolve(DEFAULT_END_DELIMITER)
    }

    pub fn old_end(&self) -> &str {
        self.old_end.resolve(DEFAULT_END_DELIMITER)
    }

    pub fn start_slot(&self) -> &Delimiter {
        &self.start
    }

    pub fn end_slot(&self) -> &Delimiter {
        &self.end
    }

    pub fn old_end_slot(&self) -> &Delimiter {
        &self.old_end
    }

    /// `i`-th character of the start delimiter, looked up fresh on every call.
    pub fn start_char(&self, i: usize) -> Option<char> {
        self.start().chars().nth(i)
    }

    pub fn end_char(&self, i: usize) -> Option<char> {
        self.end().chars().nth(i)
    }

    pub fn old_end_char(&self, i: usize) -> Option<char> {
        self.old_end().chars().nth(i)
    }

    pub(crate) fn set_start(&mut self, text: &str) {
        self.start = Delimiter::custom(text);
    }

    /// Replaces the end delimiter, moving the previous one into `old_end`.
    pub(crate) fn set_end(&mut self, text: &str) {
        self.old_end = std::mem::replace(&mut self.end, Delimiter::custom(text));
    }

    /// Drops the retained old end delimiter once the directive is closed.
    pub(crate) fn release_old_end(&mut self) {
        self.old_end = Delimiter::Default;
    }
}
