//! Named open-scope stack shared by HTML elements and mustache sections.

use tags::Tag;

/// Entry kind that can live on a `ScopeStack`.
pub trait Scope: Clone + PartialEq + Default + std::fmt::Debug {}

impl Scope for Tag {}

/// Open mustache section (`{{#name}}` / `{{^name}}`).
///
/// Names are kept verbatim; sections compare by exact name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Section {
    name: Box<str>,
}

impl Section {
    pub fn new(name: impl Into<Box<str>>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Scope for Section {}

/// Stack of open scopes; the top is the innermost open scope.
#[derive(Clone, Debug, PartialEq)]
pub struct ScopeStack<T> {
    items: Vec<T>,
}

impl<T> Default for ScopeStack<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Scope> ScopeStack<T> {
    pub fn push(&mut self, entry: T) {
        self.items.push(entry);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn top(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Entries from the outermost to the innermost scope.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Pops the top entry when it equals `candidate`.
    ///
    /// Returns `true` for a proper close; `false` leaves the stack untouched
    /// (an erroneous close).
    pub fn close(&mut self, candidate: &T) -> bool {
        if self.top() == Some(candidate) {
            self.items.pop();
            true
        } else {
            false
        }
    }

    /// Depth (0 = top) of the innermost entry matching `pred`.
    pub fn find_from_top(&self, mut pred: impl FnMut(&T) -> bool) -> Option<usize> {
        self.items.iter().rev().position(|entry| pred(entry))
    }
}

impl<T: Scope> FromIterator<T> for ScopeStack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, T: Scope> IntoIterator for &'a ScopeStack<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
