//! HTML tag classification for the scanner.
//!
//! Maps case-folded tag names to element kinds and answers the two questions
//! implicit closing needs: "is this element void" and "may this parent hold
//! that child".

mod kind;

pub use kind::TagKind;

/// One open HTML element.
///
/// Invariant: custom names are stored exactly as scanned (already uppercased);
/// two tags are equal iff their kinds match and, for custom tags, their names
/// match byte for byte.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    Known(TagKind),
    Custom(Box<str>),
}

impl Default for Tag {
    /// Placeholder entry: a custom tag with an empty name.
    fn default() -> Self {
        Tag::Custom(Box::from(""))
    }
}

impl Tag {
    pub fn kind(&self) -> TagKind {
        match self {
            Tag::Known(kind) => *kind,
            Tag::Custom(_) => TagKind::Custom,
        }
    }

    pub fn custom_name(&self) -> Option<&str> {
        match self {
            Tag::Known(_) => None,
            Tag::Custom(name) => Some(name),
        }
    }

    /// Uppercase display name (custom tags report their own name).
    pub fn name(&self) -> &str {
        match self {
            Tag::Known(kind) => kind.name().unwrap_or_default(),
            Tag::Custom(name) => name,
        }
    }

    pub fn category(&self) -> TagCategory {
        match self.kind() {
            kind if kind.is_void() => TagCategory::Void,
            TagKind::Script => TagCategory::Script,
            TagKind::Style => TagCategory::Style,
            TagKind::Html => TagCategory::Html,
            TagKind::Head => TagCategory::Head,
            TagKind::Body => TagCategory::Body,
            TagKind::Custom => TagCategory::Custom,
            _ => TagCategory::OtherStandard,
        }
    }
}

/// Coarse grouping of tag kinds used by the scanner's policies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagCategory {
    Void,
    Script,
    Style,
    Html,
    Head,
    Body,
    OtherStandard,
    Custom,
}

/// Tag-name semantics consumed by the scanner.
pub trait TagClassifier {
    /// Classify an uppercased tag name.
    fn classify(&self, name: &str) -> Tag;

    fn is_void(&self, tag: &Tag) -> bool;

    /// Whether `parent` may directly contain `child` without being implicitly closed.
    fn can_contain(&self, parent: &Tag, child: &Tag) -> bool;
}

const NOT_ALLOWED_IN_PARAGRAPHS: &[TagKind] = &[
    TagKind::Address,
    TagKind::Article,
    TagKind::Aside,
    TagKind::Blockquote,
    TagKind::Details,
    TagKind::Div,
    TagKind::Dl,
    TagKind::Fieldset,
    TagKind::Figcaption,
    TagKind::Figure,
    TagKind::Footer,
    TagKind::Form,
    TagKind::H1,
    TagKind::H2,
    TagKind::H3,
    TagKind::H4,
    TagKind::H5,
    TagKind::H6,
    TagKind::Header,
    TagKind::Hr,
    TagKind::Main,
    TagKind::Nav,
    TagKind::Ol,
    TagKind::P,
    TagKind::Pre,
    TagKind::Section,
];

/// Standard HTML classifier.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlTags;

impl TagClassifier for HtmlTags {
    fn classify(&self, name: &str) -> Tag {
        match TagKind::from_name(name) {
            Some(kind) => Tag::Known(kind),
            None => Tag::Custom(Box::from(name)),
        }
    }

    fn is_void(&self, tag: &Tag) -> bool {
        tag.kind().is_void()
    }

    fn can_contain(&self, parent: &Tag, child: &Tag) -> bool {
        let child = child.kind();
        match parent.kind() {
            TagKind::Li => child != TagKind::Li,
            TagKind::Dt | TagKind::Dd => !matches!(child, TagKind::Dt | TagKind::Dd),
            TagKind::P => !NOT_ALLOWED_IN_PARAGRAPHS.contains(&child),
            TagKind::Colgroup => child == TagKind::Col,
            TagKind::Rb | TagKind::Rt | TagKind::Rp => {
                !matches!(child, TagKind::Rb | TagKind::Rt | TagKind::Rp)
            }
            TagKind::Optgroup => child != TagKind::Optgroup,
            TagKind::Tr => child != TagKind::Tr,
            TagKind::Td | TagKind::Th => {
                !matches!(child, TagKind::Td | TagKind::Th | TagKind::Tr)
            }
            _ => true,
        }
    }
}
