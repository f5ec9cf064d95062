//! Element classification tables.
//!
//! These sets are shared by the tokenizer and both serializers so that a tag
//! is classified the same way when it is parsed and when it is rendered.
//! Tag names are compared case-sensitively.

use strum_macros::{Display, EnumIter};

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements can't have any contents (since there's no end tag, no
/// content can be put between the start tag and the end tag)."
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose body is opaque text, never tokenized as markup. The body
/// runs until the literal `</tagname` sequence.
pub const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Elements that are always written with an explicit end tag, even when they
/// have no attributes and no children (`<div></div>`, never `<div/>`).
pub const REQUIRES_END_TAG_ELEMENTS: &[&str] = &[
    "div", "script", "style", "title", "textarea", "iframe", "canvas", "video", "audio", "object",
    "span", "a", "p", "li", "td", "th", "button", "select", "option", "label", "table", "tr", "ul",
    "ol",
];

/// The serialization class of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ElementKind {
    /// Never has children or an end tag.
    Void,
    /// Body is a single opaque text run; also needs an end tag.
    RawText,
    /// Always written as `<tag></tag>` when empty.
    RequiresEndTag,
    /// Written as `<tag/>` when it has no attributes and no children.
    Normal,
}

impl ElementKind {
    /// Classify a tag name.
    #[must_use]
    pub fn of(tag: &str) -> Self {
        if is_void_element(tag) {
            Self::Void
        } else if is_raw_text_element(tag) {
            Self::RawText
        } else if requires_end_tag(tag) {
            Self::RequiresEndTag
        } else {
            Self::Normal
        }
    }

    /// True for every kind that must be written with an end tag when empty.
    #[must_use]
    pub const fn needs_end_tag(self) -> bool {
        matches!(self, Self::RawText | Self::RequiresEndTag)
    }
}

/// Returns true if `tag` is a void element.
#[must_use]
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Returns true if `tag` is a raw-text element.
#[must_use]
pub fn is_raw_text_element(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&tag)
}

/// Returns true if `tag` must be written with an explicit end tag.
#[must_use]
pub fn requires_end_tag(tag: &str) -> bool {
    REQUIRES_END_TAG_ELEMENTS.contains(&tag)
}
