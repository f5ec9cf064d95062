//! Programmatic document construction.
//!
//! ```
//! use htmlfive_html::HTMLBuilder;
//!
//! let mut builder = HTMLBuilder::with_language("en");
//! let _ = builder.head().add("title")?.add_text("Hello")?;
//! let mut body = builder.body();
//! let _ = body.add("h1")?.add_text("Hello")?;
//! let _ = body.add("br")?;
//! assert!(builder.to_html().starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
//! # Ok::<(), htmlfive_html::BuildError>(())
//! ```

use htmlfive_dom::{AttributesMap, Document, ElementData, NodeId, NodeType};
use indexmap::IndexMap;

use crate::error::BuildError;
use crate::serializer::HTMLExporter;

/// Ordered CSS property map written into an element's `style` attribute as
/// `name:value;` pairs.
pub type StyleMap = IndexMap<String, String>;

/// Builds an `<html>` document with `<head>` and `<body>` already in place.
#[derive(Debug, Clone)]
pub struct HTMLBuilder {
    document: Document,
    head: NodeId,
    body: NodeId,
}

impl Default for HTMLBuilder {
    fn default() -> Self {
        Self::from_root(ElementData::new("html"))
    }
}

impl HTMLBuilder {
    /// An empty `<html><head></head><body></body></html>` document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Like [`HTMLBuilder::new`], with `lang` set on the `<html>` element.
    #[must_use]
    pub fn with_language(language: &str) -> Self {
        let mut attrs = AttributesMap::new();
        let _ = attrs.insert("lang".to_string(), Some(language.to_string()));
        Self::from_root(ElementData::with_attrs("html", attrs))
    }

    fn from_root(root: ElementData) -> Self {
        let mut document = Document::new(root);
        let head = document.alloc(NodeType::Element(ElementData::new("head")));
        document.append_child(NodeId::ROOT, head);
        let body = document.alloc(NodeType::Element(ElementData::new("body")));
        document.append_child(NodeId::ROOT, body);
        Self {
            document,
            head,
            body,
        }
    }

    /// The `<head>` element.
    pub fn head(&mut self) -> Fragment<'_> {
        Fragment {
            document: &mut self.document,
            id: self.head,
        }
    }

    /// The `<body>` element.
    pub fn body(&mut self) -> Fragment<'_> {
        Fragment {
            document: &mut self.document,
            id: self.body,
        }
    }

    /// Re-open an element added earlier, by its ID.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::NotAnElement`] if `id` is not an element of
    /// this document.
    pub fn fragment(&mut self, id: NodeId) -> Result<Fragment<'_>, BuildError> {
        if self.document.as_element(id).is_none() {
            return Err(BuildError::NotAnElement { id });
        }
        Ok(Fragment {
            document: &mut self.document,
            id,
        })
    }

    /// The document built so far.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Finish building and take the document.
    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Export the document with the default [`HTMLExporter`].
    #[must_use]
    pub fn to_html(&self) -> String {
        HTMLExporter::new().export(&self.document).trim().to_string()
    }
}

/// A handle on one element of an [`HTMLBuilder`] document that children can
/// be appended to.
#[derive(Debug)]
pub struct Fragment<'a> {
    document: &'a mut Document,
    id: NodeId,
}

impl Fragment<'_> {
    /// ID of the element this fragment appends to.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Append a child element and return a fragment for it.
    ///
    /// A non-empty `style` is rendered as `name:value;` pairs and replaces
    /// any `style` entry in `attrs`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::VoidElementChild`] if this fragment is a void
    /// element.
    pub fn add_element(
        &mut self,
        tag: &str,
        mut attrs: AttributesMap,
        style: &StyleMap,
    ) -> Result<Fragment<'_>, BuildError> {
        self.check_accepts_children()?;
        if !style.is_empty() {
            let value: String = style
                .iter()
                .map(|(name, value)| format!("{name}:{value};"))
                .collect();
            let _ = attrs.insert("style".to_string(), Some(value));
        }
        let id = self
            .document
            .alloc(NodeType::Element(ElementData::with_attrs(tag, attrs)));
        self.document.append_child(self.id, id);
        Ok(Fragment {
            document: &mut *self.document,
            id,
        })
    }

    /// Append a child element with no attributes.
    ///
    /// # Errors
    ///
    /// Same as [`Fragment::add_element`].
    pub fn add(&mut self, tag: &str) -> Result<Fragment<'_>, BuildError> {
        self.add_element(tag, AttributesMap::new(), &StyleMap::new())
    }

    /// Append a text child and return its ID.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::VoidElementChild`] if this fragment is a void
    /// element.
    pub fn add_text(&mut self, text: impl Into<String>) -> Result<NodeId, BuildError> {
        self.check_accepts_children()?;
        let id = self.document.alloc(NodeType::Text(text.into()));
        self.document.append_child(self.id, id);
        Ok(id)
    }

    fn check_accepts_children(&self) -> Result<(), BuildError> {
        match self.document.as_element(self.id) {
            Some(element) if element.is_void() => Err(BuildError::VoidElementChild {
                tag: element.tag_name.clone(),
            }),
            Some(_) => Ok(()),
            None => Err(BuildError::NotAnElement { id: self.id }),
        }
    }
}
