//! Document model for htmlfive.
//!
//! This crate provides an arena-based document tree: a [`Document`] owns every
//! node and hands out [`NodeId`] indices for all relationships. The root
//! element always lives at [`NodeId::ROOT`].
//!
//! # Design
//!
//! Children are owned by exactly one parent and there are no sibling links or
//! other back references besides the parent index, so the tree can be walked
//! in either direction without reference counting.

pub mod elements;

use std::collections::HashSet;

use indexmap::IndexMap;

pub use elements::{
    ElementKind, RAW_TEXT_ELEMENTS, REQUIRES_END_TAG_ELEMENTS, VOID_ELEMENTS, is_raw_text_element,
    is_void_element, requires_end_tag,
};

/// Ordered map of attribute names to values for an element.
///
/// A `None` value is a boolean attribute (`<input disabled>`). Inserting an
/// existing name keeps its original position and replaces the value.
pub type AttributesMap = IndexMap<String, Option<String>>;

/// A type-safe index into a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root element is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// A node stored in the document arena.
#[derive(Debug, Clone)]
pub struct Node {
    /// What kind of node this is, with its payload.
    pub node_type: NodeType,

    /// Parent element, `None` only for the root element.
    pub parent: Option<NodeId>,

    /// Ordered children. Always empty for text and comment nodes.
    pub children: Vec<NodeId>,
}

/// The kinds of node a document can hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    /// An element with a tag name and attributes.
    Element(ElementData),
    /// A run of character data.
    Text(String),
    /// The raw content between `<!--` and `-->`.
    Comment(String),
}

/// Element-specific data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Tag name, case as supplied.
    pub tag_name: String,
    /// Attributes in insertion order.
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Create an element with no attributes.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs: AttributesMap::new(),
        }
    }

    /// Create an element with the given attributes.
    #[must_use]
    pub fn with_attrs(tag_name: impl Into<String>, attrs: AttributesMap) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs,
        }
    }

    /// Returns `Some(value)` if the attribute exists. The inner `None` marks a
    /// boolean attribute.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<Option<&str>> {
        self.attrs.get(name).map(Option::as_deref)
    }

    /// Returns the element's id attribute value if present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id").and_then(Option::as_deref)
    }

    /// Returns the set of class names from the class attribute.
    #[must_use]
    pub fn classes(&self) -> HashSet<&str> {
        match self.attrs.get("class").and_then(Option::as_deref) {
            Some(classlist) => classlist.split_whitespace().collect(),
            None => HashSet::new(),
        }
    }

    /// The serialization class of this element's tag.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        ElementKind::of(&self.tag_name)
    }

    /// Returns true if this element can never have children.
    #[must_use]
    pub fn is_void(&self) -> bool {
        is_void_element(&self.tag_name)
    }

    /// Returns true if this element's body is opaque text.
    #[must_use]
    pub fn is_raw_text(&self) -> bool {
        is_raw_text_element(&self.tag_name)
    }

    /// Returns true if this element is always written with an end tag.
    #[must_use]
    pub fn requires_end_tag(&self) -> bool {
        requires_end_tag(&self.tag_name)
    }
}

/// Arena-based document tree with O(1) node access.
///
/// All nodes live in one vector and refer to each other by [`NodeId`]. The
/// root element is always [`NodeId::ROOT`]; a document never exists without
/// it.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Create a document whose root is the given element.
    #[must_use]
    pub fn new(root: ElementData) -> Self {
        Self {
            nodes: vec![Node {
                node_type: NodeType::Element(root),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Get the root element ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get the root element's data.
    ///
    /// # Panics
    ///
    /// Panics if the root node is not an element, which [`Document::new`]
    /// makes impossible.
    #[must_use]
    pub fn root_element(&self) -> &ElementData {
        self.as_element(NodeId::ROOT)
            .expect("document root is always an element")
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get the number of nodes in the tree, the root included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a document holds at least its root element.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Appends `child` as the last child of `parent`.
    ///
    /// Element Table rules are not checked here; callers that build
    /// documents from user input (the builder) check them first.
    ///
    /// # Panics
    ///
    /// Panics if either ID does not belong to this document.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[][..], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over `id` and all its descendants in document order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        DescendantIterator {
            tree: self,
            stack: vec![id],
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Get comment data if this node is a comment.
    #[must_use]
    pub fn as_comment(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Comment(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Concatenated text of `id` and all of its descendants.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|node| self.as_text(node))
            .collect()
    }

    /// First element named `tag` at or below `from`, depth first.
    #[must_use]
    pub fn find_element(&self, from: NodeId, tag: &str) -> Option<NodeId> {
        self.descendants(from)
            .find(|&id| self.as_element(id).is_some_and(|e| e.tag_name == tag))
    }

    /// Compare the subtree at `id` with the subtree at `other_id` in `other`.
    ///
    /// Node types, tag names, attributes (including their order), character
    /// data and child order must all match. Arena positions are ignored.
    #[must_use]
    pub fn subtree_eq(&self, id: NodeId, other: &Self, other_id: NodeId) -> bool {
        let (Some(a), Some(b)) = (self.get(id), other.get(other_id)) else {
            return false;
        };
        let same_payload = match (&a.node_type, &b.node_type) {
            (NodeType::Element(x), NodeType::Element(y)) => {
                x.tag_name == y.tag_name && x.attrs.iter().eq(y.attrs.iter())
            }
            (x, y) => x == y,
        };
        same_payload
            && a.children.len() == b.children.len()
            && a
                .children
                .iter()
                .zip(&b.children)
                .all(|(&x, &y)| self.subtree_eq(x, other, y))
    }
}

/// Structural equality: see [`Document::subtree_eq`].
impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.subtree_eq(NodeId::ROOT, other, NodeId::ROOT)
    }
}

impl Eq for Document {}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a Document,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over a subtree.
pub struct DescendantIterator<'a> {
    tree: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
