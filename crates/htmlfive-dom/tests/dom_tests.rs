//! Tests for the document arena and the element table.

use htmlfive_dom::{AttributesMap, Document, ElementData, ElementKind, NodeId, NodeType};
use strum::IntoEnumIterator;

/// Helper to create an element node and return its NodeId.
fn alloc_element(doc: &mut Document, tag: &str) -> NodeId {
    doc.alloc(NodeType::Element(ElementData::new(tag)))
}

fn sample() -> Document {
    let mut doc = Document::new(ElementData::new("html"));
    let body = alloc_element(&mut doc, "body");
    doc.append_child(NodeId::ROOT, body);
    let p = alloc_element(&mut doc, "p");
    doc.append_child(body, p);
    let text = doc.alloc(NodeType::Text("Hello".to_string()));
    doc.append_child(p, text);
    let comment = doc.alloc(NodeType::Comment("note".to_string()));
    doc.append_child(body, comment);
    doc
}

// ========== arena ==========

#[test]
fn test_new_document_has_root() {
    let doc = Document::new(ElementData::new("html"));
    assert_eq!(doc.len(), 1);
    assert!(!doc.is_empty());
    assert_eq!(doc.root(), NodeId::ROOT);
    assert_eq!(doc.root_element().tag_name, "html");
    assert_eq!(doc.parent(NodeId::ROOT), None);
}

#[test]
fn test_append_child_links_parent() {
    let doc = sample();
    let body = doc.first_child(NodeId::ROOT).unwrap();
    assert_eq!(doc.parent(body), Some(NodeId::ROOT));
    assert_eq!(doc.children(body).len(), 2);
    assert_eq!(doc.as_comment(doc.last_child(body).unwrap()), Some("note"));
}

#[test]
fn test_ancestors() {
    let doc = sample();
    let p = doc.find_element(NodeId::ROOT, "p").unwrap();
    let text = doc.first_child(p).unwrap();
    let chain: Vec<_> = doc
        .ancestors(text)
        .map(|id| doc.as_element(id).unwrap().tag_name.clone())
        .collect();
    assert_eq!(chain, vec!["p", "body", "html"]);
}

#[test]
fn test_descendants_in_document_order() {
    let doc = sample();
    let kinds: Vec<_> = doc
        .descendants(NodeId::ROOT)
        .map(|id| match &doc.get(id).unwrap().node_type {
            NodeType::Element(e) => e.tag_name.clone(),
            NodeType::Text(t) => format!("#text {t}"),
            NodeType::Comment(c) => format!("#comment {c}"),
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["html", "body", "p", "#text Hello", "#comment note"]
    );
}

#[test]
fn test_text_content_and_find() {
    let doc = sample();
    assert_eq!(doc.text_content(NodeId::ROOT), "Hello");
    assert!(doc.find_element(NodeId::ROOT, "body").is_some());
    assert!(doc.find_element(NodeId::ROOT, "table").is_none());
    assert!(doc.as_text(NodeId::ROOT).is_none());
}

// ========== attributes ==========

#[test]
fn test_attribute_order_and_overwrite() {
    let mut attrs = AttributesMap::new();
    let _ = attrs.insert("b".to_string(), Some("1".to_string()));
    let _ = attrs.insert("a".to_string(), None);
    let _ = attrs.insert("b".to_string(), Some("2".to_string()));
    let element = ElementData::with_attrs("div", attrs);

    let names: Vec<_> = element.attrs.keys().cloned().collect();
    assert_eq!(names, vec!["b", "a"]);
    assert_eq!(element.attr("b"), Some(Some("2")));
    assert_eq!(element.attr("a"), Some(None));
    assert_eq!(element.attr("c"), None);
}

#[test]
fn test_id_and_classes() {
    let mut attrs = AttributesMap::new();
    let _ = attrs.insert("id".to_string(), Some("main".to_string()));
    let _ = attrs.insert("class".to_string(), Some("a  b".to_string()));
    let element = ElementData::with_attrs("div", attrs);
    assert_eq!(element.id(), Some("main"));
    let classes = element.classes();
    assert_eq!(classes.len(), 2);
    assert!(classes.contains("a") && classes.contains("b"));
}

// ========== structural equality ==========

#[test]
fn test_structural_equality_ignores_arena_order() {
    let first = sample();

    // Same tree, but the comment is allocated before the paragraph.
    let mut second = Document::new(ElementData::new("html"));
    let comment = second.alloc(NodeType::Comment("note".to_string()));
    let body = alloc_element(&mut second, "body");
    second.append_child(NodeId::ROOT, body);
    let p = alloc_element(&mut second, "p");
    second.append_child(body, p);
    second.append_child(body, comment);
    let text = second.alloc(NodeType::Text("Hello".to_string()));
    second.append_child(p, text);

    assert_eq!(first, second);
}

#[test]
fn test_structural_equality_checks_attribute_order() {
    let mut ab = AttributesMap::new();
    let _ = ab.insert("a".to_string(), None);
    let _ = ab.insert("b".to_string(), None);
    let mut ba = AttributesMap::new();
    let _ = ba.insert("b".to_string(), None);
    let _ = ba.insert("a".to_string(), None);

    let first = Document::new(ElementData::with_attrs("html", ab));
    let second = Document::new(ElementData::with_attrs("html", ba));
    assert_ne!(first, second);
}

// ========== element table ==========

#[test]
fn test_element_kinds() {
    assert_eq!(ElementKind::of("br"), ElementKind::Void);
    assert_eq!(ElementKind::of("input"), ElementKind::Void);
    assert_eq!(ElementKind::of("style"), ElementKind::RawText);
    assert_eq!(ElementKind::of("script"), ElementKind::RawText);
    assert_eq!(ElementKind::of("div"), ElementKind::RequiresEndTag);
    assert_eq!(ElementKind::of("title"), ElementKind::RequiresEndTag);
    assert_eq!(ElementKind::of("h1"), ElementKind::Normal);
    // Case-sensitive
    assert_eq!(ElementKind::of("BR"), ElementKind::Normal);
}

#[test]
fn test_element_kind_end_tags() {
    let needing: Vec<_> = ElementKind::iter()
        .filter(|kind| kind.needs_end_tag())
        .map(|kind| kind.to_string())
        .collect();
    assert_eq!(needing, vec!["RawText", "RequiresEndTag"]);
}

#[test]
fn test_element_predicates() {
    assert!(ElementData::new("img").is_void());
    assert!(ElementData::new("style").is_raw_text());
    assert!(ElementData::new("div").requires_end_tag());
    assert!(!ElementData::new("section").requires_end_tag());
}
