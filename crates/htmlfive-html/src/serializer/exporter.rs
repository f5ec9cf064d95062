use htmlfive_common::warning::warn_once;
use htmlfive_dom::{Document, ElementData, ElementKind, NodeId, NodeType};

use crate::tokenizer::HTML5_DOCTYPE;
use crate::tokenizer::named_character_references::escape_text;

/// Serializes a [`Document`] back to indented HTML text.
///
/// Every element and text run goes on its own line, children one indent
/// level deeper than their parent. Output parsed again with
/// [`parse_document`](crate::parse_document) yields the same tree, ignoring
/// whitespace-only text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HTMLExporter {
    indent_width: usize,
}

impl Default for HTMLExporter {
    fn default() -> Self {
        Self { indent_width: 4 }
    }
}

impl HTMLExporter {
    /// Create an exporter with the default indent of 4 spaces.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `indent_width` spaces per nesting level.
    #[must_use]
    pub const fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }

    /// Spaces per nesting level.
    #[must_use]
    pub const fn indent_width(&self) -> usize {
        self.indent_width
    }

    /// The DOCTYPE line followed by the whole tree.
    #[must_use]
    pub fn export(&self, doc: &Document) -> String {
        let mut out = format!("{HTML5_DOCTYPE}\n");
        self.write_node(&mut out, doc, doc.root(), 0, false);
        truncate_newline(out)
    }

    /// The subtree rooted at `id`, without a DOCTYPE line.
    #[must_use]
    pub fn export_element(&self, doc: &Document, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(&mut out, doc, id, 0, false);
        truncate_newline(out)
    }

    fn write_node(&self, out: &mut String, doc: &Document, id: NodeId, indent: usize, raw: bool) {
        let Some(node) = doc.get(id) else {
            return;
        };
        match &node.node_type {
            NodeType::Element(data) => self.write_element(out, doc, id, data, indent),
            NodeType::Text(text) => write_text(out, text, indent, raw),
            NodeType::Comment(data) => {
                push_indent(out, indent);
                out.push_str("<!--");
                out.push_str(data);
                out.push_str("-->\n");
            }
        }
    }

    fn write_element(
        &self,
        out: &mut String,
        doc: &Document,
        id: NodeId,
        data: &ElementData,
        indent: usize,
    ) {
        push_indent(out, indent);
        out.push('<');
        out.push_str(&data.tag_name);
        for (name, value) in &data.attrs {
            write_attribute(out, name, value.as_deref());
        }

        let kind = data.kind();
        let children = doc.children(id);
        if data.attrs.is_empty() && children.is_empty() && !kind.needs_end_tag() {
            out.push_str(if kind == ElementKind::Void { ">" } else { "/>" });
        } else {
            out.push('>');
            if !children.is_empty() {
                out.push('\n');
                let raw_text = kind == ElementKind::RawText;
                for &child in children {
                    self.write_node(out, doc, child, indent + self.indent_width, raw_text);
                }
                push_indent(out, indent);
                push_end_tag(out, &data.tag_name);
            } else if kind != ElementKind::Void {
                push_end_tag(out, &data.tag_name);
            }
        }
        out.push('\n');
    }
}

fn write_attribute(out: &mut String, name: &str, value: Option<&str>) {
    out.push(' ');
    out.push_str(name);
    let Some(value) = value else {
        return;
    };
    let quote = if value.contains('"') {
        if value.contains('\'') {
            warn_once(
                "HTML Exporter",
                &format!("attribute {name} contains both quote characters and will not parse back"),
            );
        }
        '\''
    } else {
        '"'
    };
    out.push('=');
    out.push(quote);
    out.push_str(value);
    out.push(quote);
}

/// Text goes on its own line with surrounding spaces and newlines removed.
/// Inside `<script>` and `<style>` it is written as is.
fn write_text(out: &mut String, text: &str, indent: usize, raw: bool) {
    let text = text.trim_matches([' ', '\n']);
    if text.chars().all(|c| matches!(c, ' ' | '\t' | '\n')) {
        return;
    }
    push_indent(out, indent);
    if raw {
        out.push_str(text);
    } else {
        out.push_str(&escape_text(text));
    }
    out.push('\n');
}

fn push_indent(out: &mut String, indent: usize) {
    out.extend(core::iter::repeat_n(' ', indent));
}

fn push_end_tag(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn truncate_newline(mut out: String) -> String {
    if out.ends_with('\n') {
        let _ = out.pop();
    }
    out
}
