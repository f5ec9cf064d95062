use core::fmt::Write;

use htmlfive_dom::{Document, ElementData, ElementKind, NodeId, NodeType};
use serde::{Deserialize, Serialize};

use crate::tokenizer::named_character_references::escape_text;

/// Layout and colors for [`HTMLFormatter`].
///
/// Every field has a default, so a configuration file only needs the
/// fields it changes:
///
/// ```
/// use htmlfive_html::FormatterOptions;
///
/// let options: FormatterOptions = serde_json::from_str(r#"{"line_limit": 80}"#).unwrap();
/// assert_eq!(options.line_limit, 80);
/// assert_eq!(options.tag_style, "color:red;");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterOptions {
    /// Spaces per nesting level.
    pub indent_spaces: usize,
    /// Length after which attributes continue on the next line.
    pub line_limit: usize,
    /// Inline CSS for tag names.
    pub tag_style: String,
    /// Inline CSS for attribute names.
    pub attribute_name_style: String,
    /// Inline CSS for attribute values.
    pub attribute_value_style: String,
    /// Inline CSS for the `<pre>` around comments.
    pub comment_style: String,
}

impl Default for FormatterOptions {
    fn default() -> Self {
        Self {
            indent_spaces: 4,
            line_limit: 40,
            tag_style: "color:red;".to_string(),
            attribute_name_style: "color:blue;".to_string(),
            attribute_value_style: "color:purple;".to_string(),
            comment_style: "color:gray;".to_string(),
        }
    }
}

impl FormatterOptions {
    /// Set the spaces per nesting level.
    #[must_use]
    pub fn with_indent_spaces(mut self, indent_spaces: usize) -> Self {
        self.indent_spaces = indent_spaces;
        self
    }

    /// Set the line length that triggers attribute wrapping.
    #[must_use]
    pub fn with_line_limit(mut self, line_limit: usize) -> Self {
        self.line_limit = line_limit;
        self
    }

    /// Set the inline CSS for tag names.
    #[must_use]
    pub fn with_tag_style(mut self, style: impl Into<String>) -> Self {
        self.tag_style = style.into();
        self
    }

    /// Set the inline CSS for attribute names.
    #[must_use]
    pub fn with_attribute_name_style(mut self, style: impl Into<String>) -> Self {
        self.attribute_name_style = style.into();
        self
    }

    /// Set the inline CSS for attribute values.
    #[must_use]
    pub fn with_attribute_value_style(mut self, style: impl Into<String>) -> Self {
        self.attribute_value_style = style.into();
        self
    }

    /// Set the inline CSS for comments.
    #[must_use]
    pub fn with_comment_style(mut self, style: impl Into<String>) -> Self {
        self.comment_style = style.into();
        self
    }
}

/// Renders a [`Document`] as escaped, syntax-colored HTML for display
/// inside another page.
///
/// The markup itself is escaped (`&lt;`, `&gt;`) and tag names, attribute
/// names and attribute values are wrapped in `<span style="...">`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HTMLFormatter {
    options: FormatterOptions,
}

impl HTMLFormatter {
    /// Create a formatter with the given options.
    #[must_use]
    pub const fn new(options: FormatterOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    #[must_use]
    pub const fn options(&self) -> &FormatterOptions {
        &self.options
    }

    /// The escaped DOCTYPE followed by the whole tree.
    #[must_use]
    pub fn format(&self, doc: &Document) -> String {
        let mut out = String::from("&lt;!DOCTYPE html&gt;");
        self.write_node(&mut out, doc, doc.root(), 0);
        out
    }

    /// The subtree rooted at `id`, without the DOCTYPE and without a leading
    /// newline.
    #[must_use]
    pub fn format_element(&self, doc: &Document, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(&mut out, doc, id, 0);
        match out.strip_prefix('\n') {
            Some(stripped) => stripped.to_string(),
            None => out,
        }
    }

    // Every line written below starts with its own newline.
    fn write_node(&self, out: &mut String, doc: &Document, id: NodeId, indent: usize) {
        let Some(node) = doc.get(id) else {
            return;
        };
        match &node.node_type {
            NodeType::Element(data) => self.write_element(out, doc, id, data, indent),
            NodeType::Text(text) => self.write_text(out, text, indent),
            NodeType::Comment(data) => self.write_comment(out, data, indent),
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
        let tag = data.tag_name.to_lowercase();

        let mut line = self.indent_line(indent);
        let mut line_length = line.len();
        line.push_str("&lt;");
        self.push_tag_span(&mut line, &tag);
        line_length += tag.chars().count() + 1;

        for (name, value) in &data.attrs {
            if line_length > self.options.line_limit {
                out.push_str(&line);
                line = self.indent_line(indent + 1);
                line_length = line.len();
            }
            let _ = write!(
                line,
                " <span style=\"{}\">{}</span>",
                self.options.attribute_name_style,
                escape_text(name)
            );
            if let Some(value) = value {
                let quote = if value.contains('"') { '\'' } else { '"' };
                let _ = write!(
                    line,
                    "=<span style=\"{}\">{quote}{}{quote}</span>",
                    self.options.attribute_value_style,
                    escape_text(value)
                );
            }
            let value_length = value.as_ref().map_or(0, |v| v.chars().count());
            line_length += name.chars().count() + value_length + 4;
        }

        let kind = data.kind();
        let children = doc.children(id);
        if kind == ElementKind::Void {
            line.push_str("&gt;");
            out.push_str(&line);
        } else if children.is_empty() && !kind.needs_end_tag() {
            line.push_str("/&gt;");
            out.push_str(&line);
        } else {
            line.push_str("&gt;");
            out.push_str(&line);
            for &child in children {
                self.write_node(out, doc, child, indent + 1);
            }
            out.push_str(&self.indent_line(indent));
            out.push_str("&lt;/");
            self.push_tag_span(out, &tag);
            out.push_str("&gt;");
        }
    }

    fn write_text(&self, out: &mut String, text: &str, indent: usize) {
        for line in text.split('\n').map(str::trim).filter(|l| !l.is_empty()) {
            out.push_str(&self.indent_line(indent));
            out.push_str(&escape_text(line));
        }
    }

    fn write_comment(&self, out: &mut String, data: &str, indent: usize) {
        let _ = write!(
            out,
            "{}<pre style=\"{}\">",
            self.indent_line(indent),
            self.options.comment_style
        );
        out.push_str(&self.indent_line(indent));
        out.push_str("&lt;!--");
        for line in data.split('\n').map(str::trim).filter(|l| !l.is_empty()) {
            out.push_str(&self.indent_line(indent + 1));
            out.push_str(&escape_text(line));
        }
        out.push_str(&self.indent_line(indent));
        out.push_str("--&gt;</pre>");
    }

    fn push_tag_span(&self, out: &mut String, tag: &str) {
        let _ = write!(out, "<span style=\"{}\">{tag}</span>", self.options.tag_style);
    }

    fn indent_line(&self, indent: usize) -> String {
        format!("\n{}", " ".repeat(indent * self.options.indent_spaces))
    }
}
