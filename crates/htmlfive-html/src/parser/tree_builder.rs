use core::fmt::Write;

use htmlfive_common::warning::warn_once;
use htmlfive_dom::{Document, ElementData, NodeId, NodeType, is_raw_text_element};

use crate::error::ParseError;
use crate::tokenizer::named_character_references::unescape;
use crate::tokenizer::{HTMLTokenizer, Token};

/// Builds a [`Document`] from a stream of tokens.
///
/// The builder keeps a cursor on the current element. A start tag appends a
/// child under it and descends, an end tag ascends to the parent. End tag
/// names are not checked; the tokenizer has already resolved them against
/// its own stack.
#[derive(Debug, Default)]
pub struct HTMLParser {
    document: Option<Document>,
    /// The element new nodes are appended to. `None` before the root opens
    /// and after it closes.
    current: Option<NodeId>,
    root_closed: bool,
}

impl HTMLParser {
    /// Create a parser with no document yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed every token from `tokens` and return the finished document.
    ///
    /// # Errors
    ///
    /// Returns the first tokenizer error in the stream or the first
    /// [`ParseError`] raised by [`HTMLParser::process_token`].
    pub fn run<I>(mut self, tokens: I) -> Result<Document, ParseError>
    where
        I: IntoIterator<Item = Result<Token, ParseError>>,
    {
        for token in tokens {
            let token = token?;
            if token.is_eof() {
                break;
            }
            self.process_token(token)?;
        }
        self.finish()
    }

    /// Apply one token to the tree under construction.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::ContentAfterRoot`] for a start tag, end tag or
    /// non-whitespace text that arrives once the root element has closed.
    pub fn process_token(&mut self, token: Token) -> Result<(), ParseError> {
        match token {
            Token::StartTag {
                name, attributes, ..
            } => {
                let element = ElementData::with_attrs(name, attributes);
                let Some(doc) = self.document.as_mut() else {
                    self.document = Some(Document::new(element));
                    self.current = Some(NodeId::ROOT);
                    return Ok(());
                };
                let Some(parent) = self.current else {
                    return Err(ParseError::ContentAfterRoot {
                        token: Token::start_tag(element.tag_name, element.attrs).to_string(),
                    });
                };
                let id = doc.alloc(NodeType::Element(element));
                doc.append_child(parent, id);
                self.current = Some(id);
            }

            Token::EndTag { name } => {
                let (Some(doc), Some(current)) = (&self.document, self.current) else {
                    return Err(ParseError::ContentAfterRoot {
                        token: Token::end_tag(name).to_string(),
                    });
                };
                self.current = doc.parent(current);
                if self.current.is_none() {
                    self.root_closed = true;
                }
            }

            Token::Text { data } => {
                if is_whitespace_only(&data) {
                    return Ok(());
                }
                let (Some(doc), Some(parent)) = (&mut self.document, self.current) else {
                    return Err(ParseError::ContentAfterRoot {
                        token: Token::Text { data }.to_string(),
                    });
                };
                // Raw-text bodies are opaque, so they are stored as written.
                let raw = doc
                    .as_element(parent)
                    .is_some_and(|e| is_raw_text_element(&e.tag_name));
                let text = if raw {
                    data
                } else {
                    unescape(&data).into_owned()
                };
                let id = doc.alloc(NodeType::Text(text));
                doc.append_child(parent, id);
            }

            Token::Comment { data } => {
                if let (Some(doc), Some(parent)) = (&mut self.document, self.current) {
                    let id = doc.alloc(NodeType::Comment(data));
                    doc.append_child(parent, id);
                } else {
                    let place = if self.root_closed { "after" } else { "before" };
                    warn_once(
                        "HTML Parser",
                        &format!("dropping comment {place} the root element: <!--{data}-->"),
                    );
                }
            }

            Token::EndOfInput => {}
        }
        Ok(())
    }

    /// Return the document built so far. Elements still open are simply
    /// left as they are.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::NoRootElement`] if no start tag was processed.
    pub fn finish(self) -> Result<Document, ParseError> {
        self.document.ok_or(ParseError::NoRootElement)
    }
}

fn is_whitespace_only(data: &str) -> bool {
    data.chars().all(|c| matches!(c, ' ' | '\t' | '\n'))
}

/// Tokenize and tree-build `html` in one go.
///
/// # Errors
///
/// Returns the first [`ParseError`] from either stage. No partial document
/// is returned.
///
/// # Example
///
/// ```
/// use htmlfive_html::parse_document;
///
/// let doc = parse_document("<!DOCTYPE html><html><body>Hi</body></html>").unwrap();
/// assert_eq!(doc.text_content(doc.root()), "Hi");
/// ```
pub fn parse_document(html: &str) -> Result<Document, ParseError> {
    HTMLParser::new().run(HTMLTokenizer::new(html))
}

/// Render the subtree at `id` as an indented debug outline, one node per
/// line, two spaces per level.
#[must_use]
pub fn print_tree(doc: &Document, id: NodeId, indent: usize) -> String {
    let mut out = String::new();
    write_tree(&mut out, doc, id, indent);
    out
}

fn write_tree(out: &mut String, doc: &Document, id: NodeId, indent: usize) {
    let prefix = "  ".repeat(indent);
    let Some(node) = doc.get(id) else {
        return;
    };
    let _ = match &node.node_type {
        NodeType::Element(data) => {
            if data.attrs.is_empty() {
                writeln!(out, "{prefix}<{}>", data.tag_name)
            } else {
                let attrs: Vec<String> = data
                    .attrs
                    .iter()
                    .map(|(k, v)| match v {
                        Some(v) => format!("{k}=\"{v}\""),
                        None => k.clone(),
                    })
                    .collect();
                writeln!(out, "{prefix}<{} {}>", data.tag_name, attrs.join(" "))
            }
        }
        NodeType::Text(data) => {
            let display = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
            writeln!(out, "{prefix}\"{display}\"")
        }
        NodeType::Comment(data) => writeln!(out, "{prefix}<!-- {data} -->"),
    };
    for &child in doc.children(id) {
        write_tree(out, doc, child, indent + 1);
    }
}
