//! Restricted HTML5 tokenizer, tree builder and serializers.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer**: start tags, end tags, text runs and comments, with void
//!   elements closed immediately and `<script>`/`<style>` bodies passed
//!   through as opaque text
//! - **Tree builder**: token stream to [`Document`]
//! - **Exporter**: [`Document`] back to indented HTML; parse then export is
//!   stable for valid input
//! - **Formatter**: escaped, syntax-colored HTML for display
//! - **Builder**: programmatic construction of `<html>` documents
//!
//! # Not Implemented
//!
//! - Error recovery and implied tags (`<p>` closing, `<tbody>` insertion)
//! - Validation of tag or attribute names
//! - DOM mutation beyond appending children
//!
//! ```
//! use htmlfive_html::{HTMLExporter, parse_document};
//!
//! let exporter = HTMLExporter::new();
//! let doc = parse_document("<html><body><p>Hi &amp; bye</p></body></html>").unwrap();
//! let html = exporter.export(&doc);
//! assert_eq!(exporter.export(&parse_document(&html).unwrap()), html);
//! ```

/// Programmatic document construction.
pub mod builder;
/// Parse and build errors.
pub mod error;
/// Token stream to document tree.
pub mod parser;
/// Plain and syntax-colored output.
pub mod serializer;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use builder::{Fragment, HTMLBuilder, StyleMap};
pub use error::{BuildError, ParseError};
pub use htmlfive_dom::{AttributesMap, Document, ElementData, NodeId, NodeType};
pub use parser::{HTMLParser, parse_document, print_tree};
pub use serializer::{FormatterOptions, HTMLExporter, HTMLFormatter};
pub use tokenizer::{HTMLTokenizer, Token, TokenizerState};
