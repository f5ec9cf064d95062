//! HTML parser module for tree construction.

/// Token stream to document tree.
pub mod tree_builder;

pub use tree_builder::{HTMLParser, parse_document, print_tree};
