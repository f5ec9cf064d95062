//! Error types for parsing and building documents.

use htmlfive_dom::NodeId;
use thiserror::Error;

use crate::tokenizer::TokenizerState;

/// Why an input could not be turned into a [`Document`](htmlfive_dom::Document).
///
/// Malformed markup has no defined recovery; every variant aborts the parse
/// and no partial tree is returned. Positions are byte offsets into the
/// trimmed input, after any DOCTYPE declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input ended inside a tag, comment or raw-text body.
    #[error("unexpected end of input in {state} state (started at byte {position})")]
    UnexpectedEndOfInput {
        /// What the tokenizer was scanning when input ran out.
        state: TokenizerState,
        /// Where the unterminated construct began.
        position: usize,
    },

    /// An end tag arrived with no open element left to close.
    #[error("end tag at byte {position} has no open element to close")]
    UnbalancedEndTag {
        /// Where the end tag began.
        position: usize,
    },

    /// Markup or text appeared after the root element was closed.
    #[error("content after the root element: {token}")]
    ContentAfterRoot {
        /// The offending token, as markup.
        token: String,
    },

    /// The input contained no start tag at all.
    #[error("input contains no root element")]
    NoRootElement,
}

/// Misuse of the [`HTMLBuilder`](crate::builder::HTMLBuilder) API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// Void elements can never have children.
    #[error("cannot add a child to void element <{tag}>")]
    VoidElementChild {
        /// Tag of the void element.
        tag: String,
    },

    /// Children can only be added to elements.
    #[error("node {id:?} is not an element")]
    NotAnElement {
        /// The node that was addressed.
        id: NodeId,
    },
}
