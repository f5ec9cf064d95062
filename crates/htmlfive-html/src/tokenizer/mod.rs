//! HTML tokenizer module.
//!
//! Turns document text into a stream of [`Token`]s: start tags, end tags,
//! text runs and comments, finishing with [`Token::EndOfInput`].

/// Helper methods for scanning tags and attributes.
pub mod helpers;
/// The tokenizer state machine.
pub mod lexer;
/// Named and numeric character references.
pub mod named_character_references;
/// Token types produced by the tokenizer.
pub mod token;

pub use lexer::{HTML5_DOCTYPE, HTMLTokenizer, TokenizerState};
pub use token::Token;
