use core::fmt;

use htmlfive_dom::AttributesMap;

/// A lexical event produced by the [`HTMLTokenizer`](super::HTMLTokenizer).
///
/// Events arrive in input order and each one is produced exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `<name attr="value" ...>` or `<name .../>`.
    StartTag {
        /// Tag name, case as written.
        name: String,
        /// Set when the tag was written `<name/>`. The tokenizer follows it
        /// with a synthetic [`Token::EndTag`].
        self_closing: bool,
        /// Attributes in source order, values already unescaped.
        attributes: AttributesMap,
    },

    /// Closes the innermost open element. `name` is that element's tag, not
    /// necessarily what was written in the source.
    EndTag {
        /// Tag name of the element being closed.
        name: String,
    },

    /// A run of character data, not yet unescaped.
    Text {
        /// The raw run.
        data: String,
    },

    /// The content between `<!--` and `-->`, verbatim.
    Comment {
        /// The raw comment body.
        data: String,
    },

    /// Produced once when the input is exhausted.
    EndOfInput,
}

impl Token {
    /// Create a start tag token.
    #[must_use]
    pub fn start_tag(name: impl Into<String>, attributes: AttributesMap) -> Self {
        Self::StartTag {
            name: name.into(),
            self_closing: false,
            attributes,
        }
    }

    /// Create an end tag token.
    #[must_use]
    pub fn end_tag(name: impl Into<String>) -> Self {
        Self::EndTag { name: name.into() }
    }

    /// Create a text token.
    #[must_use]
    pub fn text(data: impl Into<String>) -> Self {
        Self::Text { data: data.into() }
    }

    /// Create a comment token.
    #[must_use]
    pub fn comment(data: impl Into<String>) -> Self {
        Self::Comment { data: data.into() }
    }

    /// Returns true if this is the end-of-input token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EndOfInput)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                write!(f, "<{name}")?;
                for (attr, value) in attributes {
                    match value {
                        Some(v) if v.contains('"') => write!(f, " {attr}='{v}'")?,
                        Some(v) => write!(f, " {attr}=\"{v}\"")?,
                        None => write!(f, " {attr}")?,
                    }
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name } => write!(f, "</{name}>"),
            Self::Text { data } => {
                // Show whitespace characters explicitly
                let shown = data.replace('\n', "\\n").replace('\t', "\\t");
                write!(f, "Text(\"{shown}\")")
            }
            Self::Comment { data } => write!(f, "<!--{data}-->"),
            Self::EndOfInput => write!(f, "EOF"),
        }
    }
}
