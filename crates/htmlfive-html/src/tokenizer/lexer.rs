use htmlfive_common::warning::warn_once;
use htmlfive_dom::{is_raw_text_element, is_void_element};
use strum_macros::Display;

use super::token::Token;
use crate::error::ParseError;

/// The declaration written in front of every exported document.
pub const HTML5_DOCTYPE: &str = "<!DOCTYPE html>";

/// What the tokenizer is scanning. Reported in [`ParseError`] when the input
/// ends early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// Between tags, accumulating a text run.
    Data,
    /// Inside `<...>`, looking for the unquoted `>`.
    TagOpen,
    /// Inside `<!--`, looking for `-->`.
    Comment,
    /// Inside a raw-text element, looking for its literal end tag.
    RawText,
}

/// Single-pass tokenizer over a complete HTML document.
///
/// The tokenizer is an iterator of [`Token`]s. It keeps a stack of open tag
/// names so that end tags can be resolved and raw-text bodies (`<script>`,
/// `<style>`) are passed through as one text run. A tokenizer is bound to one
/// input and is exhausted after [`Token::EndOfInput`] or the first error.
pub struct HTMLTokenizer<'a> {
    pub(super) input: &'a str,
    pub(super) current_pos: usize,
    pub(super) state: TokenizerState,
    /// Names of the currently open elements, innermost last.
    pub(super) tag_stack: Vec<String>,
    /// The synthetic end tag owed after a void or self-closing start tag.
    pub(super) pending_end_tag: Option<Token>,
    pub(super) finished: bool,
}

impl<'a> HTMLTokenizer<'a> {
    /// Create a new tokenizer for the given input.
    ///
    /// Surrounding whitespace is ignored and a leading `<!DOCTYPE ...>`
    /// declaration is skipped.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            input: Self::skip_doctype(input.trim()),
            current_pos: 0,
            state: TokenizerState::Data,
            tag_stack: Vec::new(),
            pending_end_tag: None,
            finished: false,
        }
    }

    /// Consume the tokenizer and return the whole token stream, ending with
    /// [`Token::EndOfInput`].
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] the input runs into.
    pub fn into_tokens(self) -> Result<Vec<Token>, ParseError> {
        self.collect()
    }

    /// The innermost open tag, if any.
    #[must_use]
    pub fn current_tag(&self) -> Option<&str> {
        self.tag_stack.last().map(String::as_str)
    }

    /// Names of the currently open elements, outermost first.
    #[must_use]
    pub fn open_tags(&self) -> &[String] {
        &self.tag_stack
    }

    /// Byte offset of the cursor into the input (after the DOCTYPE).
    #[must_use]
    pub const fn position(&self) -> usize {
        self.current_pos
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        let input = self.input;
        let rest = &input[self.current_pos..];
        if rest.is_empty() {
            self.state = TokenizerState::Data;
            return Ok(Token::EndOfInput);
        }

        let in_raw_text = self.current_tag().is_some_and(|tag| {
            is_raw_text_element(tag) && !rest.starts_with(&format!("</{tag}"))
        });
        if in_raw_text {
            return self.consume_raw_text();
        }

        if rest.starts_with("<!--") {
            self.consume_comment()
        } else if rest.starts_with('<') {
            self.consume_tag()
        } else {
            Ok(self.consume_text())
        }
    }

    /// `<!-- ... -->`: everything up to the first `-->`, verbatim.
    fn consume_comment(&mut self) -> Result<Token, ParseError> {
        self.state = TokenizerState::Comment;
        let input = self.input;
        let start = self.current_pos;
        let body = &input[start + "<!--".len()..];
        let Some(end) = body.find("-->") else {
            return Err(self.unexpected_end(start));
        };
        let data = body[..end].to_string();
        self.current_pos = start + "<!--".len() + end + "-->".len();
        self.state = TokenizerState::Data;
        Ok(Token::comment(data))
    }

    /// `<name ...>`, `<name .../>` or `</name>`.
    fn consume_tag(&mut self) -> Result<Token, ParseError> {
        self.state = TokenizerState::TagOpen;
        let input = self.input;
        let start = self.current_pos;
        let rest = &input[start..];
        let Some(end) = Self::find_tag_end(rest) else {
            return Err(self.unexpected_end(start));
        };
        let raw = &rest[..=end];
        self.current_pos = start + end + 1;
        self.state = TokenizerState::Data;

        if let Some(written) = raw.strip_prefix("</") {
            return self.close_current_tag(written.trim_end_matches('>').trim(), start);
        }

        let mut inner = &raw[1..raw.len() - 1];
        let self_closing = inner.ends_with('/');
        if self_closing {
            inner = &inner[..inner.len() - 1];
        }
        let name_end = inner
            .find(Self::is_whitespace_char)
            .unwrap_or(inner.len());
        let name = &inner[..name_end];
        let attributes = Self::parse_attributes(&inner[name_end..]);

        if self_closing || is_void_element(name) {
            // Void elements never get a stack entry.
            self.pending_end_tag = Some(Token::end_tag(name));
        } else {
            self.tag_stack.push(name.to_string());
        }

        Ok(Token::StartTag {
            name: name.to_string(),
            self_closing,
            attributes,
        })
    }

    /// An end tag always closes the innermost open element, whatever name
    /// was written.
    fn close_current_tag(&mut self, written: &str, start: usize) -> Result<Token, ParseError> {
        let Some(name) = self.tag_stack.pop() else {
            return Err(ParseError::UnbalancedEndTag { position: start });
        };
        if written != name {
            warn_once(
                "HTML Tokenizer",
                &format!("end tag </{written}> at byte {start} closes <{name}>"),
            );
        }
        Ok(Token::end_tag(name))
    }

    /// Character data up to the next `<` or the end of input.
    fn consume_text(&mut self) -> Token {
        let input = self.input;
        let rest = &input[self.current_pos..];
        let end = rest.find('<').unwrap_or(rest.len());
        self.current_pos += end;
        Token::text(&rest[..end])
    }

    /// The body of a raw-text element, up to its literal end tag.
    fn consume_raw_text(&mut self) -> Result<Token, ParseError> {
        self.state = TokenizerState::RawText;
        let input = self.input;
        let start = self.current_pos;
        let rest = &input[start..];
        let closing = format!("</{}", self.current_tag().unwrap_or_default());
        let Some(end) = rest.find(&closing) else {
            return Err(self.unexpected_end(start));
        };
        self.current_pos += end;
        self.state = TokenizerState::Data;
        Ok(Token::text(&rest[..end]))
    }

    const fn unexpected_end(&self, position: usize) -> ParseError {
        ParseError::UnexpectedEndOfInput {
            state: self.state,
            position,
        }
    }
}

impl Iterator for HTMLTokenizer<'_> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pending_end_tag.take() {
            return Some(Ok(token));
        }
        if self.finished {
            return None;
        }
        let result = self.next_token();
        if matches!(result, Ok(Token::EndOfInput) | Err(_)) {
            self.finished = true;
        }
        Some(result)
    }
}
