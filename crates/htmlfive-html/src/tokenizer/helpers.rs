//! Helper functions for the HTML tokenizer.
//!
//! This module contains the scanning pieces the main loop is built from:
//! - DOCTYPE detection
//! - Finding the end of a tag while respecting quoted attribute values
//! - Attribute list parsing

use htmlfive_dom::AttributesMap;

use super::lexer::HTMLTokenizer;
use super::named_character_references::unescape;

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl<'a> HTMLTokenizer<'a> {
    /// Drop a leading `<!DOCTYPE ...>` declaration (matched ASCII
    /// case-insensitively) and the whitespace after it.
    ///
    /// An unterminated declaration is left in place; the tag scanner reports
    /// it as unterminated input.
    pub(super) fn skip_doctype(input: &'a str) -> &'a str {
        const DOCTYPE: &str = "<!doctype";
        let is_doctype = input
            .get(..DOCTYPE.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(DOCTYPE));
        if !is_doctype {
            return input;
        }
        match input.find('>') {
            Some(end) => input[end + 1..].trim_start(),
            None => input,
        }
    }

    /// Whitespace that separates a tag name from its attributes and
    /// attributes from each other.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\r' | '\x0C')
    }

    /// Byte index of the `>` that closes the tag starting at `tag[0]`.
    ///
    /// A `>` inside a quoted attribute value does not count. A quote only
    /// opens a value when it directly follows `=` (ignoring whitespace), so a
    /// stray apostrophe elsewhere in the tag is ordinary text.
    pub(super) fn find_tag_end(tag: &str) -> Option<usize> {
        let mut quote: Option<char> = None;
        let mut after_equals = false;
        for (i, c) in tag.char_indices().skip(1) {
            if let Some(q) = quote {
                if c == q {
                    quote = None;
                }
                continue;
            }
            match c {
                '>' => return Some(i),
                '"' | '\'' if after_equals => quote = Some(c),
                _ => {}
            }
            if !Self::is_whitespace_char(c) {
                after_equals = c == '=';
            }
        }
        None
    }
}

// =============================================================================
// Attribute Helpers
// =============================================================================

impl HTMLTokenizer<'_> {
    /// Parse the attribute part of a start tag (everything after the name,
    /// without the closing `>` or `/>`).
    ///
    /// - `name="value"` and `name='value'` store the unescaped value
    /// - `name=value` stores the value up to the next whitespace
    /// - a bare `name` is a boolean attribute
    ///
    /// A repeated name keeps its first position and takes the last value.
    #[must_use]
    pub fn parse_attributes(attrs: &str) -> AttributesMap {
        let mut map = AttributesMap::new();
        let mut rest = attrs;
        loop {
            rest = rest.trim_start_matches(Self::is_whitespace_char);
            if rest.is_empty() {
                break;
            }

            let name_end = rest
                .find(|c: char| Self::is_whitespace_char(c) || c == '=')
                .unwrap_or(rest.len());
            let name = &rest[..name_end];
            rest = &rest[name_end..];

            let value = match rest
                .trim_start_matches(Self::is_whitespace_char)
                .strip_prefix('=')
            {
                Some(after_equals) => {
                    let after_equals = after_equals.trim_start_matches(Self::is_whitespace_char);
                    let (value, remaining) = Self::split_attribute_value(after_equals);
                    rest = remaining;
                    Some(unescape(value).into_owned())
                }
                None => None,
            };

            if !name.is_empty() {
                let _ = map.insert(name.to_string(), value);
            }
        }
        map
    }

    /// Split `"value" rest`, `'value' rest` or `value rest` into the value
    /// and what follows it.
    fn split_attribute_value(input: &str) -> (&str, &str) {
        match input.chars().next() {
            Some(q @ ('"' | '\'')) => {
                let body = &input[1..];
                body.find(q)
                    .map_or((body, ""), |close| (&body[..close], &body[close + 1..]))
            }
            _ => {
                let end = input
                    .find(Self::is_whitespace_char)
                    .unwrap_or(input.len());
                input.split_at(end)
            }
        }
    }
}
