//! Character references.
//!
//! Attribute values and text runs are unescaped when a document is parsed,
//! and text is escaped again when it is exported. Only a table of the most
//! common named references is carried, plus decimal (`&#60;`) and
//! hexadecimal (`&#x3C;`) numeric references.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use htmlfive_common::warning::warn_once;

/// Longest name we try to match after an `&`.
const MAX_ENTITY_NAME_LEN: usize = 32;

/// The named character reference table.
/// Maps entity names (without the leading '&') to their replacement strings.
///
/// NOTE: The legacy entities also match without the trailing semicolon
/// (e.g., "&amp" matches like "&amp;").
static NAMED_ENTITIES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        // Most common entities (required for basic HTML)
        ("amp;", "&"),
        ("amp", "&"), // Legacy (no semicolon)
        ("lt;", "<"),
        ("lt", "<"), // Legacy
        ("gt;", ">"),
        ("gt", ">"), // Legacy
        ("quot;", "\""),
        ("quot", "\""), // Legacy
        ("apos;", "'"),
        ("nbsp;", "\u{00A0}"),
        // Common punctuation and symbols
        ("copy;", "\u{00A9}"),   // ©
        ("reg;", "\u{00AE}"),    // ®
        ("trade;", "\u{2122}"),  // ™
        ("mdash;", "\u{2014}"),  // —
        ("ndash;", "\u{2013}"),  // –
        ("hellip;", "\u{2026}"), // …
        ("bull;", "\u{2022}"),   // •
        ("middot;", "\u{00B7}"), // ·
        ("lsquo;", "\u{2018}"),  // '
        ("rsquo;", "\u{2019}"),  // '
        ("ldquo;", "\u{201C}"),  // "
        ("rdquo;", "\u{201D}"),  // "
        ("laquo;", "\u{00AB}"),  // «
        ("raquo;", "\u{00BB}"),  // »
        // Currency
        ("cent;", "\u{00A2}"),  // ¢
        ("pound;", "\u{00A3}"), // £
        ("euro;", "\u{20AC}"),  // €
        ("yen;", "\u{00A5}"),   // ¥
        // Math symbols
        ("times;", "\u{00D7}"),  // ×
        ("divide;", "\u{00F7}"), // ÷
        ("plusmn;", "\u{00B1}"), // ±
        ("ne;", "\u{2260}"),     // ≠
        ("le;", "\u{2264}"),     // ≤
        ("ge;", "\u{2265}"),     // ≥
        ("deg;", "\u{00B0}"),    // °
        ("frac12;", "\u{00BD}"), // ½
        ("frac14;", "\u{00BC}"), // ¼
        ("frac34;", "\u{00BE}"), // ¾
        // Arrows
        ("larr;", "\u{2190}"), // ←
        ("rarr;", "\u{2192}"), // →
        ("uarr;", "\u{2191}"), // ↑
        ("darr;", "\u{2193}"), // ↓
        // Greek letters (commonly used)
        ("alpha;", "\u{03B1}"),
        ("beta;", "\u{03B2}"),
        ("gamma;", "\u{03B3}"),
        ("delta;", "\u{03B4}"),
        ("pi;", "\u{03C0}"),
        ("sigma;", "\u{03C3}"),
        ("omega;", "\u{03C9}"),
        // Accented characters (common)
        ("Agrave;", "\u{00C0}"),
        ("Aacute;", "\u{00C1}"),
        ("Acirc;", "\u{00C2}"),
        ("Atilde;", "\u{00C3}"),
        ("Auml;", "\u{00C4}"),
        ("agrave;", "\u{00E0}"),
        ("aacute;", "\u{00E1}"),
        ("acirc;", "\u{00E2}"),
        ("atilde;", "\u{00E3}"),
        ("auml;", "\u{00E4}"),
        ("Egrave;", "\u{00C8}"),
        ("Eacute;", "\u{00C9}"),
        ("egrave;", "\u{00E8}"),
        ("eacute;", "\u{00E9}"),
        ("Igrave;", "\u{00CC}"),
        ("Iacute;", "\u{00CD}"),
        ("igrave;", "\u{00EC}"),
        ("iacute;", "\u{00ED}"),
        ("Ograve;", "\u{00D2}"),
        ("Oacute;", "\u{00D3}"),
        ("ograve;", "\u{00F2}"),
        ("oacute;", "\u{00F3}"),
        ("Ugrave;", "\u{00D9}"),
        ("Uacute;", "\u{00DA}"),
        ("ugrave;", "\u{00F9}"),
        ("uacute;", "\u{00FA}"),
        ("ntilde;", "\u{00F1}"),
        ("Ntilde;", "\u{00D1}"),
        ("ccedil;", "\u{00E7}"),
        ("Ccedil;", "\u{00C7}"),
    ])
});

/// Look up a named character reference.
///
/// Returns the replacement string if found.
/// The `name` should NOT include the leading '&'.
///
/// # Example
/// ```ignore
/// lookup_entity("amp;")  // Returns Some("&")
/// lookup_entity("amp")   // Returns Some("&") - legacy support
/// lookup_entity("xyz;")  // Returns None
/// ```
#[must_use]
pub fn lookup_entity(name: &str) -> Option<&'static str> {
    NAMED_ENTITIES.get(name).copied()
}

/// Replace every character reference in `input` with the text it stands for.
///
/// References that cannot be resolved are left as written. Borrows the input
/// when it contains no `&` at all.
#[must_use]
pub fn unescape(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        if let Some((replacement, consumed)) = decode_reference(after) {
            out.push_str(&replacement);
            rest = &after[consumed..];
        } else {
            out.push('&');
            rest = after;
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Escape the characters that would otherwise be read back as markup.
#[must_use]
pub fn escape_text(input: &str) -> Cow<'_, str> {
    if !input.contains(['&', '<', '>']) {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len() + 8);
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Decode the reference that follows an `&`. Returns the replacement and the
/// number of bytes of `after` it used.
fn decode_reference(after: &str) -> Option<(Cow<'static, str>, usize)> {
    if let Some(numeric) = after.strip_prefix('#') {
        return decode_numeric(numeric).map(|(c, used)| (Cow::Owned(c.to_string()), used + 1));
    }

    let name_len = after
        .char_indices()
        .take(MAX_ENTITY_NAME_LEN)
        .take_while(|(_, c)| c.is_ascii_alphanumeric())
        .last()
        .map_or(0, |(i, c)| i + c.len_utf8());
    if name_len == 0 {
        return None;
    }
    let name = &after[..name_len];

    if after[name_len..].starts_with(';')
        && let Some(replacement) = lookup_entity(&format!("{name};"))
    {
        return Some((Cow::Borrowed(replacement), name_len + 1));
    }

    // Legacy references match the longest known prefix without a semicolon.
    for end in (1..=name_len).rev() {
        if let Some(replacement) = lookup_entity(&name[..end]) {
            return Some((Cow::Borrowed(replacement), end));
        }
    }

    if after[name_len..].starts_with(';') {
        warn_once(
            "HTML Tokenizer",
            &format!("unknown character reference '&{name};'"),
        );
    }
    None
}

/// Decode `NN;` or `xNN;` (the part after `&#`).
fn decode_numeric(numeric: &str) -> Option<(char, usize)> {
    let (radix, digits_start) = match numeric.as_bytes().first() {
        Some(b'x' | b'X') => (16, 1),
        _ => (10, 0),
    };
    let digits = &numeric[digits_start..];
    let digits_len = digits
        .bytes()
        .take_while(|&b| char::from(b).is_digit(radix))
        .count();
    if digits_len == 0 {
        return None;
    }

    let code = u32::from_str_radix(&digits[..digits_len], radix).unwrap_or(u32::MAX);
    let c = match code {
        0 => '\u{FFFD}',
        code => char::from_u32(code).unwrap_or('\u{FFFD}'),
    };

    let mut used = digits_start + digits_len;
    if digits[digits_len..].starts_with(';') {
        used += 1;
    }
    Some((c, used))
}
