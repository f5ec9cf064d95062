//! Integration tests for the HTML tokenizer.

use htmlfive_common::warning::has_warned;
use htmlfive_html::{AttributesMap, HTMLTokenizer, ParseError, Token, TokenizerState};

/// Helper to tokenize a string and return the tokens
fn tokenize(input: &str) -> Vec<Token> {
    HTMLTokenizer::new(input)
        .into_tokens()
        .expect("input should tokenize")
}

/// Helper to tokenize a string that is expected to fail
fn tokenize_err(input: &str) -> ParseError {
    HTMLTokenizer::new(input)
        .into_tokens()
        .expect_err("input should not tokenize")
}

fn attrs(pairs: &[(&str, Option<&str>)]) -> AttributesMap {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.map(str::to_string)))
        .collect()
}

// ========== tags ==========

#[test]
fn test_start_tag() {
    let tokens = tokenize("<div>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::StartTag {
            name,
            self_closing,
            attributes,
        } => {
            assert_eq!(name, "div");
            assert!(!self_closing);
            assert!(attributes.is_empty());
        }
        _ => panic!("Expected StartTag token"),
    }
    assert!(tokens[1].is_eof());
}

#[test]
fn test_element_with_text() {
    let tokens = tokenize("<p>Hello</p>");
    assert_eq!(
        tokens,
        vec![
            Token::start_tag("p", AttributesMap::new()),
            Token::text("Hello"),
            Token::end_tag("p"),
            Token::EndOfInput,
        ]
    );
}

#[test]
fn test_void_element_gets_synthetic_end_tag() {
    let tokens = tokenize("<p>a<br>b</p>");
    assert_eq!(
        tokens,
        vec![
            Token::start_tag("p", AttributesMap::new()),
            Token::text("a"),
            Token::start_tag("br", AttributesMap::new()),
            Token::end_tag("br"),
            Token::text("b"),
            Token::end_tag("p"),
            Token::EndOfInput,
        ]
    );
}

#[test]
fn test_self_closing_tag() {
    let tokens = tokenize("<div><widget/></div>");
    assert_eq!(
        tokens[1],
        Token::StartTag {
            name: "widget".to_string(),
            self_closing: true,
            attributes: AttributesMap::new(),
        }
    );
    assert_eq!(tokens[2], Token::end_tag("widget"));
    assert_eq!(tokens[3], Token::end_tag("div"));
}

#[test]
fn test_self_closing_void_with_attributes() {
    let tokens = tokenize(r#"<img src="a.png" />"#);
    match &tokens[0] {
        Token::StartTag {
            name,
            self_closing,
            attributes,
        } => {
            assert_eq!(name, "img");
            assert!(self_closing);
            assert_eq!(attributes, &attrs(&[("src", Some("a.png"))]));
        }
        _ => panic!("Expected StartTag token"),
    }
    assert_eq!(tokens[1], Token::end_tag("img"));
    assert!(tokens[2].is_eof());
}

#[test]
fn test_void_names_are_case_sensitive() {
    let mut tokenizer = HTMLTokenizer::new("<BR>");
    let _ = tokenizer.next();
    assert_eq!(tokenizer.open_tags(), ["BR".to_string()]);
}

#[test]
fn test_open_tags_and_position() {
    let mut tokenizer = HTMLTokenizer::new("<html><body>");
    let _ = tokenizer.next();
    let _ = tokenizer.next();
    assert_eq!(tokenizer.open_tags(), ["html".to_string(), "body".to_string()]);
    assert_eq!(tokenizer.current_tag(), Some("body"));
    assert_eq!(tokenizer.position(), 12);
}

#[test]
fn test_mismatched_end_tag_closes_innermost() {
    let tokens = tokenize("<div><span>x</div></span>");
    assert_eq!(tokens[3], Token::end_tag("span"));
    assert_eq!(tokens[4], Token::end_tag("div"));
    assert!(has_warned(
        "HTML Tokenizer",
        "end tag </div> at byte 12 closes <span>"
    ));
}

#[test]
fn test_unclosed_tags_are_tolerated() {
    let tokens = tokenize("<html><body><p>Hi");
    assert_eq!(tokens.len(), 5);
    assert!(tokens[4].is_eof());
}

// ========== doctype and whitespace ==========

#[test]
fn test_doctype_is_skipped() {
    let tokens = tokenize("  \n<!doctype HTML>\n<html></html>\n");
    assert_eq!(
        tokens,
        vec![
            Token::start_tag("html", AttributesMap::new()),
            Token::end_tag("html"),
            Token::EndOfInput,
        ]
    );
}

#[test]
fn test_whitespace_text_is_emitted() {
    let tokens = tokenize("<ul>\n  <li>a</li>\n</ul>");
    assert_eq!(tokens[1], Token::text("\n  "));
    assert_eq!(tokens[5], Token::text("\n"));
}

#[test]
fn test_text_is_not_unescaped() {
    let tokens = tokenize("<p>&amp;</p>");
    assert_eq!(tokens[1], Token::text("&amp;"));
}

#[test]
fn test_empty_input() {
    assert_eq!(tokenize("   "), vec![Token::EndOfInput]);
}

// ========== attributes ==========

#[test]
fn test_attributes_in_source_order() {
    let tokens = tokenize(r#"<a href="x" data-x='y "z"' disabled>"#);
    let Token::StartTag { attributes, .. } = &tokens[0] else {
        panic!("Expected StartTag token");
    };
    assert_eq!(
        attributes,
        &attrs(&[
            ("href", Some("x")),
            ("data-x", Some("y \"z\"")),
            ("disabled", None),
        ])
    );
    let names: Vec<_> = attributes.keys().map(String::as_str).collect();
    assert_eq!(names, ["href", "data-x", "disabled"]);
}

#[test]
fn test_quoted_greater_than() {
    let tokens = tokenize(r#"<a title="a>b">t</a>"#);
    let Token::StartTag { attributes, .. } = &tokens[0] else {
        panic!("Expected StartTag token");
    };
    assert_eq!(attributes["title"].as_deref(), Some("a>b"));
    assert_eq!(tokens[1], Token::text("t"));
}

#[test]
fn test_unquoted_and_spaced_values() {
    let parsed = HTMLTokenizer::parse_attributes(" type=text value = 'a b'  checked");
    assert_eq!(
        parsed,
        attrs(&[("type", Some("text")), ("value", Some("a b")), ("checked", None)])
    );
}

#[test]
fn test_stray_apostrophe_in_unquoted_value() {
    let tokens = tokenize("<p class=it's>x</p>");
    let Token::StartTag { attributes, .. } = &tokens[0] else {
        panic!("Expected StartTag token");
    };
    assert_eq!(attributes["class"].as_deref(), Some("it's"));
    assert_eq!(tokens[1], Token::text("x"));
}

#[test]
fn test_attribute_values_are_unescaped() {
    let parsed = HTMLTokenizer::parse_attributes(r#"title="&lt;x&gt; &amp; y""#);
    assert_eq!(parsed["title"].as_deref(), Some("<x> & y"));
}

#[test]
fn test_duplicate_attribute_keeps_first_position_last_value() {
    let parsed = HTMLTokenizer::parse_attributes("x=1 y x=2");
    assert_eq!(parsed, attrs(&[("x", Some("2")), ("y", None)]));
    let names: Vec<_> = parsed.keys().map(String::as_str).collect();
    assert_eq!(names, ["x", "y"]);
}

#[test]
fn test_empty_value() {
    let parsed = HTMLTokenizer::parse_attributes(r#"alt="""#);
    assert_eq!(parsed["alt"].as_deref(), Some(""));
}

// ========== comments and raw text ==========

#[test]
fn test_comment() {
    let tokens = tokenize("<div><!-- hi <b> --></div>");
    assert_eq!(tokens[1], Token::comment(" hi <b> "));
    assert_eq!(tokens[2], Token::end_tag("div"));
}

#[test]
fn test_script_body_is_one_text_run() {
    let tokens = tokenize(r#"<script>if (a < b) { x = "</p>"; }</script>"#);
    assert_eq!(
        tokens,
        vec![
            Token::start_tag("script", AttributesMap::new()),
            Token::text(r#"if (a < b) { x = "</p>"; }"#),
            Token::end_tag("script"),
            Token::EndOfInput,
        ]
    );
}

#[test]
fn test_comment_inside_style_is_text() {
    let tokens = tokenize("<style><!-- p > a {} --></style>");
    assert_eq!(tokens[1], Token::text("<!-- p > a {} -->"));
}

#[test]
fn test_empty_script() {
    let tokens = tokenize("<script></script>");
    assert_eq!(tokens[1], Token::end_tag("script"));
}

// ========== errors ==========

#[test]
fn test_unterminated_tag() {
    assert_eq!(
        tokenize_err("<html><div"),
        ParseError::UnexpectedEndOfInput {
            state: TokenizerState::TagOpen,
            position: 6,
        }
    );
}

#[test]
fn test_unterminated_quote() {
    let err = tokenize_err(r#"<a title="x>y</a>"#);
    assert!(matches!(
        err,
        ParseError::UnexpectedEndOfInput {
            state: TokenizerState::TagOpen,
            ..
        }
    ));
}

#[test]
fn test_unterminated_comment() {
    assert_eq!(
        tokenize_err("<p><!-- x"),
        ParseError::UnexpectedEndOfInput {
            state: TokenizerState::Comment,
            position: 3,
        }
    );
}

#[test]
fn test_unterminated_raw_text() {
    assert_eq!(
        tokenize_err("<script>var x;"),
        ParseError::UnexpectedEndOfInput {
            state: TokenizerState::RawText,
            position: 8,
        }
    );
}

#[test]
fn test_unbalanced_end_tag() {
    assert_eq!(
        tokenize_err("<p></p></p>"),
        ParseError::UnbalancedEndTag { position: 7 }
    );
}

#[test]
fn test_iterator_stops_after_error() {
    let mut tokenizer = HTMLTokenizer::new("</p>");
    assert!(matches!(tokenizer.next(), Some(Err(_))));
    assert!(tokenizer.next().is_none());
}

#[test]
fn test_iterator_stops_after_end_of_input() {
    let mut tokenizer = HTMLTokenizer::new("<br>");
    let tokens: Vec<_> = tokenizer.by_ref().collect();
    assert_eq!(tokens.len(), 3);
    assert!(tokenizer.next().is_none());
}

#[test]
fn test_error_messages() {
    let err = tokenize_err("<p><!-- x");
    assert_eq!(
        err.to_string(),
        "unexpected end of input in Comment state (started at byte 3)"
    );
}

// ========== display ==========

#[test]
fn test_token_display() {
    let start = Token::start_tag(
        "a",
        attrs(&[("href", Some("x")), ("title", Some("say \"hi\"")), ("hidden", None)]),
    );
    assert_eq!(start.to_string(), r#"<a href="x" title='say "hi"' hidden>"#);
    assert_eq!(Token::end_tag("a").to_string(), "</a>");
    assert_eq!(Token::text("a\n\tb").to_string(), r#"Text("a\n\tb")"#);
    assert_eq!(Token::comment(" c ").to_string(), "<!-- c -->");
    assert_eq!(Token::EndOfInput.to_string(), "EOF");
}
