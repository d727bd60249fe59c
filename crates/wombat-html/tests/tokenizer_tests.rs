//! Integration tests for the HTML tokenizer.

use wombat_html::{Position, Token, Tokenizer};

/// Drive the tokenizer over a whole string, running the reconsume loop the
/// way the parser driver does, and collect every emitted token.
fn tokenize(input: &str) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new();
    let mut tokens = Vec::new();
    let mut position = Position::default();

    let mut pump = |tokenizer: &mut Tokenizer, input: Option<char>, position: Position| {
        loop {
            tokenizer.step(input, position).unwrap();
            while let Some(token) = tokenizer.next_token() {
                tokens.push(token);
            }
            if !tokenizer.take_reconsume() {
                break;
            }
        }
    };

    for c in input.chars() {
        pump(&mut tokenizer, Some(c), position);
        if c == '\n' {
            position.row += 1;
            position.column = 0;
        } else {
            position.column += 1;
        }
    }
    pump(&mut tokenizer, None, position);
    tokens
}

/// Collapse character tokens back into a string, ignoring everything else.
fn text_of(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|t| match t {
            Token::Character { data } => Some(*data),
            _ => None,
        })
        .collect()
}

#[test]
fn test_plain_text() {
    let tokens = tokenize("Hello");
    assert_eq!(tokens.len(), 6); // 5 chars + EOF
    assert!(matches!(tokens[0], Token::Character { data: 'H' }));
    assert!(matches!(tokens[4], Token::Character { data: 'o' }));
    assert!(matches!(tokens[5], Token::EndOfFile));
}

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
}

#[test]
fn test_end_tag() {
    let tokens = tokenize("</div>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::EndTag { name, .. } => assert_eq!(name, "div"),
        _ => panic!("Expected EndTag token"),
    }
}

#[test]
fn test_self_closing_tag() {
    let tokens = tokenize("<br/>");
    match &tokens[0] {
        Token::StartTag {
            name, self_closing, ..
        } => {
            assert_eq!(name, "br");
            assert!(*self_closing);
        }
        _ => panic!("Expected self-closing StartTag token"),
    }
}

#[test]
fn test_tag_name_case_normalized() {
    let tokens = tokenize(r#"<A Href="MixedCase">"#);
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "a");
            assert_eq!(attributes.len(), 1);
            // Attribute names fold to lowercase; values stay verbatim.
            assert_eq!(attributes[0].name, "href");
            assert_eq!(attributes[0].value, "MixedCase");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_attribute_single_quoted() {
    let tokens = tokenize("<div class='bar'>");
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes[0].name, "class");
            assert_eq!(attributes[0].value, "bar");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_attribute_unquoted() {
    let tokens = tokenize("<input type=text>");
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes[0].name, "type");
            assert_eq!(attributes[0].value, "text");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_multiple_attributes() {
    let tokens = tokenize(r#"<div id="main" class="a b" hidden>"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes.len(), 3);
            assert_eq!(attributes[0].name, "id");
            assert_eq!(attributes[1].value, "a b");
            assert_eq!(attributes[2].name, "hidden");
            assert_eq!(attributes[2].value, "");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_duplicate_attribute_first_wins() {
    let tokens = tokenize(r#"<div id="a" id="b">"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].name, "id");
            // The duplicate's value is parsed but discarded; it must not
            // bleed into the surviving attribute either.
            assert_eq!(attributes[0].value, "a");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_invalid_tag_open_reconsumed_as_text() {
    // `<` followed by a non-letter is not a tag; the `<` is emitted as a
    // character and the offender is reprocessed in the data state.
    let tokens = tokenize("<1>");
    assert_eq!(text_of(&tokens), "<1>");
    assert!(tokens.last().unwrap().is_eof());
}

#[test]
fn test_comment() {
    let tokens = tokenize("<!-- hello -->");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::Comment { data } => assert_eq!(data, " hello "),
        _ => panic!("Expected Comment token"),
    }
}

#[test]
fn test_comment_with_inner_dashes() {
    let tokens = tokenize("<!-- a - b -- c -->");
    match &tokens[0] {
        Token::Comment { data } => assert_eq!(data, " a - b -- c "),
        _ => panic!("Expected Comment token"),
    }
}

#[test]
fn test_bogus_comment_keeps_consumed_prefix() {
    // `<!foo>` is an incorrectly opened comment; the characters consumed by
    // the keyword matcher become comment data rather than being lost.
    let tokens = tokenize("<!foo>");
    match &tokens[0] {
        Token::Comment { data } => assert_eq!(data, "foo"),
        _ => panic!("Expected Comment token"),
    }
}

#[test]
fn test_bogus_comment_from_question_mark() {
    let tokens = tokenize("<?xml version=\"1.0\"?>");
    match &tokens[0] {
        Token::Comment { data } => assert_eq!(data, "?xml version=\"1.0\"?"),
        _ => panic!("Expected Comment token"),
    }
}

#[test]
fn test_unterminated_comment_emitted_at_eof() {
    let tokens = tokenize("<!-- dangling");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::Comment { data } => assert_eq!(data, " dangling"),
        _ => panic!("Expected Comment token"),
    }
    assert!(tokens[1].is_eof());
}

#[test]
fn test_doctype() {
    let tokens = tokenize("<!DOCTYPE html>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::Doctype { name, force_quirks } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert!(!force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_doctype_case_insensitive_keyword() {
    let tokens = tokenize("<!doctype HTML>");
    match &tokens[0] {
        Token::Doctype { name, .. } => assert_eq!(name.as_deref(), Some("html")),
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_doctype_trailing_identifiers_consumed() {
    // Public/system identifiers are not recorded, but they must not corrupt
    // the stream: the name survives and tokenization resumes after `>`.
    let tokens = tokenize("<!DOCTYPE html SYSTEM about:legacy-compat><p>");
    match &tokens[0] {
        Token::Doctype { name, .. } => assert_eq!(name.as_deref(), Some("html")),
        _ => panic!("Expected DOCTYPE token"),
    }
    assert!(matches!(&tokens[1], Token::StartTag { name, .. } if name == "p"));
}

#[test]
fn test_missing_doctype_name_forces_quirks() {
    let tokens = tokenize("<!DOCTYPE>");
    match &tokens[0] {
        Token::Doctype { name, force_quirks } => {
            assert!(name.is_none());
            assert!(force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_character_reference_swallows_ampersand() {
    // The simplified resolver consumes `&` and returns control; the entity
    // body comes through as literal text.
    let tokens = tokenize("a &amp; b");
    assert_eq!(text_of(&tokens), "a amp; b");
}

#[test]
fn test_character_reference_in_attribute_value() {
    let tokens = tokenize(r#"<a href="x&y">"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => assert_eq!(attributes[0].value, "xy"),
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_rcdata_matching_end_tag() {
    let tokens = tokenize("<title>abc</title>");
    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "title"));
    assert_eq!(text_of(&tokens), "abc");
    assert!(matches!(&tokens[4], Token::EndTag { name, .. } if name == "title"));
}

#[test]
fn test_rcdata_mismatched_end_tag_is_text() {
    // `</titlex>` is not an appropriate end tag for `<title>`, so the
    // buffered characters flush back out as literal text in order.
    let tokens = tokenize("<title>abc</titlex>");
    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "title"));
    assert_eq!(text_of(&tokens), "abc</titlex>");
    assert!(!tokens.iter().any(|t| matches!(t, Token::EndTag { .. })));
}

#[test]
fn test_rcdata_markup_is_not_parsed() {
    let tokens = tokenize("<textarea><b>bold?</b></textarea>");
    assert_eq!(text_of(&tokens), "<b>bold?</b>");
    assert!(matches!(&tokens.last().unwrap(), Token::EndOfFile));
}

#[test]
fn test_rawtext_style_content() {
    let tokens = tokenize("<style>p > a { color: red; }</style>");
    assert_eq!(text_of(&tokens), "p > a { color: red; }");
    assert!(
        tokens
            .iter()
            .any(|t| matches!(t, Token::EndTag { name, .. } if name == "style"))
    );
}

#[test]
fn test_script_data_less_than_passthrough() {
    let tokens = tokenize("<script>var ok = 1 < 2;</script>");
    assert_eq!(text_of(&tokens), "var ok = 1 < 2;");
    assert!(
        tokens
            .iter()
            .any(|t| matches!(t, Token::EndTag { name, .. } if name == "script"))
    );
}

#[test]
fn test_script_data_bang_is_literal() {
    // `<!` inside script data is emitted as literal characters without
    // entering the comment machinery, and exactly once.
    let tokens = tokenize("<script>a<!b</script>");
    assert_eq!(text_of(&tokens), "a<!b");
}

#[test]
fn test_script_data_comment_wrapper_is_literal() {
    let tokens = tokenize("<script><!-- var x; --></script>");
    assert_eq!(text_of(&tokens), "<!-- var x; -->");
    assert!(
        tokens
            .iter()
            .any(|t| matches!(t, Token::EndTag { name, .. } if name == "script"))
    );
}

#[test]
fn test_script_end_tag_name_case_insensitive() {
    // The candidate end tag name is lowercased before the appropriate-end-tag
    // comparison, so `</SCRIPT>` closes `<script>`.
    let tokens = tokenize("<script>x</SCRIPT>");
    assert!(
        tokens
            .iter()
            .any(|t| matches!(t, Token::EndTag { name, .. } if name == "script"))
    );
}

#[test]
fn test_plaintext_has_no_exit() {
    let tokens = tokenize("<plaintext></plaintext><p>");
    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "plaintext"));
    assert_eq!(text_of(&tokens), "</plaintext><p>");
}

#[test]
fn test_eof_inside_tag_emits_only_eof() {
    let tokens = tokenize("<div class=");
    assert_eq!(tokens.len(), 1);
    assert!(tokens[0].is_eof());
}

#[test]
fn test_eof_after_tag_open_flushes_less_than() {
    let tokens = tokenize("x<");
    assert_eq!(text_of(&tokens), "x<");
    assert!(tokens.last().unwrap().is_eof());
}

#[test]
fn test_step_after_eof_is_contract_violation() {
    let mut tokenizer = Tokenizer::new();
    tokenizer.step(None, Position::default()).unwrap();
    assert!(tokenizer.next_token().unwrap().is_eof());
    assert!(tokenizer.is_at_eof());
    assert!(tokenizer.step(Some('x'), Position::default()).is_err());
}

#[test]
fn test_parse_errors_carry_position() {
    let mut tokenizer = Tokenizer::new();
    let mut position = Position::default();
    for c in "ab\n<1".chars() {
        loop {
            tokenizer.step(Some(c), position).unwrap();
            let _ = tokenizer.next_token();
            let _ = tokenizer.next_token();
            if !tokenizer.take_reconsume() {
                break;
            }
        }
        if c == '\n' {
            position.row += 1;
            position.column = 0;
        } else {
            position.column += 1;
        }
    }
    let errors = tokenizer.drain_errors();
    assert_eq!(errors.len(), 1);
    // The `1` after `<` sits on the second line, second column.
    assert_eq!(errors[0].row, 1);
    assert_eq!(errors[0].column, 1);
}
