//! Tokenizer integration tests.

use databinding_compiler::ml_parser::{tokenize, TokenType};

fn kinds(source: &str) -> Vec<TokenType> {
    let result = tokenize(source.to_string(), "test.xml".to_string());
    assert!(
        result.errors.is_empty(),
        "unexpected errors: {:?}",
        result.errors
    );
    result.tokens.iter().map(|t| t.token_type).collect()
}

#[test]
fn tokenizes_a_layout_document() {
    assert_eq!(
        kinds("<layout><data/><TextView android:text=\"hi\"/></layout>"),
        vec![
            TokenType::TagOpenStart,
            TokenType::TagOpenEnd,
            TokenType::TagOpenStart,
            TokenType::TagOpenEndVoid,
            TokenType::TagOpenStart,
            TokenType::AttrName,
            TokenType::AttrValue,
            TokenType::TagOpenEndVoid,
            TokenType::TagClose,
            TokenType::Eof,
        ]
    );
}

#[test]
fn attribute_values_are_raw_source_slices() {
    let result = tokenize(
        "<v a=\"@{user.age &lt; 3}\" b='single'/>".to_string(),
        "test.xml".to_string(),
    );
    assert!(result.errors.is_empty());
    let values: Vec<&str> = result
        .tokens
        .iter()
        .filter(|t| t.token_type == TokenType::AttrValue)
        .map(|t| t.parts[0].as_str())
        .collect();
    // Quotes stay on and entities stay encoded.
    assert_eq!(values, vec!["\"@{user.age &lt; 3}\"", "'single'"]);
}

#[test]
fn spans_carry_offsets_lines_and_columns() {
    let result = tokenize("<a>\n  <b/>\n</a>".to_string(), "test.xml".to_string());
    assert!(result.errors.is_empty());
    let b_open = result
        .tokens
        .iter()
        .find(|t| t.token_type == TokenType::TagOpenStart && t.parts[0] == "b")
        .unwrap();
    assert_eq!(b_open.source_span.start.line, 1);
    assert_eq!(b_open.source_span.start.col, 2);
    assert_eq!(b_open.source_span.start.offset, 6);
    let close = result
        .tokens
        .iter()
        .find(|t| t.token_type == TokenType::TagClose)
        .unwrap();
    assert_eq!(close.source_span.start.line, 2);
    assert_eq!(close.source_span.start.col, 0);
}

#[test]
fn prolog_comment_and_cdata_pass_through() {
    let kinds = kinds("<?xml version=\"1.0\"?><a><!--note--><![CDATA[x < y]]></a>");
    assert_eq!(kinds[0], TokenType::Prolog);
    assert!(kinds.contains(&TokenType::Comment));
    assert!(kinds.contains(&TokenType::Cdata));
}

#[test]
fn whitespace_inside_the_open_tag_is_insignificant() {
    let result = tokenize(
        "<v\n    android:id=\"@+id/a\"\n    android:text = \"x\"\n/>".to_string(),
        "test.xml".to_string(),
    );
    assert!(result.errors.is_empty());
    let names: Vec<&str> = result
        .tokens
        .iter()
        .filter(|t| t.token_type == TokenType::AttrName)
        .map(|t| t.parts[0].as_str())
        .collect();
    assert_eq!(names, vec!["android:id", "android:text"]);
    assert_eq!(
        result
            .tokens
            .iter()
            .filter(|t| t.token_type == TokenType::TagOpenEndVoid)
            .count(),
        1
    );
}

#[test]
fn unterminated_value_is_an_error() {
    let result = tokenize("<v a=\"oops".to_string(), "test.xml".to_string());
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].msg.contains("Unterminated"));
}

#[test]
fn stray_markup_is_an_error() {
    let result = tokenize("<a></a><<".to_string(), "test.xml".to_string());
    assert!(!result.errors.is_empty());
    // The error points past the `<` that started the bad tag.
    assert_eq!(result.errors[0].span.start.offset, 8);
}
