//! Default Value Resolver
//!
//! Extracts the trailing `, default = <literal>` clause from a binding
//! expression. Only the clause at bracket depth zero counts; a `default`
//! appearing inside parentheses, brackets or braces belongs to the
//! expression itself.

use super::lexer::Lexer;
use crate::util::escape_xml_attribute;

/// Resolve the default value of a binding expression, if it declares one.
///
/// String literals are returned unquoted and escaped for embedding in an
/// XML attribute. Any other literal (number, boolean, null, identifier
/// chain) is returned as its verbatim source text.
pub fn parse_default_value(expression: &str) -> Option<String> {
    let tokens = Lexer::new().tokenize(expression);
    let chars: Vec<char> = expression.chars().collect();

    let mut depth: i32 = 0;
    let mut clause_start = None;
    for (i, token) in tokens.iter().enumerate() {
        if token.is_character('(') || token.is_character('[') || token.is_character('{') {
            depth += 1;
        } else if token.is_character(')') || token.is_character(']') || token.is_character('}') {
            depth -= 1;
        } else if depth == 0
            && token.is_character(',')
            && tokens.get(i + 1).is_some_and(|t| t.is_keyword("default"))
            && tokens.get(i + 2).is_some_and(|t| t.is_character('='))
        {
            clause_start = Some(i + 3);
        }
    }

    let literal_tokens = &tokens[clause_start?..];
    let first = literal_tokens.first()?;

    if literal_tokens.len() == 1 && first.is_string() {
        return Some(unquote_string_literal(&first.str_value));
    }

    let last = literal_tokens.last()?;
    let text: String = chars[first.index..last.end].iter().collect();
    let text = text.trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn unquote_string_literal(raw: &str) -> String {
    let quote = raw.chars().next().unwrap_or('"');
    let inner = &raw[quote.len_utf8()..raw.len() - quote.len_utf8()];
    // A double quote is literal inside single or backtick quotes; it must
    // leave here backslash-escaped.
    let escaped = if quote == '\'' || quote == '`' {
        inner.replace('"', "\\\"")
    } else {
        inner.to_string()
    };
    escape_xml_attribute(&escaped)
}
