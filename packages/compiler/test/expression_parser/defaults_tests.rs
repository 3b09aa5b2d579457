//! Default-clause resolver integration tests.

use databinding_compiler::expression_parser::parse_default_value;

#[test]
fn plain_expressions_have_no_default() {
    assert_eq!(parse_default_value("user.name"), None);
    assert_eq!(parse_default_value("a ?? b"), None);
    assert_eq!(parse_default_value(""), None);
}

#[test]
fn string_literals_are_unquoted() {
    assert_eq!(
        parse_default_value("user.name, default=`loading…`"),
        Some("loading…".to_string())
    );
    assert_eq!(
        parse_default_value("user.name, default = 'N/A'"),
        Some("N/A".to_string())
    );
}

#[test]
fn other_literals_are_verbatim() {
    assert_eq!(
        parse_default_value("count, default=0"),
        Some("0".to_string())
    );
    assert_eq!(
        parse_default_value("visible, default=false"),
        Some("false".to_string())
    );
}

#[test]
fn string_defaults_are_attribute_safe() {
    assert_eq!(
        parse_default_value("label, default=`a & b`"),
        Some("a &amp; b".to_string())
    );
    // Double quotes embedded in a single-quoted literal come out
    // backslash-escaped, then attribute-escaped.
    assert_eq!(
        parse_default_value("label, default='say \"hi\"'"),
        Some("say \\&quot;hi\\&quot;".to_string())
    );
}

#[test]
fn only_the_depth_zero_clause_counts() {
    assert_eq!(parse_default_value("format(a, default)"), None);
    assert_eq!(
        parse_default_value("items[0], default=`-`"),
        Some("-".to_string())
    );
}

#[test]
fn the_last_clause_wins() {
    assert_eq!(
        parse_default_value("x, default=1, default=2"),
        Some("2".to_string())
    );
}
