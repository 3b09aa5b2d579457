//! ML Parser AST
//!
//! XML tree node definitions. Every node keeps the spans the lexer produced,
//! so consumers can do exact source arithmetic. Attribute `value` is the raw
//! source text including the surrounding quotes (or empty for a valueless
//! attribute); use [`Attribute::unquoted`] when the literal text is wanted.

use crate::parse_util::ParseSourceSpan;

#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    Text(Text),
    Comment(Comment),
}

impl Node {
    pub fn source_span(&self) -> &ParseSourceSpan {
        match self {
            Node::Element(e) => &e.source_span,
            Node::Text(t) => &t.source_span,
            Node::Comment(c) => &c.source_span,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Text {
    pub value: String,
    pub source_span: ParseSourceSpan,
}

impl Text {
    pub fn new(value: String, source_span: ParseSourceSpan) -> Self {
        Text { value, source_span }
    }
}

#[derive(Debug, Clone)]
pub struct Comment {
    pub value: Option<String>,
    pub source_span: ParseSourceSpan,
}

impl Comment {
    pub fn new(value: Option<String>, source_span: ParseSourceSpan) -> Self {
        Comment { value, source_span }
    }
}

#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: String,
    pub value: String,
    pub source_span: ParseSourceSpan,
    pub key_span: ParseSourceSpan,
    pub value_span: Option<ParseSourceSpan>,
}

impl Attribute {
    /// The attribute value with its surrounding quote characters removed.
    /// Entity references are still encoded.
    pub fn unquoted(&self) -> &str {
        let v = self.value.as_str();
        if v.len() >= 2 {
            let bytes = v.as_bytes();
            let first = bytes[0];
            if (first == b'"' || first == b'\'') && bytes[v.len() - 1] == first {
                return &v[1..v.len() - 1];
            }
        }
        v
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Node>,
    pub is_self_closing: bool,
    /// Span of the whole element, open tag through closing tag.
    pub source_span: ParseSourceSpan,
    /// Span of the open tag, `<` through `>` (or `/>`).
    pub start_source_span: ParseSourceSpan,
    /// Span of the closing tag. `None` for self-closing elements.
    pub end_source_span: Option<ParseSourceSpan>,
}

impl Element {
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn find_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attrs.iter().find(|a| a.name == name)
    }
}
