//! ML Parser Tokens
//!
//! Token stream produced by the XML lexer. Attribute value tokens carry the
//! raw source text including the surrounding quotes; entity references are
//! not decoded at this level.

use crate::parse_util::ParseSourceSpan;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum TokenType {
    TagOpenStart,
    TagOpenEnd,
    TagOpenEndVoid,
    TagClose,
    Text,
    Comment,
    Cdata,
    AttrName,
    AttrValue,
    DocType,
    Prolog,
    Eof,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub token_type: TokenType,
    pub parts: Vec<String>,
    pub source_span: ParseSourceSpan,
}

impl Token {
    pub fn new(token_type: TokenType, parts: Vec<String>, source_span: ParseSourceSpan) -> Self {
        Token { token_type, parts, source_span }
    }
}
