//! XML Parser
//!
//! Thin facade over the generic tokenizer + tree builder for XML documents.

use super::parser::{ParseTreeResult, Parser};

pub struct XmlParser {
    parser: Parser,
}

impl XmlParser {
    pub fn new() -> Self {
        XmlParser {
            parser: Parser::new(),
        }
    }

    pub fn parse(&self, source: &str, url: &str) -> ParseTreeResult {
        self.parser.parse(source, url)
    }
}

impl Default for XmlParser {
    fn default() -> Self {
        Self::new()
    }
}
