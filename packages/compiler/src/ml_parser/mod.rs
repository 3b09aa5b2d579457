//! ML (Markup Language) Parser Module
//!
//! XML tokenizer, tree builder and AST.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod tokens;
pub mod xml_parser;

pub use ast::{Attribute, Comment, Element, Node, Text};
pub use lexer::{tokenize, TokenizeResult};
pub use parser::{ParseTreeResult, Parser};
pub use tokens::{Token, TokenType};
pub use xml_parser::XmlParser;
