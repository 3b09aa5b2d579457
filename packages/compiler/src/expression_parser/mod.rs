/**
 * Expression Parser Module
 *
 * Binding-expression lexing and the `default` clause resolver.
 */
pub mod defaults;
pub mod lexer;

pub use defaults::parse_default_value;
pub use lexer::{Lexer, Token, TokenType};
