/**
 * Expression Lexer
 *
 * Minimal scanner for binding expressions. The compiler never evaluates or
 * type-checks expressions; it only needs enough token structure to find the
 * top-level `default` clause, so this lexer covers identifiers, keywords,
 * numbers, the three string quote styles and the multi-character operators
 * that could otherwise be mistaken for an assignment.
 */
use crate::chars;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Character,
    Identifier,
    Keyword,
    String,
    Number,
    Operator,
    Error,
}

const KEYWORDS: &[&str] = &["true", "false", "null", "default"];

/// Multi-character operators, longest first.
const OPERATORS: &[&str] = &[
    "===", "!==", "==", "!=", "<=", ">=", "&&", "||", "??", "<<", ">>",
];

#[derive(Debug, Clone)]
pub struct Token {
    pub index: usize,
    pub end: usize,
    pub token_type: TokenType,
    pub num_value: f64,
    pub str_value: String,
}

impl Token {
    fn new(index: usize, end: usize, token_type: TokenType, str_value: String) -> Self {
        Token {
            index,
            end,
            token_type,
            num_value: 0.0,
            str_value,
        }
    }

    pub fn is_character(&self, ch: char) -> bool {
        self.token_type == TokenType::Character && self.str_value.chars().next() == Some(ch)
    }

    pub fn is_identifier(&self) -> bool {
        self.token_type == TokenType::Identifier
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.token_type == TokenType::Keyword && self.str_value == keyword
    }

    pub fn is_string(&self) -> bool {
        self.token_type == TokenType::String
    }

    pub fn is_number(&self) -> bool {
        self.token_type == TokenType::Number
    }
}

pub struct Lexer;

impl Lexer {
    pub fn new() -> Self {
        Lexer
    }

    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut scanner = Scanner::new(text);
        let mut tokens = Vec::new();
        while let Some(token) = scanner.scan_token() {
            let is_error = token.token_type == TokenType::Error;
            tokens.push(token);
            if is_error {
                break;
            }
        }
        tokens
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Lexer::new()
    }
}

struct Scanner {
    chars: Vec<char>,
    index: usize,
}

impl Scanner {
    fn new(input: &str) -> Self {
        Scanner {
            chars: input.chars().collect(),
            index: 0,
        }
    }

    fn peek(&self) -> char {
        self.chars.get(self.index).copied().unwrap_or(chars::EOF)
    }

    fn scan_token(&mut self) -> Option<Token> {
        while self.index < self.chars.len() && chars::is_whitespace(self.peek()) {
            self.index += 1;
        }
        if self.index >= self.chars.len() {
            return None;
        }

        let start = self.index;
        let ch = self.peek();

        if chars::is_identifier_start(ch) {
            return Some(self.scan_identifier(start));
        }
        if chars::is_digit(ch) {
            return Some(self.scan_number(start));
        }
        if ch == chars::SQ || ch == chars::DQ || ch == '`' {
            return Some(self.scan_string(start, ch));
        }

        for op in OPERATORS {
            if self.starts_with(start, op) {
                self.index += op.chars().count();
                return Some(Token::new(
                    start,
                    self.index,
                    TokenType::Operator,
                    (*op).to_string(),
                ));
            }
        }

        self.index += 1;
        Some(Token::new(
            start,
            self.index,
            TokenType::Character,
            ch.to_string(),
        ))
    }

    fn starts_with(&self, start: usize, s: &str) -> bool {
        let mut idx = start;
        for ch in s.chars() {
            if self.chars.get(idx).copied() != Some(ch) {
                return false;
            }
            idx += 1;
        }
        true
    }

    fn scan_identifier(&mut self, start: usize) -> Token {
        while self.index < self.chars.len() && chars::is_identifier_part(self.peek()) {
            self.index += 1;
        }
        let text: String = self.chars[start..self.index].iter().collect();
        let token_type = if KEYWORDS.contains(&text.as_str()) {
            TokenType::Keyword
        } else {
            TokenType::Identifier
        };
        Token::new(start, self.index, token_type, text)
    }

    fn scan_number(&mut self, start: usize) -> Token {
        let mut seen_dot = false;
        while self.index < self.chars.len() {
            let ch = self.peek();
            if chars::is_digit(ch) {
                self.index += 1;
            } else if ch == chars::PERIOD && !seen_dot {
                seen_dot = true;
                self.index += 1;
            } else if chars::is_ascii_letter(ch) {
                // Type suffix (1f, 25L) or hex digits.
                self.index += 1;
            } else {
                break;
            }
        }
        let text: String = self.chars[start..self.index].iter().collect();
        let mut token = Token::new(start, self.index, TokenType::Number, text.clone());
        token.num_value = text
            .trim_end_matches(|c: char| c.is_ascii_alphabetic())
            .parse()
            .unwrap_or(0.0);
        token
    }

    /// Scans a quoted string, honoring backslash escapes. `str_value` keeps
    /// the raw text including the quotes.
    fn scan_string(&mut self, start: usize, quote: char) -> Token {
        self.index += 1;
        while self.index < self.chars.len() {
            let ch = self.peek();
            if ch == chars::BACKSLASH {
                self.index = (self.index + 2).min(self.chars.len());
                continue;
            }
            self.index += 1;
            if ch == quote {
                let text: String = self.chars[start..self.index].iter().collect();
                return Token::new(start, self.index, TokenType::String, text);
            }
        }
        let text: String = self.chars[start..].iter().collect();
        Token::new(start, self.chars.len(), TokenType::Error, text)
    }
}
