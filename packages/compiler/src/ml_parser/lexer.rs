//! ML Parser Lexer
//!
//! XML tokenizer. Converts source text into tokens, each carrying a
//! `ParseSourceSpan` with zero-based line/column/offset bookkeeping. The
//! lexer does no entity decoding and no attribute-value normalization; the
//! token text is always an exact slice of the source.

use super::tokens::{Token, TokenType};
use crate::chars;
use crate::parse_util::{ParseError, ParseLocation, ParseSourceFile, ParseSourceSpan};

/// Tokenization result
#[derive(Debug, Clone)]
pub struct TokenizeResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<ParseError>,
}

/// Main tokenization function
pub fn tokenize(source: String, url: String) -> TokenizeResult {
    let file = ParseSourceFile::new(source, url);
    let mut tokenizer = Tokenizer::new(file);
    tokenizer.tokenize();
    TokenizeResult {
        tokens: tokenizer.tokens,
        errors: tokenizer.errors,
    }
}

#[derive(Debug, Clone)]
struct CursorState {
    peek: char,
    offset: usize,
    line: usize,
    column: usize,
}

/// Cursor over the source text tracking offset, line and column.
#[derive(Debug, Clone)]
struct CharacterCursor {
    file: ParseSourceFile,
    end_pos: usize,
    state: CursorState,
}

impl CharacterCursor {
    fn new(file: ParseSourceFile) -> Self {
        let end_pos = file.content.len();
        let mut cursor = CharacterCursor {
            file,
            end_pos,
            state: CursorState {
                peek: chars::EOF,
                offset: 0,
                line: 0,
                column: 0,
            },
        };
        cursor.update_peek();
        cursor
    }

    fn peek(&self) -> char {
        self.state.peek
    }

    fn advance(&mut self) {
        if self.state.offset < self.end_pos {
            self.state.offset += self.state.peek.len_utf8();
            if self.state.peek == chars::NEWLINE {
                self.state.line += 1;
                self.state.column = 0;
            } else {
                self.state.column += 1;
            }
            self.update_peek();
        }
    }

    fn update_peek(&mut self) {
        self.state.peek = if self.state.offset < self.end_pos {
            self.file.content[self.state.offset..]
                .chars()
                .next()
                .unwrap_or(chars::EOF)
        } else {
            chars::EOF
        };
    }

    fn get_chars(&self, start: &CharacterCursor) -> String {
        self.file.content[start.state.offset..self.state.offset].to_string()
    }

    fn location(&self) -> ParseLocation {
        ParseLocation::new(
            self.file.clone(),
            self.state.offset,
            self.state.line,
            self.state.column,
        )
    }

    fn get_span(&self, start: &CharacterCursor) -> ParseSourceSpan {
        ParseSourceSpan::new(start.location(), self.location())
    }

    fn offset(&self) -> usize {
        self.state.offset
    }
}

struct Tokenizer {
    cursor: CharacterCursor,
    tokens: Vec<Token>,
    errors: Vec<ParseError>,
    current_token_start: Option<CharacterCursor>,
    current_token_type: Option<TokenType>,
}

type LexResult<T> = Result<T, ParseError>;

impl Tokenizer {
    fn new(file: ParseSourceFile) -> Self {
        Tokenizer {
            cursor: CharacterCursor::new(file),
            tokens: Vec::new(),
            errors: Vec::new(),
            current_token_start: None,
            current_token_type: None,
        }
    }

    fn tokenize(&mut self) {
        while self.cursor.peek() != chars::EOF {
            let start = self.cursor.clone();
            let start_offset = start.offset();
            let result = if self.attempt_char(chars::LT) {
                if self.attempt_char(chars::BANG) {
                    if self.cursor.peek() == chars::LBRACKET {
                        self.consume_cdata(start)
                    } else if self.cursor.peek() == chars::MINUS {
                        self.consume_comment(start)
                    } else {
                        self.consume_doc_type(start)
                    }
                } else if self.attempt_char(chars::SLASH) {
                    self.consume_tag_close(start)
                } else if self.cursor.peek() == chars::QUESTION {
                    self.consume_prolog(start)
                } else {
                    self.consume_tag_open(start)
                }
            } else {
                self.consume_text()
            };

            if let Err(error) = result {
                self.errors.push(error);
                break;
            }

            // Safety net against a cursor that made no progress.
            if self.cursor.offset() == start_offset && self.cursor.peek() != chars::EOF {
                let here = self.cursor.clone();
                self.errors.push(self.error_at("Unexpected character", &here));
                break;
            }
        }

        self.begin_token(TokenType::Eof);
        self.end_token(vec![]);
    }

    fn begin_token(&mut self, token_type: TokenType) {
        self.begin_token_at(token_type, self.cursor.clone());
    }

    fn begin_token_at(&mut self, token_type: TokenType, start: CharacterCursor) {
        self.current_token_start = Some(start);
        self.current_token_type = Some(token_type);
    }

    fn end_token(&mut self, parts: Vec<String>) {
        let start = self
            .current_token_start
            .take()
            .expect("Programming error: no token in progress");
        let token_type = self
            .current_token_type
            .take()
            .expect("Programming error: no token in progress");
        let span = self.cursor.get_span(&start);
        self.tokens.push(Token::new(token_type, parts, span));
    }

    fn error_at(&self, msg: &str, start: &CharacterCursor) -> ParseError {
        ParseError::new(self.cursor.get_span(start), msg.to_string())
    }

    fn attempt_char(&mut self, ch: char) -> bool {
        if self.cursor.peek() == ch {
            self.cursor.advance();
            true
        } else {
            false
        }
    }

    fn require_char(&mut self, ch: char) -> LexResult<()> {
        let start = self.cursor.clone();
        if !self.attempt_char(ch) {
            return Err(self.error_at(&format!("Expected \"{}\"", ch), &start));
        }
        Ok(())
    }

    fn attempt_str(&mut self, s: &str) -> bool {
        let saved = self.cursor.clone();
        for ch in s.chars() {
            if !self.attempt_char(ch) {
                self.cursor = saved;
                return false;
            }
        }
        true
    }

    fn require_str(&mut self, s: &str) -> LexResult<()> {
        let start = self.cursor.clone();
        if !self.attempt_str(s) {
            return Err(self.error_at(&format!("Expected \"{}\"", s), &start));
        }
        Ok(())
    }

    /// Advance until `end_marker` is found, returning the text before it.
    /// The marker itself is consumed.
    fn consume_raw_until_str(&mut self, end_marker: &str) -> LexResult<String> {
        let start = self.cursor.clone();
        loop {
            let before_marker = self.cursor.clone();
            if self.attempt_str(end_marker) {
                return Ok(before_marker.get_chars(&start));
            }
            if self.cursor.peek() == chars::EOF {
                return Err(self.error_at(&format!("Unexpected EOF, expected \"{}\"", end_marker), &start));
            }
            self.cursor.advance();
        }
    }

    fn consume_name(&mut self) -> LexResult<String> {
        let start = self.cursor.clone();
        if !chars::is_name_start(self.cursor.peek()) {
            return Err(self.error_at("Expected a name", &start));
        }
        while chars::is_name_char(self.cursor.peek()) {
            self.cursor.advance();
        }
        Ok(self.cursor.get_chars(&start))
    }

    fn skip_whitespace(&mut self) {
        while chars::is_whitespace(self.cursor.peek()) {
            self.cursor.advance();
        }
    }

    fn consume_comment(&mut self, start: CharacterCursor) -> LexResult<()> {
        // `<!` already consumed
        self.begin_token_at(TokenType::Comment, start);
        self.require_str("--")?;
        let value = self.consume_raw_until_str("-->")?;
        self.end_token(vec![value]);
        Ok(())
    }

    fn consume_cdata(&mut self, start: CharacterCursor) -> LexResult<()> {
        // `<!` already consumed
        self.begin_token_at(TokenType::Cdata, start);
        self.require_str("[CDATA[")?;
        let value = self.consume_raw_until_str("]]>")?;
        self.end_token(vec![value]);
        Ok(())
    }

    fn consume_doc_type(&mut self, start: CharacterCursor) -> LexResult<()> {
        // `<!` already consumed
        self.begin_token_at(TokenType::DocType, start);
        let value = self.consume_raw_until_str(">")?;
        self.end_token(vec![value]);
        Ok(())
    }

    fn consume_prolog(&mut self, start: CharacterCursor) -> LexResult<()> {
        // `<` already consumed, peek is `?`
        self.begin_token_at(TokenType::Prolog, start);
        self.require_char(chars::QUESTION)?;
        let value = self.consume_raw_until_str("?>")?;
        self.end_token(vec![value]);
        Ok(())
    }

    fn consume_tag_close(&mut self, start: CharacterCursor) -> LexResult<()> {
        // `</` already consumed
        self.begin_token_at(TokenType::TagClose, start);
        let name = self.consume_name()?;
        self.skip_whitespace();
        self.require_char(chars::GT)?;
        self.end_token(vec![name]);
        Ok(())
    }

    fn consume_tag_open(&mut self, start: CharacterCursor) -> LexResult<()> {
        // `<` already consumed
        self.begin_token_at(TokenType::TagOpenStart, start);
        let name = self.consume_name()?;
        self.end_token(vec![name]);

        loop {
            self.skip_whitespace();
            if chars::is_name_start(self.cursor.peek()) {
                self.consume_attribute()?;
            } else {
                break;
            }
        }

        let end_start = self.cursor.clone();
        if self.attempt_char(chars::SLASH) {
            self.begin_token_at(TokenType::TagOpenEndVoid, end_start);
            self.require_char(chars::GT)?;
            self.end_token(vec![]);
        } else {
            self.begin_token_at(TokenType::TagOpenEnd, end_start);
            self.require_char(chars::GT)?;
            self.end_token(vec![]);
        }
        Ok(())
    }

    fn consume_attribute(&mut self) -> LexResult<()> {
        self.begin_token(TokenType::AttrName);
        let name = self.consume_name()?;
        self.end_token(vec![name]);

        self.skip_whitespace();
        if !self.attempt_char(chars::EQ) {
            // Valueless attribute; the tree builder records an empty value.
            return Ok(());
        }
        self.skip_whitespace();

        let value_start = self.cursor.clone();
        if chars::is_quote(self.cursor.peek()) {
            let quote = self.cursor.peek();
            self.begin_token_at(TokenType::AttrValue, value_start.clone());
            self.cursor.advance();
            while self.cursor.peek() != quote {
                if self.cursor.peek() == chars::EOF {
                    return Err(self.error_at("Unterminated attribute value", &value_start));
                }
                self.cursor.advance();
            }
            self.cursor.advance();
            let raw = self.cursor.get_chars(&value_start);
            self.end_token(vec![raw]);
        } else {
            self.begin_token_at(TokenType::AttrValue, value_start.clone());
            while !chars::is_whitespace(self.cursor.peek())
                && self.cursor.peek() != chars::GT
                && self.cursor.peek() != chars::SLASH
                && self.cursor.peek() != chars::EOF
            {
                self.cursor.advance();
            }
            let raw = self.cursor.get_chars(&value_start);
            if raw.is_empty() {
                return Err(self.error_at("Expected an attribute value", &value_start));
            }
            self.end_token(vec![raw]);
        }
        Ok(())
    }

    fn consume_text(&mut self) -> LexResult<()> {
        self.begin_token(TokenType::Text);
        let start = self.cursor.clone();
        while self.cursor.peek() != chars::LT && self.cursor.peek() != chars::EOF {
            self.cursor.advance();
        }
        let value = self.cursor.get_chars(&start);
        self.end_token(vec![value]);
        Ok(())
    }
}
