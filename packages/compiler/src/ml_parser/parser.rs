//! ML Parser
//!
//! Folds the token stream produced by the lexer into an element tree.
//! Recovery is deliberately simple: a mismatched closing tag implicitly
//! closes the elements above its match, and unclosed elements at EOF are
//! closed with an error recorded for each.

use super::ast::{Attribute, Comment, Element, Node, Text};
use super::lexer;
use super::tokens::{Token, TokenType};
use crate::parse_util::{ParseError, ParseSourceSpan};

/// Parse result: root nodes plus accumulated errors.
#[derive(Debug)]
pub struct ParseTreeResult {
    pub root_nodes: Vec<Node>,
    pub errors: Vec<ParseError>,
}

pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Parser
    }

    pub fn parse(&self, source: &str, url: &str) -> ParseTreeResult {
        let tokenize_result = lexer::tokenize(source.to_string(), url.to_string());
        let mut builder = TreeBuilder::new(tokenize_result.tokens);
        builder.build();

        let mut errors = tokenize_result.errors;
        errors.extend(builder.errors);

        ParseTreeResult {
            root_nodes: builder.root_nodes,
            errors,
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new()
    }
}

struct TreeBuilder {
    tokens: Vec<Token>,
    index: usize,
    container_stack: Vec<Element>,
    root_nodes: Vec<Node>,
    errors: Vec<ParseError>,
}

impl TreeBuilder {
    fn new(tokens: Vec<Token>) -> Self {
        TreeBuilder {
            tokens,
            index: 0,
            container_stack: Vec::new(),
            root_nodes: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn peek_type(&self) -> TokenType {
        self.tokens
            .get(self.index)
            .map(|t| t.token_type)
            .unwrap_or(TokenType::Eof)
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.index].clone();
        if self.index < self.tokens.len().saturating_sub(1) {
            self.index += 1;
        }
        token
    }

    fn build(&mut self) {
        loop {
            match self.peek_type() {
                TokenType::TagOpenStart => self.consume_start_tag(),
                TokenType::TagClose => self.consume_end_tag(),
                TokenType::Text | TokenType::Cdata => {
                    let token = self.advance();
                    self.add_to_parent(Node::Text(Text::new(
                        token.parts[0].clone(),
                        token.source_span,
                    )));
                }
                TokenType::Comment => {
                    let token = self.advance();
                    self.add_to_parent(Node::Comment(Comment::new(
                        token.parts.first().cloned(),
                        token.source_span,
                    )));
                }
                TokenType::Prolog | TokenType::DocType => {
                    // Not part of the element tree.
                    self.advance();
                }
                TokenType::Eof => break,
                _ => {
                    let token = self.advance();
                    self.errors.push(ParseError::new(
                        token.source_span,
                        format!("Unexpected token {:?}", token.token_type),
                    ));
                }
            }
        }

        // Close anything still open at EOF.
        while let Some(element) = self.container_stack.pop() {
            self.errors.push(ParseError::new(
                element.start_source_span.clone(),
                format!("Unclosed element \"{}\"", element.name),
            ));
            self.add_to_parent(Node::Element(element));
        }
    }

    fn consume_start_tag(&mut self) {
        let open_token = self.advance();
        let name = open_token.parts[0].clone();
        let mut attrs: Vec<Attribute> = Vec::new();

        while self.peek_type() == TokenType::AttrName {
            let name_token = self.advance();
            let attr_name = name_token.parts[0].clone();
            let (value, value_span, end_span) = if self.peek_type() == TokenType::AttrValue {
                let value_token = self.advance();
                (
                    value_token.parts[0].clone(),
                    Some(value_token.source_span.clone()),
                    value_token.source_span,
                )
            } else {
                (String::new(), None, name_token.source_span.clone())
            };
            attrs.push(Attribute {
                name: attr_name,
                value,
                source_span: span_between(&name_token.source_span, &end_span),
                key_span: name_token.source_span,
                value_span,
            });
        }

        let (is_self_closing, end_token) = match self.peek_type() {
            TokenType::TagOpenEndVoid => (true, self.advance()),
            TokenType::TagOpenEnd => (false, self.advance()),
            _ => {
                // The lexer stops on malformed open tags, so the matching
                // open-end token is always present unless tokenization
                // already failed. Record and bail out to stay total.
                self.errors.push(ParseError::new(
                    open_token.source_span.clone(),
                    format!("Incomplete open tag \"{}\"", name),
                ));
                return;
            }
        };

        let start_source_span = span_between(&open_token.source_span, &end_token.source_span);
        let element = Element {
            name,
            attrs,
            children: Vec::new(),
            is_self_closing,
            source_span: start_source_span.clone(),
            start_source_span,
            end_source_span: None,
        };

        if is_self_closing {
            self.add_to_parent(Node::Element(element));
        } else {
            self.container_stack.push(element);
        }
    }

    fn consume_end_tag(&mut self) {
        let close_token = self.advance();
        let name = close_token.parts[0].clone();

        let match_index = self.container_stack.iter().rposition(|el| el.name == name);

        let Some(match_index) = match_index else {
            self.errors.push(ParseError::new(
                close_token.source_span,
                format!("Unexpected closing tag \"{}\"", name),
            ));
            return;
        };

        // Elements above the match were left open; close them implicitly.
        while self.container_stack.len() > match_index + 1 {
            let element = self.container_stack.pop().unwrap();
            self.errors.push(ParseError::new(
                element.start_source_span.clone(),
                format!("Unclosed element \"{}\"", element.name),
            ));
            self.add_to_parent(Node::Element(element));
        }

        let mut element = self.container_stack.pop().unwrap();
        element.source_span = span_between(&element.start_source_span, &close_token.source_span);
        element.end_source_span = Some(close_token.source_span);
        self.add_to_parent(Node::Element(element));
    }

    fn add_to_parent(&mut self, node: Node) {
        match self.container_stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root_nodes.push(node),
        }
    }
}

fn span_between(start: &ParseSourceSpan, end: &ParseSourceSpan) -> ParseSourceSpan {
    ParseSourceSpan::new(start.start.clone(), end.end.clone())
}
