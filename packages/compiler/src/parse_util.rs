//! Parse Utilities
//!
//! Source files, locations, spans and parse-level errors shared by the
//! markup lexer and everything downstream of it. Lines and columns are
//! zero-based throughout.

use crate::chars;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseSourceFile {
    pub content: String,
    pub url: String,
}

impl ParseSourceFile {
    pub fn new(content: String, url: String) -> Self {
        ParseSourceFile { content, url }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseLocation {
    pub file: ParseSourceFile,
    pub offset: usize,
    pub line: usize,
    pub col: usize,
}

impl ParseLocation {
    pub fn new(file: ParseSourceFile, offset: usize, line: usize, col: usize) -> Self {
        ParseLocation { file, offset, line, col }
    }

    pub fn move_by(&self, delta: i32) -> ParseLocation {
        let source = &self.file.content;
        let len = source.len();
        let mut offset = self.offset;
        let mut line = self.line;
        let mut col = self.col;
        let mut delta = delta;

        // Move backward
        while offset > 0 && delta < 0 {
            offset -= 1;
            delta += 1;
            let ch = source.as_bytes()[offset];
            if ch == chars::NEWLINE as u8 {
                line -= 1;
                if let Some(prior_line) = source[..offset].rfind('\n') {
                    col = offset - prior_line;
                } else {
                    col = offset;
                }
            } else {
                col -= 1;
            }
        }

        // Move forward
        while offset < len && delta > 0 {
            let ch = source.as_bytes()[offset];
            offset += 1;
            delta -= 1;
            if ch == chars::NEWLINE as u8 {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }

        ParseLocation::new(self.file.clone(), offset, line, col)
    }

    /// Return the source around the location, up to `max_chars` or
    /// `max_lines` on each side.
    pub fn get_context(&self, max_chars: usize, max_lines: usize) -> Option<(String, String)> {
        let content = &self.file.content;
        if content.is_empty() {
            return None;
        }

        let mut anchor = self.offset.min(content.len());
        while !content.is_char_boundary(anchor) {
            anchor -= 1;
        }

        // Move backward
        let mut start_offset = anchor;
        let mut ctx_chars = 0;
        let mut ctx_lines = 0;
        for (idx, ch) in content[..anchor].char_indices().rev() {
            if ctx_chars >= max_chars {
                break;
            }
            start_offset = idx;
            ctx_chars += 1;
            if ch == chars::NEWLINE {
                ctx_lines += 1;
                if ctx_lines >= max_lines {
                    break;
                }
            }
        }

        // Move forward
        let mut end_offset = anchor;
        ctx_chars = 0;
        ctx_lines = 0;
        for (idx, ch) in content[anchor..].char_indices() {
            if ctx_chars >= max_chars {
                break;
            }
            end_offset = anchor + idx + ch.len_utf8();
            ctx_chars += 1;
            if ch == chars::NEWLINE {
                ctx_lines += 1;
                if ctx_lines >= max_lines {
                    break;
                }
            }
        }

        let before = content[start_offset..anchor].to_string();
        let after = content[anchor..end_offset].to_string();
        Some((before, after))
    }
}

impl std::fmt::Display for ParseLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}:{}", self.file.url, self.line, self.col)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseSourceSpan {
    pub start: ParseLocation,
    pub end: ParseLocation,
    pub details: Option<String>,
}

impl ParseSourceSpan {
    pub fn new(start: ParseLocation, end: ParseLocation) -> Self {
        ParseSourceSpan { start, end, details: None }
    }

    pub fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }
}

/// Displays as the source text covered by the span.
impl std::fmt::Display for ParseSourceSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.start.file.content[self.start.offset..self.end.offset])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseErrorLevel {
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseError {
    pub span: ParseSourceSpan,
    pub msg: String,
    pub level: ParseErrorLevel,
}

impl ParseError {
    pub fn new(span: ParseSourceSpan, msg: String) -> Self {
        ParseError {
            span,
            msg,
            level: ParseErrorLevel::Error,
        }
    }

    pub fn contextual_message(&self) -> String {
        if let Some((before, after)) = self.span.start.get_context(100, 3) {
            let level_str = match self.level {
                ParseErrorLevel::Warning => "WARNING",
                ParseErrorLevel::Error => "ERROR",
            };
            format!("{} (\"{}[{} ->]{}\")", self.msg, before, level_str, after)
        } else {
            self.msg.clone()
        }
    }

}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let details = self
            .span
            .details
            .as_ref()
            .map(|d| format!(", {}", d))
            .unwrap_or_default();
        write!(
            f,
            "{}: {}{}",
            self.contextual_message(),
            self.span.start,
            details
        )
    }
}
