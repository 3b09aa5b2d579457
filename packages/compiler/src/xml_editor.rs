//! Xml Editor
//!
//! Rewrites an annotated layout document into plain markup: removes the
//! `<layout>` wrapper and the `<data>` subtree, replaces binding expression
//! attributes with tag markers or resolved default values, and migrates the
//! wrapper's attributes onto the view root. Outside the edited regions the
//! output is byte-faithful to the input; edited regions are padded with
//! spaces so that every surviving character keeps its original line and
//! column.

use crate::expression_parser::parse_default_value;
use crate::ml_parser::{Attribute, Element, Node, XmlParser};
use crate::parse_util::ParseLocation;
use crate::processing::error::{BindingError, ErrorCode, Result};
use crate::util::unescape_xml;

pub const PREFIX_ONE_WAY: &str = "@{";
pub const PREFIX_TWO_WAY: &str = "@={";

/// A zero-based line/column pair addressing a character in the line array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub char_index: usize,
}

impl Position {
    pub fn new(line: usize, char_index: usize) -> Self {
        Position { line, char_index }
    }
}

fn to_position(location: &ParseLocation) -> Position {
    Position::new(location.line, location.col)
}

/// A tag insertion that could not be placed over an expression attribute
/// and must be spliced into the element's open tag instead. Elements are
/// identified by their start offset, which is unique within a document.
struct PendingTag<'a> {
    text: String,
    element: &'a Element,
}

impl<'a> PendingTag<'a> {
    fn element_key(&self) -> usize {
        self.element.source_span.start.offset
    }
}

/// Strip the binding scaffolding out of `source`. Returns `None` when the
/// document is not a binding layout (its root is not `<layout>`), otherwise
/// the rewritten document.
pub fn strip(source: &str, new_tag: &str, file_url: &str) -> Result<Option<String>> {
    let parse_result = XmlParser::new().parse(source, file_url);
    if let Some(error) = parse_result.errors.first() {
        return Err(BindingError::new(
            ErrorCode::MalformedDocument,
            error.to_string(),
        ));
    }

    let Some(root) = parse_result.root_nodes.iter().find_map(Node::as_element) else {
        return Ok(None);
    };
    if root.name != "layout" {
        return Ok(None);
    }

    let data_nodes: Vec<&Element> = root.child_elements().filter(|e| e.name == "data").collect();
    if data_nodes.len() > 1 {
        return Err(BindingError::new(
            ErrorCode::MultipleDataNodes,
            "Multiple binding data tags. Expecting a maximum of one.",
        ));
    }

    let mut lines: Vec<String> = split_lines(source);

    for data_node in &data_nodes {
        replace(
            &mut lines,
            to_position(&data_node.source_span.start),
            to_position(&data_node.source_span.end),
            "",
        );
    }

    let layout_nodes: Vec<&Element> = root.child_elements().filter(|e| e.name != "data").collect();
    if layout_nodes.len() != 1 {
        return Err(BindingError::new(
            ErrorCode::MissingOrMultipleViewRoot,
            format!(
                "Only one view element is allowed under the layout wrapper, found {}",
                layout_nodes.len()
            ),
        ));
    }
    let layout_node = layout_nodes[0];

    let mut pending: Vec<PendingTag> = Vec::new();
    recurse_replace(layout_node, &mut lines, &mut pending, Some(new_tag), 0);

    // Blank out the wrapper's open tag...
    replace(
        &mut lines,
        to_position(&root.source_span.start),
        to_position(&root.start_source_span.end),
        "",
    );
    // ...and its closing tag.
    if let Some(end_span) = &root.end_source_span {
        replace(
            &mut lines,
            to_position(&end_span.start),
            to_position(&end_span.end),
            "",
        );
    }

    // The wrapper's attributes (xmlns declarations and the like) move to the
    // view root. If the root already has a pending tag insertion the
    // attributes ride along with it, otherwise they get their own entry.
    let mut root_attributes = String::new();
    for attr in &root.attrs {
        root_attributes.push(' ');
        root_attributes.push_str(&source[attr.source_span.start.offset..attr.source_span.end.offset]);
    }
    if !root_attributes.is_empty() {
        let root_key = layout_node.source_span.start.offset;
        match pending.iter_mut().find(|p| p.element_key() == root_key) {
            Some(entry) => entry.text.push_str(&root_attributes),
            None => pending.push(PendingTag {
                text: root_attributes,
                element: layout_node,
            }),
        }
    }

    // Apply insertions in reverse document order so earlier positions stay
    // valid while later ones are edited.
    pending.sort_by(|a, b| {
        let pa = to_position(&a.element.source_span.start);
        let pb = to_position(&b.element.source_span.start);
        pb.cmp(&pa)
    });
    for entry in &pending {
        let mut position = end_tag_position(entry.element)?;
        fix_position(&lines, &mut position);
        let spliced = splice(&lines[position.line], position.char_index, &entry.text);
        lines[position.line] = spliced;
    }

    Ok(Some(lines.join("\n")))
}

/// Walk the view tree replacing expression attributes. Returns the next
/// binding index. `new_tag` is the document-id tag prefix, present only for
/// the root invocation and, through a merge root, for its direct children.
fn recurse_replace<'a>(
    node: &'a Element,
    lines: &mut [String],
    pending: &mut Vec<PendingTag<'a>>,
    new_tag: Option<&str>,
    binding_index: usize,
) -> usize {
    let mut next_binding_index = binding_index;
    let is_merge = node.name == "merge";
    let contains_include = node.child_elements().any(|c| c.name == "include");

    if !is_merge && (has_expression_attributes(node) || new_tag.is_some() || contains_include) {
        let mut tag = String::new();
        if let Some(prefix) = new_tag {
            tag = format!("android:tag=\"{}_{}\"", prefix, binding_index);
            next_binding_index += 1;
        } else if node.name != "include" {
            tag = format!("android:tag=\"binding_{}\"", binding_index);
            next_binding_index += 1;
        }

        for attr in expression_attributes(node) {
            let start = to_position(&attr.source_span.start);
            let end = to_position(&attr.source_span.end);
            if let Some(default_value) = default_replacement(attr) {
                let replacement = format!("{}=\"{}\"", attr.name, default_value);
                replace(lines, start, end, &replacement);
            } else if replace(lines, start, end, &tag) {
                tag = String::new();
            }
        }

        if !tag.is_empty() {
            pending.push(PendingTag {
                text: format!(" {}", tag),
                element: node,
            });
        }
    }

    let next_tag = if binding_index == 0 && is_merge {
        new_tag
    } else {
        None
    };
    for child in node.child_elements() {
        next_binding_index = recurse_replace(child, lines, pending, next_tag, next_binding_index);
    }
    next_binding_index
}

/// The attributes the rewriter must touch: every binding expression, plus
/// `android:tag` itself since the marker will overwrite it.
pub fn expression_attributes(node: &Element) -> impl Iterator<Item = &Attribute> {
    node.attrs
        .iter()
        .filter(|attr| attr.name == "android:tag" || is_expression_text(&attr.value))
}

/// Whether the element carries at least one real binding expression. A
/// literal `android:tag` alone does not count.
pub fn has_expression_attributes(node: &Element) -> bool {
    let mut count = 0;
    for attr in expression_attributes(node) {
        count += 1;
        if count > 1 {
            return true;
        }
        if is_expression_text(&attr.value) {
            return true;
        }
    }
    false
}

/// Check the shape of a raw attribute value (quotes included): it must look
/// like `"@{...}"` or `"@={...}"`.
pub fn is_expression_text(value: &str) -> bool {
    let chars: Vec<char> = value.chars().collect();
    // `"@{}"` is length 5; an expression needs at least one body character.
    if chars.len() <= 5 {
        return false;
    }
    if chars[chars.len() - 2] != '}' {
        return false;
    }
    (chars[1] == '@' && chars[2] == '{')
        || (chars[1] == '@' && chars[2] == '=' && chars[3] == '{')
}

/// Resolve the `default=` literal of an expression attribute, if present.
fn default_replacement(attr: &Attribute) -> Option<String> {
    let inner = attr.unquoted();
    let prefix_len = if inner.starts_with(PREFIX_TWO_WAY) {
        PREFIX_TWO_WAY.len()
    } else if inner.starts_with(PREFIX_ONE_WAY) {
        PREFIX_ONE_WAY.len()
    } else {
        return None;
    };
    if !inner.ends_with('}') {
        return None;
    }
    let expression = unescape_xml(&inner[prefix_len..inner.len() - 1]);
    parse_default_value(&expression)
}

/// Where a pending tag can be spliced into the element's open tag: just
/// before `/>` for an empty element, just before `>` otherwise.
fn end_tag_position(element: &Element) -> Result<Position> {
    let end = &element.start_source_span.end;
    if element.is_self_closing {
        if end.col < 2 {
            return Err(BindingError::new(
                ErrorCode::RewriteGeometry,
                format!("Cannot insert a tag into element \"{}\"", element.name),
            ));
        }
        Ok(Position::new(end.line, end.col - 2))
    } else {
        if end.col < 1 {
            return Err(BindingError::new(
                ErrorCode::RewriteGeometry,
                format!("Cannot insert a tag into element \"{}\"", element.name),
            ));
        }
        Ok(Position::new(end.line, end.col - 1))
    }
}

/// Replace the span `[start, end)` with `text`, padding with spaces so that
/// surviving characters keep their positions. Returns false when the span is
/// a single line too narrow for `text`; the span is still blanked and the
/// caller must place `text` elsewhere.
fn replace(lines: &mut [String], mut start: Position, mut end: Position, text: &str) -> bool {
    fix_position(lines, &mut start);
    fix_position(lines, &mut end);
    if start.line != end.line {
        let start_line = &lines[start.line];
        let prefix: String = start_line.chars().take(start.char_index).collect();
        lines[start.line] = format!("{}{}", prefix, text);
        for i in start.line + 1..end.line {
            let len = lines[i].chars().count();
            let blanked = replace_with_spaces(&lines[i], 0, len.saturating_sub(1));
            lines[i] = blanked;
        }
        let blanked = replace_with_spaces(&lines[end.line], 0, end.char_index.saturating_sub(1));
        lines[end.line] = blanked;
        true
    } else {
        let text_len = text.chars().count();
        let width = end.char_index.saturating_sub(start.char_index);
        if width >= text_len {
            let line = &lines[start.line];
            let end_text_index = start.char_index + text_len;
            let replaced = replace_range(line, start.char_index, end_text_index, text);
            lines[start.line] =
                replace_with_spaces(&replaced, end_text_index, end.char_index.saturating_sub(1));
            true
        } else {
            let blanked = replace_with_spaces(
                &lines[start.line],
                start.char_index,
                end.char_index.saturating_sub(1),
            );
            lines[start.line] = blanked;
            false
        }
    }
}

/// Split the way line-oriented readers do: terminators are dropped, and a
/// trailing carriage return goes with them.
fn split_lines(source: &str) -> Vec<String> {
    source.split('\n').map(|l| l.trim_end_matches('\r').to_string()).collect()
}

/// Columns come from a lexer that counts the carriage return the line
/// splitter dropped; walk back inside the line if needed.
fn fix_position(lines: &[String], position: &mut Position) {
    if position.line >= lines.len() {
        position.line = lines.len().saturating_sub(1);
    }
    let len = lines[position.line].chars().count();
    while position.char_index > len {
        position.char_index -= 1;
    }
}

/// Blank the inclusive char range `[begin, end]` with spaces.
fn replace_with_spaces(line: &str, begin: usize, end: usize) -> String {
    line.chars()
        .enumerate()
        .map(|(i, ch)| if i >= begin && i <= end { ' ' } else { ch })
        .collect()
}

/// Substitute the char range `[start, end)` with `text`.
fn replace_range(line: &str, start: usize, end: usize, text: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let mut out: String = chars[..start.min(chars.len())].iter().collect();
    out.push_str(text);
    out.extend(chars[end.min(chars.len())..].iter());
    out
}

/// Insert `text` at the char index, shifting the tail right.
fn splice(line: &str, char_index: usize, text: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let idx = char_index.min(chars.len());
    let mut out: String = chars[..idx].iter().collect();
    out.push_str(text);
    out.extend(chars[idx..].iter());
    out
}
