//! Processing Errors
//!
//! Every failure the compiler can produce for a document, tagged with a
//! stable code and the file/region context captured from the scope stack at
//! construction time. All errors are fatal for the current document; there
//! are no retries and nothing is swallowed.

use thiserror::Error;

use super::scope::Scope;
use crate::store::resource_bundle::Location;

/// Stable identifiers for every diagnostic the compiler can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// More than one `<data>` element under the `<layout>` wrapper.
    MultipleDataNodes,
    /// The wrapper did not contain exactly one view root.
    MissingOrMultipleViewRoot,
    /// An `<include>` appeared as a direct child of a `<merge>` root.
    IncludeInsideMerge,
    /// An `<include>` whose parent element was never assigned a tag.
    UntaggedParentForInclude,
    /// An `<include>` without a usable `layout` attribute.
    IncludeMissingLayout,
    /// An `<include>` whose `layout` attribute does not use the
    /// `@layout/` reference form.
    IncludeBadLayoutPrefix,
    /// A `<view>` element without a `class` attribute.
    ViewMissingClass,
    /// A `<fragment>` carrying binding expressions.
    FragmentWithBindings,
    /// An `<import>` without a `type` attribute.
    ImportMissingType,
    /// A `<variable>` without a `name` attribute.
    VariableMissingName,
    /// A `<variable>` without a `type` attribute.
    VariableMissingType,
    /// A binding expression missing its closing `}`.
    MalformedExpression,
    /// The markup itself failed to parse.
    MalformedDocument,
    /// A rewrite position that cannot be resolved against the source lines.
    RewriteGeometry,
}

/// Coarse grouping of error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Structural,
    Attribute,
    ExpressionShape,
    Parse,
    RewriteGeometry,
}

impl ErrorCode {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorCode::MultipleDataNodes
            | ErrorCode::MissingOrMultipleViewRoot
            | ErrorCode::IncludeInsideMerge
            | ErrorCode::UntaggedParentForInclude
            | ErrorCode::FragmentWithBindings => ErrorKind::Structural,
            ErrorCode::IncludeMissingLayout
            | ErrorCode::IncludeBadLayoutPrefix
            | ErrorCode::ViewMissingClass
            | ErrorCode::ImportMissingType
            | ErrorCode::VariableMissingName
            | ErrorCode::VariableMissingType => ErrorKind::Attribute,
            ErrorCode::MalformedExpression => ErrorKind::ExpressionShape,
            ErrorCode::MalformedDocument => ErrorKind::Parse,
            ErrorCode::RewriteGeometry => ErrorKind::RewriteGeometry,
        }
    }
}

/// A fatal diagnostic for the document being processed.
#[derive(Debug, Clone, Error)]
#[error("{message}{}", context_suffix(.file, .location))]
pub struct BindingError {
    pub code: ErrorCode,
    pub message: String,
    pub file: Option<String>,
    pub location: Option<Location>,
}

impl BindingError {
    /// Create an error, capturing the current scope's file and region.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        BindingError {
            code,
            message: message.into(),
            file: Scope::current_file(),
            location: Scope::current_location(),
        }
    }

    /// Create an error pinned to an explicit location, overriding whatever
    /// region the scope stack currently points at.
    pub fn at(code: ErrorCode, message: impl Into<String>, location: Location) -> Self {
        BindingError {
            code,
            message: message.into(),
            file: Scope::current_file(),
            location: Some(location),
        }
    }
}

fn context_suffix(file: &Option<String>, location: &Option<Location>) -> String {
    match (file, location) {
        (Some(file), Some(loc)) => format!(
            " (file: {}, line: {}, col: {})",
            file, loc.start_line, loc.start_offset
        ),
        (Some(file), None) => format!(" (file: {})", file),
        (None, Some(loc)) => format!(" (line: {}, col: {})", loc.start_line, loc.start_offset),
        (None, None) => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, BindingError>;
