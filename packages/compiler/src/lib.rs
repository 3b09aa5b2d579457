#![deny(clippy::all)]

//! Layout binding compiler.
//!
//! Turns an annotated layout document into two artifacts:
//!
//! * a stripped copy of the source with the binding scaffolding blanked out
//!   and stable `android:tag` markers planted on bound views, safe to hand
//!   to the stock resource pipeline, and
//! * a [`store::LayoutFileBundle`] manifest describing the variables,
//!   imports and expression bindings the stripped file no longer carries.
//!
//! Both passes share one cursor-based XML front end that records exact
//! line/column spans, because the rewriter edits the original text in place
//! and the bundle's locations must survive round-tripping through build
//! tooling.

pub mod chars;
pub mod expression_parser;
pub mod ml_parser;
pub mod parse_util;
pub mod processing;
pub mod store;
pub mod util;
pub mod xml_editor;

pub use processing::{BindingError, ErrorCode, ErrorKind, Result};
pub use store::{
    LayoutFileBundle, LayoutFileParser, NoOriginalFileLookup, OriginalFileLookup,
    ProcessedLayout,
};
