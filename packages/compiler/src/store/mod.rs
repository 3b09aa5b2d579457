//! Store
//!
//! The serializable data model emitted for each binding layout and the
//! parser that populates it.

pub mod layout_file_parser;
pub mod resource_bundle;

pub use layout_file_parser::{
    LayoutFileParser, NoOriginalFileLookup, OriginalFileLookup, ProcessedLayout,
};
pub use resource_bundle::{
    Binding, BindingTarget, Import, LayoutFileBundle, Location, Variable,
};
