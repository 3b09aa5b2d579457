//! Resource Bundle
//!
//! The serializable manifest produced for each binding layout: imports,
//! variables and bound view targets, all carrying zero-based source
//! locations. The bundle is handed to downstream code generation, so every
//! field round-trips through serde.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ml_parser::Element;
use crate::parse_util::ParseSourceSpan;

/// A zero-based source region. `end_offset` is the column of the last
/// character, inclusive, matching how downstream tooling addresses ranges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub start_line: usize,
    pub start_offset: usize,
    pub end_line: usize,
    pub end_offset: usize,
}

impl Location {
    pub fn new(start_line: usize, start_offset: usize, end_line: usize, end_offset: usize) -> Self {
        Location { start_line, start_offset, end_line, end_offset }
    }

    /// Convert a lexer span (exclusive end) into an inclusive-end Location.
    pub fn from_span(span: &ParseSourceSpan) -> Self {
        Location {
            start_line: span.start.line,
            start_offset: span.start.col,
            end_line: span.end.line,
            end_offset: span.end.col.saturating_sub(1),
        }
    }

    pub fn from_element(element: &Element) -> Self {
        Location::from_span(&element.source_span)
    }
}

/// An `<import>` entry of the data block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Import {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub location: Option<Location>,
}

/// A `<variable>` entry of the data block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub location: Option<Location>,
    /// True when the variable was written by the user, as opposed to ones
    /// synthesized while merging bundles.
    pub declared: bool,
}

/// One expression attribute on a bound element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Binding {
    pub name: String,
    pub expr: String,
    pub is_two_way: bool,
    pub location: Option<Location>,
    pub value_location: Option<Location>,
}

/// A view element that participates in binding: either it carries
/// expressions, hosts an `<include>`, or merely has an id worth exposing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingTarget {
    pub id: Option<String>,
    pub view: Option<String>,
    pub used: bool,
    pub tag: Option<String>,
    pub original_tag: Option<String>,
    pub location: Option<Location>,
    pub include: Option<String>,
    pub bindings: Vec<Binding>,
}

impl BindingTarget {
    pub fn add_binding(
        &mut self,
        name: String,
        expr: String,
        is_two_way: bool,
        location: Location,
        value_location: Location,
    ) {
        self.bindings.push(Binding {
            name,
            expr,
            is_two_way,
            location: Some(location),
            value_location: Some(value_location),
        });
    }

    pub fn set_included_layout(&mut self, layout_name: String) {
        self.include = Some(layout_name);
    }
}

/// The manifest for a single binding layout file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutFileBundle {
    pub absolute_file_path: String,
    /// File name without its extension.
    pub file_name: String,
    /// Name of the containing resource directory, e.g. `layout-land`.
    pub directory: String,
    pub module_package: String,
    pub is_merge: bool,
    pub binding_class: Option<String>,
    pub binding_class_location: Option<Location>,
    pub imports: IndexMap<String, Import>,
    pub variables: IndexMap<String, Variable>,
    pub binding_targets: Vec<BindingTarget>,
}

impl LayoutFileBundle {
    pub fn new(
        absolute_file_path: String,
        file_name: String,
        directory: String,
        module_package: String,
        is_merge: bool,
    ) -> Self {
        LayoutFileBundle {
            absolute_file_path,
            file_name,
            directory,
            module_package,
            is_merge,
            binding_class: None,
            binding_class_location: None,
            imports: IndexMap::new(),
            variables: IndexMap::new(),
            binding_targets: Vec::new(),
        }
    }

    /// Imports are keyed by alias; a later import with the same alias wins.
    pub fn add_import(&mut self, alias: String, type_name: String, location: Location) {
        self.imports.insert(
            alias.clone(),
            Import {
                name: alias,
                type_name,
                location: Some(location),
            },
        );
    }

    /// Variables are keyed by name; a later variable with the same name wins.
    pub fn add_variable(
        &mut self,
        name: String,
        type_name: String,
        location: Location,
        declared: bool,
    ) {
        self.variables.insert(
            name.clone(),
            Variable {
                name,
                type_name,
                location: Some(location),
                declared,
            },
        );
    }

    pub fn set_binding_class(&mut self, name: String, location: Location) {
        self.binding_class = Some(name);
        self.binding_class_location = Some(location);
    }

    /// The simple name of the generated binding class: the `class` override
    /// from the data block when present, otherwise derived from the file
    /// name (`main_activity` -> `MainActivityBinding`).
    pub fn binding_class_name(&self) -> String {
        match &self.binding_class {
            Some(name) => name.clone(),
            None => format!("{}Binding", crate::util::to_class_name(&self.file_name)),
        }
    }

    pub fn create_binding_target(
        &mut self,
        id: Option<String>,
        view_name: Option<String>,
        used: bool,
        tag: Option<String>,
        original_tag: Option<String>,
        location: Location,
    ) -> &mut BindingTarget {
        self.binding_targets.push(BindingTarget {
            id,
            view: view_name,
            used,
            tag,
            original_tag,
            location: Some(location),
            include: None,
            bindings: Vec::new(),
        });
        self.binding_targets.last_mut().unwrap()
    }
}
