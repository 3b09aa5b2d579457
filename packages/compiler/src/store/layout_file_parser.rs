//! Layout File Parser
//!
//! The front door of the compiler: classifies a layout document, extracts
//! its data block and bound elements into a [`LayoutFileBundle`], and runs
//! the source rewriter to produce the stripped document.

use std::path::{Path, PathBuf};

use crate::ml_parser::{Element, Node, XmlParser};
use crate::processing::error::{BindingError, ErrorCode, Result};
use crate::processing::scope::Scope;
use crate::store::resource_bundle::{LayoutFileBundle, Location};
use crate::util::{strip_extension, unescape_xml};
use crate::xml_editor;

const LAYOUT_PREFIX: &str = "@layout/";
const ANDROID_VIEW: &str = "android.view.View";

/// Maps a processed file back to the path the user actually edited, so
/// diagnostics point at the original source. Build systems that copy
/// layouts into intermediate directories implement this.
pub trait OriginalFileLookup {
    fn original_file_for(&self, file: &Path) -> Option<PathBuf>;
}

/// Lookup that performs no mapping.
pub struct NoOriginalFileLookup;

impl OriginalFileLookup for NoOriginalFileLookup {
    fn original_file_for(&self, _file: &Path) -> Option<PathBuf> {
        None
    }
}

/// Both outputs for one binding layout.
#[derive(Debug)]
pub struct ProcessedLayout {
    pub bundle: LayoutFileBundle,
    pub stripped: String,
}

pub struct LayoutFileParser;

impl LayoutFileParser {
    pub fn new() -> Self {
        LayoutFileParser
    }

    /// Process one layout document. Returns `None` when the document is not
    /// a binding layout (its root element is not `<layout>`); such files
    /// pass through the build untouched.
    pub fn parse(
        &self,
        source: &str,
        input_file: &Path,
        package_name: &str,
        lookup: &dyn OriginalFileLookup,
    ) -> Result<Option<ProcessedLayout>> {
        let original_file = lookup
            .original_file_for(input_file)
            .unwrap_or_else(|| input_file.to_path_buf());
        let original_path = original_file.display().to_string();
        let _scope = Scope::enter_file(original_path.clone());

        let file_name = input_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_name_no_ext = strip_extension(&file_name).to_string();
        let directory = input_file
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let new_tag = format!("{}/{}", directory, file_name_no_ext);

        let Some(stripped) = xml_editor::strip(source, &new_tag, &original_path)? else {
            return Ok(None);
        };
        let bundle = self.parse_original_xml(
            source,
            &original_path,
            package_name,
            &file_name_no_ext,
            &directory,
            &new_tag,
        )?;
        Ok(bundle.map(|bundle| ProcessedLayout { bundle, stripped }))
    }

    /// Build the bundle from the original (annotated) document.
    pub fn parse_original_xml(
        &self,
        source: &str,
        url: &str,
        package_name: &str,
        file_name_no_ext: &str,
        directory: &str,
        new_tag: &str,
    ) -> Result<Option<LayoutFileBundle>> {
        let parse_result = XmlParser::new().parse(source, url);
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

        let data_node = get_data_node(root)?;
        let root_view = get_view_node(root)?;
        if has_merge_include(root_view) {
            return Err(BindingError::new(
                ErrorCode::IncludeInsideMerge,
                "<include> elements are not supported as direct children of <merge> elements",
            ));
        }
        let is_merge = root_view.name == "merge";

        let mut bundle = LayoutFileBundle::new(
            url.to_string(),
            file_name_no_ext.to_string(),
            directory.to_string(),
            package_name.to_string(),
            is_merge,
        );
        if let Some(data) = data_node {
            self.parse_data(&mut bundle, data)?;
        }
        self.parse_expressions(&mut bundle, root_view, is_merge, new_tag)?;
        Ok(Some(bundle))
    }

    fn parse_data(&self, bundle: &mut LayoutFileBundle, data: &Element) -> Result<()> {
        for import in data.child_elements().filter(|e| e.name == "import") {
            let location = Location::from_element(import);
            let _scope = Scope::enter_location(location);
            let type_name = attribute_value(import, "type").unwrap_or_default();
            if type_name.trim().is_empty() {
                return Err(BindingError::new(
                    ErrorCode::ImportMissingType,
                    "Type of an import cannot be empty",
                ));
            }
            let alias = attribute_value(import, "alias")
                .filter(|a| !a.trim().is_empty())
                .unwrap_or_else(|| {
                    type_name
                        .rsplit('.')
                        .next()
                        .unwrap_or_default()
                        .to_string()
                });
            bundle.add_import(alias, type_name, location);
        }

        for variable in data.child_elements().filter(|e| e.name == "variable") {
            let location = Location::from_element(variable);
            let _scope = Scope::enter_location(location);
            let Some(name) =
                attribute_value(variable, "name").filter(|n| !n.trim().is_empty())
            else {
                return Err(BindingError::new(
                    ErrorCode::VariableMissingName,
                    "Name of a variable cannot be empty",
                ));
            };
            let Some(type_name) =
                attribute_value(variable, "type").filter(|t| !t.trim().is_empty())
            else {
                return Err(BindingError::new(
                    ErrorCode::VariableMissingType,
                    format!("Type of variable {} cannot be empty", name),
                ));
            };
            bundle.add_variable(name, type_name, location, true);
        }

        if let Some(class_attr) = data.find_attribute("class") {
            let name = unescape_xml(class_attr.unquoted());
            let name = name.trim();
            if !name.is_empty() {
                if let Some(value_span) = &class_attr.value_span {
                    // The value span covers the quotes; the recorded
                    // location trims one character from each end.
                    let mut location = Location::from_span(value_span);
                    location.start_offset += 1;
                    location.end_offset = location.end_offset.saturating_sub(1);
                    bundle.set_binding_class(name.to_string(), location);
                }
            }
        }
        Ok(())
    }

    fn parse_expressions(
        &self,
        bundle: &mut LayoutFileBundle,
        root_view: &Element,
        is_merge: bool,
        new_tag: &str,
    ) -> Result<()> {
        let mut tag_number: usize = 0;
        let mut others: Vec<&Element> = Vec::new();

        if is_merge {
            // The merge root is never a target itself; its direct children
            // take its place as position-bound elements.
            for child in root_view.child_elements() {
                self.process_element(
                    bundle,
                    child,
                    true,
                    None,
                    new_tag,
                    &mut tag_number,
                    &mut others,
                )?;
            }
        } else {
            self.process_element(
                bundle,
                root_view,
                true,
                None,
                new_tag,
                &mut tag_number,
                &mut others,
            )?;
        }

        for element in others {
            let id = attribute_value(element, "android:id");
            let class_name = get_view_name(element)?;
            bundle.create_binding_target(
                id,
                Some(class_name),
                true,
                None,
                None,
                Location::from_element(element),
            );
        }
        Ok(())
    }

    /// Pre-order walk over the view tree. `position_bound` marks the view
    /// root and direct children of a merge root, which become targets even
    /// without expressions. `parent_tag` carries the tag minted for the
    /// nearest ancestor, which `<include>` elements inherit.
    fn process_element<'a>(
        &self,
        bundle: &mut LayoutFileBundle,
        element: &'a Element,
        position_bound: bool,
        parent_tag: Option<&str>,
        new_tag: &str,
        tag_number: &mut usize,
        others: &mut Vec<&'a Element>,
    ) -> Result<()> {
        let is_binding = position_bound
            || element.child_elements().any(|c| c.name == "include")
            || xml_editor::has_expression_attributes(element)
            || element.name == "include";

        let mut my_tag: Option<String> = None;

        if is_binding {
            let location = Location::from_element(element);
            let _scope = Scope::enter_location(location);

            if element.name == "fragment" {
                if xml_editor::has_expression_attributes(element) {
                    return Err(BindingError::new(
                        ErrorCode::FragmentWithBindings,
                        "Fragments do not support data binding expressions",
                    ));
                }
                // Fragments are opaque to binding; their subtrees are still
                // scanned below.
            } else {
                let id = attribute_value(element, "android:id");
                let original_tag = attribute_value(element, "android:tag");
                let mut view_name: Option<String> = None;
                let mut included_layout: Option<String> = None;
                let tag: Option<String>;

                if element.name == "include" {
                    let include_value =
                        attribute_value(element, "layout").unwrap_or_default();
                    if include_value.trim().is_empty() {
                        return Err(BindingError::new(
                            ErrorCode::IncludeMissingLayout,
                            "<include> elements must specify a layout",
                        ));
                    }
                    if !include_value.starts_with(LAYOUT_PREFIX) {
                        return Err(BindingError::new(
                            ErrorCode::IncludeBadLayoutPrefix,
                            format!(
                                "included value ({}) must start with {}",
                                include_value, LAYOUT_PREFIX
                            ),
                        ));
                    }
                    included_layout =
                        Some(include_value[LAYOUT_PREFIX.len()..].to_string());
                    let Some(parent) = parent_tag else {
                        return Err(BindingError::new(
                            ErrorCode::UntaggedParentForInclude,
                            "<include> elements must be hosted in a tagged view",
                        ));
                    };
                    tag = Some(parent.to_string());
                } else {
                    view_name = Some(get_view_name(element)?);
                    let minted = if position_bound {
                        format!("{}_{}", new_tag, *tag_number)
                    } else {
                        format!("binding_{}", *tag_number)
                    };
                    *tag_number += 1;
                    my_tag = Some(minted.clone());
                    tag = Some(minted);
                }

                let target = bundle.create_binding_target(
                    id,
                    view_name,
                    true,
                    tag,
                    original_tag,
                    location,
                );
                if let Some(layout_name) = included_layout {
                    target.set_included_layout(layout_name);
                }

                for attr in xml_editor::expression_attributes(element) {
                    let value = unescape_xml(attr.unquoted());
                    let is_two_way = value.starts_with(xml_editor::PREFIX_TWO_WAY);
                    let is_one_way = !is_two_way && value.starts_with(xml_editor::PREFIX_ONE_WAY);
                    if !(is_one_way || is_two_way) {
                        continue;
                    }
                    if !value.ends_with('}') {
                        return Err(BindingError::new(
                            ErrorCode::MalformedExpression,
                            format!("Expecting '}}' in expression '{}'", attr.value),
                        ));
                    }
                    let start_index = if is_two_way {
                        xml_editor::PREFIX_TWO_WAY.len()
                    } else {
                        xml_editor::PREFIX_ONE_WAY.len()
                    };
                    let stripped_value = value[start_index..value.len() - 1].to_string();

                    let attr_location = Location::from_span(&attr.source_span);
                    let (value_line, value_col) = attr
                        .value_span
                        .as_ref()
                        .map(|s| (s.start.line, s.start.col))
                        .unwrap_or((attr_location.start_line, attr_location.start_offset));
                    // Point at the expression body inside the raw value; if
                    // entity escapes keep it from matching literally, fall
                    // back to the position right after the opening marker.
                    let offset_in_raw = char_index_of(&attr.value, &stripped_value)
                        .unwrap_or(start_index + 1);
                    let value_location = Location::new(
                        value_line,
                        value_col + offset_in_raw,
                        attr_location.end_line,
                        attr_location.end_offset.saturating_sub(2),
                    );
                    target.add_binding(
                        attr.name.clone(),
                        stripped_value,
                        is_two_way,
                        attr_location,
                        value_location,
                    );
                }
            }
        } else if is_processed_element(&element.name)
            && attribute_value(element, "android:id").is_some()
        {
            others.push(element);
        }

        for child in element.child_elements() {
            self.process_element(
                bundle,
                child,
                false,
                my_tag.as_deref(),
                new_tag,
                tag_number,
                others,
            )?;
        }
        Ok(())
    }
}

impl Default for LayoutFileParser {
    fn default() -> Self {
        LayoutFileParser::new()
    }
}

fn get_data_node(root: &Element) -> Result<Option<&Element>> {
    let data_nodes: Vec<&Element> = root.child_elements().filter(|e| e.name == "data").collect();
    match data_nodes.len() {
        0 => Ok(None),
        1 => Ok(Some(data_nodes[0])),
        n => Err(BindingError::new(
            ErrorCode::MultipleDataNodes,
            format!("Multiple binding data tags. Expecting a maximum of one, found {}", n),
        )),
    }
}

fn get_view_node(root: &Element) -> Result<&Element> {
    let view_nodes: Vec<&Element> = root.child_elements().filter(|e| e.name != "data").collect();
    if view_nodes.len() != 1 {
        return Err(BindingError::new(
            ErrorCode::MissingOrMultipleViewRoot,
            format!(
                "Binding layouts must have exactly one view root, found {}",
                view_nodes.len()
            ),
        ));
    }
    Ok(view_nodes[0])
}

fn has_merge_include(root_view: &Element) -> bool {
    root_view.name == "merge" && root_view.child_elements().any(|e| e.name == "include")
}

/// The attribute's literal value: unquoted and entity-decoded.
fn attribute_value(element: &Element, name: &str) -> Option<String> {
    element
        .find_attribute(name)
        .map(|attr| unescape_xml(attr.unquoted()))
}

fn get_view_name(element: &Element) -> Result<String> {
    if element.name == "view" {
        return attribute_value(element, "class")
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| {
                BindingError::new(ErrorCode::ViewMissingClass, "No class attribute for 'view' node")
            });
    }
    if element.name == "include" && !xml_editor::has_expression_attributes(element) {
        return Ok(ANDROID_VIEW.to_string());
    }
    Ok(element.name.clone())
}

/// Elements worth exposing through their id alone: the generic `view` and
/// `include` forms, fully qualified class names, and conventionally
/// capitalized widget names.
fn is_processed_element(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    if name == "view" || name == "include" || name.contains('.') {
        return true;
    }
    name.chars().any(|c| c.is_uppercase())
}

fn char_index_of(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .find(needle)
        .map(|byte_idx| haystack[..byte_idx].chars().count())
}
