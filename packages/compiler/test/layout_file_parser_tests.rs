//! End-to-end tests for bundle extraction.

use std::path::Path;

use databinding_compiler::store::Location;
use databinding_compiler::{ErrorCode, LayoutFileParser, NoOriginalFileLookup, ProcessedLayout};

fn parse(source: &str, file: &str) -> databinding_compiler::Result<Option<ProcessedLayout>> {
    LayoutFileParser::new().parse(
        source,
        Path::new(file),
        "com.example.app",
        &NoOriginalFileLookup,
    )
}

fn parse_ok(source: &str, file: &str) -> ProcessedLayout {
    parse(source, file)
        .expect("parse failed")
        .expect("not a binding layout")
}

/// Slice an inclusive single-line location out of the source.
fn slice(source: &str, location: &Location) -> String {
    assert_eq!(location.start_line, location.end_line);
    let line = source.split('\n').nth(location.start_line).unwrap();
    line.chars()
        .skip(location.start_offset)
        .take(location.end_offset + 1 - location.start_offset)
        .collect()
}

const MAIN: &str = "\
<layout xmlns:android=\"http://schemas.android.com/apk/res/android\">
    <data class=\"MainBinding\">
        <import type=\"android.view.View\"/>
        <variable name=\"user\" type=\"com.example.User\"/>
    </data>
    <LinearLayout android:orientation=\"vertical\">
        <TextView android:id=\"@+id/name\" android:text=\"@{user.name}\"/>
        <include layout=\"@layout/header\"/>
        <ProgressBar android:id=\"@+id/spinner\"/>
    </LinearLayout>
</layout>";

#[test]
fn non_binding_layout_is_skipped() {
    let result = parse("<LinearLayout/>", "res/layout/plain.xml").unwrap();
    assert!(result.is_none());
}

#[test]
fn extracts_the_data_block() {
    let processed = parse_ok(MAIN, "res/layout/main_activity.xml");
    let bundle = &processed.bundle;
    assert_eq!(bundle.file_name, "main_activity");
    assert_eq!(bundle.directory, "layout");
    assert_eq!(bundle.module_package, "com.example.app");
    assert!(!bundle.is_merge);

    assert_eq!(bundle.binding_class.as_deref(), Some("MainBinding"));
    let class_location = bundle.binding_class_location.unwrap();
    assert_eq!(slice(MAIN, &class_location), "MainBinding");

    assert_eq!(bundle.imports["View"].type_name, "android.view.View");
    let user = &bundle.variables["user"];
    assert_eq!(user.type_name, "com.example.User");
    assert!(user.declared);
    assert_eq!(user.location.unwrap().start_line, 3);
}

#[test]
fn collects_targets_in_document_order() {
    let processed = parse_ok(MAIN, "res/layout/main_activity.xml");
    let targets = &processed.bundle.binding_targets;
    assert_eq!(targets.len(), 4);

    assert_eq!(targets[0].view.as_deref(), Some("LinearLayout"));
    assert_eq!(targets[0].tag.as_deref(), Some("layout/main_activity_0"));
    assert!(targets[0].bindings.is_empty());

    assert_eq!(targets[1].view.as_deref(), Some("TextView"));
    assert_eq!(targets[1].id.as_deref(), Some("@+id/name"));
    assert_eq!(targets[1].tag.as_deref(), Some("binding_1"));

    // The include inherits its host's tag and records the included layout.
    assert_eq!(targets[2].view, None);
    assert_eq!(targets[2].include.as_deref(), Some("header"));
    assert_eq!(targets[2].tag.as_deref(), Some("layout/main_activity_0"));

    // Id-only elements come last and stay untagged.
    assert_eq!(targets[3].view.as_deref(), Some("ProgressBar"));
    assert_eq!(targets[3].id.as_deref(), Some("@+id/spinner"));
    assert_eq!(targets[3].tag, None);
}

#[test]
fn binding_locations_address_the_expression_body() {
    let processed = parse_ok(MAIN, "res/layout/main_activity.xml");
    let binding = &processed.bundle.binding_targets[1].bindings[0];
    assert_eq!(binding.name, "android:text");
    assert_eq!(binding.expr, "user.name");
    assert!(!binding.is_two_way);
    assert_eq!(slice(MAIN, &binding.value_location.unwrap()), "user.name");
    assert_eq!(
        slice(MAIN, &binding.location.unwrap()),
        "android:text=\"@{user.name}\""
    );
}

#[test]
fn stripped_output_carries_the_minted_tags() {
    let processed = parse_ok(MAIN, "res/layout/main_activity.xml");
    for target in &processed.bundle.binding_targets {
        if let Some(tag) = &target.tag {
            if target.include.is_none() {
                assert!(
                    processed.stripped.contains(&format!("android:tag=\"{}\"", tag)),
                    "tag {} missing from stripped output",
                    tag
                );
            }
        }
    }
    assert!(!processed.stripped.contains("@{"));
    assert!(!processed.stripped.contains("<data"));
}

#[test]
fn merge_roots_mark_the_bundle_and_tag_direct_children() {
    let source = "<layout><merge><TextView android:text=\"@{a}\"/><Button android:text=\"@{b}\"/></merge></layout>";
    let processed = parse_ok(source, "res/layout/m.xml");
    assert!(processed.bundle.is_merge);
    let tags: Vec<Option<&str>> = processed
        .bundle
        .binding_targets
        .iter()
        .map(|t| t.tag.as_deref())
        .collect();
    assert_eq!(tags, vec![Some("layout/m_0"), Some("layout/m_1")]);
}

#[test]
fn two_way_expressions_are_flagged() {
    let source = "<layout><EditText android:text=\"@={user.name}\"/></layout>";
    let processed = parse_ok(source, "res/layout/e.xml");
    let binding = &processed.bundle.binding_targets[0].bindings[0];
    assert!(binding.is_two_way);
    assert_eq!(binding.expr, "user.name");
}

#[test]
fn literal_tag_is_preserved_as_original_tag() {
    let source = "<layout><TextView android:tag=\"keep\" android:text=\"@{a}\"/></layout>";
    let processed = parse_ok(source, "res/layout/t.xml");
    let target = &processed.bundle.binding_targets[0];
    assert_eq!(target.original_tag.as_deref(), Some("keep"));
    assert_eq!(target.tag.as_deref(), Some("layout/t_0"));
}

#[test]
fn entity_escapes_decode_in_expressions() {
    let source = "<layout><TextView android:visibility=\"@{age &lt; 18 ? 8 : 0}\"/></layout>";
    let processed = parse_ok(source, "res/layout/t.xml");
    let binding = &processed.bundle.binding_targets[0].bindings[0];
    assert_eq!(binding.expr, "age < 18 ? 8 : 0");
}

#[test]
fn fragments_with_expressions_are_rejected() {
    let source = "<layout><FrameLayout><fragment android:text=\"@{a}\"/></FrameLayout></layout>";
    let err = parse(source, "res/layout/f.xml").unwrap_err();
    assert_eq!(err.code, ErrorCode::FragmentWithBindings);
}

#[test]
fn plain_fragments_are_ignored() {
    let source = "<layout><FrameLayout><fragment android:name=\"F\"/></FrameLayout></layout>";
    let processed = parse_ok(source, "res/layout/f.xml");
    assert_eq!(processed.bundle.binding_targets.len(), 1);
    assert_eq!(
        processed.bundle.binding_targets[0].view.as_deref(),
        Some("FrameLayout")
    );
}

#[test]
fn include_requires_a_layout_reference() {
    let missing = "<layout><L><include/></L></layout>";
    let err = parse(missing, "res/layout/i.xml").unwrap_err();
    assert_eq!(err.code, ErrorCode::IncludeMissingLayout);

    let bad = "<layout><L><include layout=\"header\"/></L></layout>";
    let err = parse(bad, "res/layout/i.xml").unwrap_err();
    assert_eq!(err.code, ErrorCode::IncludeBadLayoutPrefix);
}

#[test]
fn includes_under_a_merge_root_are_rejected() {
    let source = "<layout><merge><include layout=\"@layout/x\"/></merge></layout>";
    let err = parse(source, "res/layout/m.xml").unwrap_err();
    assert_eq!(err.code, ErrorCode::IncludeInsideMerge);
}

#[test]
fn view_elements_need_a_class() {
    let source = "<layout><view android:text=\"@{a}\"/></layout>";
    let err = parse(source, "res/layout/v.xml").unwrap_err();
    assert_eq!(err.code, ErrorCode::ViewMissingClass);
}

#[test]
fn view_class_becomes_the_target_view() {
    let source =
        "<layout><view class=\"com.example.Gauge\" android:text=\"@{a}\"/></layout>";
    let processed = parse_ok(source, "res/layout/v.xml");
    assert_eq!(
        processed.bundle.binding_targets[0].view.as_deref(),
        Some("com.example.Gauge")
    );
}

#[test]
fn data_block_validation() {
    let no_type = "<layout><data><import alias=\"V\"/></data><L/></layout>";
    let err = parse(no_type, "res/layout/d.xml").unwrap_err();
    assert_eq!(err.code, ErrorCode::ImportMissingType);

    let no_var_type = "<layout><data><variable name=\"x\"/></data><L/></layout>";
    let err = parse(no_var_type, "res/layout/d.xml").unwrap_err();
    assert_eq!(err.code, ErrorCode::VariableMissingType);
    assert!(err.file.as_deref().unwrap().contains("d.xml"));
    assert!(err.location.is_some());

    let no_var_name = "<layout><data><variable type=\"X\"/></data><L/></layout>";
    let err = parse(no_var_name, "res/layout/d.xml").unwrap_err();
    assert_eq!(err.code, ErrorCode::VariableMissingName);
}

#[test]
fn structural_validation() {
    let two_data = "<layout><data/><data/><L/></layout>";
    let err = parse(two_data, "res/layout/s.xml").unwrap_err();
    assert_eq!(err.code, ErrorCode::MultipleDataNodes);

    let two_roots = "<layout><L/><L/></layout>";
    let err = parse(two_roots, "res/layout/s.xml").unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingOrMultipleViewRoot);

    let empty = "<layout></layout>";
    let err = parse(empty, "res/layout/s.xml").unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingOrMultipleViewRoot);
}

#[test]
fn malformed_expression_shape_is_rejected() {
    // A literal android:tag that merely opens an expression marker.
    let source = "<layout><TextView android:tag=\"@{oops\" android:text=\"@{a}\"/></layout>";
    let err = parse(source, "res/layout/t.xml").unwrap_err();
    assert_eq!(err.code, ErrorCode::MalformedExpression);
}

#[test]
fn empty_expression_markers_are_not_bindings() {
    let source = "<layout><TextView android:text=\"@{}\"/></layout>";
    let processed = parse_ok(source, "res/layout/t.xml");
    assert!(processed.bundle.binding_targets[0].bindings.is_empty());
    // The attribute survives the rewrite untouched.
    assert!(processed.stripped.contains("android:text=\"@{}\""));
}

#[test]
fn bundle_serializes_to_camel_case_json() {
    let processed = parse_ok(MAIN, "res/layout/main_activity.xml");
    let json = serde_json::to_value(&processed.bundle).unwrap();
    assert_eq!(json["fileName"], "main_activity");
    assert_eq!(json["isMerge"], false);
    assert_eq!(json["bindingTargets"][1]["bindings"][0]["isTwoWay"], false);
    assert_eq!(json["variables"]["user"]["type"], "com.example.User");
}
