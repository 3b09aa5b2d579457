//! Tree builder integration tests.

use databinding_compiler::ml_parser::{Node, XmlParser};

#[test]
fn builds_a_nested_tree() {
    let result = XmlParser::new().parse(
        "<layout><data><variable name=\"u\" type=\"U\"/></data><FrameLayout><TextView/></FrameLayout></layout>",
        "main.xml",
    );
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    let root = result.root_nodes[0].as_element().unwrap();
    assert_eq!(root.name, "layout");
    let names: Vec<&str> = root.child_elements().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["data", "FrameLayout"]);
    let frame = root.child_elements().nth(1).unwrap();
    assert_eq!(frame.child_elements().next().unwrap().name, "TextView");
    assert!(!frame.is_self_closing);
    assert!(frame.end_source_span.is_some());
}

#[test]
fn element_spans_cover_open_through_close() {
    let source = "<a><b>text</b></a>";
    let result = XmlParser::new().parse(source, "t.xml");
    assert!(result.errors.is_empty());
    let a = result.root_nodes[0].as_element().unwrap();
    assert_eq!(a.source_span.start.offset, 0);
    assert_eq!(a.source_span.end.offset, source.len());
    assert_eq!(a.start_source_span.end.offset, 3);
    let b = a.child_elements().next().unwrap();
    assert_eq!(b.source_span.start.offset, 3);
    assert_eq!(b.source_span.end.offset, 14);
    assert_eq!(b.end_source_span.as_ref().unwrap().start.offset, 10);
}

#[test]
fn attribute_spans_address_name_and_value() {
    let result = XmlParser::new().parse("<v android:text=\"@{u.name}\"/>", "t.xml");
    assert!(result.errors.is_empty());
    let v = result.root_nodes[0].as_element().unwrap();
    let attr = v.find_attribute("android:text").unwrap();
    assert_eq!(attr.value, "\"@{u.name}\"");
    assert_eq!(attr.unquoted(), "@{u.name}");
    assert_eq!(attr.key_span.start.col, 3);
    let value_span = attr.value_span.as_ref().unwrap();
    assert_eq!(value_span.start.col, 16);
    // The attribute span runs from the name through the closing quote.
    assert_eq!(attr.source_span.start.col, 3);
    assert_eq!(attr.source_span.end.col, 27);
}

#[test]
fn valueless_attribute_has_no_value_span() {
    let result = XmlParser::new().parse("<v checked/>", "t.xml");
    assert!(result.errors.is_empty());
    let v = result.root_nodes[0].as_element().unwrap();
    let attr = v.find_attribute("checked").unwrap();
    assert_eq!(attr.value, "");
    assert!(attr.value_span.is_none());
}

#[test]
fn text_nodes_are_kept() {
    let result = XmlParser::new().parse("<a>hello</a>", "t.xml");
    let a = result.root_nodes[0].as_element().unwrap();
    match &a.children[0] {
        Node::Text(text) => assert_eq!(text.value, "hello"),
        other => panic!("expected text, got {:?}", other),
    }
}

#[test]
fn mismatched_close_tag_is_an_error() {
    let result = XmlParser::new().parse("<a><b></a>", "t.xml");
    assert!(!result.errors.is_empty());
}

#[test]
fn unclosed_root_is_an_error() {
    let result = XmlParser::new().parse("<a><b></b>", "t.xml");
    assert!(!result.errors.is_empty());
}

#[test]
fn prolog_and_comments_do_not_become_elements() {
    let result = XmlParser::new().parse(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!-- header -->\n<a/>",
        "t.xml",
    );
    assert!(result.errors.is_empty());
    let elements: Vec<&str> = result
        .root_nodes
        .iter()
        .filter_map(Node::as_element)
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(elements, vec!["a"]);
}
