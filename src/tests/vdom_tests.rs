//! 虚拟树模型与属性投影测试

use super::fixture;
use crate::vdom::{
    create_attributes, create_children, Child, EventBindingSpec, ImportSource, PropValue,
    SourceType, TreeNode, VdomElement,
};
use crate::handler::Handler;
use serde_json::json;

#[test]
fn test_parse_vdom_snapshot() {
    let model = VdomElement::from_json(json!({
        "tagName": "div",
        "attributes": { "class": "app", "tabIndex": 1 },
        "children": ["hello", { "tagName": "span", "children": ["world"] }],
        "eventHandlers": { "onClick": { "target": "abc", "preventDefault": true } },
        "inlineCode": { "onInput": "this.value = 'x'" },
        "importSource": { "source": "https://example.com/m.js", "sourceType": "URL" }
    }))
    .unwrap();

    assert_eq!(model.tag_name, "div");
    assert_eq!(model.attributes.get("tabIndex"), Some(&json!(1)));
    assert_eq!(model.children.len(), 2);
    assert_eq!(model.children[0], TreeNode::Text("hello".to_string()));
    match &model.children[1] {
        TreeNode::Element(span) => assert_eq!(span.tag_name, "span"),
        other => panic!("expected element, got {:?}", other),
    }

    let handler = &model.event_handlers["onClick"];
    assert_eq!(handler.target, "abc");
    assert!(handler.prevent_default);
    assert!(!handler.stop_propagation);

    assert_eq!(model.inline_java_script["onInput"], "this.value = 'x'");
    assert_eq!(
        model.import_source,
        Some(ImportSource::url("https://example.com/m.js"))
    );
}

#[test]
fn test_parse_minimal_node() {
    let model = VdomElement::from_json(json!({ "tagName": "br" })).unwrap();
    assert!(model.children.is_empty());
    assert!(model.attributes.is_empty());
    assert!(model.event_handlers.is_empty());
    assert!(model.inline_java_script.is_empty());
    assert!(model.import_source.is_none());
}

#[test]
fn test_parse_rejects_unknown_source_type() {
    let result = VdomElement::from_json(json!({
        "tagName": "x",
        "importSource": { "source": "a", "sourceType": "FILE" }
    }));
    assert!(result.is_err());
}

#[test]
fn test_import_source_equality_is_structural() {
    assert_eq!(ImportSource::name("pkgA"), ImportSource::name("pkgA"));
    assert_ne!(ImportSource::name("pkgA"), ImportSource::url("pkgA"));
    assert_ne!(ImportSource::name("pkgA"), ImportSource::name("pkgB"));
}

#[test]
fn test_import_source_display() {
    assert_eq!(
        ImportSource::name("pkgA").to_string(),
        r#"{"source":"pkgA","sourceType":"NAME"}"#
    );
    assert_eq!(
        ImportSource::url("https://x/\"q\".js").to_string(),
        r#"{"source":"https://x/\"q\".js","sourceType":"URL"}"#
    );
    assert_eq!(ImportSource::url("a").source_type, SourceType::Url);
}

#[test]
fn test_create_children_without_children() {
    let model = VdomElement::new("div");
    let children = create_children(&model, |child| child.tag_name.clone());
    assert!(children.is_empty());
}

#[test]
fn test_create_children_preserves_order_and_kind() {
    let model = VdomElement::new("div")
        .with_child("a")
        .with_child(VdomElement::new("b"))
        .with_child("c")
        .with_child(VdomElement::new("d"));

    let children = create_children(&model, |child| child.tag_name.to_uppercase());
    assert_eq!(
        children,
        vec![
            Child::Text("a".to_string()),
            Child::Node("B".to_string()),
            Child::Text("c".to_string()),
            Child::Node("D".to_string()),
        ]
    );
}

#[test]
fn test_create_attributes_copies_plain_values() {
    let f = fixture();
    let model = VdomElement::new("input")
        .with_attribute("value", "hello")
        .with_attribute("disabled", true);

    let props = create_attributes(&model, &f.host);
    assert_eq!(props.len(), 2);
    assert_eq!(props["value"].as_value(), Some(&json!("hello")));
    assert_eq!(props["disabled"].as_value(), Some(&json!(true)));
}

#[test]
fn test_create_attributes_tags_handlers() {
    let f = fixture();
    let model = VdomElement::new("button")
        .with_event_handler("onClick", EventBindingSpec::new("t1"))
        .with_inline_code("onMouseOver", "this.hovered = true");

    let props = create_attributes(&model, &f.host);
    assert!(props["onClick"].as_handler().unwrap().is_event_handler());
    assert!(!props["onMouseOver"].as_handler().unwrap().is_event_handler());
}

#[test]
fn test_create_attributes_precedence() {
    let f = fixture();
    let model = VdomElement::new("button")
        .with_attribute("onClick", "plain")
        .with_attribute("onFocus", "plain")
        .with_event_handler("onClick", EventBindingSpec::new("t1"))
        .with_event_handler("onFocus", EventBindingSpec::new("t2"))
        .with_inline_code("onClick", "1 + 1");

    let props = create_attributes(&model, &f.host);
    assert_eq!(props.len(), 2);

    // 内联代码覆盖事件处理器
    match &props["onClick"] {
        PropValue::Handler(Handler::InlineCode(h)) => assert_eq!(h.code(), "1 + 1"),
        other => panic!("expected inline code handler, got {:?}", other),
    }
    // 事件处理器覆盖普通属性
    match &props["onFocus"] {
        PropValue::Handler(Handler::Event(h)) => assert_eq!(h.target(), "t2"),
        other => panic!("expected event handler, got {:?}", other),
    }
}
