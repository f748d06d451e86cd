//! 事件处理器与内联代码处理器测试

use super::fixture;
use crate::client::LayoutEventMessage;
use crate::config::ScriptConfig;
use crate::error::ScriptError;
use crate::event::{HostElement, HostEvent, Touch};
use crate::handler::{create_event_handler, create_inline_code, Handler, HandlerArg};
use crate::js::{QuickJsEngine, ScriptCall, ScriptEngine};
use crate::vdom::EventBindingSpec;
use serde_json::json;
use std::rc::Rc;

fn spec(target: &str, prevent_default: bool, stop_propagation: bool) -> EventBindingSpec {
    EventBindingSpec {
        target: target.to_string(),
        prevent_default,
        stop_propagation,
    }
}

#[test]
fn test_event_handler_suppresses_and_sends_once() {
    let f = fixture();
    let (name, handler) = create_event_handler(f.host.client(), "onClick", &spec("t1", true, true));
    assert_eq!(name, "onClick");

    let event = Rc::new(HostEvent::tap(10.0, 20.0, 42));
    handler.call(&[HandlerArg::event(event.clone())]);

    assert_eq!(event.prevent_default_calls(), 1);
    assert_eq!(event.stop_propagation_calls(), 1);

    let messages = f.client.drain_messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["type"], "layout-event");

    let message: LayoutEventMessage = serde_json::from_value(messages[0].clone()).unwrap();
    assert_eq!(message.target, "t1");
    assert_eq!(message.data.len(), 1);
    assert_eq!(message.data[0]["type"], "click");
    assert_eq!(message.data[0]["timeStamp"], 42);
    assert_eq!(message.data[0]["clientX"], 10.0);
}

#[test]
fn test_event_handler_without_flags_leaves_event_alone() {
    let f = fixture();
    let (_, handler) = create_event_handler(f.host.client(), "onClick", &spec("t1", false, false));

    let event = Rc::new(HostEvent::key("keydown", "Enter", "Enter"));
    handler.call(&[HandlerArg::event(event.clone())]);

    assert_eq!(event.prevent_default_calls(), 0);
    assert_eq!(event.stop_propagation_calls(), 0);
    assert_eq!(f.client.pending(), 1);
}

#[test]
fn test_event_handler_batches_multiple_events() {
    let f = fixture();
    let (_, handler) = create_event_handler(f.host.client(), "onTouch", &spec("t9", true, false));

    let first = Rc::new(HostEvent::touch("touchstart", &[Touch::new(0, 1.0, 2.0)], 1));
    let second = Rc::new(HostEvent::touch("touchmove", &[Touch::new(0, 3.0, 4.0)], 2));
    handler.call(&[HandlerArg::event(first.clone()), HandlerArg::event(second.clone())]);

    assert_eq!(first.prevent_default_calls(), 1);
    assert_eq!(second.prevent_default_calls(), 1);

    let messages = f.client.drain_messages();
    assert_eq!(messages.len(), 1);
    let message: LayoutEventMessage = serde_json::from_value(messages[0].clone()).unwrap();
    assert_eq!(message.target, "t9");
    assert_eq!(message.data.len(), 2);
    assert_eq!(message.data[0]["type"], "touchstart");
    assert_eq!(message.data[1]["touches"][0]["x"], 3.0);
}

#[test]
fn test_event_handler_serializes_current_target() {
    let f = fixture();
    let (_, handler) = create_event_handler(f.host.client(), "onInput", &spec("in", false, false));

    let target = HostElement::new("input");
    let event = Rc::new(HostEvent::input(target, "typed"));
    handler.call(&[HandlerArg::event(event)]);

    let messages = f.client.drain_messages();
    assert_eq!(messages[0]["data"][0]["currentTarget"]["value"], "typed");
    assert_eq!(messages[0]["data"][0]["currentTarget"]["tagName"], "input");
}

#[test]
fn test_event_handler_passes_plain_values_through() {
    let f = fixture();
    let (_, handler) = create_event_handler(f.host.client(), "onChange", &spec("v", true, true));
    handler.call(&[HandlerArg::Value(json!({ "value": 3 }))]);

    let messages = f.client.drain_messages();
    assert_eq!(messages[0]["data"], json!([{ "value": 3 }]));
}

#[test]
fn test_handler_kind_tags() {
    let f = fixture();
    let (_, event) = create_event_handler(f.host.client(), "onClick", &spec("t", false, false));
    let (_, inline) = create_inline_code(&f.host, "onClick", "1");

    assert!(Handler::Event(event).is_event_handler());
    assert!(!Handler::InlineCode(inline).is_event_handler());
}

#[test]
fn test_inline_code_binds_current_target() {
    let f = fixture();
    let (name, handler) = create_inline_code(&f.host, "onClick", "this.value = 'x'");
    assert_eq!(name, "onClick");

    let target = HostElement::new("button");
    target.set("id", "b1");
    let event = Rc::new(HostEvent::new("click").with_target(target.clone()));
    let result = handler.call(&[HandlerArg::event(event)]).unwrap();

    assert_eq!(result, json!(null));
    assert_eq!(target.get("value"), Some(json!("x")));
    assert_eq!(target.get("id"), Some(json!("b1")));
}

#[test]
fn test_inline_code_calls_evaluated_function() {
    let f = fixture();
    let (_, handler) = create_inline_code(&f.host, "compute", "(a) => a + 1");
    let result = handler.call(&[HandlerArg::Value(json!(4))]).unwrap();
    assert_eq!(result, json!(5));
}

#[test]
fn test_inline_code_function_receives_event() {
    let f = fixture();
    let (_, handler) = create_inline_code(&f.host, "onKeyDown", "(e) => e.key + ':' + e.type");
    let event = Rc::new(HostEvent::key("keydown", "a", "KeyA"));
    let result = handler.call(&[HandlerArg::event(event)]).unwrap();
    assert_eq!(result, json!("a:keydown"));
}

#[test]
fn test_inline_code_side_effects_persist_in_engine() {
    let f = fixture();
    let (_, bump) = create_inline_code(
        &f.host,
        "onClick",
        "globalThis.__clicks = (globalThis.__clicks || 0) + 1",
    );
    let (_, read) = create_inline_code(&f.host, "read", "() => globalThis.__clicks");

    assert_eq!(bump.call(&[]).unwrap(), json!(null));
    bump.call(&[]).unwrap();
    assert_eq!(read.call(&[]).unwrap(), json!(2));
}

#[test]
fn test_inline_code_error_is_reported() {
    let f = fixture();
    let (_, handler) = create_inline_code(&f.host, "onClick", "(function () { throw new Error('boom'); })()");

    match handler.call(&[]) {
        Err(ScriptError::Thrown(message)) => assert!(message.contains("boom")),
        other => panic!("expected thrown error, got {:?}", other),
    }
    let errors = f.logger.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("onClick"));
}

#[test]
fn test_quickjs_engine_round_trip() {
    let engine = QuickJsEngine::default();
    assert_eq!(engine.eval("1 + 2").unwrap(), "3");

    let receiver = serde_json::Map::new();
    let args = [json!(2), json!(3)];
    let outcome = engine
        .evaluate(&ScriptCall {
            code: "function (a, b) { this.sum = a + b; return a * b; }",
            receiver: Some(&receiver),
            args: &args,
        })
        .unwrap_err();
    // 函数声明语句不是表达式
    assert!(matches!(outcome, ScriptError::Thrown(_)));

    let outcome = engine
        .evaluate(&ScriptCall {
            code: "this.sum = 5, (function (a, b) { return a * b; })",
            receiver: Some(&receiver),
            args: &args,
        })
        .unwrap();
    assert_eq!(outcome.value, json!(6));
    assert_eq!(outcome.receiver.unwrap()["sum"], json!(5));
}

#[test]
fn test_evaluated_function_has_no_receiver() {
    let engine = QuickJsEngine::default();
    let mut receiver = serde_json::Map::new();
    receiver.insert("value".to_string(), json!("x"));

    let outcome = engine
        .evaluate(&ScriptCall {
            code: "(function () { return this.value === undefined; })",
            receiver: Some(&receiver),
            args: &[],
        })
        .unwrap();
    assert_eq!(outcome.value, json!(true));
    assert_eq!(outcome.receiver.unwrap()["value"], json!("x"));
}

#[test]
fn test_runaway_script_is_interrupted() {
    let engine = QuickJsEngine::new(ScriptConfig {
        timeout_ms: Some(50),
        ..ScriptConfig::default()
    });
    let err = engine
        .evaluate(&ScriptCall {
            code: "while (true) {}",
            receiver: None,
            args: &[],
        })
        .unwrap_err();
    assert!(matches!(err, ScriptError::Interrupted { budget_ms: 50 }));

    // 中断后引擎仍可继续使用
    assert_eq!(engine.eval("40 + 2").unwrap(), "42");
}
