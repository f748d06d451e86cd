//! 进程内传输与事件消息测试

use crate::client::{LayoutEventMessage, LocalClient, TransportClient};
use serde_json::{json, Value as JsonValue};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[test]
fn test_deliver_allows_subscribing_from_callback() {
    let client = Rc::new(LocalClient::default());
    let late = Rc::new(RefCell::new(Vec::<JsonValue>::new()));

    let inner = client.clone();
    let sink = late.clone();
    let subscribed = Cell::new(false);
    client.on_message(Rc::new(move |_message: &JsonValue| {
        if subscribed.replace(true) {
            return;
        }
        let sink = sink.clone();
        inner.on_message(Rc::new(move |message: &JsonValue| {
            sink.borrow_mut().push(message.clone());
        }));
    }));

    // 回调里新增的订阅只收到之后的消息
    assert_eq!(client.deliver(&json!({ "type": "x" })), 1);
    assert!(late.borrow().is_empty());

    assert_eq!(client.deliver(&json!({ "type": "y" })), 2);
    assert_eq!(*late.borrow(), vec![json!({ "type": "y" })]);
}

#[test]
fn test_deliver_allows_sending_from_callback() {
    let client = Rc::new(LocalClient::default());
    let inner = client.clone();
    client.on_message(Rc::new(move |message: &JsonValue| {
        inner.send_message(json!({ "ack": message["type"] }));
    }));

    client.deliver(&json!({ "type": "ping" }));
    assert_eq!(client.drain_messages(), vec![json!({ "ack": "ping" })]);
    assert_eq!(client.pending(), 0);
}

#[test]
fn test_layout_event_wire_shape() {
    let message = LayoutEventMessage::new("t-1", vec![json!({ "type": "click" })]);
    assert_eq!(
        message.to_json().unwrap(),
        json!({ "type": "layout-event", "data": [{ "type": "click" }], "target": "t-1" })
    );
}
