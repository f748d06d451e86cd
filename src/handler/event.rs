//! 事件处理器：原始事件 -> layout-event 消息

use crate::client::{Client, LayoutEventMessage, TransportClient};
use crate::handler::HandlerArg;
use crate::vdom::EventBindingSpec;
use std::fmt;
use std::rc::Rc;

#[derive(Clone)]
pub struct EventHandler {
    client: Rc<dyn Client>,
    spec: EventBindingSpec,
}

impl EventHandler {
    pub fn target(&self) -> &str {
        &self.spec.target
    }

    /// 处理每个事件参数后，只发送一条消息
    pub fn call(&self, args: &[HandlerArg]) {
        let data = args
            .iter()
            .map(|arg| match arg {
                HandlerArg::Event(event) => {
                    if self.spec.prevent_default {
                        event.prevent_default();
                    }
                    if self.spec.stop_propagation {
                        event.stop_propagation();
                    }
                    event.to_json()
                }
                HandlerArg::Value(value) => value.clone(),
            })
            .collect();

        let message = LayoutEventMessage::new(&self.spec.target, data);
        match message.to_json() {
            Ok(json) => self.client.send_message(json),
            Err(e) => tracing::error!(event_target = %self.spec.target, "cannot serialize layout event: {}", e),
        }
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandler")
            .field("spec", &self.spec)
            .finish()
    }
}

pub fn create_event_handler(
    client: &Rc<dyn Client>,
    name: &str,
    spec: &EventBindingSpec,
) -> (String, EventHandler) {
    let handler = EventHandler {
        client: client.clone(),
        spec: spec.clone(),
    };
    (name.to_string(), handler)
}
