//! 属性上的处理函数
//!
//! 服务端事件处理器与内联代码处理器是两种不同的值，用 [`Handler`] 区分，
//! 下游渲染可以据此判断一个回调是否会向服务端发送 `layout-event`。

mod event;
mod inline;

pub use event::{create_event_handler, EventHandler};
pub use inline::{create_inline_code, InlineCodeHandler};

use crate::error::ScriptError;
use crate::event::EventLike;
use serde_json::Value as JsonValue;
use std::fmt;
use std::rc::Rc;

/// 处理函数的实参：原始事件或普通数据
#[derive(Clone)]
pub enum HandlerArg {
    Event(Rc<dyn EventLike>),
    Value(JsonValue),
}

impl HandlerArg {
    pub fn event<E: EventLike + 'static>(event: Rc<E>) -> Self {
        HandlerArg::Event(event)
    }

    /// 转为可序列化的数据
    pub fn to_json(&self) -> JsonValue {
        match self {
            HandlerArg::Event(event) => event.to_json(),
            HandlerArg::Value(value) => value.clone(),
        }
    }
}

impl From<JsonValue> for HandlerArg {
    fn from(value: JsonValue) -> Self {
        HandlerArg::Value(value)
    }
}

impl fmt::Debug for HandlerArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerArg::Event(event) => write!(f, "Event({})", event.to_json()),
            HandlerArg::Value(value) => write!(f, "Value({})", value),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Handler {
    Event(EventHandler),
    InlineCode(InlineCodeHandler),
}

impl Handler {
    pub fn is_event_handler(&self) -> bool {
        matches!(self, Handler::Event(_))
    }

    /// 调用处理函数。事件处理器没有返回值，结果为 `null`
    pub fn call(&self, args: &[HandlerArg]) -> Result<JsonValue, ScriptError> {
        match self {
            Handler::Event(handler) => {
                handler.call(args);
                Ok(JsonValue::Null)
            }
            Handler::InlineCode(handler) => handler.call(args),
        }
    }
}
