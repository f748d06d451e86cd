//! 内联代码处理器
//!
//! 代码在 [`ScriptEngine`] 中执行。第一个参数是事件时，以该事件的
//! `currentTarget` 作为接收者：执行前传入其属性，执行后写回。

use crate::error::ScriptError;
use crate::handler::HandlerArg;
use crate::host::Host;
use crate::js::{ScriptCall, ScriptEngine};
use crate::logger::Logger;
use serde_json::Value as JsonValue;
use std::fmt;
use std::rc::Rc;

#[derive(Clone)]
pub struct InlineCodeHandler {
    name: String,
    code: Rc<str>,
    scripts: Rc<dyn ScriptEngine>,
    logger: Rc<dyn Logger>,
}

impl InlineCodeHandler {
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn call(&self, args: &[HandlerArg]) -> Result<JsonValue, ScriptError> {
        let receiver = match args.first() {
            Some(HandlerArg::Event(event)) => event.current_target(),
            _ => None,
        };
        let snapshot = receiver.as_ref().map(|target| target.snapshot());
        let values: Vec<JsonValue> = args.iter().map(HandlerArg::to_json).collect();

        let call = ScriptCall {
            code: &self.code,
            receiver: snapshot.as_ref(),
            args: &values,
        };

        match self.scripts.evaluate(&call) {
            Ok(outcome) => {
                if let (Some(target), Some(properties)) = (receiver, outcome.receiver) {
                    target.replace(properties);
                }
                Ok(outcome.value)
            }
            Err(e) => {
                self.logger
                    .error(&format!("inline code for '{}' failed: {}", self.name, e));
                Err(e)
            }
        }
    }
}

impl fmt::Debug for InlineCodeHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InlineCodeHandler")
            .field("name", &self.name)
            .field("code", &self.code)
            .finish()
    }
}

pub fn create_inline_code(host: &Host, name: &str, code: &str) -> (String, InlineCodeHandler) {
    let handler = InlineCodeHandler {
        name: name.to_string(),
        code: Rc::from(code),
        scripts: host.scripts().clone(),
        logger: host.logger().clone(),
    };
    (name.to_string(), handler)
}
