//! 脚本执行能力
//!
//! 内联代码来自服务端，属于不可信输入：它只能在 [`QuickJsEngine`]
//! 的沙箱里执行，与宿主进程之间只交换 JSON 数据。接收者（`this`）
//! 通过 [`ScriptCall::receiver`] 显式传入，执行后的状态通过
//! [`ScriptOutcome::receiver`] 传回。

mod runtime;

pub use runtime::QuickJsEngine;

use crate::error::ScriptError;
use serde_json::{Map, Value as JsonValue};

/// 一次脚本调用
#[derive(Debug, Clone, Copy)]
pub struct ScriptCall<'a> {
    pub code: &'a str,
    pub receiver: Option<&'a Map<String, JsonValue>>,
    pub args: &'a [JsonValue],
}

/// 调用结果
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScriptOutcome {
    /// 代码求值为函数时是该函数的返回值，否则为 `null`
    pub value: JsonValue,
    /// 执行后的接收者属性
    pub receiver: Option<Map<String, JsonValue>>,
}

/// 表达式求值能力
pub trait ScriptEngine {
    fn evaluate(&self, call: &ScriptCall<'_>) -> Result<ScriptOutcome, ScriptError>;
}
