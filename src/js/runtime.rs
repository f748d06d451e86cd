//! QuickJS 运行时

use super::{ScriptCall, ScriptEngine, ScriptOutcome};
use crate::config::ScriptConfig;
use crate::error::ScriptError;
use once_cell::unsync::OnceCell;
use rquickjs::{Context, Result as JsResult, Runtime};
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// 基于 QuickJS 的脚本引擎，运行时在第一次求值时创建
pub struct QuickJsEngine {
    config: ScriptConfig,
    inner: OnceCell<JsRuntime>,
}

struct JsRuntime {
    // context 依赖 runtime 存活
    _runtime: Runtime,
    context: Context,
    budget_ms: Option<u64>,
    // 中断回调读取的截止时间，求值之外为 None
    deadline: Arc<Mutex<Option<Instant>>>,
}

impl JsRuntime {
    fn new(config: &ScriptConfig) -> Result<Self, ScriptError> {
        let runtime = Runtime::new().map_err(|e| ScriptError::Engine(e.to_string()))?;
        if let Some(limit) = config.memory_limit {
            runtime.set_memory_limit(limit);
        }
        if let Some(size) = config.max_stack_size {
            runtime.set_max_stack_size(size);
        }

        let deadline = Arc::new(Mutex::new(None::<Instant>));
        if config.timeout_ms.is_some() {
            let deadline = deadline.clone();
            runtime.set_interrupt_handler(Some(Box::new(move || {
                deadline
                    .lock()
                    .ok()
                    .and_then(|d| *d)
                    .map_or(false, |d| Instant::now() >= d)
            })));
        }

        let context = Context::full(&runtime).map_err(|e| ScriptError::Engine(e.to_string()))?;
        tracing::debug!(timeout_ms = ?config.timeout_ms, "QuickJS runtime created");

        Ok(Self {
            _runtime: runtime,
            context,
            budget_ms: config.timeout_ms,
            deadline,
        })
    }

    fn set_deadline(&self, deadline: Option<Instant>) {
        if let Ok(mut slot) = self.deadline.lock() {
            *slot = deadline;
        }
    }

    fn eval_string(&self, code: &str) -> Result<String, ScriptError> {
        let deadline = self
            .budget_ms
            .map(|ms| Instant::now() + Duration::from_millis(ms));
        self.set_deadline(deadline);

        let result = self.context.with(|ctx| {
            let result: JsResult<String> = ctx.eval(code);
            result.map_err(|e| format!("{:?}", e))
        });
        self.set_deadline(None);

        result.map_err(|message| match (self.budget_ms, deadline) {
            (Some(budget_ms), Some(d)) if Instant::now() >= d => {
                tracing::warn!(budget_ms, "inline script interrupted");
                ScriptError::Interrupted { budget_ms }
            }
            _ => ScriptError::Engine(message),
        })
    }
}

/// 脚本包装后返回的 JSON
#[derive(Deserialize)]
struct RawOutcome {
    #[serde(default)]
    value: JsonValue,
    #[serde(default)]
    receiver: Option<Map<String, JsonValue>>,
    #[serde(default)]
    error: Option<String>,
}

impl QuickJsEngine {
    pub fn new(config: ScriptConfig) -> Self {
        Self {
            config,
            inner: OnceCell::new(),
        }
    }

    fn runtime(&self) -> Result<&JsRuntime, ScriptError> {
        self.inner.get_or_try_init(|| JsRuntime::new(&self.config))
    }

    /// 在全局作用域执行代码，结果转为字符串
    pub fn eval(&self, code: &str) -> Result<String, ScriptError> {
        let wrapped = format!("String(eval({}))", serde_json::to_string(code)?);
        self.runtime()?.eval_string(&wrapped)
    }
}

impl Default for QuickJsEngine {
    fn default() -> Self {
        Self::new(ScriptConfig::default())
    }
}

impl ScriptEngine for QuickJsEngine {
    fn evaluate(&self, call: &ScriptCall<'_>) -> Result<ScriptOutcome, ScriptError> {
        let script = wrap_call(call)?;
        let raw = self.runtime()?.eval_string(&script)?;
        let outcome: RawOutcome = serde_json::from_str(&raw)?;

        if let Some(error) = outcome.error {
            return Err(ScriptError::Thrown(error));
        }
        Ok(ScriptOutcome {
            value: outcome.value,
            receiver: outcome.receiver,
        })
    }
}

/// 把一次调用包装成独立脚本：
/// 以接收者为 `this` 直接 eval 代码，结果为函数时再用原参数调用。
fn wrap_call(call: &ScriptCall<'_>) -> Result<String, ScriptError> {
    let code = serde_json::to_string(call.code)?;
    let receiver = match call.receiver {
        Some(properties) => serde_json::to_string(properties)?,
        None => "undefined".to_string(),
    };
    let args = serde_json::to_string(call.args)?;

    Ok(format!(
        r#"(function () {{
    var __receiver = {receiver};
    var __args = {args};
    try {{
        var __value = (function () {{
            var __evaluated = eval({code});
            if (typeof __evaluated === 'function') {{
                return __evaluated.apply(undefined, arguments);
            }}
            return undefined;
        }}).apply(__receiver, __args);
        return JSON.stringify({{
            value: __value === undefined ? null : __value,
            receiver: __receiver === undefined ? null : __receiver
        }});
    }} catch (e) {{
        return JSON.stringify({{ error: String(e) }});
    }}
}})()"#
    ))
}
