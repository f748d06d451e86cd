//! 日志能力
//!
//! 契约违规与树不一致都通过 [`Logger`] 报告，而不是向上抛出。

use std::cell::RefCell;

pub trait Logger {
    fn error(&self, message: &str);

    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}

/// 转发到 `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// 记录所有日志行，同时转发到 `tracing`
#[derive(Debug, Default)]
pub struct RecordingLogger {
    errors: RefCell<Vec<String>>,
    warnings: RefCell<Vec<String>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.borrow().clone()
    }
}

impl Logger for RecordingLogger {
    fn error(&self, message: &str) {
        tracing::error!("{}", message);
        self.errors.borrow_mut().push(message.to_string());
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
        self.warnings.borrow_mut().push(message.to_string());
    }
}
