//! 进程内传输通道

use super::{MessageCallback, ModuleLoader, ModuleRegistry, TransportClient};
use crate::error::LoadError;
use crate::foreign::ForeignValue;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::cell::RefCell;

/// 出站消息进队列，入站消息由 [`LocalClient::deliver`] 分发给订阅者
pub struct LocalClient {
    modules: ModuleRegistry,
    outbox: RefCell<Vec<JsonValue>>,
    subscribers: RefCell<Vec<MessageCallback>>,
}

impl LocalClient {
    pub fn new(modules: ModuleRegistry) -> Self {
        Self {
            modules,
            outbox: RefCell::new(Vec::new()),
            subscribers: RefCell::new(Vec::new()),
        }
    }

    /// 获取并清空出站队列
    pub fn drain_messages(&self) -> Vec<JsonValue> {
        let mut outbox = self.outbox.borrow_mut();
        std::mem::take(&mut *outbox)
    }

    pub fn pending(&self) -> usize {
        self.outbox.borrow().len()
    }

    /// 把服务端消息交给当前所有订阅者，返回订阅者数量。
    /// 回调中新增的订阅从下一条消息开始生效。
    pub fn deliver(&self, message: &JsonValue) -> usize {
        let subscribers = self.subscribers.borrow().clone();
        for callback in &subscribers {
            callback(message);
        }
        subscribers.len()
    }
}

impl Default for LocalClient {
    fn default() -> Self {
        Self::new(ModuleRegistry::new())
    }
}

impl TransportClient for LocalClient {
    fn send_message(&self, message: JsonValue) {
        tracing::debug!(%message, "outbound message");
        self.outbox.borrow_mut().push(message);
    }

    fn on_message(&self, callback: MessageCallback) {
        self.subscribers.borrow_mut().push(callback);
    }
}

#[async_trait(?Send)]
impl ModuleLoader for LocalClient {
    async fn load_module(&self, name: &str) -> Result<ForeignValue, LoadError> {
        self.modules.load_module(name).await
    }
}
