//! 宿主客户端：传输通道与模块加载

mod local;
mod registry;

pub use local::LocalClient;
pub use registry::ModuleRegistry;

use crate::error::LoadError;
use crate::foreign::ForeignValue;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::rc::Rc;

pub type MessageCallback = Rc<dyn Fn(&JsonValue)>;

/// 与服务端之间的消息通道
pub trait TransportClient {
    /// 发送即忘
    fn send_message(&self, message: JsonValue);
    /// 订阅服务端消息
    fn on_message(&self, callback: MessageCallback);
}

/// 按名字加载模块（`NAME` 类型的导入源）
#[async_trait(?Send)]
pub trait ModuleLoader {
    async fn load_module(&self, name: &str) -> Result<ForeignValue, LoadError>;
}

/// 动态导入（`URL` 类型的导入源）
#[async_trait(?Send)]
pub trait UrlImporter {
    async fn import(&self, url: &str) -> Result<ForeignValue, LoadError>;
}

pub trait Client: TransportClient + ModuleLoader {}

impl<T: TransportClient + ModuleLoader> Client for T {}

/// 发往服务端的事件消息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "layout-event")]
pub struct LayoutEventMessage {
    pub data: Vec<JsonValue>,
    pub target: String,
}

impl LayoutEventMessage {
    pub fn new(target: &str, data: Vec<JsonValue>) -> Self {
        Self {
            data,
            target: target.to_string(),
        }
    }

    pub fn to_json(&self) -> Result<JsonValue, serde_json::Error> {
        serde_json::to_value(self)
    }
}
