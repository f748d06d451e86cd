//! Mini VDOM - 服务端虚拟文档树的客户端渲染
//! 把 VDOM 快照通过外部导入源模块构建成元素，并把 UI 事件转发回服务端

// 虚拟树模型与属性投影
pub mod vdom;

// 外部模块的无类型值
pub mod foreign;

// 事件系统
pub mod event;

// 事件 / 内联代码处理函数
pub mod handler;

// QuickJS 脚本能力
pub mod js;

// 传输通道与模块加载
pub mod client;

// 导入源加载与元素构建
pub mod import_source;

// 内置标记模块
pub mod markup;

pub mod config;
pub mod error;
pub mod host;
pub mod logger;

pub use client::{Client, LayoutEventMessage, LocalClient, ModuleLoader, ModuleRegistry, TransportClient, UrlImporter};
pub use config::{ClientConfig, ScriptConfig};
pub use error::{ConfigError, ContractViolation, LoadError, ScriptError, TreeError};
pub use event::{EventLike, HostElement, HostEvent, Touch};
pub use foreign::{lookup_path, ForeignFn, ForeignObject, ForeignValue, PropertyBag};
pub use handler::{Handler, HandlerArg};
pub use host::Host;
pub use import_source::{load_import_source, BindImportSource, MountedImportSource};
pub use js::{QuickJsEngine, ScriptEngine};
pub use logger::{Logger, RecordingLogger, TracingLogger};
pub use markup::{MarkupContainer, MarkupModule, MarkupNode};
pub use vdom::{create_attributes, create_children, EventBindingSpec, ImportSource, SourceType, TreeNode, VdomElement};

// 单元测试
#[cfg(test)]
mod tests;
