//! 错误类型
//!
//! 只有模块获取失败 ([`LoadError`]) 会向调用方传播；
//! 契约违规与树不一致只记录日志，对应的挂载或子树被丢弃。

use crate::vdom::ImportSource;
use thiserror::Error;

/// 模块无法获取（网络、加载器或导入表失败）
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LoadError {
    #[error("failed to import module from {url}: {reason}")]
    Import { url: String, reason: String },

    #[error("failed to load module {name}: {reason}")]
    Module { name: String, reason: String },
}

/// 模块或其 binding 不满足约定的接口
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ContractViolation {
    #[error("{import_source} did not export a function 'bind'")]
    MissingBind { import_source: String },

    #[error("{import_source} returned an improper binding (missing {})", .missing.join(", "))]
    ImproperBinding {
        import_source: String,
        missing: Vec<&'static str>,
    },
}

/// 虚拟树与当前导入源上下文不一致
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TreeError {
    #[error("Parent element import source {parent} does not match child's import source {child}")]
    ImportSourceMismatch {
        parent: ImportSource,
        child: ImportSource,
    },

    #[error("Module from source {import_source} does not export {segment}")]
    MissingExport {
        import_source: ImportSource,
        segment: String,
    },

    #[error("Component {component} from source {import_source} does not have subcomponent {segment}")]
    MissingSubcomponent {
        import_source: ImportSource,
        component: String,
        segment: String,
    },
}

/// 内联脚本执行失败
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("script engine error: {0}")]
    Engine(String),

    #[error("inline script threw: {0}")]
    Thrown(String),

    #[error("inline script interrupted after {budget_ms} ms")]
    Interrupted { budget_ms: u64 },

    #[error("malformed script result: {0}")]
    Decode(#[from] serde_json::Error),
}

/// 配置文件读取或解析失败
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
