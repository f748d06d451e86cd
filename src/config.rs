//! 客户端配置

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// client.json 配置结构
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    #[serde(default)]
    pub script: ScriptConfig,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

/// QuickJS 运行时限制，内存与栈未设置时使用引擎默认值
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScriptConfig {
    #[serde(default)]
    pub memory_limit: Option<usize>,
    #[serde(default)]
    pub max_stack_size: Option<usize>,
    /// 单次求值的时间预算，`null` 表示不限制
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: Option<u64>,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            memory_limit: None,
            max_stack_size: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_timeout_ms() -> Option<u64> {
    Some(1000)
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            script: ScriptConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl ClientConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
