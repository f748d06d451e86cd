//! 虚拟文档树模型
//!
//! 服务端下发的 VDOM 快照，字段名与线上 JSON 一致（camelCase）。

mod attributes;

pub use attributes::{create_attributes, create_children, Child, PropValue, Props};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;
use std::fmt;

/// 树节点：文本或结构化元素
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Text(String),
    Element(VdomElement),
}

impl From<&str> for TreeNode {
    fn from(text: &str) -> Self {
        TreeNode::Text(text.to_string())
    }
}

impl From<VdomElement> for TreeNode {
    fn from(element: VdomElement) -> Self {
        TreeNode::Element(element)
    }
}

/// 结构化节点
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VdomElement {
    pub tag_name: String,
    #[serde(default)]
    pub children: Vec<TreeNode>,
    #[serde(default)]
    pub attributes: Map<String, JsonValue>,
    #[serde(default)]
    pub event_handlers: BTreeMap<String, EventBindingSpec>,
    #[serde(default, alias = "inlineCode")]
    pub inline_java_script: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_source: Option<ImportSource>,
}

impl VdomElement {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_child(mut self, child: impl Into<TreeNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_attribute(mut self, name: &str, value: impl Into<JsonValue>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    pub fn with_event_handler(mut self, name: &str, spec: EventBindingSpec) -> Self {
        self.event_handlers.insert(name.to_string(), spec);
        self
    }

    pub fn with_inline_code(mut self, name: &str, code: &str) -> Self {
        self.inline_java_script.insert(name.to_string(), code.to_string());
        self
    }

    pub fn with_import_source(mut self, import_source: ImportSource) -> Self {
        self.import_source = Some(import_source);
        self
    }

    /// 从 JSON 快照解析
    pub fn from_json(value: JsonValue) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

/// 导入源的获取方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceType {
    #[serde(rename = "URL")]
    Url,
    #[serde(rename = "NAME")]
    Name,
}

/// 导入源描述，按字段结构相等
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSource {
    pub source: String,
    pub source_type: SourceType,
}

impl ImportSource {
    pub fn url(source: &str) -> Self {
        Self {
            source: source.to_string(),
            source_type: SourceType::Url,
        }
    }

    pub fn name(source: &str) -> Self {
        Self {
            source: source.to_string(),
            source_type: SourceType::Name,
        }
    }
}

impl fmt::Display for ImportSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.source_type {
            SourceType::Url => "URL",
            SourceType::Name => "NAME",
        };
        write!(
            f,
            "{{\"source\":{},\"sourceType\":\"{}\"}}",
            JsonValue::String(self.source.clone()),
            kind
        )
    }
}

/// 事件绑定：事件转发到哪个服务端回调，以及发送前如何处理原始事件
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBindingSpec {
    pub target: String,
    #[serde(default)]
    pub prevent_default: bool,
    #[serde(default)]
    pub stop_propagation: bool,
}

impl EventBindingSpec {
    pub fn new(target: &str) -> Self {
        Self {
            target: target.to_string(),
            ..Default::default()
        }
    }
}
