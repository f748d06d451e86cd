//! 属性与子节点投影

use super::{TreeNode, VdomElement};
use crate::handler::{create_event_handler, create_inline_code, Handler};
use crate::host::Host;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// 单个属性值：普通数据或处理函数
#[derive(Debug, Clone)]
pub enum PropValue {
    Value(JsonValue),
    Handler(Handler),
}

impl PropValue {
    pub fn as_value(&self) -> Option<&JsonValue> {
        match self {
            PropValue::Value(v) => Some(v),
            PropValue::Handler(_) => None,
        }
    }

    pub fn as_handler(&self) -> Option<&Handler> {
        match self {
            PropValue::Handler(h) => Some(h),
            PropValue::Value(_) => None,
        }
    }
}

pub type Props = BTreeMap<String, PropValue>;

/// 子节点：构建结果或原样透传的文本
#[derive(Debug, Clone, PartialEq)]
pub enum Child<T> {
    Node(T),
    Text(String),
}

/// 合并属性：attributes，然后事件处理器，最后内联代码（后者覆盖前者）
pub fn create_attributes(model: &VdomElement, host: &Host) -> Props {
    let mut props = Props::new();

    for (name, value) in &model.attributes {
        props.insert(name.clone(), PropValue::Value(value.clone()));
    }

    for (name, spec) in &model.event_handlers {
        let (name, handler) = create_event_handler(host.client(), name, spec);
        props.insert(name, PropValue::Handler(Handler::Event(handler)));
    }

    for (name, code) in &model.inline_java_script {
        let (name, handler) = create_inline_code(host, name, code);
        props.insert(name, PropValue::Handler(Handler::InlineCode(handler)));
    }

    props
}

/// 按顺序映射子节点，文本原样保留
pub fn create_children<T, F>(model: &VdomElement, mut create_child: F) -> Vec<Child<T>>
where
    F: FnMut(&VdomElement) -> T,
{
    model
        .children
        .iter()
        .map(|child| match child {
            TreeNode::Element(element) => Child::Node(create_child(element)),
            TreeNode::Text(text) => Child::Text(text.clone()),
        })
        .collect()
}
