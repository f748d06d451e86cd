//! 标记模块 - 内置的导入源实现
//!
//! 按导入源模块的约定编写：导出 `bind` 和若干组件，binding 把元素树
//! 渲染成 HTML 风格的文本写进 [`MarkupContainer`]。演示程序和测试都用它。

use crate::foreign::{ForeignFn, ForeignObject, ForeignValue};
use crate::handler::Handler;
use serde_json::{Map, Value as JsonValue};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

/// 渲染出的节点
#[derive(Debug, Default)]
pub struct MarkupNode {
    tag: String,
    attributes: Map<String, JsonValue>,
    handlers: BTreeMap<String, Handler>,
    children: Vec<MarkupChild>,
}

#[derive(Debug)]
pub enum MarkupChild {
    Node(Rc<MarkupNode>),
    Text(String),
}

impl MarkupNode {
    /// 从 `create` 的 props / children 参数构建
    fn from_parts(tag: &str, props: &ForeignValue, children: &ForeignValue) -> Self {
        let mut node = MarkupNode {
            tag: tag.to_string(),
            ..Default::default()
        };

        if let Some(props) = props.as_object() {
            for (name, value) in props.iter() {
                match value {
                    ForeignValue::Data(v) => {
                        node.attributes.insert(name.to_string(), v.clone());
                    }
                    ForeignValue::Handler(h) => {
                        node.handlers.insert(name.to_string(), h.clone());
                    }
                    _ => {}
                }
            }
        }

        for child in children.as_list().unwrap_or(&[]) {
            if let Some(text) = child.as_str() {
                node.children.push(MarkupChild::Text(text.to_string()));
            } else if let Some(element) = child.downcast::<MarkupNode>() {
                node.children.push(MarkupChild::Node(element));
            }
            // null 是被丢弃的子树
        }

        node
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attribute(&self, name: &str) -> Option<&JsonValue> {
        self.attributes.get(name)
    }

    pub fn handler(&self, name: &str) -> Option<&Handler> {
        self.handlers.get(name)
    }

    pub fn children(&self) -> &[MarkupChild] {
        &self.children
    }

    /// 深度优先查找第一个指定标签的节点（包括自身）
    pub fn find(self: &Rc<Self>, tag: &str) -> Option<Rc<MarkupNode>> {
        if self.tag == tag {
            return Some(self.clone());
        }
        self.children.iter().find_map(|child| match child {
            MarkupChild::Node(node) => node.find(tag),
            MarkupChild::Text(_) => None,
        })
    }

    /// 在子树中查找带有该处理函数的第一个节点
    pub fn find_handler(self: &Rc<Self>, name: &str) -> Option<Handler> {
        if let Some(handler) = self.handlers.get(name) {
            return Some(handler.clone());
        }
        self.children.iter().find_map(|child| match child {
            MarkupChild::Node(node) => node.find_handler(name),
            MarkupChild::Text(_) => None,
        })
    }

    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            let text = match value {
                JsonValue::String(s) => s.clone(),
                other => other.to_string(),
            };
            out.push_str(&format!(" {}=\"{}\"", name, escape(&text)));
        }
        out.push('>');
        for child in &self.children {
            match child {
                MarkupChild::Node(node) => node.write_markup(out),
                MarkupChild::Text(text) => out.push_str(&escape(text)),
            }
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// 渲染目标容器
#[derive(Debug, Default)]
pub struct MarkupContainer {
    root: RefCell<Option<Rc<MarkupNode>>>,
    renders: Cell<usize>,
    mounted: Cell<bool>,
}

impl MarkupContainer {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// 作为 `bind` 的容器参数
    pub fn as_foreign(self: &Rc<Self>) -> ForeignValue {
        ForeignValue::Opaque(self.clone())
    }

    pub fn root(&self) -> Option<Rc<MarkupNode>> {
        self.root.borrow().clone()
    }

    pub fn markup(&self) -> String {
        self.root
            .borrow()
            .as_ref()
            .map(|root| root.to_markup())
            .unwrap_or_default()
    }

    pub fn render_count(&self) -> usize {
        self.renders.get()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.get()
    }
}

/// 标记模块
#[derive(Clone, Default)]
pub struct MarkupModule {
    exports: ForeignObject,
}

impl MarkupModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// 导出一个组件（或嵌套了组件的对象）
    pub fn with_export(mut self, name: &str, value: ForeignValue) -> Self {
        self.exports = self.exports.with(name, value);
        self
    }

    /// 渲染为固定标签的组件
    pub fn component(tag: &str) -> ForeignFn {
        let owned = tag.to_string();
        ForeignFn::new(tag, move |args| {
            let undefined = ForeignValue::Undefined;
            let props = args.first().unwrap_or(&undefined);
            let children = args.get(1).unwrap_or(&undefined);
            ForeignValue::opaque(MarkupNode::from_parts(&owned, props, children))
        })
    }

    /// 模块对象：组件导出加上 `bind`
    pub fn into_module(self) -> ForeignValue {
        self.exports
            .with("bind", ForeignValue::function("bind", bind))
            .into()
    }
}

fn bind(args: &[ForeignValue]) -> ForeignValue {
    let Some(container) = args.first().and_then(|c| c.downcast::<MarkupContainer>()) else {
        tracing::warn!("markup module bound to a non-markup container");
        return ForeignValue::Undefined;
    };
    container.mounted.set(true);

    let target = container.clone();
    let render = ForeignValue::function("render", move |args| {
        let root = args.first().and_then(|e| e.downcast::<MarkupNode>());
        *target.root.borrow_mut() = root;
        target.renders.set(target.renders.get() + 1);
        ForeignValue::Undefined
    });

    let target = container;
    let unmount = ForeignValue::function("unmount", move |_args| {
        *target.root.borrow_mut() = None;
        target.mounted.set(false);
        ForeignValue::Undefined
    });

    ForeignObject::new()
        .with("create", ForeignValue::function("create", create))
        .with("render", render)
        .with("unmount", unmount)
        .into()
}

fn create(args: &[ForeignValue]) -> ForeignValue {
    let undefined = ForeignValue::Undefined;
    let element_type = args.first().unwrap_or(&undefined);
    let props = args.get(1).unwrap_or(&undefined);
    let children = args.get(2).unwrap_or(&undefined);

    match element_type {
        ForeignValue::Function(component) => component.call(&[props.clone(), children.clone()]),
        other => match other.as_str() {
            Some(tag) => ForeignValue::opaque(MarkupNode::from_parts(tag, props, children)),
            None => {
                tracing::warn!(?other, "markup module cannot create element of this type");
                ForeignValue::Undefined
            }
        },
    }
}
