//! 模块 binding 的有类型接口
//!
//! 模块的 `bind` 返回无类型记录，这里在边界上校验出
//! `create`/`render`/`unmount` 三个函数，之后只通过 [`ModuleBinding`] 调用。

use crate::error::ContractViolation;
use crate::foreign::{ForeignFn, ForeignObject, ForeignValue, PropertyBag};
use crate::vdom::{Child, ImportSource, PropValue, Props};
use serde_json::Value as JsonValue;

/// `create` 的第一个参数
#[derive(Debug, Clone)]
pub enum ElementType {
    /// 普通标签，由宿主环境解释
    Tag(String),
    /// 模块中解析出的组件
    Component(ForeignValue),
}

impl ElementType {
    fn into_foreign(self) -> ForeignValue {
        match self {
            ElementType::Tag(tag) => ForeignValue::Data(JsonValue::String(tag)),
            ElementType::Component(component) => component,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ModuleBinding {
    create: ForeignFn,
    render: ForeignFn,
    unmount: ForeignFn,
}

impl ModuleBinding {
    /// 校验 `bind` 的返回值，缺少的成员全部列出
    pub fn from_foreign(
        value: &ForeignValue,
        import_source: &ImportSource,
    ) -> Result<Self, ContractViolation> {
        let member = |name: &str| {
            value
                .property(name)
                .and_then(ForeignValue::as_function)
                .cloned()
        };

        match (member("create"), member("render"), member("unmount")) {
            (Some(create), Some(render), Some(unmount)) => Ok(Self {
                create,
                render,
                unmount,
            }),
            (create, render, unmount) => {
                let missing = [
                    ("create", create.is_none()),
                    ("render", render.is_none()),
                    ("unmount", unmount.is_none()),
                ]
                .into_iter()
                .filter(|(_, absent)| *absent)
                .map(|(name, _)| name)
                .collect();
                Err(ContractViolation::ImproperBinding {
                    import_source: import_source.source.clone(),
                    missing,
                })
            }
        }
    }

    /// 唯一构造原生元素的地方，返回值原样交回
    pub fn create(
        &self,
        element_type: ElementType,
        props: Props,
        children: Vec<Child<Option<ForeignValue>>>,
    ) -> ForeignValue {
        let props = props
            .into_iter()
            .fold(ForeignObject::new(), |object, (name, value)| {
                let value = match value {
                    PropValue::Value(v) => ForeignValue::Data(v),
                    PropValue::Handler(h) => ForeignValue::Handler(h),
                };
                object.with(&name, value)
            });
        let children = children
            .into_iter()
            .map(|child| match child {
                Child::Node(Some(element)) => element,
                Child::Node(None) => ForeignValue::Data(JsonValue::Null),
                Child::Text(text) => ForeignValue::Data(JsonValue::String(text)),
            })
            .collect();

        self.create.call(&[
            element_type.into_foreign(),
            ForeignValue::Object(props),
            ForeignValue::List(children),
        ])
    }

    pub fn render(&self, element: ForeignValue) -> ForeignValue {
        self.render.call(&[element])
    }

    pub fn unmount(&self) -> ForeignValue {
        self.unmount.call(&[])
    }
}
