//! 外部模块值
//!
//! 导入源模块是运行时才确定的无类型对象。这里用 [`ForeignValue`] 表示，
//! 在加载边界上再校验为有类型的接口（见 [`crate::import_source::ModuleBinding`]）。

use crate::handler::Handler;
use serde_json::Value as JsonValue;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

type ForeignCall = dyn Fn(&[ForeignValue]) -> ForeignValue;

/// 外部可调用对象，可附带静态属性（如复合组件 `Menu.Item`）
#[derive(Clone)]
pub struct ForeignFn {
    name: Rc<str>,
    call: Rc<ForeignCall>,
    statics: Rc<BTreeMap<String, ForeignValue>>,
}

impl ForeignFn {
    pub fn new<F>(name: &str, call: F) -> Self
    where
        F: Fn(&[ForeignValue]) -> ForeignValue + 'static,
    {
        Self {
            name: Rc::from(name),
            call: Rc::new(call),
            statics: Rc::new(BTreeMap::new()),
        }
    }

    /// 挂一个静态属性
    pub fn with_static(mut self, key: &str, value: ForeignValue) -> Self {
        Rc::make_mut(&mut self.statics).insert(key.to_string(), value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &[ForeignValue]) -> ForeignValue {
        (self.call)(args)
    }
}

impl fmt::Debug for ForeignFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Function {}]", self.name)
    }
}

/// 属性包（模块导出、binding 记录等）
#[derive(Clone, Default)]
pub struct ForeignObject {
    entries: Rc<BTreeMap<String, ForeignValue>>,
}

impl ForeignObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: ForeignValue) -> Self {
        Rc::make_mut(&mut self.entries).insert(key.to_string(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&ForeignValue> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ForeignValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl fmt::Debug for ForeignObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

/// 跨越模块边界的无类型值
#[derive(Clone)]
pub enum ForeignValue {
    Undefined,
    Data(JsonValue),
    List(Vec<ForeignValue>),
    Object(ForeignObject),
    Function(ForeignFn),
    Handler(Handler),
    /// 宿主对象：容器、模块创建的元素等
    Opaque(Rc<dyn Any>),
}

impl ForeignValue {
    pub fn function<F>(name: &str, call: F) -> Self
    where
        F: Fn(&[ForeignValue]) -> ForeignValue + 'static,
    {
        ForeignValue::Function(ForeignFn::new(name, call))
    }

    pub fn opaque<T: 'static>(value: T) -> Self {
        ForeignValue::Opaque(Rc::new(value))
    }

    pub fn string(text: &str) -> Self {
        ForeignValue::Data(JsonValue::String(text.to_string()))
    }

    /// 与 JS 的真值判断一致：undefined、null、false、0、"" 为假
    pub fn is_truthy(&self) -> bool {
        match self {
            ForeignValue::Undefined => false,
            ForeignValue::Data(JsonValue::Null) => false,
            ForeignValue::Data(JsonValue::Bool(b)) => *b,
            ForeignValue::Data(JsonValue::Number(n)) => n.as_f64().map_or(true, |v| v != 0.0),
            ForeignValue::Data(JsonValue::String(s)) => !s.is_empty(),
            _ => true,
        }
    }

    pub fn as_function(&self) -> Option<&ForeignFn> {
        match self {
            ForeignValue::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ForeignObject> {
        match self {
            ForeignValue::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&JsonValue> {
        match self {
            ForeignValue::Data(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_data().and_then(|v| v.as_str())
    }

    pub fn as_list(&self) -> Option<&[ForeignValue]> {
        match self {
            ForeignValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_handler(&self) -> Option<&Handler> {
        match self {
            ForeignValue::Handler(h) => Some(h),
            _ => None,
        }
    }

    /// 取出宿主对象
    pub fn downcast<T: 'static>(&self) -> Option<Rc<T>> {
        match self {
            ForeignValue::Opaque(any) => any.clone().downcast::<T>().ok(),
            _ => None,
        }
    }
}

impl From<JsonValue> for ForeignValue {
    fn from(value: JsonValue) -> Self {
        ForeignValue::Data(value)
    }
}

impl From<ForeignObject> for ForeignValue {
    fn from(object: ForeignObject) -> Self {
        ForeignValue::Object(object)
    }
}

impl From<ForeignFn> for ForeignValue {
    fn from(function: ForeignFn) -> Self {
        ForeignValue::Function(function)
    }
}

impl fmt::Debug for ForeignValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForeignValue::Undefined => write!(f, "undefined"),
            ForeignValue::Data(v) => write!(f, "{}", v),
            ForeignValue::List(items) => f.debug_list().entries(items).finish(),
            ForeignValue::Object(o) => fmt::Debug::fmt(o, f),
            ForeignValue::Function(func) => fmt::Debug::fmt(func, f),
            ForeignValue::Handler(h) => fmt::Debug::fmt(h, f),
            ForeignValue::Opaque(_) => write!(f, "[object]"),
        }
    }
}

/// 可以按名字取属性的值
pub trait PropertyBag {
    fn property(&self, key: &str) -> Option<&ForeignValue>;
}

impl PropertyBag for ForeignObject {
    fn property(&self, key: &str) -> Option<&ForeignValue> {
        self.get(key)
    }
}

impl PropertyBag for ForeignValue {
    fn property(&self, key: &str) -> Option<&ForeignValue> {
        match self {
            ForeignValue::Object(o) => o.get(key),
            ForeignValue::Function(func) => func.statics.get(key),
            _ => None,
        }
    }
}

/// 路径查找失败的位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingSegment {
    /// 失败段的下标，0 表示模块本身没有该导出
    pub index: usize,
    pub segment: String,
    /// 已成功解析的前缀，如 `A.B`
    pub resolved: String,
}

/// 逐段解析点分路径：`"A.B.C"` 即 `root.A.B.C`
pub fn lookup_path<'a, B>(root: &'a B, path: &str) -> Result<&'a ForeignValue, MissingSegment>
where
    B: PropertyBag + ?Sized,
{
    let segments: Vec<&str> = path.split('.').collect();
    let mut current: Option<&'a ForeignValue> = None;

    for (index, segment) in segments.iter().enumerate() {
        let next = match current {
            None => root.property(segment),
            Some(value) => value.property(segment),
        };
        match next {
            Some(value) if value.is_truthy() => current = Some(value),
            _ => {
                return Err(MissingSegment {
                    index,
                    segment: segment.to_string(),
                    resolved: segments[..index].join("."),
                })
            }
        }
    }

    current.ok_or_else(|| MissingSegment {
        index: 0,
        segment: path.to_string(),
        resolved: String::new(),
    })
}
