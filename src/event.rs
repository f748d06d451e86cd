//! 事件系统 - 宿主侧的原始事件与事件目标

use serde::Serialize;
use serde_json::{json, Map, Value as JsonValue};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// 原始事件需要提供的能力
pub trait EventLike {
    fn prevent_default(&self);
    fn stop_propagation(&self);
    fn current_target(&self) -> Option<Rc<HostElement>>;
    /// 序列化为纯数据
    fn to_json(&self) -> JsonValue;
}

/// 宿主元素：一个可变的属性表，作为事件目标和内联代码的接收者
#[derive(Debug, Default)]
pub struct HostElement {
    tag_name: String,
    properties: RefCell<Map<String, JsonValue>>,
}

impl HostElement {
    pub fn new(tag_name: &str) -> Rc<Self> {
        Rc::new(Self {
            tag_name: tag_name.to_string(),
            properties: RefCell::new(Map::new()),
        })
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn get(&self, name: &str) -> Option<JsonValue> {
        self.properties.borrow().get(name).cloned()
    }

    pub fn set(&self, name: &str, value: impl Into<JsonValue>) {
        self.properties.borrow_mut().insert(name.to_string(), value.into());
    }

    /// 当前属性的拷贝
    pub fn snapshot(&self) -> Map<String, JsonValue> {
        self.properties.borrow().clone()
    }

    /// 整体替换属性（脚本执行后写回）
    pub fn replace(&self, properties: Map<String, JsonValue>) {
        *self.properties.borrow_mut() = properties;
    }
}

/// 单个触摸点
#[derive(Debug, Clone, Serialize)]
pub struct Touch {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub force: f32,
}

impl Touch {
    pub fn new(id: u32, x: f32, y: f32) -> Self {
        Self { id, x, y, force: 1.0 }
    }
}

/// 宿主事件
#[derive(Debug)]
pub struct HostEvent {
    event_type: String,
    timestamp: u64,
    detail: Map<String, JsonValue>,
    current_target: Option<Rc<HostElement>>,
    prevent_default_calls: Cell<u32>,
    stop_propagation_calls: Cell<u32>,
}

impl HostEvent {
    pub fn new(event_type: &str) -> Self {
        Self {
            event_type: event_type.to_string(),
            timestamp: 0,
            detail: Map::new(),
            current_target: None,
            prevent_default_calls: Cell::new(0),
            stop_propagation_calls: Cell::new(0),
        }
    }

    /// 点击事件
    pub fn tap(x: f32, y: f32, timestamp: u64) -> Self {
        Self::new("click")
            .with_timestamp(timestamp)
            .with_detail("clientX", json!(x))
            .with_detail("clientY", json!(y))
    }

    /// 触摸事件，`kind` 如 `touchstart`
    pub fn touch(kind: &str, touches: &[Touch], timestamp: u64) -> Self {
        Self::new(kind)
            .with_timestamp(timestamp)
            .with_detail("touches", json!(touches))
    }

    /// 键盘事件
    pub fn key(kind: &str, key: &str, code: &str) -> Self {
        Self::new(kind)
            .with_detail("key", json!(key))
            .with_detail("code", json!(code))
    }

    /// 输入事件，携带目标的新值
    pub fn input(target: Rc<HostElement>, value: &str) -> Self {
        target.set("value", value);
        Self::new("input").with_target(target)
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_detail(mut self, key: &str, value: JsonValue) -> Self {
        self.detail.insert(key.to_string(), value);
        self
    }

    pub fn with_target(mut self, target: Rc<HostElement>) -> Self {
        self.current_target = Some(target);
        self
    }

    pub fn prevent_default_calls(&self) -> u32 {
        self.prevent_default_calls.get()
    }

    pub fn stop_propagation_calls(&self) -> u32 {
        self.stop_propagation_calls.get()
    }

    pub fn default_prevented(&self) -> bool {
        self.prevent_default_calls.get() > 0
    }
}

impl EventLike for HostEvent {
    fn prevent_default(&self) {
        self.prevent_default_calls.set(self.prevent_default_calls.get() + 1);
    }

    fn stop_propagation(&self) {
        self.stop_propagation_calls.set(self.stop_propagation_calls.get() + 1);
    }

    fn current_target(&self) -> Option<Rc<HostElement>> {
        self.current_target.clone()
    }

    fn to_json(&self) -> JsonValue {
        let mut out = Map::new();
        out.insert("type".to_string(), json!(self.event_type));
        out.insert("timeStamp".to_string(), json!(self.timestamp));
        out.insert("defaultPrevented".to_string(), json!(self.default_prevented()));
        for (k, v) in &self.detail {
            out.insert(k.clone(), v.clone());
        }
        if let Some(target) = &self.current_target {
            let mut snapshot = target.snapshot();
            snapshot.insert("tagName".to_string(), json!(target.tag_name()));
            out.insert("currentTarget".to_string(), JsonValue::Object(snapshot));
        }
        JsonValue::Object(out)
    }
}
