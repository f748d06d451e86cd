//! 进程内模块表
//!
//! 编译后的 Rust 程序不能从网络取代码执行，所以 URL 与名字都映射到
//! 预先注册的模块工厂，相当于浏览器里的 import map。

use super::{ModuleLoader, UrlImporter};
use crate::error::LoadError;
use crate::foreign::ForeignValue;
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

type ModuleFactory = Rc<dyn Fn() -> ForeignValue>;

#[derive(Clone, Default)]
pub struct ModuleRegistry {
    modules: Rc<RefCell<HashMap<String, ModuleFactory>>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册模块工厂，每次加载都会重新实例化
    pub fn register<F>(&self, key: &str, factory: F)
    where
        F: Fn() -> ForeignValue + 'static,
    {
        self.modules
            .borrow_mut()
            .insert(key.to_string(), Rc::new(factory));
    }

    /// 注册一个共享的模块实例
    pub fn register_module(&self, key: &str, module: ForeignValue) {
        self.register(key, move || module.clone());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.modules.borrow().contains_key(key)
    }

    fn instantiate(&self, key: &str) -> Option<ForeignValue> {
        let factory = self.modules.borrow().get(key).cloned();
        factory.map(|f| f())
    }
}

#[async_trait(?Send)]
impl ModuleLoader for ModuleRegistry {
    async fn load_module(&self, name: &str) -> Result<ForeignValue, LoadError> {
        self.instantiate(name).ok_or_else(|| LoadError::Module {
            name: name.to_string(),
            reason: "no module registered under this name".to_string(),
        })
    }
}

#[async_trait(?Send)]
impl UrlImporter for ModuleRegistry {
    async fn import(&self, url: &str) -> Result<ForeignValue, LoadError> {
        self.instantiate(url).ok_or_else(|| LoadError::Import {
            url: url.to_string(),
            reason: "url is not present in the import map".to_string(),
        })
    }
}
