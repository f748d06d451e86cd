//! 渲染需要的宿主能力集合

use crate::client::{Client, ModuleRegistry, UrlImporter};
use crate::config::ClientConfig;
use crate::js::{QuickJsEngine, ScriptEngine};
use crate::logger::{Logger, TracingLogger};
use std::rc::Rc;

#[derive(Clone)]
pub struct Host {
    client: Rc<dyn Client>,
    importer: Rc<dyn UrlImporter>,
    scripts: Rc<dyn ScriptEngine>,
    logger: Rc<dyn Logger>,
}

impl Host {
    /// 默认：空 import map、QuickJS 脚本引擎、tracing 日志
    pub fn new(client: Rc<dyn Client>) -> Self {
        Self::from_config(client, &ClientConfig::default())
    }

    pub fn from_config(client: Rc<dyn Client>, config: &ClientConfig) -> Self {
        Self {
            client,
            importer: Rc::new(ModuleRegistry::new()),
            scripts: Rc::new(QuickJsEngine::new(config.script.clone())),
            logger: Rc::new(TracingLogger),
        }
    }

    pub fn with_importer(mut self, importer: Rc<dyn UrlImporter>) -> Self {
        self.importer = importer;
        self
    }

    pub fn with_scripts(mut self, scripts: Rc<dyn ScriptEngine>) -> Self {
        self.scripts = scripts;
        self
    }

    pub fn with_logger(mut self, logger: Rc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn client(&self) -> &Rc<dyn Client> {
        &self.client
    }

    pub fn importer(&self) -> &Rc<dyn UrlImporter> {
        &self.importer
    }

    pub fn scripts(&self) -> &Rc<dyn ScriptEngine> {
        &self.scripts
    }

    pub fn logger(&self) -> &Rc<dyn Logger> {
        &self.logger
    }
}
