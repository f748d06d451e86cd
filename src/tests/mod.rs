//! 单元测试模块
//! 覆盖虚拟树投影、事件 / 内联代码处理器、导入源加载与元素构建

pub mod client_tests;
pub mod config_tests;
pub mod handler_tests;
pub mod vdom_tests;

use crate::client::{LocalClient, ModuleRegistry};
use crate::host::Host;
use crate::logger::RecordingLogger;
use std::rc::Rc;

/// 测试用宿主：进程内传输、共享模块表、记录日志
pub struct Fixture {
    pub host: Host,
    pub client: Rc<LocalClient>,
    pub logger: Rc<RecordingLogger>,
    pub registry: ModuleRegistry,
}

pub fn fixture() -> Fixture {
    let registry = ModuleRegistry::new();
    let client = Rc::new(LocalClient::new(registry.clone()));
    let logger = Rc::new(RecordingLogger::new());
    let host = Host::new(client.clone())
        .with_importer(Rc::new(registry.clone()))
        .with_logger(logger.clone());

    Fixture {
        host,
        client,
        logger,
        registry,
    }
}
