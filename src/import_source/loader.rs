//! 导入源加载

use super::binding::ModuleBinding;
use super::element::{create_import_source_element, ElementContext};
use crate::client::{MessageCallback, ModuleLoader, TransportClient, UrlImporter};
use crate::error::{ContractViolation, LoadError};
use crate::foreign::{ForeignFn, ForeignObject, ForeignValue, PropertyBag};
use crate::host::Host;
use crate::vdom::{ImportSource, SourceType, VdomElement};
use serde_json::Value as JsonValue;
use std::rc::Rc;

/// 获取模块并检查 `bind` 导出。
///
/// 模块获取失败直接返回错误；缺少 `bind` 只记录日志，
/// 得到的 [`BindImportSource`] 对任何容器都不会挂载。
pub async fn load_import_source(
    import_source: &ImportSource,
    host: &Host,
) -> Result<BindImportSource, LoadError> {
    let module = match import_source.source_type {
        SourceType::Url => host.importer().import(&import_source.source).await?,
        SourceType::Name => host.client().load_module(&import_source.source).await?,
    };

    let bind = match module.property("bind").and_then(ForeignValue::as_function) {
        Some(bind) => Ok(bind.clone()),
        None => {
            let violation = ContractViolation::MissingBind {
                import_source: import_source.source.clone(),
            };
            host.logger().error(&violation.to_string());
            Err(violation)
        }
    };
    tracing::debug!(source = %import_source, "import source loaded");

    Ok(BindImportSource {
        import_source: import_source.clone(),
        host: host.clone(),
        module,
        bind,
    })
}

/// 已加载的导入源，等待绑定到容器
pub struct BindImportSource {
    import_source: ImportSource,
    host: Host,
    module: ForeignValue,
    bind: Result<ForeignFn, ContractViolation>,
}

impl BindImportSource {
    pub fn import_source(&self) -> &ImportSource {
        &self.import_source
    }

    pub fn module(&self) -> &ForeignValue {
        &self.module
    }

    pub fn contract_violation(&self) -> Option<&ContractViolation> {
        self.bind.as_ref().err()
    }

    /// 调用模块的 `bind(container, { sendMessage, onMessage })`。
    /// binding 不完整时记录日志并返回 `None`。
    pub fn bind(&self, container: ForeignValue) -> Option<MountedImportSource> {
        let bind = self.bind.as_ref().ok()?;
        let binding = bind.call(&[container, self.transport_context()]);

        match ModuleBinding::from_foreign(&binding, &self.import_source) {
            Ok(binding) => {
                tracing::debug!(source = %self.import_source, "import source mounted");
                Some(MountedImportSource {
                    import_source: self.import_source.clone(),
                    host: self.host.clone(),
                    module: self.module.clone(),
                    binding,
                })
            }
            Err(violation) => {
                self.host.logger().error(&violation.to_string());
                None
            }
        }
    }

    /// 原样转交给模块的传输能力
    fn transport_context(&self) -> ForeignValue {
        let client = self.host.client().clone();
        let logger = self.host.logger().clone();
        let send_message = ForeignValue::function("sendMessage", move |args| {
            match args.first().and_then(ForeignValue::as_data) {
                Some(message) => client.send_message(message.clone()),
                None => logger.warn("sendMessage called without a data message"),
            }
            ForeignValue::Undefined
        });

        let client = self.host.client().clone();
        let on_message = ForeignValue::function("onMessage", move |args| {
            if let Some(callback) = args.first().and_then(ForeignValue::as_function) {
                let callback = callback.clone();
                let forward: MessageCallback = Rc::new(move |message: &JsonValue| {
                    callback.call(&[ForeignValue::Data(message.clone())]);
                });
                client.on_message(forward);
            }
            ForeignValue::Undefined
        });

        ForeignObject::new()
            .with("sendMessage", send_message)
            .with("onMessage", on_message)
            .into()
    }
}

/// 绑定到容器的导入源，独占模块 binding 直到 `unmount`
pub struct MountedImportSource {
    import_source: ImportSource,
    host: Host,
    module: ForeignValue,
    binding: ModuleBinding,
}

impl MountedImportSource {
    pub fn import_source(&self) -> &ImportSource {
        &self.import_source
    }

    /// 构建模型对应的元素树并交给 binding 渲染
    pub fn render(&self, model: &VdomElement) -> ForeignValue {
        let ctx = ElementContext {
            host: &self.host,
            module: &self.module,
            binding: &self.binding,
            current_import_source: &self.import_source,
        };
        let element = create_import_source_element(&ctx, model);
        self.binding
            .render(element.unwrap_or(ForeignValue::Data(JsonValue::Null)))
    }

    pub fn unmount(self) -> ForeignValue {
        tracing::debug!(source = %self.import_source, "import source unmounted");
        self.binding.unmount()
    }
}
