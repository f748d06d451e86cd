//! 导入源：加载外部组件模块，并用模块提供的 binding 构建元素
//!
//! 流程：[`load_import_source`] 获取模块并检查 `bind` 导出，得到
//! [`BindImportSource`]；对容器调用 [`BindImportSource::bind`] 得到
//! [`MountedImportSource`]，之后每次 `render` 都从模型重新构建元素树。

mod binding;
mod element;
mod loader;

pub use binding::{ElementType, ModuleBinding};
pub use element::{component_from_module, create_import_source_element, ElementContext};
pub use loader::{load_import_source, BindImportSource, MountedImportSource};
