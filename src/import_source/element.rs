//! 递归构建导入源元素

use super::binding::{ElementType, ModuleBinding};
use crate::error::TreeError;
use crate::foreign::{lookup_path, ForeignValue};
use crate::host::Host;
use crate::vdom::{create_attributes, create_children, ImportSource, VdomElement};

/// 一次构建的只读上下文
#[derive(Clone, Copy)]
pub struct ElementContext<'a> {
    pub host: &'a Host,
    pub module: &'a ForeignValue,
    pub binding: &'a ModuleBinding,
    pub current_import_source: &'a ImportSource,
}

/// 构建一个节点及其子树。
///
/// 节点声明的导入源必须与当前上下文相同，否则记录错误并丢弃该子树；
/// 兄弟节点不受影响。没有声明导入源的节点按普通标签处理。
pub fn create_import_source_element(
    ctx: &ElementContext<'_>,
    model: &VdomElement,
) -> Option<ForeignValue> {
    let element_type = match &model.import_source {
        Some(import_source) if import_source != ctx.current_import_source => {
            let err = TreeError::ImportSourceMismatch {
                parent: ctx.current_import_source.clone(),
                child: import_source.clone(),
            };
            ctx.host.logger().error(&err.to_string());
            return None;
        }
        Some(import_source) => {
            match component_from_module(ctx.module, &model.tag_name, import_source) {
                Ok(component) => ElementType::Component(component.clone()),
                Err(err) => {
                    ctx.host.logger().error(&err.to_string());
                    return None;
                }
            }
        }
        None => ElementType::Tag(model.tag_name.clone()),
    };

    let props = create_attributes(model, ctx.host);
    let children = create_children(model, |child| create_import_source_element(ctx, child));

    Some(ctx.binding.create(element_type, props, children))
}

/// 按点分路径在模块中查找组件，如 `My.Nested.Component`
pub fn component_from_module<'m>(
    module: &'m ForeignValue,
    component_name: &str,
    import_source: &ImportSource,
) -> Result<&'m ForeignValue, TreeError> {
    lookup_path(module, component_name).map_err(|missing| {
        if missing.index == 0 {
            TreeError::MissingExport {
                import_source: import_source.clone(),
                segment: missing.segment,
            }
        } else {
            TreeError::MissingSubcomponent {
                import_source: import_source.clone(),
                component: missing.resolved,
                segment: missing.segment,
            }
        }
    })
}
