//! Mini VDOM 演示程序
//! 用法: mini-vdom <tree.json> [client.json]

use mini_vdom::{
    load_import_source, ClientConfig, ForeignValue, HandlerArg, Host, HostElement, HostEvent,
    ImportSource, LocalClient, MarkupContainer, MarkupModule, ModuleRegistry, VdomElement,
};
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), String> {
    let mut args = std::env::args().skip(1);
    let tree_path = args.next().ok_or("usage: mini-vdom <tree.json> [client.json]")?;
    let config = match args.next() {
        Some(path) => ClientConfig::from_file(&path).map_err(|e| format!("{}: {}", path, e))?,
        None => ClientConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    // 解析 VDOM 快照
    let text = std::fs::read_to_string(&tree_path).map_err(|e| format!("{}: {}", tree_path, e))?;
    let model: VdomElement =
        serde_json::from_str(&text).map_err(|e| format!("VDOM parse error: {}", e))?;
    let import_source = model
        .import_source
        .clone()
        .unwrap_or_else(|| ImportSource::name("markup"));
    println!("✅ VDOM parsed: <{}> from {}", model.tag_name, import_source);

    // 同一个模块表既用于 NAME 也用于 URL
    let registry = ModuleRegistry::new();
    registry.register(&import_source.source, demo_module);
    let client = Rc::new(LocalClient::new(registry.clone()));
    let host = Host::from_config(client.clone(), &config).with_importer(Rc::new(registry));

    let bind = futures::executor::block_on(load_import_source(&import_source, &host))
        .map_err(|e| e.to_string())?;
    let container = MarkupContainer::new();
    let Some(mount) = bind.bind(container.as_foreign()) else {
        return Err(format!("{} could not be mounted", import_source));
    };

    mount.render(&model);
    println!("\n{}\n", container.markup());

    // 模拟点击第一个 onClick
    if let Some(handler) = container.root().and_then(|root| root.find_handler("onClick")) {
        let target = HostElement::new("button");
        let event = Rc::new(HostEvent::tap(12.0, 8.0, 0).with_target(target.clone()));
        handler
            .call(&[HandlerArg::event(event)])
            .map_err(|e| e.to_string())?;
        println!("[Click] target = {}", serde_json::Value::Object(target.snapshot()));
    }

    for message in client.drain_messages() {
        println!("[Send] {}", message);
    }

    mount.unmount();
    Ok(())
}

fn demo_module() -> ForeignValue {
    let menu = MarkupModule::component("x-menu")
        .with_static("Item", MarkupModule::component("x-menu-item").into());

    MarkupModule::new()
        .with_export("Widget", MarkupModule::component("x-widget").into())
        .with_export("Menu", menu.into())
        .into_module()
}
