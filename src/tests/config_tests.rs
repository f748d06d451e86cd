//! 配置解析测试

use crate::config::{ClientConfig, ScriptConfig};

#[test]
fn test_config_defaults() {
    let config = ClientConfig::from_json("{}").unwrap();
    assert_eq!(config.log_filter, "info");
    assert_eq!(config.script, ScriptConfig::default());
    assert_eq!(ClientConfig::default().log_filter, "info");
}

#[test]
fn test_config_script_limits() {
    let config = ClientConfig::from_json(
        r#"{ "logFilter": "mini_vdom=debug", "script": { "memoryLimit": 1048576, "maxStackSize": 65536 } }"#,
    )
    .unwrap();
    assert_eq!(config.log_filter, "mini_vdom=debug");
    assert_eq!(config.script.memory_limit, Some(1048576));
    assert_eq!(config.script.max_stack_size, Some(65536));
    assert_eq!(config.script.timeout_ms, Some(1000));
}

#[test]
fn test_config_script_timeout() {
    let config = ClientConfig::from_json(r#"{ "script": { "timeoutMs": 250 } }"#).unwrap();
    assert_eq!(config.script.timeout_ms, Some(250));

    let config = ClientConfig::from_json(r#"{ "script": { "timeoutMs": null } }"#).unwrap();
    assert_eq!(config.script.timeout_ms, None);
}

#[test]
fn test_config_invalid_json() {
    assert!(ClientConfig::from_json("{ not json").is_err());
}

#[test]
fn test_config_missing_file() {
    assert!(ClientConfig::from_file("/definitely/not/here/client.json").is_err());
}
