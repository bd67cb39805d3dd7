use std::io::Write;

use hpsdr_gateway_lib::config::load_from_path;
use hpsdr_gateway_lib::GatewayError;
use tempfile::NamedTempFile;

fn write_toml(toml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config file");
    file.write_all(toml.as_bytes()).expect("write temp config file");
    file
}

#[test]
fn loads_minimal_config() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let file = write_toml(
        r#"
[proxy]
listen_port = 1024

[[radios]]
name = "main"
hostname = "radio.local"
"#,
    );

    let cfg = load_from_path(file.path())?;
    assert_eq!(cfg.proxy.listen_port, 1024);
    assert_eq!(cfg.proxy.buffer_size, 2048);
    assert_eq!(cfg.radios.len(), 1);
    assert_eq!(cfg.radios[0].port, 1024);
    assert!(cfg.radios[0].enabled);
    assert!(!cfg.security.require_authentication);
    Ok(())
}

#[test]
fn loads_full_config_with_multiple_radios() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let file = write_toml(
        r#"
[proxy]
listen_address = "0.0.0.0"
listen_port = 1024
buffer_size = 4096
session_timeout_s = 120
reaper_interval_s = 15
radio_selection = "round_robin"

[[radios]]
name = "bench-1"
hostname = "10.0.0.10"
port = 1024
data_port = 1025

[[radios]]
name = "bench-2"
hostname = "10.0.0.11"
enabled = false

[security]
require_authentication = true
rewrite_discovery_response = true

[telemetry]
log_level = "debug"
metrics_port = 9898
"#,
    );

    let cfg = load_from_path(file.path())?;
    assert_eq!(cfg.radios.len(), 2);
    assert_eq!(cfg.radios[0].data_port, Some(1025));
    assert!(!cfg.radios[1].enabled);
    assert!(cfg.security.require_authentication);
    assert_eq!(cfg.telemetry.metrics_port, Some(9898));
    Ok(())
}

#[test]
fn rejects_config_with_no_enabled_radios() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let file = write_toml(
        r#"
[proxy]
listen_port = 1024

[[radios]]
name = "main"
hostname = "radio.local"
enabled = false
"#,
    );

    let err = load_from_path(file.path()).expect_err("expected validation failure");
    assert!(matches!(err, GatewayError::NoEnabledRadios));
    Ok(())
}

#[test]
fn rejects_missing_file() {
    let err = load_from_path("/nonexistent/path/gateway.toml").expect_err("expected io failure");
    assert!(matches!(err, GatewayError::Config(_)));
}
