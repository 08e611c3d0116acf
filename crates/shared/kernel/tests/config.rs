use orc_kernel::config::{config_path, load_config};
use orc_kernel::domain::config::AppConfig;
use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
#[serial]
fn missing_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let cfg: AppConfig = load_config(Some(dir.path().join("absent.toml"))).unwrap();

    assert_eq!(cfg.server.port, 3000);
    assert_eq!(cfg.registry.seed.code, "FRC");
}

#[test]
#[serial]
fn file_values_are_loaded() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("server.toml");
    fs::write(
        &path,
        r#"
[server]
port = 8088

[storage]
data_dir = "/var/lib/orc"

[registry]
max_random_attempts = 25
"#,
    )
    .unwrap();

    let cfg: AppConfig = load_config(Some(&path)).unwrap();
    assert_eq!(cfg.server.port, 8088);
    assert_eq!(cfg.storage.data_dir, PathBuf::from("/var/lib/orc"));
    assert_eq!(cfg.registry.max_random_attempts, 25);
}

#[test]
#[serial]
fn malformed_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("server.toml");
    fs::write(&path, "[server]\nport = \"not a port\"\n").unwrap();

    assert!(load_config::<AppConfig>(Some(&path)).is_err());
}

#[test]
fn explicit_path_is_used_verbatim() {
    assert_eq!(config_path(Some("local.toml")), PathBuf::from("local.toml"));
}
