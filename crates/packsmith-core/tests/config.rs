use packsmith_core::config::GlobalConfig;
use tempfile::TempDir;

#[test]
fn defaults_when_file_is_absent() {
    let tmp = TempDir::new().unwrap();
    let config = GlobalConfig::load_from(&tmp.path().join("config.toml")).unwrap();
    assert!(!config.resolver.fail_on_conflict);
    assert!(config.resolver.fail_on_missing);
    assert_eq!(config.index.path, "index.toml");
}

#[test]
fn reads_kebab_case_keys() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[resolver]
fail-on-conflict = true
fail-on-missing = false
extra-reserved-ids = ["quilt_loader"]

[index]
path = "mods/index.toml"
"#,
    )
    .unwrap();
    let config = GlobalConfig::load_from(&path).unwrap();
    assert!(config.resolver.fail_on_conflict);
    assert!(!config.resolver.fail_on_missing);
    assert_eq!(config.resolver.extra_reserved_ids, vec!["quilt_loader"]);
    assert_eq!(config.index.path, "mods/index.toml");
}

#[test]
fn malformed_config_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "[resolver\n").unwrap();
    let err = GlobalConfig::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Config error"), "got: {err}");
}
