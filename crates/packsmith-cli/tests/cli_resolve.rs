use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const INDEX: &str = r#"
[[mods]]
id = "sodium"
version = "0.5.3"
dependencies = [{ id = "fabric-api", version = ">=0.90.0" }]

[[mods]]
id = "fabric-api"
version = "0.92.1"
file-name = "fabric-api-0.92.1.jar"

[[mods]]
id = "lithium"
version = "0.11.2"
dependencies = [{ id = "fabric-api", version = "0.92.1" }]

[[mods]]
id = "krypton"
version = "0.2.3"
dependencies = [{ id = "fabric-api", version = "0.89.0" }]

[[mods]]
id = "fabric-api"
version = "0.89.0"
"#;

fn packsmith_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("packsmith").unwrap();
    cmd.env("HOME", home).env_remove("RUST_LOG");
    cmd
}

fn write_pack(dir: &Path, mods: &str) {
    fs::write(dir.join("index.toml"), INDEX).unwrap();
    fs::write(
        dir.join("pack.toml"),
        format!("[pack]\nname = \"Test Pack\"\n\n[mods]\n{mods}"),
    )
    .unwrap();
}

#[test]
fn test_resolve_prints_install_order() {
    let tmp = TempDir::new().unwrap();
    write_pack(tmp.path(), "sodium = \"*\"\n");

    packsmith_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["resolve"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fabric-api 0.92.1\nsodium 0.5.3"));
}

#[test]
fn test_resolve_verbose_names_puller() {
    let tmp = TempDir::new().unwrap();
    write_pack(tmp.path(), "sodium = \"*\"\n");

    packsmith_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["resolve", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fabric-api 0.92.1 (via sodium)"));
}

#[test]
fn test_resolve_write_plan() {
    let tmp = TempDir::new().unwrap();
    write_pack(tmp.path(), "sodium = \"*\"\n");

    packsmith_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["resolve", "--write-plan"])
        .assert()
        .success();

    let plan = fs::read_to_string(tmp.path().join("pack.lock")).unwrap();
    assert!(plan.contains("[[mod]]"));
    assert!(plan.contains("file-name = \"fabric-api-0.92.1.jar\""));
    assert!(plan.contains("installed-by = \"sodium\""));
    let fabric = plan.find("fabric-api").unwrap();
    let sodium = plan.find("id = \"sodium\"").unwrap();
    assert!(fabric < sodium);
}

#[test]
fn test_resolve_missing_mod_fails_by_default() {
    let tmp = TempDir::new().unwrap();
    write_pack(tmp.path(), "sodium = \"*\"\nghost = \">=1.0.0\"\n");

    packsmith_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["resolve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing"))
        .stderr(predicate::str::contains("ghost"));
}

#[test]
fn test_resolve_missing_allowed_by_config() {
    let tmp = TempDir::new().unwrap();
    write_pack(tmp.path(), "ghost = \">=1.0.0\"\n");
    let config_dir = tmp.path().join(".packsmith");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[resolver]\nfail-on-missing = false\n",
    )
    .unwrap();

    packsmith_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["resolve", "--write-plan"])
        .assert()
        .success();

    let plan = fs::read_to_string(tmp.path().join("pack.lock")).unwrap();
    assert!(plan.contains("[[missing]]"));
}

#[test]
fn test_resolve_conflict_is_reported() {
    let tmp = TempDir::new().unwrap();
    write_pack(tmp.path(), "lithium = \"*\"\nkrypton = \"*\"\n");

    packsmith_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["resolve"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Conflict"))
        .stderr(predicate::str::contains("fabric-api"));
}

#[test]
fn test_resolve_conflict_fails_when_configured() {
    let tmp = TempDir::new().unwrap();
    write_pack(tmp.path(), "lithium = \"*\"\nkrypton = \"*\"\n");
    let config_dir = tmp.path().join(".packsmith");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[resolver]\nfail-on-conflict = true\n",
    )
    .unwrap();

    packsmith_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["resolve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("version conflict"));
}

#[test]
fn test_resolve_without_manifest_fails() {
    let tmp = TempDir::new().unwrap();

    packsmith_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["resolve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No pack.toml found"));
}

#[test]
fn test_resolve_explicit_manifest_and_index() {
    let tmp = TempDir::new().unwrap();
    let pack_dir = tmp.path().join("packs/server");
    fs::create_dir_all(&pack_dir).unwrap();
    write_pack(&pack_dir, "sodium = \"*\"\n");
    fs::rename(pack_dir.join("index.toml"), tmp.path().join("shared.toml")).unwrap();

    packsmith_cmd(tmp.path())
        .current_dir(tmp.path())
        .args([
            "resolve",
            "--manifest",
            "packs/server/pack.toml",
            "--index",
            "shared.toml",
            "--write-plan",
        ])
        .assert()
        .success();

    assert!(pack_dir.join("pack.lock").is_file());
}
