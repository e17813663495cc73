use packsmith_core::dependency::Side;
use packsmith_core::manifest::{Loader, Manifest, ModRequest};

const PACK: &str = r#"
[pack]
name = "Skyforge"
version = "1.4.0"
minecraft = "1.20.1"
loader = "fabric"

[mods]
fabric-api = ">=0.90.0"
lithium = "*"
sodium = { version = "0.5.3", side = "client" }
spark = { optional = true }
"#;

#[test]
fn parses_pack_metadata() {
    let manifest = Manifest::from_str(PACK).unwrap();
    assert_eq!(manifest.pack.name, "Skyforge");
    assert_eq!(manifest.pack.minecraft.as_deref(), Some("1.20.1"));
    assert_eq!(manifest.pack.loader, Some(Loader::Fabric));
    assert_eq!(manifest.mods.len(), 4);
}

#[test]
fn short_and_detailed_requests() {
    let manifest = Manifest::from_str(PACK).unwrap();
    assert!(matches!(manifest.mods["lithium"], ModRequest::Version(_)));
    assert_eq!(manifest.mods["fabric-api"].version_expr(), ">=0.90.0");
    assert_eq!(manifest.mods["sodium"].side(), Side::Client);
    assert_eq!(manifest.mods["spark"].version_expr(), "*");
    assert!(manifest.mods["spark"].is_optional());
}

#[test]
fn server_requests_skip_client_only_mods() {
    let manifest = Manifest::from_str(PACK).unwrap();
    let ids: Vec<&str> = manifest.server_requests().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["fabric-api", "lithium", "spark"]);
}

#[test]
fn missing_pack_section_is_an_error() {
    let err = Manifest::from_str("[mods]\nsodium = \"*\"\n").unwrap_err();
    assert!(err.to_string().contains("Manifest error"), "got: {err}");
}

#[test]
fn from_path_reports_missing_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    let err = Manifest::from_path(&tmp.path().join("pack.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read"), "got: {err}");
}
