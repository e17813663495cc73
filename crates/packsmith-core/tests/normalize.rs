use std::collections::BTreeMap;

use packsmith_core::dependency::{Dependency, Side};
use packsmith_core::normalize::{
    from_loader_maps, from_registry_list, parse_fabric_mod_json, parse_forge_mods_toml,
    RegistryDependency, FABRIC_RESERVED_IDS, FORGE_RESERVED_IDS,
};

#[test]
fn depends_are_required_and_recommends_optional() {
    let depends = BTreeMap::from([("cloth-config".to_string(), ">=11.0.0".to_string())]);
    let recommends = BTreeMap::from([("modmenu".to_string(), "".to_string())]);
    let deps = from_loader_maps(&depends, &recommends, FABRIC_RESERVED_IDS);
    assert_eq!(
        deps,
        vec![
            Dependency::required("cloth-config", ">=11.0.0"),
            Dependency::optional("modmenu", "*"),
        ]
    );
}

#[test]
fn registry_types_map_to_required_flag() {
    let list: Vec<RegistryDependency> = serde_json::from_str(
        r#"[
            {"project_id": "P7dR8mSH", "version_id": null, "dependency_type": "required"},
            {"project_id": "mOgUt4GM", "dependency_type": "optional"},
            {"project_id": "AANobbMI", "dependency_type": "embedded"},
            {"version_id": "abc123", "dependency_type": "required"}
        ]"#,
    )
    .unwrap();
    let deps = from_registry_list(&list);
    assert_eq!(deps.len(), 3);
    assert!(deps[0].required);
    assert_eq!(deps[0].mod_id, "P7dR8mSH");
    assert_eq!(deps[0].version, "*");
    assert!(!deps[1].required);
    assert!(!deps[2].required);
}

#[test]
fn fabric_mod_json_to_mod_info() {
    let info = parse_fabric_mod_json(
        r#"{
            "schemaVersion": 1,
            "id": "lithium",
            "version": "0.11.2",
            "name": "Lithium",
            "environment": "*",
            "depends": {
                "fabricloader": ">=0.14.0",
                "minecraft": ["1.20", "1.20.1"],
                "fabric-api": ">=0.90.0"
            },
            "recommends": { "modmenu": ["*"] },
            "provides": ["lithium-api"]
        }"#,
        FABRIC_RESERVED_IDS,
    )
    .unwrap();

    assert_eq!(info.id, "lithium");
    assert_eq!(info.name, "Lithium");
    assert_eq!(info.provides, vec!["lithium-api".to_string()]);
    assert_eq!(
        info.dependencies,
        vec![
            Dependency::required("fabric-api", ">=0.90.0"),
            Dependency::optional("modmenu", "*"),
        ]
    );
}

#[test]
fn fabric_mod_json_rejects_garbage() {
    assert!(parse_fabric_mod_json("{ not json", FABRIC_RESERVED_IDS).is_err());
}

#[test]
fn forge_mods_toml_translates_ranges() {
    let mods = parse_forge_mods_toml(
        r#"
modLoader = "javafml"
loaderVersion = "[47,)"

[[mods]]
modId = "create"
version = "0.5.1"
displayName = "Create"

[[dependencies.create]]
modId = "forge"
mandatory = true
versionRange = "[47,)"
side = "BOTH"

[[dependencies.create]]
modId = "flywheel"
mandatory = true
versionRange = "[0.6.10,0.6.11)"
side = "CLIENT"

[[dependencies.create]]
modId = "jei"
type = "optional"
versionRange = "[15.0.0,)"

[[dependencies.create]]
modId = "optifine"
type = "incompatible"
"#,
        FORGE_RESERVED_IDS,
    )
    .unwrap();

    assert_eq!(mods.len(), 1);
    let create = &mods[0];
    assert_eq!(create.name, "Create");
    assert_eq!(create.dependencies.len(), 2);
    assert_eq!(
        create.dependencies[0],
        Dependency::required("flywheel", ">=0.6.10,<0.6.11").with_side(Side::Client)
    );
    assert_eq!(create.dependencies[1], Dependency::optional("jei", ">=15.0.0"));
}

#[test]
fn forge_mods_toml_propagates_bad_ranges() {
    let err = parse_forge_mods_toml(
        r#"
[[mods]]
modId = "broken"

[[dependencies.broken]]
modId = "lib"
versionRange = "[1.0"
"#,
        FORGE_RESERVED_IDS,
    )
    .unwrap_err();
    assert!(err.to_string().contains("invalid Maven version range"), "got: {err}");
}
