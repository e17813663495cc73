use packsmith_core::plan::{InstallPlan, PlannedMissing, PlannedMod};
use tempfile::TempDir;

#[test]
fn write_and_reload_keeps_install_order() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("pack.lock");
    let plan = InstallPlan {
        mods: vec![
            PlannedMod {
                id: "fabric-api".into(),
                version: "0.90.0".into(),
                installed_by: Some("sodium".into()),
                download_url: None,
                file_name: Some("fabric-api-0.90.0.jar".into()),
            },
            PlannedMod {
                id: "sodium".into(),
                version: "0.5.3".into(),
                installed_by: None,
                download_url: None,
                file_name: None,
            },
        ],
        conflicts: vec![],
        missing: vec![PlannedMissing {
            id: "indium".into(),
            version: ">=1.0.0".into(),
        }],
    };
    plan.write_to(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("[[mod]]"));
    assert!(text.contains("installed-by = \"sodium\""));

    let loaded = InstallPlan::from_path(&path).unwrap();
    let ids: Vec<&str> = loaded.mods.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["fabric-api", "sodium"]);
    assert!(loaded.mods[1].installed_by.is_none());
    assert!(!loaded.is_complete());
}
