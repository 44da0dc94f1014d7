use kgems_domain::config::AppConfig;

#[test]
fn defaults_target_an_in_memory_engine() {
    let cfg = AppConfig::default();
    assert_eq!(cfg.database.url, "mem://");
    assert_eq!(cfg.database.namespace, "kgems");
    assert_eq!(cfg.database.database, "core");
    assert!(cfg.database.credentials.is_none());
}

#[test]
fn deserializes_from_partial_json() {
    let cfg: AppConfig = serde_json::from_str(
        r#"{
            "database": { "url": "ws://localhost:8000", "namespace": "kgems" },
            "log": { "level": "debug", "console": false }
        }"#,
    )
    .unwrap();

    assert_eq!(cfg.database.url, "ws://localhost:8000");
    // Missing fields fall back to defaults.
    assert_eq!(cfg.database.database, "core");
    assert_eq!(cfg.log.level, "debug");
    assert!(!cfg.log.console);
    assert_eq!(cfg.log.max_files, 10);
}

#[test]
fn clone_is_shallow_until_mutated() {
    let base = AppConfig::default();
    let mut copy = base.clone();
    copy.database.url = "rocksdb://data".to_owned();
    assert_eq!(base.database.url, "mem://");
    assert_eq!(copy.database.url, "rocksdb://data");
}
