use kgems_database::*;
use surrealdb::types::SurrealValue;

#[tokio::test]
async fn connect_in_memory_and_health_check() {
    let db = Database::builder()
        .url("mem://")
        .session("test_ns", "test_db")
        .init()
        .await
        .expect("connect to mem://");

    db.health().await.expect("health check");
    assert_eq!(db.namespace(), "test_ns");
    assert_eq!(db.database(), "test_db");
}

#[tokio::test]
async fn missing_parameters_fail_validation() {
    let err = Database::builder().init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));
}

#[derive(Debug, SurrealValue)]
struct MigrationRow {
    key: String,
    version: String,
}

#[tokio::test]
async fn builtin_migrations_are_recorded() {
    let db = Database::builder().url("mem://").session("t", "t").init().await.expect("connect");

    let rows: Vec<MigrationRow> = db
        .query("SELECT key, version FROM migration ORDER BY key")
        .await
        .expect("query migration table")
        .take(0)
        .expect("parse migration rows");

    let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
    for expected in
        ["core.activity", "core.counters", "core.inventory", "core.vouchers", "sys.migrations"]
    {
        assert!(keys.contains(&expected), "missing migration {expected}: {keys:?}");
    }
    assert!(rows.iter().all(|r| r.version == "0001"));
}

#[tokio::test]
async fn duplicate_voucher_numbers_are_rejected() {
    let db = Database::builder().url("mem://").session("t", "t").init().await.expect("connect");

    db.query("CREATE voucher SET number = 'EXP/2024/000001', kind = 'EXP'")
        .await
        .expect("first insert")
        .check()
        .expect("first insert ok");

    let dup = db
        .query("CREATE voucher SET number = 'EXP/2024/000001', kind = 'EXP'")
        .await
        .expect("query ran")
        .check();
    assert!(dup.is_err(), "unique index on voucher.number must reject duplicates");
}

#[tokio::test]
async fn duplicate_skus_are_rejected() {
    let db = Database::builder().url("mem://").session("t", "t").init().await.expect("connect");

    db.query("CREATE item SET sku = 'KGLGSAPRED52500007'")
        .await
        .expect("first insert")
        .check()
        .expect("first insert ok");

    let dup =
        db.query("CREATE item SET sku = 'KGLGSAPRED52500007'").await.expect("query ran").check();
    assert!(dup.is_err(), "unique index on item.sku must reject duplicates");
}
