//! End-to-end flow: gate -> allocate -> format -> persist -> audit.

use chrono::NaiveDate;
use kgems::{Core, CoreError};
use kgems::domain::config::AppConfig;
use kgems::domain::{PermissionSet, Role, VoucherKind, WeightUnit};
use kgems::features::audit::{ActionKind, ActivityEntry};
use kgems::features::authz::SessionContext;
use kgems::features::sequencing::{
    SkuParts, allocate_and_format_sku, allocate_and_format_voucher_number,
};

async fn core() -> Core {
    Core::init(&AppConfig::default()).await.expect("init core")
}

#[tokio::test]
async fn inventory_creation_runs_the_full_pipeline() {
    let core = core().await;
    let session = SessionContext::authenticated("u-1", Role::Manager);

    let decision = core.gate().check(PermissionSet::INVENTORY_CREATE, &session).await;
    assert!(decision.is_allowed());

    let parts = SkuParts {
        category_code: "LG".to_owned(),
        gemstone_code: "RUB".to_owned(),
        color_code: None,
        weight_value: 2.0,
        weight_unit: WeightUnit::Carat,
    };
    let sku = allocate_and_format_sku(core.database(), &parts).await.expect("allocate sku");
    assert_eq!(sku, "KGLGRUBXX20000001");

    core.database()
        .query("CREATE item SET sku = $sku")
        .bind(("sku", sku.clone()))
        .await
        .expect("insert item")
        .check()
        .expect("item accepted");

    let mut entry = ActivityEntry::new("item", format!("Item {sku} created"));
    entry.entity_identifier = Some(sku);
    entry.user_id = session.user_id.clone();
    core.trail().record(ActionKind::Create, entry).await.expect("audit");

    assert_eq!(core.trail().count(ActionKind::Create).await.unwrap(), 1);
}

#[tokio::test]
async fn denied_actor_creates_nothing_but_leaves_a_trace() {
    let core = core().await;
    let session = SessionContext::authenticated("u-9", Role::Viewer);

    let decision = core.gate().check(PermissionSet::VOUCHER_CREATE, &session).await;
    assert!(!decision.is_allowed(), "viewer cannot create vouchers");

    // the caller treats the denial as terminal: no allocation happens,
    // so the next legitimate creation still gets sequence 1
    let admin = SessionContext::authenticated("u-1", Role::Admin);
    assert!(core.gate().check(PermissionSet::VOUCHER_CREATE, &admin).await.is_allowed());

    let date = NaiveDate::from_ymd_opt(2024, 5, 5).unwrap();
    let number = allocate_and_format_voucher_number(core.database(), VoucherKind::Payment, date)
        .await
        .expect("allocate voucher number");
    assert_eq!(number, "PAY/2024/000001");

    assert_eq!(core.trail().count(ActionKind::PermissionDenied).await.unwrap(), 1);
}

#[tokio::test]
async fn init_wires_file_logging_from_config() {
    let tmp = tempfile::tempdir().unwrap();
    let log_dir = tmp.path().join("logs");

    let mut config = AppConfig::default();
    config.log.console = false;
    config.log.directory = Some(log_dir.clone());
    let core = Core::init(&config).await.expect("init core");

    // the directory is prepared even when another test already claimed the
    // global subscriber; the guard is held only by the winner
    assert!(log_dir.exists(), "log directory is created during init");
    let _ = core.logger();
}

#[tokio::test]
async fn reinitializing_logging_is_tolerated() {
    let first = core().await;
    let second = core().await;
    assert!(second.logger().is_none(), "the global subscriber is claimed at most once");
    drop(first);
}

#[tokio::test]
async fn silent_log_config_installs_nothing() {
    let mut config = AppConfig::default();
    config.log.console = false;
    let core = Core::init(&config).await.expect("init core");
    assert!(core.logger().is_none());
}

#[tokio::test]
async fn invalid_log_level_is_rejected() {
    let mut config = AppConfig::default();
    config.log.level = "chatty".to_owned();
    let err = Core::init(&config).await.unwrap_err();
    assert!(matches!(err, CoreError::Internal { .. }), "got {err}");
}
