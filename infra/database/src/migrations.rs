use crate::error::{DatabaseError, DatabaseErrorExt};
use fxhash::FxHashMap;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use surrealdb::types::SurrealValue;

/// A builtin schema migration. Scripts are applied in declaration order and
/// recorded in the `migration` table; a recorded script may never change
/// (checksum-verified on every startup).
#[derive(Debug)]
pub(crate) struct Migration {
    pub key: &'static str,
    pub version: &'static str,
    pub script: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        key: "sys.migrations",
        version: "0001",
        script: "
            DEFINE TABLE migration SCHEMAFULL;
            DEFINE FIELD key ON migration TYPE string;
            DEFINE FIELD version ON migration TYPE string;
            DEFINE FIELD checksum ON migration TYPE string;
            DEFINE FIELD applied_at ON migration TYPE datetime DEFAULT time::now();
            DEFINE INDEX migration_key ON migration FIELDS key, version UNIQUE;
        ",
    },
    Migration {
        key: "core.counters",
        version: "0001",
        script: "
            DEFINE TABLE counter SCHEMAFULL;
            DEFINE FIELD value ON counter TYPE int ASSERT $value >= 0;
        ",
    },
    Migration {
        key: "core.inventory",
        version: "0001",
        script: "
            DEFINE TABLE item SCHEMALESS;
            DEFINE FIELD sku ON item TYPE string;
            DEFINE INDEX item_sku ON item FIELDS sku UNIQUE;
        ",
    },
    Migration {
        key: "core.vouchers",
        version: "0001",
        script: "
            DEFINE TABLE voucher SCHEMALESS;
            DEFINE FIELD number ON voucher TYPE string;
            DEFINE FIELD kind ON voucher TYPE string;
            DEFINE INDEX voucher_number ON voucher FIELDS number UNIQUE;
        ",
    },
    Migration {
        key: "core.activity",
        version: "0001",
        script: "
            DEFINE TABLE activity SCHEMALESS;
            DEFINE FIELD entity_type ON activity TYPE string;
            DEFINE FIELD action ON activity TYPE string;
            DEFINE FIELD recorded_at ON activity TYPE datetime DEFAULT time::now();
        ",
    },
];

#[derive(Debug, Default)]
pub(crate) struct MigrationReport {
    pub applied: Vec<AppliedMigration>,
    pub skipped: Vec<AppliedMigration>,
}

#[derive(Debug, SurrealValue)]
pub(crate) struct AppliedMigration {
    pub key: String,
    pub version: String,
    pub checksum: String,
}

#[derive(Debug)]
pub(crate) struct MigrationRunner {
    db: Surreal<Any>,
}

impl MigrationRunner {
    #[must_use]
    pub(crate) const fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }

    pub(crate) async fn run(&self) -> Result<MigrationReport, DatabaseError> {
        let mut report = MigrationReport::default();
        let applied_migrations = self.get_migrations_map().await?;

        for migration in MIGRATIONS {
            let checksum = script_checksum(migration.script);
            if let Some(applied) =
                applied_migrations.get(&format!("{}:{}", migration.key, migration.version))
            {
                ensure_checksum_match(migration, &checksum, &applied.checksum)?;
                report.skipped.push(AppliedMigration {
                    key: migration.key.to_owned(),
                    version: migration.version.to_owned(),
                    checksum,
                });
                continue;
            }

            self.apply_migration(migration, &checksum).await?;
            report.applied.push(AppliedMigration {
                key: migration.key.to_owned(),
                version: migration.version.to_owned(),
                checksum,
            });
        }

        Ok(report)
    }

    async fn apply_migration(
        &self,
        migration: &Migration,
        checksum: &str,
    ) -> Result<(), DatabaseError> {
        let query = format!(
            "BEGIN TRANSACTION;
            {}
            CREATE migration SET key = $key, version = $version, checksum = $checksum;
            COMMIT TRANSACTION;",
            migration.script,
        );

        self.db
            .query(&query)
            .bind(("key", migration.key))
            .bind(("version", migration.version))
            .bind(("checksum", checksum.to_owned()))
            .await
            .context(format!("SQL execution failed at {}:{}", migration.key, migration.version))?
            .check()
            .map_err(surrealdb::Error::from)
            .context(format!("Migration rejected at {}:{}", migration.key, migration.version))?;

        Ok(())
    }

    async fn get_migrations_map(
        &self,
    ) -> Result<FxHashMap<String, AppliedMigration>, DatabaseError> {
        // Selecting from an undefined table yields an empty set, so the very
        // first run needs no readiness probe.
        let entries = self
            .db
            .query("SELECT key, version, checksum FROM migration")
            .await
            .context("Loading applied migrations")?
            .take::<Vec<AppliedMigration>>(0)
            .context("Parsing migrations map")?;

        Ok(entries
            .into_iter()
            .map(|entry| (format!("{}:{}", entry.key, entry.version), entry))
            .collect())
    }
}

pub(crate) fn script_checksum(script: &str) -> String {
    format!("{:016x}", fxhash::hash64(script.as_bytes()))
}

fn ensure_checksum_match(
    migration: &Migration,
    current: &str,
    recorded: &str,
) -> Result<(), DatabaseError> {
    if recorded != current {
        return Err(DatabaseError::Migration {
            message: format!(
                "Checksum mismatch for {}:{} (recorded {}, computed {})",
                migration.key, migration.version, recorded, current
            )
            .into(),
            context: Some("Migration already applied with a different script".into()),
        });
    }
    Ok(())
}
