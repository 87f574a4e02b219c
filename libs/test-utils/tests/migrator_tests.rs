//! Needs a Docker daemon: `cargo test -p test-utils -- --ignored`.

use anyhow::Result;
use sql_connection::Migration;
use test_utils::TestPostgresContainer;

const FIRST: Migration = Migration::new(
    "001_create_widgets",
    "CREATE TABLE widgets (id SERIAL PRIMARY KEY, label TEXT NOT NULL);",
);
const SECOND: Migration = Migration::new(
    "002_add_widget_index",
    "CREATE INDEX idx_widgets_label ON widgets (label);",
);
const BROKEN: Migration =
    Migration::new("003_broken", "ALTER TABLE missing ADD COLUMN x INT;");

#[tokio::test]
#[ignore = "requires docker"]
async fn test_migrations_apply_once() -> Result<()> {
    let postgres = TestPostgresContainer::new(&[FIRST]).await?;

    let migrator = postgres.migrator(&[FIRST, SECOND]);
    assert_eq!(migrator.pending_migrations().await?, vec![SECOND.name]);

    let applied = migrator.run_all_migrations().await?;
    assert_eq!(applied, vec![SECOND.name]);

    assert!(migrator.run_all_migrations().await?.is_empty());
    assert_eq!(migrator.list_applied_migrations().await?, vec![
        FIRST.name.to_string(),
        SECOND.name.to_string(),
    ]);

    Ok(())
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_failed_migration_is_not_recorded() -> Result<()> {
    let postgres = TestPostgresContainer::new(&[FIRST]).await?;
    let migrator = postgres.migrator(&[FIRST, BROKEN]);

    assert!(migrator.run_all_migrations().await.is_err());
    assert_eq!(migrator.pending_migrations().await?, vec![BROKEN.name]);

    Ok(())
}
