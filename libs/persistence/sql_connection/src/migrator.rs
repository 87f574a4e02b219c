use deadpool_postgres::Pool;
use thiserror::Error;
use tracing::{info, instrument};

const CREATE_MIGRATIONS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS _migrations (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL UNIQUE,
        applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

/// A named block of SQL applied at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Migration {
    pub name: &'static str,
    pub sql: &'static str,
}

impl Migration {
    pub const fn new(name: &'static str, sql: &'static str) -> Self {
        Self { name, sql }
    }
}

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Database error: {0}")]
    Database(#[from] tokio_postgres::Error),
    #[error("Connection error: {0}")]
    Connection(#[from] deadpool_postgres::PoolError),
    #[error("Failed to run migration {name}: {source}")]
    Failed {
        name: &'static str,
        #[source]
        source: tokio_postgres::Error,
    },
}

/// Applies plain `.sql` migrations in order, tracking them in `_migrations`.
pub struct SqlMigrator {
    pool: Pool,
    migrations: Vec<Migration>,
}

impl SqlMigrator {
    pub fn new(pool: Pool, migrations: &[Migration]) -> Self {
        Self {
            pool,
            migrations: migrations.to_vec(),
        }
    }

    /// Runs every pending migration, each inside its own transaction.
    /// Returns the names applied by this call.
    #[instrument(skip(self))]
    pub async fn run_all_migrations(
        &self,
    ) -> Result<Vec<&'static str>, MigrationError> {
        self.create_migration_table().await?;

        let applied = self.list_applied_migrations().await?;
        let mut newly_applied = Vec::new();

        for migration in &self.migrations {
            if applied.iter().any(|name| name == migration.name) {
                info!(
                    migration = migration.name,
                    "Migration already applied, skipping"
                );
                continue;
            }

            self.apply(migration).await?;
            newly_applied.push(migration.name);
        }

        Ok(newly_applied)
    }

    async fn apply(&self, migration: &Migration) -> Result<(), MigrationError> {
        info!(migration = migration.name, "Running migration");

        let mut client = self.pool.get().await?;
        let tx = client.transaction().await?;

        tx.batch_execute(migration.sql).await.map_err(|source| {
            MigrationError::Failed {
                name: migration.name,
                source,
            }
        })?;
        tx.execute(
            "INSERT INTO _migrations (name, applied_at) VALUES ($1, NOW())",
            &[&migration.name],
        )
        .await?;
        tx.commit().await?;

        info!(migration = migration.name, "Migration completed");
        Ok(())
    }

    async fn create_migration_table(&self) -> Result<(), MigrationError> {
        let client = self.pool.get().await?;
        client.batch_execute(CREATE_MIGRATIONS_TABLE).await?;
        Ok(())
    }

    pub async fn list_applied_migrations(
        &self,
    ) -> Result<Vec<String>, MigrationError> {
        self.create_migration_table().await?;

        let client = self.pool.get().await?;
        let rows = client
            .query("SELECT name FROM _migrations ORDER BY applied_at, id", &[])
            .await?;

        Ok(rows.iter().map(|row| row.get("name")).collect())
    }

    /// Known migrations that have not been recorded yet.
    pub async fn pending_migrations(
        &self,
    ) -> Result<Vec<&'static str>, MigrationError> {
        let applied = self.list_applied_migrations().await?;
        Ok(self
            .migrations
            .iter()
            .map(|m| m.name)
            .filter(|name| !applied.iter().any(|a| a == name))
            .collect())
    }
}
