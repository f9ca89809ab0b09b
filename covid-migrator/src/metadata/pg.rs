use async_trait::async_trait;
use sqlx::{Executor, PgPool, Postgres, Transaction};
use std::collections::HashSet;

use crate::{
    error::{MigrateError, Result},
    metadata::{MetadataStore, MigrationRecord},
    script::MigrationScript,
};

const CREATE_MIGRATION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS migration (
    id SERIAL PRIMARY KEY,
    version VARCHAR(256) NOT NULL UNIQUE,
    summary VARCHAR(256) NOT NULL
)
"#;

#[derive(Debug, Clone)]
pub struct PgMetadataStore {
    pool: PgPool,
}

impl PgMetadataStore {
    pub fn new(pool: &PgPool) -> Self {
        Self { pool: pool.clone() }
    }

    /// Opens a transaction holding the migration lock. Concurrent runners
    /// queue here until the holder commits or rolls back.
    async fn lock(&self) -> sqlx::Result<Transaction<'static, Postgres>> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind("migration")
            .execute(&mut *tx)
            .await?;

        Ok(tx)
    }
}

#[async_trait]
impl MetadataStore for PgMetadataStore {
    async fn ensure_table(&self) -> Result<()> {
        let table_error = |e: sqlx::Error| MigrateError::MetadataTable(Box::new(e));

        let mut tx = self.lock().await.map_err(table_error)?;
        tx.execute(CREATE_MIGRATION_TABLE)
            .await
            .map_err(table_error)?;
        tx.commit().await.map_err(table_error)?;

        Ok(())
    }

    async fn applied_versions(&self) -> Result<HashSet<String>> {
        let versions = sqlx::query_scalar::<_, String>("SELECT version FROM migration")
            .fetch_all(&self.pool)
            .await?;

        Ok(versions.into_iter().collect())
    }

    async fn apply(&self, script: &MigrationScript) -> Result<Option<MigrationRecord>> {
        let mut tx = self.lock().await?;

        let applied = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM migration WHERE version = $1)",
        )
        .bind(&script.version)
        .fetch_one(&mut *tx)
        .await?;

        if applied {
            tx.rollback().await?;

            return Ok(None);
        }

        // Simple-query protocol, so a script may hold several statements.
        tx.execute(script.sql.as_str())
            .await
            .map_err(|e| MigrateError::Execute {
                version: script.version.to_owned(),
                source: Box::new(e),
            })?;

        let record = sqlx::query_as::<_, MigrationRecord>(
            "INSERT INTO migration (version, summary) VALUES ($1, $2) RETURNING id, version, summary",
        )
        .bind(&script.version)
        .bind(&script.summary)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(record))
    }

    async fn records(&self) -> Result<Vec<MigrationRecord>> {
        let records = sqlx::query_as::<_, MigrationRecord>(
            "SELECT id, version, summary FROM migration ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
