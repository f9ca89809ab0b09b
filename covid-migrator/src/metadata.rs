use async_trait::async_trait;
use std::collections::HashSet;

use crate::{error::Result, script::MigrationScript};

#[cfg(feature = "memory")]
mod memory;
#[cfg(feature = "pg")]
mod pg;

#[cfg(feature = "memory")]
pub use memory::*;
#[cfg(feature = "pg")]
pub use pg::*;

/// Row of the `migration` table. Written once per applied version, never updated.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "pg", derive(sqlx::FromRow))]
pub struct MigrationRecord {
    pub id: i32,
    pub version: String,
    pub summary: String,
}

/// Durable ledger of applied migration versions.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Creates the ledger table when it does not exist yet.
    async fn ensure_table(&self) -> Result<()>;

    async fn applied_versions(&self) -> Result<HashSet<String>>;

    /// Runs the statement batch and appends its ledger row.
    ///
    /// Returns `None` when the version was recorded by someone else between
    /// [`MetadataStore::applied_versions`] and this call.
    async fn apply(&self, script: &MigrationScript) -> Result<Option<MigrationRecord>>;

    /// Ledger rows in the order they were written.
    async fn records(&self) -> Result<Vec<MigrationRecord>>;
}
