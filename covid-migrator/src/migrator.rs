use std::collections::HashSet;
use tracing::{error, info};

use crate::{
    error::{MigrateError, Result},
    metadata::{MetadataStore, MigrationRecord},
    script::{MigrationScript, MigrationSource},
};

/// Outcome of a [`Migrator::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub applied: Vec<MigrationRecord>,
}

impl MigrationReport {
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Migrator<S> {
    source: S,
}

impl<S: MigrationSource> Migrator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// All scripts of the source sorted by file name.
    pub fn scripts(&self) -> Result<Vec<MigrationScript>> {
        let mut scripts = self.source.scripts()?;
        let mut versions = HashSet::new();

        for script in scripts.iter() {
            if !versions.insert(script.version.as_str()) {
                return Err(MigrateError::DuplicateVersion(script.version.to_owned()));
            }
        }

        scripts.sort_by_key(|script| script.file_name());

        Ok(scripts)
    }

    /// Scripts whose version is not in the ledger, in application order.
    pub async fn pending<M: MetadataStore + ?Sized>(
        &self,
        store: &M,
    ) -> Result<Vec<MigrationScript>> {
        let scripts = self.scripts()?;
        store.ensure_table().await?;
        let applied = store.applied_versions().await?;

        Ok(scripts
            .into_iter()
            .filter(|script| !applied.contains(&script.version))
            .collect())
    }

    /// Applies every pending script in order, stopping at the first failure.
    ///
    /// Scripts applied before the failing one stay applied and recorded.
    pub async fn run<M: MetadataStore + ?Sized>(&self, store: &M) -> Result<MigrationReport> {
        let mut report = MigrationReport::default();

        for script in self.pending(store).await? {
            let file_name = script.file_name();
            info!("Running migration {file_name}");

            match store.apply(&script).await {
                Ok(Some(record)) => {
                    info!("Completed migration {file_name}");
                    report.applied.push(record);
                }
                Ok(None) => {
                    info!("Migration {file_name} was applied concurrently, skipping");
                }
                Err(e) => {
                    error!(
                        "Migration {file_name} failed after {} completed migration(s), the database needs manual attention: {e}",
                        report.applied.len()
                    );

                    return Err(e);
                }
            }
        }

        if report.is_empty() {
            info!("No migrations to run");
        } else {
            info!("{} migration(s) completed", report.applied.len());
        }

        Ok(report)
    }
}
