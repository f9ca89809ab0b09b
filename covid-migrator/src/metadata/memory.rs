use async_trait::async_trait;
use parking_lot::Mutex;
use std::{collections::HashSet, sync::Arc};

use crate::{
    error::{MigrateError, Result},
    metadata::{MetadataStore, MigrationRecord},
    script::MigrationScript,
};

#[derive(Debug, Default)]
struct State {
    records: Vec<MigrationRecord>,
    executed: Vec<String>,
    fail_on: Option<String>,
}

/// In-process ledger. Statement batches are recorded, not executed.
#[derive(Debug, Clone, Default)]
pub struct MemoryMetadataStore(Arc<Mutex<State>>);

impl MemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes [`MetadataStore::apply`] fail for `version`, leaving no ledger row.
    pub fn fail_on(self, version: impl Into<String>) -> Self {
        self.0.lock().fail_on = Some(version.into());
        self
    }

    /// Marks `script` as applied without recording its statements.
    pub fn seed(&self, script: &MigrationScript) {
        let mut state = self.0.lock();
        let id = state.records.len() as i32 + 1;

        state.records.push(MigrationRecord {
            id,
            version: script.version.to_owned(),
            summary: script.summary.to_owned(),
        });
    }

    /// Statement batches applied so far, oldest first.
    pub fn executed(&self) -> Vec<String> {
        self.0.lock().executed.clone()
    }
}

#[async_trait]
impl MetadataStore for MemoryMetadataStore {
    async fn ensure_table(&self) -> Result<()> {
        Ok(())
    }

    async fn applied_versions(&self) -> Result<HashSet<String>> {
        Ok(self
            .0
            .lock()
            .records
            .iter()
            .map(|record| record.version.to_owned())
            .collect())
    }

    async fn apply(&self, script: &MigrationScript) -> Result<Option<MigrationRecord>> {
        let mut state = self.0.lock();

        if state.records.iter().any(|r| r.version == script.version) {
            return Ok(None);
        }

        if state.fail_on.as_deref() == Some(script.version.as_str()) {
            return Err(MigrateError::Execute {
                version: script.version.to_owned(),
                source: format!("statement batch of {} rejected", script.file_name()).into(),
            });
        }

        let record = MigrationRecord {
            id: state.records.len() as i32 + 1,
            version: script.version.to_owned(),
            summary: script.summary.to_owned(),
        };

        state.executed.push(script.sql.to_owned());
        state.records.push(record.clone());

        Ok(Some(record))
    }

    async fn records(&self) -> Result<Vec<MigrationRecord>> {
        Ok(self.0.lock().records.clone())
    }
}
