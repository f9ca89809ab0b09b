use covid_store::Record;
use tokio::task::JoinSet;
use tracing::debug;
use validator::{Validate, ValidationErrors};

use crate::error::{RequestError, Result};

pub type CheckFn = fn(&Record) -> std::result::Result<(), ValidationErrors>;

/// Stateless per-record check, built once and handed to whoever ingests records.
#[derive(Debug, Clone, Copy)]
pub struct RecordValidator {
    check: CheckFn,
}

impl Default for RecordValidator {
    fn default() -> Self {
        Self {
            check: |record| record.validate(),
        }
    }
}

impl RecordValidator {
    pub fn new(check: CheckFn) -> Self {
        Self { check }
    }

    pub fn validate(&self, record: &Record) -> std::result::Result<(), ValidationErrors> {
        (self.check)(record)
    }

    /// Validates every record on its own task and waits for all of them.
    ///
    /// When several records fail, the one with the lowest index is reported.
    pub async fn validate_all(&self, records: &[Record]) -> Result<()> {
        let mut tasks = JoinSet::new();

        for (index, record) in records.iter().cloned().enumerate() {
            let validator = *self;
            tasks.spawn(async move { (index, validator.validate(&record)) });
        }

        let mut failure: Option<(usize, ValidationErrors)> = None;

        while let Some(joined) = tasks.join_next().await {
            let (index, result) = joined.map_err(RequestError::storage)?;

            match result {
                Ok(()) => debug!("Record #{index} validate successful"),
                Err(errors) => {
                    if failure.as_ref().map_or(true, |(first, _)| index < *first) {
                        failure = Some((index, errors));
                    }
                }
            }
        }

        match failure {
            Some((index, errors)) => Err(RequestError::validation(format!(
                "Record #{index} is invalid: {errors}"
            ))),
            None => Ok(()),
        }
    }
}
