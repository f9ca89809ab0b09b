use covid_query::{QueryParams, RawQueryParams};
use covid_store::{Record, RecordPage, Store};
use tracing::info;

use crate::{
    error::{RequestError, Result},
    validate::RecordValidator,
};

/// Reads and writes weekly records on behalf of the HTTP boundary.
#[derive(Clone)]
pub struct RecordService {
    store: Store,
    validator: RecordValidator,
}

impl RecordService {
    pub fn new(store: Store) -> Self {
        Self::with_validator(store, RecordValidator::default())
    }

    pub fn with_validator(store: Store, validator: RecordValidator) -> Self {
        Self { store, validator }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Validates raw query string values, then lists the matching records.
    pub async fn get_records(&self, raw: &RawQueryParams) -> Result<RecordPage> {
        let params = raw.parse()?;

        self.query(&params).await
    }

    /// Lists records for already validated parameters.
    ///
    /// The country list is read on every call so a freshly ingested country
    /// is immediately queryable.
    pub async fn query(&self, params: &QueryParams) -> Result<RecordPage> {
        if let Some(country) = params.country() {
            if !self.store.has_country(country).await? {
                return Err(RequestError::not_found(format!(
                    "Query parameter country value \"{country}\" not found"
                )));
            }
        }

        let page = self.store.read(params).await?;

        if page.records.is_empty() {
            return Err(RequestError::not_found("No records found!"));
        }

        Ok(page)
    }

    /// Validates the whole batch, then stores all of it or nothing.
    /// An empty batch stores nothing and succeeds.
    pub async fn save_records(&self, records: Vec<Record>) -> Result<u64> {
        info!("Number of records to save: {}", records.len());

        self.validator.validate_all(&records).await?;
        let saved = self.store.insert(&records).await?;

        info!("Successfully saved {saved} records");

        Ok(saved)
    }
}
