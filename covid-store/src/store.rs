use covid_query::QueryParams;

use crate::{
    engine::Engine,
    error::Result,
    record::{Record, RecordPage},
};

#[derive(Clone)]
pub struct Store {
    pub(crate) engine: Box<dyn Engine>,
}

impl Store {
    pub fn new<E: Engine + 'static>(engine: E) -> Self {
        Self {
            engine: Box::new(engine),
        }
    }

    /// Distinct lowercased countries, read fresh on every call.
    pub async fn countries(&self) -> Result<Vec<String>> {
        self.engine.countries().await
    }

    pub async fn has_country(&self, country: &str) -> Result<bool> {
        let country = country.to_lowercase();
        let countries = self.countries().await?;

        Ok(countries.iter().any(|known| known == &country))
    }

    pub async fn read(&self, params: &QueryParams) -> Result<RecordPage> {
        let records = self.engine.read(params).await?;

        Ok(RecordPage::from(records))
    }

    pub async fn insert(&self, records: &[Record]) -> Result<u64> {
        if records.is_empty() {
            return Ok(0);
        }

        self.engine.insert(records).await
    }
}
