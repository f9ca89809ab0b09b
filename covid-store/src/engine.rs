use async_trait::async_trait;
use covid_query::QueryParams;
use dyn_clone::DynClone;

use crate::{error::Result, record::Record};

#[cfg(feature = "memory")]
mod memory;
#[cfg(feature = "pg")]
mod pg;

#[cfg(feature = "memory")]
pub use memory::*;
#[cfg(feature = "pg")]
pub use pg::*;

#[async_trait]
pub trait Engine: DynClone + Send + Sync {
    /// Distinct lowercased country names currently stored.
    async fn countries(&self) -> Result<Vec<String>>;

    async fn read(&self, params: &QueryParams) -> Result<Vec<Record>>;

    /// Persists every record or none of them. Returns the number of rows written.
    async fn insert(&self, records: &[Record]) -> Result<u64>;
}

dyn_clone::clone_trait_object!(Engine);
