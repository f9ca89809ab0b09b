#![forbid(unsafe_code)]

mod error;
mod service;
mod validate;

pub use covid_query::{Order, OrderBy, QueryError, QueryParams, RawQueryParams};
pub use covid_store::{Metadata, Record, RecordBatch, RecordPage, Store, StoreError};
pub use error::*;
pub use service::*;
pub use validate::*;

#[cfg(feature = "memory")]
pub use covid_store::MemoryStore;
#[cfg(feature = "pg")]
pub use covid_store::PgStore;
