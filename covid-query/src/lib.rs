#![forbid(unsafe_code)]
mod error;
mod filter;
mod params;

pub use error::QueryError;
pub use filter::FilterClause;
pub use params::{Order, OrderBy, QueryParams, RawQueryParams};
