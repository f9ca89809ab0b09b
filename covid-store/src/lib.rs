#![forbid(unsafe_code)]

mod engine;
mod error;
mod record;
mod store;

pub use covid_query::{Order, OrderBy, QueryParams};
pub use engine::*;
pub use error::*;
pub use record::*;
pub use store::*;
