//! HTTP surface of the record API.
//!
//! | Method | Path              | Success                                   |
//! |--------|-------------------|-------------------------------------------|
//! | `GET`  | `/api/v1/records` | `200`, `{ records, metadata }`            |
//! | `POST` | `/api/v1/records` | `201`, `Created`                          |
//!
//! Failures are plain text `<timestamp> - HTTP STATUS <code> - <message>`.
#![forbid(unsafe_code)]

mod error;
mod router;

pub use error::*;
pub use router::*;
