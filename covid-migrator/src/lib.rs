//! Forward-only schema migrations for the covid record store.
//!
//! Migration scripts are plain SQL files named `<version>_<summary>.sql`.
//! The [`Migrator`] sorts them by file name, skips every version already
//! present in the `migration` table and applies the rest in order, recording
//! each one as it completes. A failing script stops the run: later scripts
//! are never applied on top of a broken one.
//!
//! Versions are compared by equality only. Editing a script that has already
//! shipped has no effect on databases that recorded its version; add a new
//! script instead.
//!
//! # Usage
//!
//! ```rust,ignore
//! let store = covid_migrator::PgMetadataStore::new(&pool);
//! let report = covid_migrator::new().run(&store).await?;
//! ```
//!
//! # Shipped migrations
//!
//! | Version | Summary |
//! |---------|---------|
//! | `001` | daily `record` table with nullable `cases` / `deaths` |
//! | `002` | switch to weekly reporting columns, `date` becomes `DATE` |
//! | `003` | `cases_weekly` / `deaths_weekly` become `NOT NULL` |
//! | `004` | index on `LOWER(country)` for the country filter |
#![forbid(unsafe_code)]

mod error;
mod metadata;
mod migrator;
mod script;

pub use error::*;
pub use metadata::*;
pub use migrator::*;
pub use script::*;

/// Creates a [`Migrator`] over the scripts compiled into the binary.
pub fn new() -> Migrator<EmbeddedSource> {
    Migrator::new(EmbeddedSource)
}
