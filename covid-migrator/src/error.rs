use std::path::PathBuf;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    #[error("invalid migration script name `{0}`, expected `<version>_<summary>.sql`")]
    InvalidScriptName(String),

    #[error("migration version `{0}` is defined more than once")]
    DuplicateVersion(String),

    #[error("unable to read migration script `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("migration script `{0}` is not valid utf-8")]
    InvalidEncoding(String),

    #[error("unable to prepare the migration table: {0}")]
    MetadataTable(#[source] BoxError),

    #[error("migration {version} failed: {source}")]
    Execute {
        version: String,
        #[source]
        source: BoxError,
    },

    #[cfg(feature = "pg")]
    #[error("sqlx `{0}`")]
    Sqlx(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, MigrateError>;
