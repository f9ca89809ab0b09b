use rust_embed::RustEmbed;
use std::path::{Path, PathBuf};

use crate::error::{MigrateError, Result};

/// One versioned batch of SQL statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationScript {
    pub version: String,
    pub summary: String,
    pub sql: String,
}

impl MigrationScript {
    pub fn new(
        version: impl Into<String>,
        summary: impl Into<String>,
        sql: impl Into<String>,
    ) -> Self {
        Self {
            version: version.into(),
            summary: summary.into(),
            sql: sql.into(),
        }
    }

    /// Splits `001_create_record_table.sql` into version `001` and summary
    /// `create_record_table`.
    pub fn from_file(file_name: &str, sql: impl Into<String>) -> Result<Self> {
        let invalid = || MigrateError::InvalidScriptName(file_name.to_owned());

        let stem = file_name.strip_suffix(".sql").ok_or_else(invalid)?;
        let (version, summary) = stem
            .split_once('_')
            .filter(|(version, summary)| !version.is_empty() && !summary.is_empty())
            .ok_or_else(invalid)?;

        Ok(Self::new(version, summary, sql))
    }

    pub fn file_name(&self) -> String {
        format!("{}_{}.sql", self.version, self.summary)
    }
}

/// A fixed collection of migration scripts, in any order.
pub trait MigrationSource {
    fn scripts(&self) -> Result<Vec<MigrationScript>>;
}

impl MigrationSource for Vec<MigrationScript> {
    fn scripts(&self) -> Result<Vec<MigrationScript>> {
        Ok(self.clone())
    }
}

#[derive(RustEmbed)]
#[folder = "migrations/"]
struct Scripts;

/// Scripts from this crate's `migrations/` directory, embedded at build time.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl MigrationSource for EmbeddedSource {
    fn scripts(&self) -> Result<Vec<MigrationScript>> {
        let mut scripts = Vec::new();

        for name in Scripts::iter().filter(|name| name.ends_with(".sql")) {
            let file = Scripts::get(&name).ok_or_else(|| MigrateError::Io {
                path: PathBuf::from(name.to_string()),
                source: std::io::ErrorKind::NotFound.into(),
            })?;

            let sql = std::str::from_utf8(&file.data)
                .map_err(|_| MigrateError::InvalidEncoding(name.to_string()))?;

            scripts.push(MigrationScript::from_file(&name, sql)?);
        }

        Ok(scripts)
    }
}

/// Scripts read from a directory at runtime. Files not ending in `.sql` are ignored.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    path: PathBuf,
}

impl DirectorySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MigrationSource for DirectorySource {
    fn scripts(&self) -> Result<Vec<MigrationScript>> {
        let io_error = |path: &Path| {
            let path = path.to_owned();
            move |source| MigrateError::Io { path, source }
        };

        let mut scripts = Vec::new();

        for entry in std::fs::read_dir(&self.path).map_err(io_error(&self.path))? {
            let path = entry.map_err(io_error(&self.path))?.path();

            if !path.is_file() {
                continue;
            }

            let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };

            if !file_name.ends_with(".sql") {
                continue;
            }

            let sql = std::fs::read_to_string(&path).map_err(io_error(&path))?;
            scripts.push(MigrationScript::from_file(file_name, sql)?);
        }

        Ok(scripts)
    }
}
