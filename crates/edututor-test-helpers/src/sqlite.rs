use crate::TestDb;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thiserror::Error;

/// A sqlite database file in a temporary directory that is removed on drop.
pub struct SqliteDb {
    // Owns the directory, dropping it deletes the database
    #[allow(dead_code)]
    temp_dir: TempDir,
    path: PathBuf,
    uri: String,
}

#[derive(Error, Debug)]
pub enum SqliteError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SqliteDb {
    pub fn new() -> Result<Self, SqliteError> {
        let temp_dir = TempDir::with_prefix("edututor-sqlite-db")?;
        let path = temp_dir.path().join("edututor.db");
        let uri = path
            .to_str()
            .ok_or(std::io::Error::new(std::io::ErrorKind::InvalidData, "Invalid path"))?;
        let uri = format!("sqlite://{uri}?mode=rwc");

        tracing::info!(uri = ?uri, "return sqlite db uri");
        Ok(Self { temp_dir, path, uri })
    }

    /// Location of the database file, which only exists after the first connection.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TestDb for SqliteDb {
    fn db_uri(&self) -> Cow<'_, str> {
        self.uri.as_str().into()
    }
}
