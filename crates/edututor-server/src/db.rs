use crate::opt::Db;
use edututor_db::schema::setup_schema;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::error::Error;
use std::io;
use std::path::{Path, PathBuf};
use url::Url;

pub(crate) mod error;
pub(crate) mod user;

use error::DbError;

fn build_connect_options(db_options: &Db, db_url: &Url) -> ConnectOptions {
    let mut seaorm_pool_options = ConnectOptions::new(db_url.as_str());
    if let Some(min_connections) = db_options.db_min_connections {
        seaorm_pool_options.min_connections(min_connections);
    }
    if let Some(max_connections) = db_options.db_max_connections {
        seaorm_pool_options.max_connections(max_connections);
    }
    seaorm_pool_options.sqlx_logging_level(log::LevelFilter::Debug);
    seaorm_pool_options
}

/// The database file of a sqlite url. In-memory databases and other backends have none.
pub(crate) fn sqlite_file(url: &Url) -> Option<PathBuf> {
    if url.scheme() != "sqlite" {
        return None;
    }
    let path = format!("{}{}", url.host_str().unwrap_or_default(), url.path());
    if path.is_empty() || path.contains(":memory:") {
        return None;
    }
    Some(PathBuf::from(path))
}

async fn open(db_options: &Db, db_url: &Url) -> Result<DatabaseConnection, DbError> {
    let conn = Database::connect(build_connect_options(db_options, db_url)).await?;
    setup_schema(&conn)
        .await
        .inspect_err(|error| tracing::error!(error = error as &dyn Error, "failed to set up database schema"))?;
    Ok(conn)
}

/// Connects to the database and creates missing tables.
///
/// With `reset_corrupt_db` a sqlite file that cannot be opened is deleted and created again.
pub(crate) async fn connect(db_options: &Db, db_url: &Url) -> Result<DatabaseConnection, DbError> {
    match open(db_options, db_url).await {
        Ok(conn) => Ok(conn),
        Err(error) if db_options.reset_corrupt_db => {
            let Some(path) = sqlite_file(db_url) else {
                return Err(error);
            };
            tracing::warn!(error = &error as &dyn Error, ?path, "resetting unreadable database");
            remove_sqlite_file(&path)?;
            open(db_options, db_url).await
        }
        Err(error) => Err(error),
    }
}

fn remove_file_if_exists(path: &Path) -> io::Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(error) => Err(error),
    }
}

fn remove_sqlite_file(path: &Path) -> io::Result<bool> {
    let removed = remove_file_if_exists(path)?;
    for suffix in ["-wal", "-shm", "-journal"] {
        let mut side_file = path.as_os_str().to_owned();
        side_file.push(suffix);
        remove_file_if_exists(Path::new(&side_file))?;
    }
    Ok(removed)
}

/// Deletes the sqlite database behind `db_url`. Returns whether a file was removed.
pub(crate) fn reset(db_url: &Url) -> Result<bool, DbError> {
    let path = sqlite_file(db_url).ok_or_else(|| DbError::NotAFile(db_url.scheme().to_owned()))?;
    let removed = remove_sqlite_file(&path)?;
    if removed {
        tracing::info!(?path, "deleted database");
    } else {
        tracing::info!(?path, "no database to delete");
    }
    Ok(removed)
}
