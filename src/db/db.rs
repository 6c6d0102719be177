use crate::libs::config::Config;
use crate::libs::error::{Error, Result};
use rusqlite::{ffi, Connection, ErrorCode};
use std::path::{Path, PathBuf};

/// Handle to the SQLite file shared by every store.
///
/// The handle only carries the location. Each store operation opens its own
/// connection through [`Db::connect`] and drops it before returning, so no
/// connection outlives a single call.
#[derive(Debug, Clone)]
pub struct Db {
    path: PathBuf,
}

impl Db {
    /// Uses the path resolved from the environment and `config.json`.
    pub fn new() -> anyhow::Result<Db> {
        let path = Config::read()?.db_path()?;
        Ok(Db { path })
    }

    pub fn open(path: impl Into<PathBuf>) -> Db {
        Db { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a connection with foreign-key enforcement switched on.
    ///
    /// SQLite leaves foreign keys off per connection, and cascades silently do
    /// nothing without them.
    pub fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path).map_err(|e| self.unavailable(e))?;
        conn.pragma_update(None, "foreign_keys", true)
            .map_err(|e| self.unavailable(e))?;
        tracing::trace!(path = %self.path.display(), "opened database connection");

        Ok(conn)
    }

    pub(crate) fn unavailable(&self, source: rusqlite::Error) -> Error {
        Error::StoreUnavailable {
            path: self.path.clone(),
            source,
        }
    }
}

pub(crate) fn is_unique_violation(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Errors that mean the file or its directory cannot be used at all, as opposed to a bad statement.
pub(crate) fn is_unavailable(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(e, _)
            if matches!(e.code, ErrorCode::CannotOpen | ErrorCode::ReadOnly | ErrorCode::PermissionDenied | ErrorCode::NotADatabase)
    )
}
