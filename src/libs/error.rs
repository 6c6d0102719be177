//! Typed errors for the storage and bulk transfer layers.
//!
//! Every store, manager and pipeline call returns [`Result`], so the command
//! layer can tell a missing row apart from a broken invariant or a bad input
//! file and report each one in its own words.
//!
//! ## Categories
//!
//! - **Validation**: rejected inputs, raised by value-object constructors before any I/O
//! - **Not found**: unknown project/task/timelog ids, named by the owning store
//! - **State / integrity**: operations that would break the current-project invariant,
//!   or a store that already breaks it
//! - **I/O**: unreachable database directory, missing import file
//! - **Parse**: every defect found while scanning a task file, bundled together

use std::fmt;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Operation not allowed: {0}")]
    State(String),

    #[error("Store integrity violated: {0}")]
    Integrity(String),

    #[error("No current project is set")]
    NoCurrentProject,

    #[error("Database is not initialized: {0}")]
    NotInitialized(String),

    #[error("Database at {} is unavailable: {source}", path.display())]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Line {line} does not exist in {}", path.display())]
    LineNotFound { path: PathBuf, line: usize },

    #[error("{0}")]
    Parse(ParseErrors),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }
}

/// Rejects ids that can never have been generated by the store.
pub fn ensure_id(entity: &str, id: i64) -> Result<()> {
    if id <= 0 {
        return Err(Error::validation(format!("{entity} id must be positive, got {id}")));
    }
    Ok(())
}

/// Why a single line of a task file was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineErrorKind {
    /// The first line is not exactly `description,completed`.
    HeaderFormat(String),
    ColumnCount(usize),
    EmptyDescription,
    InvalidCompleted(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    /// 1-based line number in the file, header included.
    pub line: usize,
    pub kind: LineErrorKind,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LineErrorKind::HeaderFormat(found) => {
                write!(f, "line {}: expected header 'description,completed', found '{}'", self.line, found)
            }
            LineErrorKind::ColumnCount(n) => write!(f, "line {}: expected 2 columns, found {}", self.line, n),
            LineErrorKind::EmptyDescription => write!(f, "line {}: description is empty", self.line),
            LineErrorKind::InvalidCompleted(value) => {
                write!(f, "line {}: completed must be 'true' or 'false', found '{}'", self.line, value)
            }
        }
    }
}

/// Every violation found in one full scan of a task file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrors {
    pub path: PathBuf,
    pub errors: Vec<LineError>,
}

impl ParseErrors {
    pub fn lines(&self) -> Vec<usize> {
        self.errors.iter().map(|e| e.line).collect()
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid line(s) in {}", self.errors.len(), self.path.display())?;
        for error in &self.errors {
            write!(f, "\n  {error}")?;
        }
        Ok(())
    }
}
