//! Table creation and health checks for the tasktally database.
//!
//! There is no versioned migration history: [`Schema::initialize`] creates the
//! three tables with `IF NOT EXISTS` and is safe to run on every launch.
//!
//! ## Tables
//!
//! - **projects**: named containers, at most one flagged `is_current`
//! - **tasks**: owned by a project, optionally by a parent task
//! - **timelogs**: intervals of work owned by a task
//!
//! Deleting a project removes its tasks, deleting a task removes its sub-tasks
//! and timelogs. Both cascades rely on `PRAGMA foreign_keys`, which
//! [`Db::connect`] enables on every connection.

use super::db::{is_unavailable, Db};
use crate::libs::error::{Error, Result};
use rusqlite::params;

pub const TABLES: [&str; 3] = ["projects", "tasks", "timelogs"];

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS projects (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    fulltext TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    is_current INTEGER NOT NULL DEFAULT 0 CHECK (is_current IN (0, 1))
);
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    completed INTEGER NOT NULL DEFAULT 0 CHECK (completed IN (0, 1)),
    fulltext TEXT NOT NULL,
    priority INTEGER NOT NULL DEFAULT 2 CHECK (priority BETWEEN 1 AND 4),
    created_at INTEGER NOT NULL,
    due_at INTEGER,
    done_at INTEGER,
    parent_id INTEGER REFERENCES tasks(id) ON DELETE CASCADE,
    project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE
);
CREATE TABLE IF NOT EXISTS timelogs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    task_id INTEGER NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
    started_at INTEGER NOT NULL,
    stopped_at INTEGER NOT NULL CHECK (stopped_at >= started_at)
);
CREATE INDEX IF NOT EXISTS idx_tasks_project_id ON tasks(project_id);
CREATE INDEX IF NOT EXISTS idx_tasks_parent_id ON tasks(parent_id);
CREATE INDEX IF NOT EXISTS idx_timelogs_task_id ON timelogs(task_id);
";

const SELECT_TABLE: &str = "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1";

pub struct Schema {
    db: Db,
}

impl Schema {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Creates any missing table and refreshes the query planner statistics.
    pub fn initialize(&self) -> Result<()> {
        let conn = self.db.connect()?;
        conn.execute_batch(SCHEMA).map_err(|e| self.classify(e))?;
        conn.execute_batch("PRAGMA optimize;").map_err(|e| self.classify(e))?;
        tracing::debug!(path = %self.db.path().display(), "schema initialized");

        Ok(())
    }

    /// Fails with [`Error::NotInitialized`] naming the first missing table.
    pub fn verify(&self) -> Result<()> {
        let conn = self.db.connect()?;
        for table in TABLES {
            let count: i64 = conn.query_row(SELECT_TABLE, params![table], |row| row.get(0))?;
            if count == 0 {
                tracing::warn!(table, "expected table is missing");
                return Err(Error::NotInitialized(format!("table '{table}' is missing")));
            }
        }

        Ok(())
    }

    fn classify(&self, error: rusqlite::Error) -> Error {
        if is_unavailable(&error) {
            self.db.unavailable(error)
        } else {
            Error::Sqlite(error)
        }
    }
}
