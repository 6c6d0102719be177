//! Time tracking intervals.
//!
//! Each row records one interval of work on a task. Start and stop are stored
//! as integer seconds, so durations and their sums are computed by SQLite
//! directly on the columns rather than by loading rows.

use super::db::Db;
use crate::libs::error::{ensure_id, Error, Result};
use crate::libs::time;
use crate::libs::timelog::{TimelogRecord, TimelogSpec};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};

const INSERT_TIMELOG: &str = "INSERT INTO timelogs (task_id, started_at, stopped_at) VALUES (?1, ?2, ?3)";
const UPDATE_TIMELOG: &str = "UPDATE timelogs SET task_id = ?2, started_at = ?3, stopped_at = ?4 WHERE id = ?1";
const DELETE_TIMELOG: &str = "DELETE FROM timelogs WHERE id = ?1";
const SELECT_TIMELOG_BY_ID: &str = "SELECT id, task_id, started_at, stopped_at FROM timelogs WHERE id = ?1";
const SELECT_TIMELOGS: &str = "SELECT id, task_id, started_at, stopped_at FROM timelogs ORDER BY started_at DESC LIMIT ?1";
const SELECT_TIMELOGS_BY_TASK: &str =
    "SELECT id, task_id, started_at, stopped_at FROM timelogs WHERE task_id = ?1 ORDER BY started_at DESC LIMIT ?2";
const SUM_DURATION_BY_TASK: &str = "SELECT COALESCE(SUM(stopped_at - started_at), 0) FROM timelogs WHERE task_id = ?1";
const COUNT_TIMELOGS: &str = "SELECT COUNT(*) FROM timelogs";
const COUNT_TIMELOGS_BY_TASK: &str = "SELECT COUNT(*) FROM timelogs WHERE task_id = ?1";

pub struct Timelogs {
    db: Db,
}

impl Timelogs {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub fn create(&self, spec: &TimelogSpec) -> Result<TimelogRecord> {
        let conn = self.db.connect()?;
        conn.execute(
            INSERT_TIMELOG,
            params![spec.task_id, time::to_epoch(&spec.started_at), time::to_epoch(&spec.stopped_at)],
        )
        .map_err(|e| missing_task_or(e, spec.task_id))?;
        let id = conn.last_insert_rowid();
        tracing::debug!(id, task_id = spec.task_id, seconds = spec.duration_seconds(), "timelog created");

        Ok(TimelogRecord { id, spec: spec.clone() })
    }

    pub fn get(&self, id: i64) -> Result<TimelogRecord> {
        ensure_id("timelog", id)?;
        let conn = self.db.connect()?;
        fetch(&conn, id)
    }

    /// Replaces the task reference and both timestamps.
    pub fn update(&self, id: i64, spec: &TimelogSpec) -> Result<TimelogRecord> {
        ensure_id("timelog", id)?;
        let conn = self.db.connect()?;
        let affected = conn
            .execute(
                UPDATE_TIMELOG,
                params![id, spec.task_id, time::to_epoch(&spec.started_at), time::to_epoch(&spec.stopped_at)],
            )
            .map_err(|e| missing_task_or(e, spec.task_id))?;
        if affected == 0 {
            return Err(Error::NotFound { entity: "timelog", id });
        }

        Ok(TimelogRecord { id, spec: spec.clone() })
    }

    pub fn remove(&self, id: i64) -> Result<()> {
        ensure_id("timelog", id)?;
        let conn = self.db.connect()?;
        if conn.execute(DELETE_TIMELOG, params![id])? == 0 {
            return Err(Error::NotFound { entity: "timelog", id });
        }

        Ok(())
    }

    /// Most recent first.
    pub fn list(&self, limit: u32) -> Result<Vec<TimelogRecord>> {
        let conn = self.db.connect()?;
        let mut stmt = conn.prepare(SELECT_TIMELOGS)?;
        let rows = stmt.query_map(params![limit], timelog_from_row)?;

        let mut timelogs = Vec::new();
        for timelog in rows {
            timelogs.push(timelog?);
        }
        Ok(timelogs)
    }

    /// Most recent first.
    pub fn list_by_task(&self, task_id: i64, limit: u32) -> Result<Vec<TimelogRecord>> {
        ensure_id("task", task_id)?;
        let conn = self.db.connect()?;
        let mut stmt = conn.prepare(SELECT_TIMELOGS_BY_TASK)?;
        let rows = stmt.query_map(params![task_id, limit], timelog_from_row)?;

        let mut timelogs = Vec::new();
        for timelog in rows {
            timelogs.push(timelog?);
        }
        Ok(timelogs)
    }

    /// Sum of `stopped_at - started_at` in seconds; zero when the task has no entries.
    pub fn total_duration_for_task(&self, task_id: i64) -> Result<i64> {
        ensure_id("task", task_id)?;
        let conn = self.db.connect()?;
        Ok(conn.query_row(SUM_DURATION_BY_TASK, params![task_id], |row| row.get(0))?)
    }

    pub fn count_by_task(&self, task_id: i64) -> Result<i64> {
        ensure_id("task", task_id)?;
        let conn = self.db.connect()?;
        Ok(conn.query_row(COUNT_TIMELOGS_BY_TASK, params![task_id], |row| row.get(0))?)
    }

    pub fn count(&self) -> Result<i64> {
        let conn = self.db.connect()?;
        Ok(conn.query_row(COUNT_TIMELOGS, [], |row| row.get(0))?)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.count()? == 0)
    }
}

fn fetch(conn: &Connection, id: i64) -> Result<TimelogRecord> {
    conn.query_row(SELECT_TIMELOG_BY_ID, params![id], timelog_from_row)
        .optional()?
        .ok_or(Error::NotFound { entity: "timelog", id })
}

// A foreign key failure here can only mean the referenced task is gone.
fn missing_task_or(error: rusqlite::Error, task_id: i64) -> Error {
    match &error {
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
            && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
        {
            Error::NotFound { entity: "task", id: task_id }
        }
        _ => Error::Sqlite(error),
    }
}

fn timelog_from_row(row: &Row) -> rusqlite::Result<TimelogRecord> {
    Ok(TimelogRecord {
        id: row.get(0)?,
        spec: TimelogSpec {
            task_id: row.get(1)?,
            started_at: time::column(2, row.get(2)?)?,
            stopped_at: time::column(3, row.get(3)?)?,
        },
    })
}
