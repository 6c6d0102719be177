use super::db::Db;
use crate::libs::error::{ensure_id, Error, Result};
use crate::libs::fulltext::{like_pattern, normalize};
use crate::libs::task::{Priority, TaskRecord, TaskSpec, TaskUpdate};
use crate::libs::time;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};

const TASK_COLUMNS: &str = "id, name, completed, fulltext, priority, created_at, due_at, done_at, parent_id, project_id";
const INSERT_TASK: &str = "INSERT INTO tasks (name, completed, fulltext, priority, created_at, due_at, done_at, parent_id, project_id)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";
const UPDATE_TASK: &str = "UPDATE tasks SET name = ?2, completed = ?3, fulltext = ?4, priority = ?5, created_at = ?6,
    due_at = ?7, done_at = ?8, parent_id = ?9, project_id = ?10 WHERE id = ?1";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";
const COUNT_TASKS: &str = "SELECT COUNT(*) FROM tasks";
const PROJECT_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM projects WHERE id = ?1)";
const TASK_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM tasks WHERE id = ?1)";

/// Task persistence. The store is project-agnostic: callers pass the owning
/// project id explicitly, see `TaskManager` for binding to the current project.
pub struct Tasks {
    db: Db,
}

impl Tasks {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub fn create(&self, project_id: i64, spec: &TaskSpec) -> Result<TaskRecord> {
        ensure_id("project", project_id)?;
        let conn = self.db.connect()?;
        let record = insert(&conn, project_id, spec)?;
        tracing::debug!(id = record.id, project_id, "task created");

        Ok(record)
    }

    /// Inserts every spec under `project_id` in order, all in one transaction.
    pub fn import(&self, project_id: i64, specs: &[TaskSpec]) -> Result<usize> {
        ensure_id("project", project_id)?;
        let mut conn = self.db.connect()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        for spec in specs {
            insert(&tx, project_id, spec)?;
        }
        tx.commit()?;
        tracing::debug!(project_id, count = specs.len(), "tasks imported");

        Ok(specs.len())
    }

    pub fn get(&self, id: i64) -> Result<TaskRecord> {
        ensure_id("task", id)?;
        let conn = self.db.connect()?;
        fetch(&conn, id)
    }

    pub fn list(&self, limit: u32) -> Result<Vec<TaskRecord>> {
        self.select("ORDER BY name LIMIT ?1", params![limit])
    }

    pub fn list_by_project(&self, project_id: i64, limit: u32) -> Result<Vec<TaskRecord>> {
        ensure_id("project", project_id)?;
        self.select("WHERE project_id = ?1 ORDER BY name LIMIT ?2", params![project_id, limit])
    }

    pub fn list_children(&self, parent_id: i64) -> Result<Vec<TaskRecord>> {
        ensure_id("task", parent_id)?;
        self.select("WHERE parent_id = ?1 ORDER BY name", params![parent_id])
    }

    /// Substring match of the normalized keyword against the normalized name.
    pub fn search(&self, keyword: &str, limit: u32) -> Result<Vec<TaskRecord>> {
        self.select("WHERE fulltext LIKE ?1 ORDER BY name LIMIT ?2", params![like_pattern(keyword), limit])
    }

    /// Applies the provided fields over the stored row and writes the whole row back.
    pub fn update(&self, id: i64, update: &TaskUpdate) -> Result<TaskRecord> {
        ensure_id("task", id)?;
        let mut conn = self.db.connect()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut record = fetch(&tx, id)?;

        if let Some(name) = &update.name {
            if *name != record.spec.name {
                record.spec.name = name.clone();
                record.fulltext = normalize(name);
            }
        }
        if let Some(completed) = update.completed {
            if completed != record.spec.completed {
                record.spec.completed = completed;
                record.spec.settle_done_at();
            }
        }

        let spec = &record.spec;
        tx.execute(
            UPDATE_TASK,
            params![
                record.id,
                spec.name,
                spec.completed,
                record.fulltext,
                spec.priority.ordinal(),
                time::to_epoch(&spec.created_at),
                spec.due_at.as_ref().map(time::to_epoch),
                spec.done_at.as_ref().map(time::to_epoch),
                spec.parent_id,
                record.project_id,
            ],
        )?;
        tx.commit()?;
        tracing::debug!(id, "task updated");

        Ok(record)
    }

    /// Deletes a task together with its sub-tasks and timelogs.
    pub fn remove(&self, id: i64) -> Result<()> {
        ensure_id("task", id)?;
        let conn = self.db.connect()?;
        if conn.execute(DELETE_TASK, params![id])? == 0 {
            return Err(Error::NotFound { entity: "task", id });
        }
        tracing::debug!(id, "task removed");

        Ok(())
    }

    pub fn count(&self) -> Result<i64> {
        let conn = self.db.connect()?;
        Ok(conn.query_row(COUNT_TASKS, [], |row| row.get(0))?)
    }

    fn select(&self, clause: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<TaskRecord>> {
        let conn = self.db.connect()?;
        let mut stmt = conn.prepare(&format!("SELECT {TASK_COLUMNS} FROM tasks {clause}"))?;
        let rows = stmt.query_map(params, task_from_row)?;

        let mut tasks = Vec::new();
        for task in rows {
            tasks.push(task?);
        }
        Ok(tasks)
    }
}

fn insert(conn: &Connection, project_id: i64, spec: &TaskSpec) -> Result<TaskRecord> {
    if !exists(conn, PROJECT_EXISTS, project_id)? {
        return Err(Error::NotFound { entity: "project", id: project_id });
    }
    if let Some(parent_id) = spec.parent_id {
        if !exists(conn, TASK_EXISTS, parent_id)? {
            return Err(Error::NotFound { entity: "task", id: parent_id });
        }
    }

    let mut spec = spec.clone();
    spec.settle_done_at();
    let fulltext = normalize(&spec.name);
    conn.execute(
        INSERT_TASK,
        params![
            spec.name,
            spec.completed,
            fulltext,
            spec.priority.ordinal(),
            time::to_epoch(&spec.created_at),
            spec.due_at.as_ref().map(time::to_epoch),
            spec.done_at.as_ref().map(time::to_epoch),
            spec.parent_id,
            project_id,
        ],
    )?;

    Ok(TaskRecord {
        id: conn.last_insert_rowid(),
        project_id,
        fulltext,
        spec,
    })
}

fn exists(conn: &Connection, sql: &str, id: i64) -> Result<bool> {
    Ok(conn.query_row(sql, params![id], |row| row.get(0))?)
}

fn fetch(conn: &Connection, id: i64) -> Result<TaskRecord> {
    conn.query_row(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"), params![id], task_from_row)
        .optional()?
        .ok_or(Error::NotFound { entity: "task", id })
}

fn task_from_row(row: &Row) -> rusqlite::Result<TaskRecord> {
    let priority = Priority::from_ordinal(row.get(4)?)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Integer, Box::new(e)))?;

    Ok(TaskRecord {
        id: row.get(0)?,
        project_id: row.get(9)?,
        fulltext: row.get(3)?,
        spec: TaskSpec {
            name: row.get(1)?,
            completed: row.get(2)?,
            priority,
            created_at: time::column(5, row.get(5)?)?,
            due_at: time::optional_column(6, row.get(6)?)?,
            done_at: time::optional_column(7, row.get(7)?)?,
            parent_id: row.get(8)?,
        },
    })
}
