//! Project persistence and the "current project" singleton.
//!
//! At most one row in `projects` has `is_current = 1`, and once any project
//! exists exactly one does. The store keeps that true on every write path:
//!
//! - **create**: the first project of an empty store becomes current
//! - **set_current**: clear-then-set inside one immediate transaction; an unknown
//!   target rolls the whole transaction back
//! - **remove**: refuses the current project
//! - **get_current**: reports a second current row as an integrity fault instead
//!   of picking one
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tasktally::db::{db::Db, projects::Projects, schema::Schema};
//! use tasktally::libs::project::ProjectSpec;
//!
//! let db = Db::open("tasktally.db");
//! Schema::new(db.clone()).initialize()?;
//! let projects = Projects::new(db);
//! projects.insert_default_if_none_exists(&ProjectSpec::new("Inbox")?)?;
//! let garden = projects.create(&ProjectSpec::new("Garden")?)?;
//! projects.set_current(garden.id)?;
//! # Ok::<(), tasktally::libs::error::Error>(())
//! ```

use super::db::{is_unique_violation, Db};
use crate::libs::error::{ensure_id, Error, Result};
use crate::libs::fulltext::{like_pattern, normalize};
use crate::libs::project::{validate_name, ProjectRecord, ProjectSpec};
use crate::libs::time;
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};

const INSERT_PROJECT: &str = "INSERT INTO projects (name, fulltext, created_at, is_current) VALUES (?1, ?2, ?3, ?4)";
const UPDATE_NAME: &str = "UPDATE projects SET name = ?2, fulltext = ?3 WHERE id = ?1";
const DELETE_PROJECT: &str = "DELETE FROM projects WHERE id = ?1";
const CLEAR_CURRENT: &str = "UPDATE projects SET is_current = 0 WHERE is_current = 1";
const SET_CURRENT: &str = "UPDATE projects SET is_current = 1 WHERE id = ?1";
const SELECT_PROJECT_BY_ID: &str = "SELECT id, name, fulltext, created_at, is_current FROM projects WHERE id = ?1";
const SELECT_PROJECTS: &str = "SELECT id, name, fulltext, created_at, is_current FROM projects ORDER BY name LIMIT ?1";
const SEARCH_PROJECTS: &str =
    "SELECT id, name, fulltext, created_at, is_current FROM projects WHERE fulltext LIKE ?1 ORDER BY name LIMIT ?2";
const SELECT_CURRENT: &str = "SELECT id, name, fulltext, created_at, is_current FROM projects WHERE is_current = 1 LIMIT 2";
const SELECT_IS_CURRENT: &str = "SELECT is_current FROM projects WHERE id = ?1";
const COUNT_PROJECTS: &str = "SELECT COUNT(*) FROM projects";
const COUNT_CURRENT: &str = "SELECT COUNT(*) FROM projects WHERE is_current = 1";

pub struct Projects {
    db: Db,
}

impl Projects {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Inserts a project. It becomes current when no project is current yet.
    pub fn create(&self, spec: &ProjectSpec) -> Result<ProjectRecord> {
        let mut conn = self.db.connect()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let has_current = tx.query_row(COUNT_CURRENT, [], |row| row.get::<_, i64>(0))? > 0;
        let record = insert(&tx, spec, !has_current)?;
        tx.commit()?;
        tracing::debug!(id = record.id, current = record.is_current, "project created");

        Ok(record)
    }

    pub fn get(&self, id: i64) -> Result<ProjectRecord> {
        ensure_id("project", id)?;
        let conn = self.db.connect()?;
        fetch(&conn, id)
    }

    pub fn list(&self, limit: u32) -> Result<Vec<ProjectRecord>> {
        let conn = self.db.connect()?;
        let mut stmt = conn.prepare(SELECT_PROJECTS)?;
        let rows = stmt.query_map(params![limit], project_from_row)?;

        let mut projects = Vec::new();
        for project in rows {
            projects.push(project?);
        }
        Ok(projects)
    }

    /// Substring match over the normalized name, ordered by name.
    pub fn search(&self, keyword: &str, limit: u32) -> Result<Vec<ProjectRecord>> {
        let conn = self.db.connect()?;
        let mut stmt = conn.prepare(SEARCH_PROJECTS)?;
        let rows = stmt.query_map(params![like_pattern(keyword), limit], project_from_row)?;

        let mut projects = Vec::new();
        for project in rows {
            projects.push(project?);
        }
        Ok(projects)
    }

    pub fn update_name(&self, id: i64, name: &str) -> Result<ProjectRecord> {
        ensure_id("project", id)?;
        let name = validate_name(name)?;
        let conn = self.db.connect()?;
        let affected = conn
            .execute(UPDATE_NAME, params![id, name, normalize(&name)])
            .map_err(|e| conflict_or(e, &name))?;
        if affected == 0 {
            return Err(Error::NotFound { entity: "project", id });
        }

        fetch(&conn, id)
    }

    /// Deletes a project with its tasks and their timelogs. The current project cannot be removed.
    pub fn remove(&self, id: i64) -> Result<()> {
        ensure_id("project", id)?;
        let mut conn = self.db.connect()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let is_current: Option<bool> = tx
            .query_row(SELECT_IS_CURRENT, params![id], |row| row.get(0))
            .optional()?;
        match is_current {
            None => return Err(Error::NotFound { entity: "project", id }),
            Some(true) => {
                return Err(Error::State(format!("project {id} is the current project and cannot be removed")))
            }
            Some(false) => {}
        }
        tx.execute(DELETE_PROJECT, params![id])?;
        tx.commit()?;
        tracing::debug!(id, "project removed");

        Ok(())
    }

    /// The current project, if any. More than one current row is store corruption.
    pub fn get_current(&self) -> Result<Option<ProjectRecord>> {
        let conn = self.db.connect()?;
        let mut stmt = conn.prepare(SELECT_CURRENT)?;
        let rows = stmt.query_map([], project_from_row)?;

        let mut current = Vec::new();
        for project in rows {
            current.push(project?);
        }
        if current.len() > 1 {
            tracing::warn!("more than one project is marked current");
            return Err(Error::Integrity("more than one project is marked current".to_string()));
        }
        Ok(current.pop())
    }

    pub fn has_current(&self) -> Result<bool> {
        Ok(self.get_current()?.is_some())
    }

    /// Makes `id` the only current project.
    ///
    /// The clear and the set run in one transaction. When `id` does not exist
    /// the transaction is dropped uncommitted and the previous current project
    /// stays as it was.
    pub fn set_current(&self, id: i64) -> Result<ProjectRecord> {
        ensure_id("project", id)?;
        let mut conn = self.db.connect()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(CLEAR_CURRENT, [])?;
        if tx.execute(SET_CURRENT, params![id])? == 0 {
            return Err(Error::State(format!("project {id} does not exist and cannot become current")));
        }
        let record = fetch(&tx, id)?;
        tx.commit()?;
        tracing::debug!(id, "current project changed");

        Ok(record)
    }

    /// First-run bootstrap: inserts `spec` as the current project only when the table is empty.
    pub fn insert_default_if_none_exists(&self, spec: &ProjectSpec) -> Result<Option<ProjectRecord>> {
        let mut conn = self.db.connect()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let count: i64 = tx.query_row(COUNT_PROJECTS, [], |row| row.get(0))?;
        if count > 0 {
            return Ok(None);
        }
        let record = insert(&tx, spec, true)?;
        tx.commit()?;
        tracing::info!(id = record.id, name = %record.spec.name, "default project created");

        Ok(Some(record))
    }

    pub fn count(&self) -> Result<i64> {
        let conn = self.db.connect()?;
        Ok(conn.query_row(COUNT_PROJECTS, [], |row| row.get(0))?)
    }
}

fn insert(conn: &Connection, spec: &ProjectSpec, is_current: bool) -> Result<ProjectRecord> {
    let fulltext = normalize(&spec.name);
    conn.execute(
        INSERT_PROJECT,
        params![spec.name, fulltext, time::to_epoch(&spec.created_at), is_current],
    )
    .map_err(|e| conflict_or(e, &spec.name))?;

    Ok(ProjectRecord {
        id: conn.last_insert_rowid(),
        fulltext,
        is_current,
        spec: spec.clone(),
    })
}

fn fetch(conn: &Connection, id: i64) -> Result<ProjectRecord> {
    conn.query_row(SELECT_PROJECT_BY_ID, params![id], project_from_row)
        .optional()?
        .ok_or(Error::NotFound { entity: "project", id })
}

fn conflict_or(error: rusqlite::Error, name: &str) -> Error {
    if is_unique_violation(&error) {
        Error::Conflict(format!("a project named '{name}' already exists"))
    } else {
        Error::Sqlite(error)
    }
}

fn project_from_row(row: &Row) -> rusqlite::Result<ProjectRecord> {
    Ok(ProjectRecord {
        id: row.get(0)?,
        fulltext: row.get(2)?,
        is_current: row.get(4)?,
        spec: ProjectSpec {
            name: row.get(1)?,
            created_at: time::column(3, row.get(3)?)?,
        },
    })
}
