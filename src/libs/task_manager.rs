//! Binds task creation to the current project.
//!
//! [`Tasks`] takes an explicit project id and knows nothing about which
//! project is current. [`TaskManager`] resolves the current project first and
//! fails with [`Error::NoCurrentProject`] when there is none.

use super::error::{Error, Result};
use super::project::ProjectRecord;
use super::task::{TaskRecord, TaskSpec};
use super::transfer::TaskFile;
use crate::db::db::Db;
use crate::db::projects::Projects;
use crate::db::tasks::Tasks;
use std::path::Path;

pub struct TaskManager {
    projects: Projects,
    tasks: Tasks,
}

impl TaskManager {
    pub fn new(db: Db) -> Self {
        Self {
            projects: Projects::new(db.clone()),
            tasks: Tasks::new(db),
        }
    }

    pub fn projects(&self) -> &Projects {
        &self.projects
    }

    pub fn tasks(&self) -> &Tasks {
        &self.tasks
    }

    pub fn current_project(&self) -> Result<ProjectRecord> {
        self.projects.get_current()?.ok_or(Error::NoCurrentProject)
    }

    pub fn create_task_on_current_project(&self, spec: &TaskSpec) -> Result<TaskRecord> {
        let project = self.current_project()?;
        self.tasks.create(project.id, spec)
    }

    /// Imports every line of `path` into the current project, or nothing at all.
    pub fn import_from_csv(&self, path: impl AsRef<Path>) -> Result<usize> {
        let project = self.current_project()?;
        TaskFile::new(path.as_ref()).import(&self.tasks, project.id)
    }

    /// Writes every task of the current project to `path`.
    pub fn export_to_csv(&self, path: impl AsRef<Path>, limit: u32) -> Result<usize> {
        let project = self.current_project()?;
        let records = self.tasks.list_by_project(project.id, limit)?;
        TaskFile::new(path.as_ref()).export(&records)
    }
}
