//! Bulk import and export of task files.
//!
//! Both commands work on the current project. Import is all-or-nothing: if
//! any line of the file is invalid every defect is listed and no task is
//! created.

use super::open_store;
use crate::{
    libs::{messages::Message, task_manager::TaskManager},
    msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// File with a `description,completed` header line
    file: PathBuf,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Destination file, overwritten if it exists
    file: PathBuf,

    #[arg(short, long)]
    limit: Option<u32>,
}

pub fn import(args: ImportArgs) -> Result<()> {
    let store = open_store()?;
    let manager = TaskManager::new(store.db.clone());
    let project = manager.current_project()?;
    let count = manager.import_from_csv(&args.file)?;
    msg_success!(Message::TasksImported(count, project.spec.name));

    Ok(())
}

pub fn export(args: ExportArgs) -> Result<()> {
    let store = open_store()?;
    let manager = TaskManager::new(store.db.clone());
    let count = manager.export_to_csv(&args.file, args.limit.unwrap_or(u32::MAX))?;
    msg_success!(Message::TasksExported(count, args.file.display().to_string()));

    Ok(())
}
