//! Domain types and the glue around the stores.
//!
//! ## Contents
//!
//! - **Value objects**: `project`, `task`, `timelog` (spec/record pairs validated on construction)
//! - **Core logic**: `fulltext` normalization, `task_tree` parent/child view,
//!   `task_manager` current-project binding, `transfer` bulk task files
//! - **Errors**: `error` (typed failures returned by every store call)
//! - **Ambient**: `config`, `data_storage`, `time`
//! - **Presentation**: `formatter`, `view`, `messages` (used by `commands` only)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tasktally::db::{db::Db, schema::Schema};
//! use tasktally::libs::task::TaskSpec;
//! use tasktally::libs::task_manager::TaskManager;
//!
//! let db = Db::open("tasktally.db");
//! Schema::new(db.clone()).initialize()?;
//! let manager = TaskManager::new(db);
//! manager.create_task_on_current_project(&TaskSpec::new("Water plants", false)?)?;
//! # Ok::<(), tasktally::libs::error::Error>(())
//! ```

pub mod config;
pub mod data_storage;
pub mod error;
pub mod formatter;
pub mod fulltext;
pub mod messages;
pub mod project;
pub mod task;
pub mod task_manager;
pub mod task_tree;
pub mod time;
pub mod timelog;
pub mod transfer;
pub mod view;
