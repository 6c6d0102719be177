//! SQLite persistence for projects, tasks and time logs.
//!
//! Every store holds a [`db::Db`] handle and opens a fresh connection per
//! call, with foreign keys enabled so cascades apply. Multi-statement writes
//! that must not be observed half-done run inside an immediate transaction.
//!
//! ## Modules
//!
//! - `db`: connection handle and SQLite error classification
//! - `schema`: idempotent table creation and health check
//! - `projects`: project CRUD and the current-project singleton
//! - `tasks`: task CRUD, search and bulk insertion
//! - `timelogs`: time intervals and duration totals
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tasktally::db::{db::Db, schema::Schema, timelogs::Timelogs};
//!
//! let db = Db::open("tasktally.db");
//! let schema = Schema::new(db.clone());
//! schema.initialize()?;
//! schema.verify()?;
//! let seconds = Timelogs::new(db).total_duration_for_task(1)?;
//! # Ok::<(), tasktally::libs::error::Error>(())
//! ```

pub mod db;
pub mod projects;
pub mod schema;
pub mod tasks;
pub mod timelogs;
