//! # Tasktally
//!
//! Projects, tasks and time logs in a local SQLite file, with bulk import and
//! export of task lists through a plain two-column text format.
//!
//! ## Features
//!
//! - **Projects**: exactly one current project once any exists; removal cascades
//! - **Tasks**: priorities, due dates, sub-tasks, accent-insensitive search
//! - **Time logs**: intervals per task with store-side duration totals
//! - **Bulk transfer**: all-or-nothing import that reports every bad line at once
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tasktally::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
