//! Command-line interface.
//!
//! Each subcommand lives in its own module with an `Args` struct and a `cmd`
//! entry point. Every command goes through [`open_store`], which creates the
//! schema on first use and bootstraps the default project, so a fresh install
//! works without running `init` first.

pub mod init;
pub mod lines;
pub mod log;
pub mod project;
pub mod task;
pub mod transfer;

use crate::db::db::Db;
use crate::db::projects::Projects;
use crate::db::schema::Schema;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::project::ProjectSpec;
use crate::msg_info;
use anyhow::Result;
use clap::{Parser, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Create the database and the default project")]
    Init(init::InitArgs),
    #[command(about = "Manage projects", arg_required_else_help = true)]
    Project(project::ProjectArgs),
    #[command(about = "Manage tasks of the current project", arg_required_else_help = true)]
    Task(task::TaskArgs),
    #[command(about = "Record and inspect time spent on tasks", arg_required_else_help = true)]
    Log(log::LogArgs),
    #[command(about = "Import a task file into the current project")]
    Import(transfer::ImportArgs),
    #[command(about = "Export the tasks of the current project to a task file")]
    Export(transfer::ExportArgs),
    #[command(about = "Edit task files line by line", arg_required_else_help = true)]
    Csv(lines::LinesArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Project(args) => project::cmd(args),
            Commands::Task(args) => task::cmd(args),
            Commands::Log(args) => log::cmd(args),
            Commands::Import(args) => transfer::import(args),
            Commands::Export(args) => transfer::export(args),
            Commands::Csv(args) => lines::cmd(args),
        }
    }
}

/// Database handle plus settings, with the schema and default project in place.
pub struct Store {
    pub db: Db,
    pub config: Config,
}

pub fn open_store() -> Result<Store> {
    let config = Config::read()?;
    let db = Db::open(config.db_path()?);
    Schema::new(db.clone()).initialize()?;
    let default_project = ProjectSpec::new(&config.default_project)?;
    if let Some(project) = Projects::new(db.clone()).insert_default_if_none_exists(&default_project)? {
        msg_info!(Message::DefaultProjectCreated(project.spec.name));
    }

    Ok(Store { db, config })
}

/// Asks before a destructive step unless `yes` was passed.
fn confirm(yes: bool, prompt: Message) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .default(false)
        .interact()?;
    if !confirmed {
        msg_info!(Message::OperationCancelled);
    }

    Ok(confirmed)
}
