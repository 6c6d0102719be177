//! First-run setup.
//!
//! Writes `config.json` when options are given, creates the schema, verifies
//! it and bootstraps the default project. Running it again is harmless.

use super::open_store;
use crate::{
    db::schema::Schema,
    libs::{config::Config, messages::Message},
    msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Store the database at this path instead of the data directory
    #[arg(long)]
    db: Option<PathBuf>,

    /// Name of the project created when the database is empty
    #[arg(long)]
    default_project: Option<String>,

    /// Remove the configuration file instead of creating one
    #[arg(short, long)]
    delete: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.delete {
        Config::delete()?;
        msg_success!(Message::ConfigDeleted);
        return Ok(());
    }

    if init_args.db.is_some() || init_args.default_project.is_some() {
        let mut config = Config::read()?;
        if let Some(db) = init_args.db {
            config.db_file = Some(db);
        }
        if let Some(name) = init_args.default_project {
            config.default_project = name;
        }
        config.save()?;
        msg_success!(Message::ConfigSaved);
    }

    let store = open_store()?;
    Schema::new(store.db.clone()).verify()?;
    msg_success!(Message::DatabaseInitialized(store.db.path().display().to_string()));

    Ok(())
}
