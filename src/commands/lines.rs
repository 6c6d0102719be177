//! Line-level maintenance of task files, without touching the database.

use crate::{
    libs::{
        messages::Message,
        transfer::{TaskFile, TaskLine},
    },
    msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct LinesArgs {
    #[command(subcommand)]
    command: LinesCommand,
}

#[derive(Debug, Subcommand)]
enum LinesCommand {
    /// Add a task line at the end of the file
    Append {
        file: PathBuf,
        description: String,
        #[arg(short, long)]
        completed: bool,
    },
    /// Delete a line; the header is line 1
    RemoveLine { file: PathBuf, line: usize },
    /// Replace a line; the header is line 1
    UpdateLine {
        file: PathBuf,
        line: usize,
        description: String,
        #[arg(short, long)]
        completed: bool,
    },
}

pub fn cmd(args: LinesArgs) -> Result<()> {
    match args.command {
        LinesCommand::Append {
            file,
            description,
            completed,
        } => {
            TaskFile::new(&file).append(&TaskLine::new(&description, completed)?)?;
            msg_success!(Message::LineAppended(file.display().to_string()));
        }
        LinesCommand::RemoveLine { file, line } => {
            TaskFile::new(&file).remove_line(line)?;
            msg_success!(Message::LineRemoved(line, file.display().to_string()));
        }
        LinesCommand::UpdateLine {
            file,
            line,
            description,
            completed,
        } => {
            TaskFile::new(&file).update_line(line, &TaskLine::new(&description, completed)?)?;
            msg_success!(Message::LineUpdated(line, file.display().to_string()));
        }
    }

    Ok(())
}
