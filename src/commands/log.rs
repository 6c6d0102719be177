use super::open_store;
use crate::{
    db::{tasks::Tasks, timelogs::Timelogs},
    libs::{
        formatter::{format_seconds, parse_local},
        messages::Message,
        timelog::TimelogSpec,
        view::View,
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct LogArgs {
    #[command(subcommand)]
    command: LogCommand,
}

#[derive(Debug, Subcommand)]
enum LogCommand {
    /// Record an interval of work, times as "YYYY-MM-DD HH:MM"
    Add { task_id: i64, start: String, stop: String },
    /// Show time logs, most recent first
    List {
        /// Only logs of this task
        #[arg(short, long)]
        task: Option<i64>,
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Change the task and interval of a time log
    Edit { id: i64, task_id: i64, start: String, stop: String },
    /// Remove a time log
    Remove { id: i64 },
    /// Total time recorded on a task
    Total { task_id: i64 },
}

pub fn cmd(args: LogArgs) -> Result<()> {
    let store = open_store()?;
    let timelogs = Timelogs::new(store.db.clone());
    let default_limit = store.config.list_limit;

    match args.command {
        LogCommand::Add { task_id, start, stop } => {
            let spec = TimelogSpec::new(task_id, parse_local(&start)?, parse_local(&stop)?)?;
            let timelog = timelogs.create(&spec)?;
            msg_success!(Message::TimelogCreated(timelog.id, format_seconds(timelog.duration_seconds())));
        }
        LogCommand::List { task, limit } => {
            let limit = limit.unwrap_or(default_limit);
            let entries = match task {
                Some(task_id) => timelogs.list_by_task(task_id, limit)?,
                None => timelogs.list(limit)?,
            };
            if entries.is_empty() {
                msg_info!(Message::NoTimelogsFound);
            } else {
                View::timelogs(&entries);
            }
        }
        LogCommand::Edit {
            id,
            task_id,
            start,
            stop,
        } => {
            let spec = TimelogSpec::new(task_id, parse_local(&start)?, parse_local(&stop)?)?;
            let timelog = timelogs.update(id, &spec)?;
            msg_success!(Message::TimelogUpdated(timelog.id, format_seconds(timelog.duration_seconds())));
        }
        LogCommand::Remove { id } => {
            timelogs.remove(id)?;
            msg_success!(Message::TimelogRemoved(id));
        }
        LogCommand::Total { task_id } => {
            // Resolve the task first so an unknown id reports "not found" rather than a zero total.
            Tasks::new(store.db.clone()).get(task_id)?;
            let seconds = timelogs.total_duration_for_task(task_id)?;
            let entries = timelogs.count_by_task(task_id)?;
            msg_print!(Message::TimelogTotal(task_id, format_seconds(seconds), entries as usize));
        }
    }

    Ok(())
}
