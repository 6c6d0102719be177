use super::{confirm, open_store};
use crate::{
    libs::{
        formatter::parse_local,
        messages::Message,
        task::{Priority, TaskRecord, TaskSpec, TaskUpdate},
        task_manager::TaskManager,
        task_tree::TaskTree,
        view::View,
    },
    msg_info, msg_success, msg_warning,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: TaskCommand,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// Create a task in the current project
    Add {
        name: String,
        #[arg(short, long)]
        completed: bool,
        /// low, medium, high, critical or 1-4
        #[arg(short, long, default_value = "medium")]
        priority: String,
        /// Due date, YYYY-MM-DD or "YYYY-MM-DD HH:MM"
        #[arg(short, long)]
        due: Option<String>,
        /// Id of the parent task
        #[arg(long)]
        parent: Option<i64>,
    },
    /// List tasks of the current project, or of every project with --all
    List {
        #[arg(short, long)]
        all: bool,
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Find tasks whose name contains the keyword, ignoring case and accents
    Search {
        keyword: String,
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Change the name and/or completion of a task
    Update {
        id: i64,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        completed: Option<bool>,
    },
    /// Remove a task with its sub-tasks and time logs
    Remove {
        id: i64,
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the tasks of the current project as a tree of sub-tasks
    Tree {
        #[arg(short, long)]
        limit: Option<u32>,
    },
}

pub fn cmd(args: TaskArgs) -> Result<()> {
    let store = open_store()?;
    let manager = TaskManager::new(store.db.clone());
    let default_limit = store.config.list_limit;

    match args.command {
        TaskCommand::Add {
            name,
            completed,
            priority,
            due,
            parent,
        } => {
            let mut spec = TaskSpec::new(&name, completed)?.priority(priority.parse::<Priority>()?);
            if let Some(due) = due {
                spec = spec.due_at(parse_local(&due)?);
            }
            if let Some(parent) = parent {
                spec = spec.parent(parent)?;
            }
            let task = manager.create_task_on_current_project(&spec)?;
            msg_success!(Message::TaskCreated(task.id, task.spec.name));
        }
        TaskCommand::List { all, limit } => {
            let limit = limit.unwrap_or(default_limit);
            let tasks = if all {
                manager.tasks().list(limit)?
            } else {
                manager.tasks().list_by_project(manager.current_project()?.id, limit)?
            };
            show(&tasks);
        }
        TaskCommand::Search { keyword, limit } => show(&manager.tasks().search(&keyword, limit.unwrap_or(default_limit))?),
        TaskCommand::Update { id, name, completed } => {
            let update = TaskUpdate::new(name.as_deref(), completed)?;
            if update.is_empty() {
                msg_warning!(Message::TaskNothingToUpdate);
                return Ok(());
            }
            let task = manager.tasks().update(id, &update)?;
            msg_success!(Message::TaskUpdated(task.id));
        }
        TaskCommand::Remove { id, yes } => {
            let task = manager.tasks().get(id)?;
            if confirm(yes, Message::ConfirmRemoveTask(task.spec.name))? {
                manager.tasks().remove(id)?;
                msg_success!(Message::TaskRemoved(id));
            }
        }
        TaskCommand::Tree { limit } => {
            let project = manager.current_project()?;
            let tasks = manager.tasks().list_by_project(project.id, limit.unwrap_or(default_limit))?;
            if tasks.is_empty() {
                msg_info!(Message::NoTasksFound);
            } else {
                View::task_tree(&TaskTree::new(tasks));
            }
        }
    }

    Ok(())
}

fn show(tasks: &[TaskRecord]) {
    if tasks.is_empty() {
        msg_info!(Message::NoTasksFound);
    } else {
        View::tasks(tasks);
    }
}
