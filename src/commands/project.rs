use super::{confirm, open_store};
use crate::{
    db::projects::Projects,
    libs::{
        messages::Message,
        project::{ProjectRecord, ProjectSpec},
        view::View,
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    command: ProjectCommand,
}

#[derive(Debug, Subcommand)]
enum ProjectCommand {
    /// Create a project
    Add { name: String },
    /// List projects by name
    List {
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Find projects whose name contains the keyword, ignoring case and accents
    Search {
        keyword: String,
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Rename a project
    Rename { id: i64, name: String },
    /// Remove a project with its tasks and time logs
    Remove {
        id: i64,
        #[arg(short, long)]
        yes: bool,
    },
    /// Make a project the current one
    Use { id: i64 },
    /// Show the current project
    Current,
}

pub fn cmd(args: ProjectArgs) -> Result<()> {
    let store = open_store()?;
    let projects = Projects::new(store.db.clone());
    let default_limit = store.config.list_limit;

    match args.command {
        ProjectCommand::Add { name } => {
            let project = projects.create(&ProjectSpec::new(&name)?)?;
            msg_success!(Message::ProjectCreated(project.id, project.spec.name));
        }
        ProjectCommand::List { limit } => show(&projects.list(limit.unwrap_or(default_limit))?),
        ProjectCommand::Search { keyword, limit } => show(&projects.search(&keyword, limit.unwrap_or(default_limit))?),
        ProjectCommand::Rename { id, name } => {
            let project = projects.update_name(id, &name)?;
            msg_success!(Message::ProjectRenamed(project.id, project.spec.name));
        }
        ProjectCommand::Remove { id, yes } => {
            let project = projects.get(id)?;
            if confirm(yes, Message::ConfirmRemoveProject(project.spec.name))? {
                projects.remove(id)?;
                msg_success!(Message::ProjectRemoved(id));
            }
        }
        ProjectCommand::Use { id } => {
            let project = projects.set_current(id)?;
            msg_success!(Message::ProjectNowCurrent(project.spec.name));
        }
        ProjectCommand::Current => match projects.get_current()? {
            Some(project) => msg_print!(Message::CurrentProject(project.spec.name)),
            None => msg_info!(Message::NoProjectsFound),
        },
    }

    Ok(())
}

fn show(projects: &[ProjectRecord]) {
    if projects.is_empty() {
        msg_info!(Message::NoProjectsFound);
    } else {
        View::projects(projects);
    }
}
