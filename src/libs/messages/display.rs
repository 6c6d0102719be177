use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let s = match self {
            // === SETUP MESSAGES ===
            Message::DatabaseInitialized(path) => format!("Database ready at {}", path),
            Message::DefaultProjectCreated(name) => format!("Created default project '{}'", name),
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),

            // === PROJECT MESSAGES ===
            Message::ProjectCreated(id, name) => format!("Project '{}' created with id {}", name, id),
            Message::ProjectRenamed(id, name) => format!("Project {} renamed to '{}'", id, name),
            Message::ProjectRemoved(id) => format!("Project {} removed with all of its tasks", id),
            Message::ProjectNowCurrent(name) => format!("'{}' is now the current project", name),
            Message::CurrentProject(name) => format!("Current project: {}", name),
            Message::NoProjectsFound => "No projects found".to_string(),
            Message::ConfirmRemoveProject(name) => {
                format!("Remove project '{}' together with its tasks and time logs?", name)
            }

            // === TASK MESSAGES ===
            Message::TaskCreated(id, name) => format!("Task '{}' created with id {}", name, id),
            Message::TaskUpdated(id) => format!("Task {} updated", id),
            Message::TaskRemoved(id) => format!("Task {} removed", id),
            Message::TaskNothingToUpdate => "Nothing to update: pass --name and/or --completed".to_string(),
            Message::NoTasksFound => "No tasks found".to_string(),
            Message::ConfirmRemoveTask(name) => format!("Remove task '{}' with its sub-tasks and time logs?", name),

            // === TIMELOG MESSAGES ===
            Message::TimelogCreated(id, duration) => format!("Time log {} recorded ({})", id, duration),
            Message::TimelogUpdated(id, duration) => format!("Time log {} updated ({})", id, duration),
            Message::TimelogRemoved(id) => format!("Time log {} removed", id),
            Message::TimelogTotal(task_id, duration, entries) => {
                format!("Task {}: {} across {} time log(s)", task_id, duration, entries)
            }
            Message::NoTimelogsFound => "No time logs found".to_string(),

            // === TRANSFER MESSAGES ===
            Message::TasksImported(count, project) => format!("Imported {} task(s) into '{}'", count, project),
            Message::TasksExported(count, path) => format!("Exported {} task(s) to {}", count, path),
            Message::LineAppended(path) => format!("Line appended to {}", path),
            Message::LineRemoved(line, path) => format!("Line {} removed from {}", line, path),
            Message::LineUpdated(line, path) => format!("Line {} of {} updated", line, path),

            // === GENERIC ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
            Message::UnexpectedFailure => "Unexpected failure, the database may be damaged".to_string(),
        };
        write!(f, "{}", s)
    }
}
