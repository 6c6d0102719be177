use super::formatter::{format_flag, format_optional, format_seconds, format_timestamp};
use super::project::ProjectRecord;
use super::task::TaskRecord;
use super::task_tree::TaskTree;
use super::timelog::TimelogRecord;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn projects(projects: &[ProjectRecord]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "CURRENT", "CREATED"]);
        for project in projects {
            table.add_row(row![
                project.id,
                project.name(),
                format_flag(project.is_current),
                format_timestamp(&project.spec.created_at)
            ]);
        }
        table.printstd();
    }

    pub fn tasks(tasks: &[TaskRecord]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "DONE", "PRIORITY", "DUE", "PARENT", "PROJECT"]);
        for task in tasks {
            table.add_row(row![
                task.id,
                task.name(),
                format_flag(task.completed()),
                task.spec.priority,
                format_optional(task.spec.due_at.as_ref()),
                task.spec.parent_id.map(|id| id.to_string()).unwrap_or_default(),
                task.project_id
            ]);
        }
        table.printstd();
    }

    pub fn task_tree(tree: &TaskTree) {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "DONE", "PRIORITY"]);
        for (depth, task) in tree.walk() {
            table.add_row(row![
                task.id,
                format!("{}{}", "  ".repeat(depth), task.name()),
                format_flag(task.completed()),
                task.spec.priority
            ]);
        }
        table.printstd();
    }

    pub fn timelogs(timelogs: &[TimelogRecord]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "TASK ID", "STARTED", "STOPPED", "DURATION"]);
        for timelog in timelogs {
            table.add_row(row![
                timelog.id,
                timelog.spec.task_id,
                format_timestamp(&timelog.spec.started_at),
                format_timestamp(&timelog.spec.stopped_at),
                format_seconds(timelog.duration_seconds())
            ]);
        }
        table.printstd();
    }
}
