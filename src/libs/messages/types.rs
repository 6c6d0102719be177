/// Every user-facing line printed by the command layer.
///
/// Text lives in `display.rs`; call sites only pick a variant and its parameters.
#[derive(Debug, Clone)]
pub enum Message {
    // === SETUP MESSAGES ===
    DatabaseInitialized(String), // path
    DefaultProjectCreated(String),
    ConfigSaved,
    ConfigDeleted,

    // === PROJECT MESSAGES ===
    ProjectCreated(i64, String),
    ProjectRenamed(i64, String),
    ProjectRemoved(i64),
    ProjectNowCurrent(String),
    CurrentProject(String),
    NoProjectsFound,
    ConfirmRemoveProject(String),

    // === TASK MESSAGES ===
    TaskCreated(i64, String),
    TaskUpdated(i64),
    TaskRemoved(i64),
    TaskNothingToUpdate,
    NoTasksFound,
    ConfirmRemoveTask(String),

    // === TIMELOG MESSAGES ===
    TimelogCreated(i64, String), // id, duration
    TimelogUpdated(i64, String),
    TimelogRemoved(i64),
    TimelogTotal(i64, String, usize), // task id, duration, entries
    NoTimelogsFound,

    // === TRANSFER MESSAGES ===
    TasksImported(usize, String), // count, project
    TasksExported(usize, String), // count, path
    LineAppended(String),
    LineRemoved(usize, String),
    LineUpdated(usize, String),

    // === GENERIC ===
    OperationCancelled,
    UnexpectedFailure,
}
