use super::error::{ensure_id, Error, Result};
use chrono::{DateTime, Utc};

/// One interval of work on a task. Construction fails when the interval runs backwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelogSpec {
    pub task_id: i64,
    pub started_at: DateTime<Utc>,
    pub stopped_at: DateTime<Utc>,
}

impl TimelogSpec {
    pub fn new(task_id: i64, started_at: DateTime<Utc>, stopped_at: DateTime<Utc>) -> Result<Self> {
        ensure_id("task", task_id)?;
        if stopped_at < started_at {
            return Err(Error::validation(format!(
                "timelog stops at {} before it starts at {}",
                stopped_at.to_rfc3339(),
                started_at.to_rfc3339()
            )));
        }
        Ok(Self {
            task_id,
            started_at,
            stopped_at,
        })
    }

    pub fn duration_seconds(&self) -> i64 {
        (self.stopped_at - self.started_at).num_seconds()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelogRecord {
    pub id: i64,
    pub spec: TimelogSpec,
}

impl TimelogRecord {
    pub fn duration_seconds(&self) -> i64 {
        self.spec.duration_seconds()
    }
}
