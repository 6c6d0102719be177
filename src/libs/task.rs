//! Task value objects.
//!
//! A [`TaskSpec`] carries only what the caller decides about a task; a
//! [`TaskRecord`] pairs it with the identity and derived columns the store
//! assigns. Stores never accept a record for insertion, only a spec.

use super::error::{Error, Result};
use super::time;
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Priority {
    Low = 1,
    #[default]
    Medium = 2,
    High = 3,
    Critical = 4,
}

impl Priority {
    pub fn ordinal(self) -> i64 {
        self as i64
    }

    pub fn from_ordinal(value: i64) -> Result<Self> {
        match value {
            1 => Ok(Priority::Low),
            2 => Ok(Priority::Medium),
            3 => Ok(Priority::High),
            4 => Ok(Priority::Critical),
            other => Err(Error::validation(format!("priority must be between 1 and 4, got {other}"))),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        };
        f.write_str(name)
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            other => other
                .parse::<i64>()
                .map_err(|_| Error::validation(format!("unknown priority '{s}'")))
                .and_then(Priority::from_ordinal),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSpec {
    pub name: String,
    pub completed: bool,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub due_at: Option<DateTime<Utc>>,
    pub done_at: Option<DateTime<Utc>>,
    pub parent_id: Option<i64>,
}

impl TaskSpec {
    pub fn new(name: &str, completed: bool) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::validation("task name must not be empty"));
        }
        Ok(Self {
            name: name.to_string(),
            completed,
            priority: Priority::default(),
            created_at: time::now(),
            due_at: None,
            done_at: None,
            parent_id: None,
        })
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn parent(mut self, parent_id: i64) -> Result<Self> {
        if parent_id <= 0 {
            return Err(Error::validation(format!("parent task id must be positive, got {parent_id}")));
        }
        self.parent_id = Some(parent_id);
        Ok(self)
    }

    /// Keeps `done_at` consistent with `completed`: stamped when a completed
    /// task has none, cleared when the task is open.
    pub(crate) fn settle_done_at(&mut self) {
        if !self.completed {
            self.done_at = None;
        } else if self.done_at.is_none() {
            self.done_at = Some(time::now());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    pub id: i64,
    pub project_id: i64,
    pub fulltext: String,
    pub spec: TaskSpec,
}

impl TaskRecord {
    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn completed(&self) -> bool {
        self.spec.completed
    }
}

/// Partial update: `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub name: Option<String>,
    pub completed: Option<bool>,
}

impl TaskUpdate {
    pub fn new(name: Option<&str>, completed: Option<bool>) -> Result<Self> {
        let name = match name.map(str::trim) {
            Some("") => return Err(Error::validation("task name must not be empty")),
            other => other.map(str::to_string),
        };
        Ok(Self { name, completed })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.completed.is_none()
    }
}
