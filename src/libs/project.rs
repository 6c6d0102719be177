use super::error::{Error, Result};
use super::time;
use chrono::{DateTime, Utc};

/// Caller-supplied project data, validated on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSpec {
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl ProjectSpec {
    pub fn new(name: &str) -> Result<Self> {
        Self::with_created_at(name, time::now())
    }

    pub fn with_created_at(name: &str, created_at: DateTime<Utc>) -> Result<Self> {
        Ok(Self {
            name: validate_name(name)?,
            created_at,
        })
    }
}

pub(crate) fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::validation("project name must not be empty"));
    }
    Ok(name.to_string())
}

/// A persisted project: the spec plus everything the store generated for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecord {
    pub id: i64,
    pub fulltext: String,
    pub is_current: bool,
    pub spec: ProjectSpec,
}

impl ProjectRecord {
    pub fn name(&self) -> &str {
        &self.spec.name
    }
}
