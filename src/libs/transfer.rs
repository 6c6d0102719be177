//! Bulk transfer of tasks through plain two-column text files.
//!
//! ## Format
//!
//! ```text
//! description,completed
//! Buy milk,false
//! Call Bob,true
//! ```
//!
//! The first line is exactly `description,completed`. Every other line holds a
//! non-empty description and the literal `true` or `false`. There is no
//! quoting or escaping, so a description can never contain a comma.
//!
//! ## Failure policy
//!
//! [`TaskFile::read`] scans the whole file before reporting. Every bad line,
//! blank lines included, is collected into one [`ParseErrors`]; when there is
//! at least one, nothing is returned and nothing is imported. Only the final
//! line break of the file is optional. A wrong header is reported on its own.
//!
//! ## Rewrites
//!
//! [`TaskFile::remove_line`] and [`TaskFile::update_line`] copy the file into
//! a temporary sibling, sync it, then rename it over the original. The rename
//! is the only step that touches the original, so a crash leaves either the
//! old or the new file in place. Two processes rewriting the same file at
//! once can still lose one of the edits.

use super::error::{Error, LineError, LineErrorKind, ParseErrors, Result};
use super::task::{TaskRecord, TaskSpec};
use crate::db::tasks::Tasks;
use csv::{QuoteStyle, WriterBuilder};
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const HEADER: [&str; 2] = ["description", "completed"];

/// One data line of a task file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLine {
    pub description: String,
    pub completed: bool,
}

impl TaskLine {
    pub fn new(description: &str, completed: bool) -> Result<Self> {
        let description = description.trim();
        if description.is_empty() {
            return Err(Error::validation("description must not be empty"));
        }
        if description.contains([',', '\n', '\r']) {
            return Err(Error::validation(format!(
                "description '{description}' contains a comma or line break, which the task file format cannot hold"
            )));
        }
        Ok(Self {
            description: description.to_string(),
            completed,
        })
    }

    pub fn to_spec(&self) -> Result<TaskSpec> {
        TaskSpec::new(&self.description, self.completed)
    }

    fn fields(&self) -> [&str; 2] {
        [&self.description, if self.completed { "true" } else { "false" }]
    }
}

impl TryFrom<&TaskRecord> for TaskLine {
    type Error = Error;

    fn try_from(record: &TaskRecord) -> Result<Self> {
        TaskLine::new(record.name(), record.completed())
            .map_err(|_| Error::validation(format!("task {} '{}' cannot be written to a task file", record.id, record.name())))
    }
}

pub struct TaskFile {
    path: PathBuf,
}

impl TaskFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parses and validates every line, failing with all defects at once.
    ///
    /// A wrong or missing header stops the scan and is reported alone.
    pub fn read(&self) -> Result<Vec<TaskLine>> {
        let mut numbered = BufReader::new(self.open()?)
            .lines()
            .enumerate()
            .map(|(i, text)| text.map(|text| (i + 1, text)));

        match numbered.next().transpose()? {
            Some((_, text)) if split_fields(&text) == HEADER => {}
            found => {
                let found = found.map(|(_, text)| text).unwrap_or_default();
                return Err(self.rejected(vec![LineError {
                    line: 1,
                    kind: LineErrorKind::HeaderFormat(found),
                }]));
            }
        }

        let mut lines = Vec::new();
        let mut errors = Vec::new();
        for entry in numbered {
            let (line, text) = entry?;
            match parse_line(line, &text) {
                Ok(parsed) => lines.push(parsed),
                Err(error) => errors.push(error),
            }
        }

        if !errors.is_empty() {
            return Err(self.rejected(errors));
        }
        Ok(lines)
    }

    /// Reads the whole file, then inserts every line as a task of `project_id` in file order.
    pub fn import(&self, tasks: &Tasks, project_id: i64) -> Result<usize> {
        let specs = self
            .read()?
            .iter()
            .map(TaskLine::to_spec)
            .collect::<Result<Vec<_>>>()?;
        let count = tasks.import(project_id, &specs)?;
        tracing::info!(path = %self.path.display(), project_id, count, "tasks imported");

        Ok(count)
    }

    /// Writes a fresh file holding the header and one line per task.
    pub fn export(&self, records: &[TaskRecord]) -> Result<usize> {
        let lines = records.iter().map(TaskLine::try_from).collect::<Result<Vec<_>>>()?;
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Never)
            .from_path(&self.path)?;
        writer.write_record(HEADER)?;
        for line in &lines {
            writer.write_record(line.fields())?;
        }
        writer.flush()?;

        Ok(lines.len())
    }

    /// Adds `line` at the end of the file, writing the header first when the file is absent or empty.
    pub fn append(&self, line: &TaskLine) -> Result<()> {
        let is_new = match fs::metadata(&self.path) {
            Ok(metadata) => metadata.len() == 0,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(e) => return Err(Error::Io(e)),
        };
        let needs_newline = !is_new && !ends_with_newline(&self.path)?;
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        if needs_newline {
            file.write_all(b"\n")?;
        }

        let mut writer = WriterBuilder::new().quote_style(QuoteStyle::Never).from_writer(file);
        if is_new {
            writer.write_record(HEADER)?;
        }
        writer.write_record(line.fields())?;
        writer.flush()?;

        Ok(())
    }

    /// Drops data line `line` (1-based, the header is line 1).
    pub fn remove_line(&self, line: usize) -> Result<()> {
        self.rewrite(line, None)
    }

    /// Replaces data line `line` (1-based, the header is line 1).
    pub fn update_line(&self, line: usize, replacement: &TaskLine) -> Result<()> {
        self.rewrite(line, Some(replacement))
    }

    fn rewrite(&self, target: usize, replacement: Option<&TaskLine>) -> Result<()> {
        if target == 1 {
            return Err(Error::validation("the header line cannot be changed"));
        }
        let existing = BufReader::new(self.open()?)
            .lines()
            .collect::<std::io::Result<Vec<String>>>()?;
        if target == 0 || target > existing.len() {
            return Err(Error::LineNotFound {
                path: self.path.clone(),
                line: target,
            });
        }

        let mut tmp = NamedTempFile::new_in(parent_dir(&self.path))?;
        for (i, text) in existing.iter().enumerate() {
            if i + 1 != target {
                writeln!(tmp, "{text}")?;
            } else if let Some(row) = replacement {
                writeln!(tmp, "{}", row.fields().join(","))?;
            }
        }
        fs::set_permissions(tmp.path(), fs::metadata(&self.path)?.permissions())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        tracing::debug!(path = %self.path.display(), line = target, "task file rewritten");

        Ok(())
    }

    fn rejected(&self, errors: Vec<LineError>) -> Error {
        tracing::debug!(path = %self.path.display(), errors = errors.len(), "task file rejected");
        Error::Parse(ParseErrors {
            path: self.path.clone(),
            errors,
        })
    }

    fn open(&self) -> Result<File> {
        File::open(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::FileNotFound(self.path.clone()),
            _ => Error::Io(e),
        })
    }
}

/// An empty line has no fields at all rather than one empty field.
fn split_fields(text: &str) -> Vec<&str> {
    if text.is_empty() {
        Vec::new()
    } else {
        text.split(',').collect()
    }
}

fn parse_line(line: usize, text: &str) -> std::result::Result<TaskLine, LineError> {
    let fail = |kind| Err(LineError { line, kind });
    let fields = split_fields(text);

    if fields.len() != 2 {
        return fail(LineErrorKind::ColumnCount(fields.len()));
    }
    let description = fields[0].trim();
    if description.is_empty() {
        return fail(LineErrorKind::EmptyDescription);
    }
    let completed = match fields[1] {
        "true" => true,
        "false" => false,
        other => return fail(LineErrorKind::InvalidCompleted(other.to_string())),
    };

    Ok(TaskLine {
        description: description.to_string(),
        completed,
    })
}

fn ends_with_newline(path: &Path) -> Result<bool> {
    let mut file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
