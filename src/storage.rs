use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Result, TaskError};
use crate::models::Task;

/// File name used when no other location is configured.
pub const DEFAULT_DB: &str = "tasks.json";

/// Environment variable that overrides the store location.
pub const DB_ENV: &str = "TASKS_DB";

/// Returns the path to the tasks database file.
///
/// The path is determined in the following order:
/// 1. The explicit `path` argument (the `--file` flag).
/// 2. `TASKS_DB` environment variable.
/// 3. `./tasks.json`.
pub fn db_path(path: Option<PathBuf>) -> PathBuf {
    path.or_else(|| std::env::var_os(DB_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB))
}

#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
    None
}

/// The JSON file holding the whole task collection.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Storage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads all tasks from the storage file.
    ///
    /// A missing or blank file is an empty collection. Any other read
    /// failure, or malformed JSON, is an error.
    pub fn load(&self) -> Result<Vec<Task>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no task file yet");
                return Ok(Vec::new());
            }
            Err(source) => return Err(self.io_error(source)),
        };
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        let tasks: Vec<Task> = serde_json::from_str(&contents).map_err(|source| TaskError::Json {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    /// Saves the given list of tasks to the storage file.
    ///
    /// The collection is written to a temporary sibling file which then
    /// replaces the target, so readers never observe a half-written store.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        let mut body = serde_json::to_string_pretty(tasks).map_err(|source| TaskError::Json {
            path: self.path.clone(),
            source,
        })?;
        body.push('\n');

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| self.io_error(e))?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| self.io_error(e))?;
        // temp files are created 0600; keep the mode the store already has
        let perms = match fs::metadata(&self.path) {
            Ok(meta) => Some(meta.permissions()),
            Err(_) => new_file_permissions(),
        };
        if let Some(perms) = perms {
            tmp.as_file().set_permissions(perms).map_err(|e| self.io_error(e))?;
        }
        tmp.write_all(body.as_bytes()).map_err(|e| self.io_error(e))?;
        tmp.as_file().sync_all().map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }

    fn io_error(&self, source: io::Error) -> TaskError {
        TaskError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
