use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while operating on the task store.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Description cannot be empty.")]
    EmptyDescription,

    #[error("Invalid task ID '{0}'.")]
    InvalidId(String),

    #[error("Invalid status '{0}'. Use 'todo', 'in-progress', or 'done'.")]
    InvalidStatus(String),

    #[error("Task with ID {0} not found.")]
    NotFound(u64),

    #[error("No task IDs left; the largest ID is already in use.")]
    IdsExhausted,

    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid task data in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl TaskError {
    /// Validation errors are detected before the store is touched.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TaskError::EmptyDescription | TaskError::InvalidId(_) | TaskError::InvalidStatus(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TaskError>;

/// Parses a task id as typed on the command line. Ids are positive integers.
pub fn parse_id(raw: &str) -> Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(TaskError::InvalidId(raw.to_string())),
    }
}
