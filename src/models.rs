use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::TaskError;

/// Progress state of a task.
///
/// Any state can move to any other state; setting a task to the state it is
/// already in is a no-op.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in-progress",
            Status::Done => "done",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| TaskError::InvalidStatus(s.to_string()))
    }
}

/// Represents a single item on the to-do list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, never reused while the task exists.
    pub id: u64,
    /// Free-text description; never blank.
    pub description: String,
    /// Current progress state.
    pub status: Status,
    /// Timestamp when the task was created.
    pub created_at: DateTime<Local>,
    /// Timestamp of the last description or status change.
    pub updated_at: DateTime<Local>,
}

impl Task {
    /// Creates a `todo` task with both timestamps set to now.
    pub fn new(id: u64, description: String) -> Self {
        let now = Local::now();
        Task {
            id,
            description,
            status: Status::Todo,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the description and refreshes `updated_at`.
    pub fn set_description(&mut self, description: String) {
        self.description = description;
        self.touch();
    }

    /// Moves the task to `status` and refreshes `updated_at`.
    pub fn set_status(&mut self, status: Status) {
        self.status = status;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Local::now();
    }
}
