use tracing::{debug, info};

use crate::error::{Result, TaskError};
use crate::models::{Status, Task};
use crate::storage::Storage;

/// Result of a status change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    /// The task moved to the requested status and the store was saved.
    Changed,
    /// The task already had the requested status; nothing was written.
    Unchanged,
}

fn validate_description(description: &str) -> Result<()> {
    if description.trim().is_empty() {
        return Err(TaskError::EmptyDescription);
    }
    Ok(())
}

/// Next free id: one past the largest id in use, so ids are never reused
/// while their task exists.
fn next_id(tasks: &[Task]) -> Result<u64> {
    tasks
        .iter()
        .map(|t| t.id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or(TaskError::IdsExhausted)
}

fn find_mut(tasks: &mut [Task], id: u64) -> Result<&mut Task> {
    tasks
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or(TaskError::NotFound(id))
}

/// Adds a new `todo` task and returns its id.
pub fn add_task(storage: &Storage, description: String) -> Result<u64> {
    validate_description(&description)?;
    let mut tasks = storage.load()?;
    let id = next_id(&tasks)?;
    tasks.push(Task::new(id, description));
    storage.save(&tasks)?;
    info!(id, "task added");
    Ok(id)
}

/// Replaces the description of an existing task.
pub fn update_task(storage: &Storage, id: u64, description: String) -> Result<()> {
    validate_description(&description)?;
    let mut tasks = storage.load()?;
    find_mut(&mut tasks, id)?.set_description(description);
    storage.save(&tasks)?;
    info!(id, "task updated");
    Ok(())
}

/// Removes a task by ID. Remaining tasks keep their ids and order.
pub fn delete_task(storage: &Storage, id: u64) -> Result<()> {
    let mut tasks = storage.load()?;
    let len_before = tasks.len();
    tasks.retain(|t| t.id != id);
    if tasks.len() == len_before {
        return Err(TaskError::NotFound(id));
    }
    storage.save(&tasks)?;
    info!(id, "task deleted");
    Ok(())
}

/// Moves a task to `status`.
///
/// Asking for the status the task already has is not an error: the store is
/// left untouched and [`MarkOutcome::Unchanged`] is returned.
pub fn mark_task(storage: &Storage, id: u64, status: Status) -> Result<MarkOutcome> {
    let mut tasks = storage.load()?;
    let task = find_mut(&mut tasks, id)?;
    if task.status == status {
        debug!(id, %status, "task already in requested status");
        return Ok(MarkOutcome::Unchanged);
    }
    task.set_status(status);
    storage.save(&tasks)?;
    info!(id, %status, "task status changed");
    Ok(MarkOutcome::Changed)
}

/// Returns the tasks matching `filter` (all tasks when `None`) in stored order.
pub fn list_tasks(storage: &Storage, filter: Option<Status>) -> Result<Vec<Task>> {
    let mut tasks = storage.load()?;
    if let Some(status) = filter {
        tasks.retain(|t| t.status == status);
    }
    Ok(tasks)
}
