use ratatui::widgets::TableState;

use crate::commands::{add_task, delete_task, list_tasks, mark_task, update_task, MarkOutcome};
use crate::error::Result;
use crate::models::{Status, Task};
use crate::storage::Storage;

#[derive(Debug, PartialEq)]
pub enum InputMode {
    Normal,
    Editing,
    Adding,
}

pub struct App {
    pub storage: Storage,
    pub tasks: Vec<Task>,
    pub state: TableState,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub target_id: Option<u64>,
    /// `None` shows every task.
    pub filter: Option<Status>,
    /// Feedback from the last action, shown in the status line.
    pub message: Option<String>,
}

impl App {
    /// Creates a new App instance and loads initial data.
    pub fn new(storage: Storage) -> Result<App> {
        let mut app = App {
            storage,
            tasks: Vec::new(),
            state: TableState::default(),
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            target_id: None,
            filter: None,
            message: None,
        };
        app.tasks = list_tasks(&app.storage, app.filter)?;
        app.fix_selection();
        Ok(app)
    }

    /// Selects the next task, wrapping at the end.
    pub fn next(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < self.tasks.len() => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    /// Selects the previous task, wrapping at the start.
    pub fn previous(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => self.tasks.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.state.selected().and_then(|i| self.tasks.get(i))
    }

    /// Reloads tasks from storage and keeps the selection in range.
    pub fn reload(&mut self) {
        match list_tasks(&self.storage, self.filter) {
            Ok(tasks) => self.tasks = tasks,
            Err(e) => self.message = Some(format!("Error: {e}")),
        }
        self.fix_selection();
    }

    fn fix_selection(&mut self) {
        if self.tasks.is_empty() {
            self.state.select(None);
        } else {
            match self.state.selected() {
                Some(i) if i >= self.tasks.len() => self.state.select(Some(self.tasks.len() - 1)),
                None => self.state.select(Some(0)),
                _ => {}
            }
        }
    }

    /// Cycles the status filter: all, todo, in-progress, done, all.
    pub fn cycle_filter(&mut self) {
        self.filter = match self.filter {
            None => Some(Status::Todo),
            Some(Status::Todo) => Some(Status::InProgress),
            Some(Status::InProgress) => Some(Status::Done),
            Some(Status::Done) => None,
        };
        self.state.select(None);
        self.reload();
    }

    pub fn filter_label(&self) -> &'static str {
        self.filter.as_ref().map_or("all", Status::as_str)
    }

    /// Moves the selected task to `status`.
    pub fn mark_selected(&mut self, status: Status) {
        let Some(id) = self.selected_task().map(|t| t.id) else {
            return;
        };
        self.message = Some(match mark_task(&self.storage, id, status) {
            Ok(MarkOutcome::Changed) => format!("Task {id} marked as {status}."),
            Ok(MarkOutcome::Unchanged) => format!("Task {id} is already {status}."),
            Err(e) => format!("Error: {e}"),
        });
        self.reload();
    }

    /// Deletes the currently selected task.
    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected_task().map(|t| t.id) else {
            return;
        };
        self.message = Some(match delete_task(&self.storage, id) {
            Ok(()) => format!("Task {id} deleted successfully."),
            Err(e) => format!("Error: {e}"),
        });
        self.reload();
    }

    pub fn start_add(&mut self) {
        self.input_mode = InputMode::Adding;
        self.target_id = None;
        self.input_buffer.clear();
    }

    /// Opens the description editor for the selected task, pre-filled.
    pub fn start_edit(&mut self) {
        if let Some((id, description)) = self.selected_task().map(|t| (t.id, t.description.clone())) {
            self.target_id = Some(id);
            self.input_buffer = description;
            self.input_mode = InputMode::Editing;
        }
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
        self.target_id = None;
    }

    /// Submits the input buffer for the current mode.
    pub fn handle_input(&mut self) {
        let description = std::mem::take(&mut self.input_buffer);
        let result = match (&self.input_mode, self.target_id) {
            (InputMode::Adding, _) => add_task(&self.storage, description)
                .map(|id| format!("Task added successfully (ID: {id})")),
            (InputMode::Editing, Some(id)) => update_task(&self.storage, id, description)
                .map(|()| format!("Task {id} updated successfully.")),
            _ => return,
        };
        self.message = Some(result.unwrap_or_else(|e| format!("Error: {e}")));
        self.input_mode = InputMode::Normal;
        self.target_id = None;
        self.reload();
    }
}
