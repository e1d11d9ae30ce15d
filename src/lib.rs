//! Library side of `task-cli`: the task model, the JSON-file store and the
//! operations the command line and the interactive view run against it.
//!
//! Every operation loads the whole collection, changes it, and writes it
//! back. Nothing here exits the process; failures come back as
//! [`TaskError`] so the caller decides how to report them.

pub mod commands;
pub mod error;
pub mod models;
pub mod render;
pub mod storage;
pub mod tui;

pub use error::{Result, TaskError};
pub use models::{Status, Task};
pub use storage::Storage;
