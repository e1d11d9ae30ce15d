use chrono::{DateTime, Local, SecondsFormat};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::models::{Status, Task};

pub const NO_TASKS: &str = "No tasks found.";

/// RFC3339 timestamp at seconds precision, as shown to the user.
pub fn timestamp(ts: &DateTime<Local>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, false)
}

pub fn status_color(status: Status) -> Color {
    match status {
        Status::Todo => Color::Yellow,
        Status::InProgress => Color::Cyan,
        Status::Done => Color::Green,
    }
}

/// Formats tasks as indented blocks, one per task, each followed by a blank line.
pub fn task_blocks(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return format!("{NO_TASKS}\n");
    }
    tasks
        .iter()
        .map(|t| {
            format!(
                "Task {}:\n  Description: {}\n  Status: {}\n  Created: {}\n  Updated: {}\n\n",
                t.id,
                t.description,
                t.status,
                timestamp(&t.created_at),
                timestamp(&t.updated_at),
            )
        })
        .collect()
}

/// Formats tasks as a table.
pub fn task_table(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return format!("{NO_TASKS}\n");
    }
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Description").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
            Cell::new("Created").add_attribute(Attribute::Bold),
            Cell::new("Updated").add_attribute(Attribute::Bold),
        ]);

    for t in tasks {
        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(&t.description),
            Cell::new(t.status).fg(status_color(t.status)),
            Cell::new(timestamp(&t.created_at)),
            Cell::new(timestamp(&t.updated_at)),
        ]);
    }

    format!("{table}\n")
}
