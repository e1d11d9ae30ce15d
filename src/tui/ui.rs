use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};
use crate::models::Status;
use crate::render::timestamp;
use super::app::{App, InputMode};

fn status_style(status: Status) -> Style {
    match status {
        Status::Todo => Style::default().fg(Color::Yellow),
        Status::InProgress => Style::default().fg(Color::Cyan),
        Status::Done => Style::default().fg(Color::Green),
    }
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Table
            Constraint::Length(3)  // Help / status line
        ].as_ref())
        .split(f.area());

    let rows: Vec<Row> = app
        .tasks
        .iter()
        .map(|t| {
            Row::new(vec![
                Cell::from(t.id.to_string()),
                Cell::from(t.description.clone()),
                Cell::from(t.status.to_string()),
                Cell::from(timestamp(&t.created_at)),
                Cell::from(timestamp(&t.updated_at)),
            ]).style(status_style(t.status))
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Min(20),
        Constraint::Length(12),
        Constraint::Length(26),
        Constraint::Length(26),
    ];

    let title = format!("Tasks [{}] ({})", app.filter_label(), app.storage.path().display());
    let table = Table::new(rows, widths)
        .header(Row::new(vec!["ID", "Description", "Status", "Created", "Updated"])
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .bottom_margin(1))
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, chunks[0], &mut app.state);

    let help_text = match app.input_mode {
        InputMode::Normal => "q: Quit | a: Add | e: Edit | d: Del | t: Todo | i: In progress | x: Done | f: Filter",
        InputMode::Editing => "Enter: Save | Esc: Cancel",
        InputMode::Adding => "Enter: Add | Esc: Cancel",
    };
    let status_line = match &app.message {
        Some(msg) if app.input_mode == InputMode::Normal => format!("{msg}  |  {help_text}"),
        _ => help_text.to_string(),
    };

    let help = Paragraph::new(status_line)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, chunks[1]);

    let title = match app.input_mode {
        InputMode::Adding => "Add Task: Enter Description",
        InputMode::Editing => "Edit Description",
        InputMode::Normal => return,
    };
    let area = centered_rect(60, 3, f.area());
    f.render_widget(Clear, area);
    let input = Paragraph::new(app.input_buffer.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(input, area);
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let margin = r.height.saturating_sub(height) / 2;
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(margin),
            Constraint::Length(height),
            Constraint::Length(margin),
        ].as_ref())
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ].as_ref())
        .split(popup_layout[1])[1]
}
