use super::formatter::{format_due, truncate};
use super::messages::Message;
use super::task::{Task, TaskId};
use chrono::Utc;
use prettytable::{row, Table};

const NOTES_WIDTH: usize = 40;
const FOCUS_MARKER: &str = "▶";

pub struct View {}

impl View {
    /// Prints `tasks` as a table. Positions are 1-based, the focus task is
    /// marked with `▶`.
    pub fn tasks(tasks: &[Task], focus: Option<TaskId>) {
        Self::tasks_table(tasks, focus).printstd();
    }

    pub fn tasks_table(tasks: &[Task], focus: Option<TaskId>) -> Table {
        let now = Utc::now();
        let mut table = Table::new();

        table.add_row(row!["#", "ID", "TITLE", "DUE", "NOTES", "STATUS"]);
        for (index, task) in tasks.iter().enumerate() {
            let marker = if Some(task.id) == focus { FOCUS_MARKER } else { "" };
            let status = if task.is_completed {
                "done"
            } else if task.is_overdue(now) {
                "overdue"
            } else {
                ""
            };
            table.add_row(row![
                format!("{}{}", marker, index + 1),
                task.id.short(),
                task.title,
                format_due(task.due_date.as_ref()),
                truncate(task.notes.as_deref().unwrap_or_default(), NOTES_WIDTH),
                status
            ]);
        }

        table
    }
}

/// One line of focus bar text, exactly `width` columns wide when `width`
/// leaves room for the opacity label.
pub fn render_focus_bar(title: Option<&str>, opacity: f64, width: usize) -> String {
    let label = match title {
        Some(title) => format!("{} {}", FOCUS_MARKER, title),
        None => Message::NoFocusTask.to_string(),
    };
    let suffix = format!("{:>4.0}%", opacity * 100.0);
    let room = width.saturating_sub(suffix.chars().count() + 1);
    let label = truncate(&label, room);
    let padding = room.saturating_sub(label.chars().count());

    format!("{}{} {}", label, " ".repeat(padding), suffix)
}
