use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated(title) => format!("Task '{}' created", title),
            Message::TaskUpdated(title) => format!("Task '{}' updated", title),
            Message::TaskDeleted(title) => format!("Task '{}' deleted", title),
            Message::TaskCompleted(title) => format!("Task '{}' completed", title),
            Message::TaskReactivated(title) => format!("Task '{}' is active again", title),
            Message::TaskMoved(title, position) => format!("Task '{}' moved to position {}", title, position),
            Message::TasksSorted => "Active tasks sorted by due date".to_string(),
            Message::TasksDeletedCount(count) => format!("Deleted {} completed task(s)", count),
            Message::NoCompletedTasks => "There are no completed tasks.".to_string(),
            Message::NoActiveTasks => "No active tasks. Add one with `focusbar add <title>`.".to_string(),
            Message::NoArchivedTasks => "No completed tasks.".to_string(),
            Message::TasksHeader => "Tasks:".to_string(),
            Message::ArchivedTasksHeader => "Completed tasks:".to_string(),
            Message::AllTasksHeader => "All tasks:".to_string(),
            Message::TaskNotFoundRef(reference) => format!("No task matches '{}'", reference),
            Message::AmbiguousTaskRef(reference, count) => {
                format!("'{}' matches {} tasks, use a longer id", reference, count)
            }
            Message::TaskPositionOutOfRange(position, count) => {
                format!("Position {} is out of range, there are {} active task(s)", position, count)
            }
            Message::TaskAlreadyCompleted(title) => format!("Task '{}' is already completed", title),
            Message::TaskNotCompleted(title) => format!("Task '{}' is not completed", title),
            Message::ConfirmDeleteTask(title) => format!("Delete task '{}'?", title),
            Message::ConfirmClearCompleted(count) => format!("Delete {} completed task(s)?", count),
            Message::OperationCancelled => "Operation cancelled.".to_string(),
            Message::NoChangesDetected => "No changes detected.".to_string(),
            Message::EditingTask(title) => format!("Editing task: {}", title),
            Message::InvalidDueDate(input) => format!(
                "Invalid due date '{}'. Use YYYY-MM-DD, YYYY-MM-DD HH:MM or +N(m|h|d|w)",
                input
            ),
            Message::EmptyTitle => "Task title must not be empty".to_string(),
            Message::Stats(active, archived) => format!("{} active, {} completed, {} total", active, archived, active + archived),
            Message::OperationFailed(error) => format!("Operation failed: {}", error),
            Message::StoreInitFailed(error) => format!("Failed to open the task store: {}", error),

            // === PROMPTS ===
            Message::PromptTaskTitle => "Title".to_string(),
            Message::PromptTaskNotes => "Notes".to_string(),
            Message::PromptTaskDue => "Due (YYYY-MM-DD [HH:MM] or +N(m|h|d|w), empty for none)".to_string(),

            // === FOCUS BAR ===
            Message::FocusNow(title) => format!("Focus: {}", title),
            Message::NoFocusTask => "No Focus Task".to_string(),
            Message::FocusBarWatching(interval) => format!("Focus bar refreshes every {}s, press Ctrl+C to stop", interval),
            Message::FocusBarStopped => "Focus bar stopped".to_string(),
            Message::OpacityCurrent(value) => format!("Focus bar opacity: {:.0}%", value * 100.0),
            Message::OpacitySaved(value) => format!("Focus bar opacity set to {:.0}%", value * 100.0),

            // === CONFIG MESSAGES ===
            Message::ConfigReadFailed(error) => format!("Failed to read configuration, using defaults: {}", error),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationFailed(version, error) => format!("✗ Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed successfully".to_string(),
            Message::DbVersion(current, latest) => format!("Database version: {} (latest {})", current, latest),
            Message::MigrationHistoryHeader => "Migration history:".to_string(),
            Message::MigrationEntry(version, name, applied_at) => format!("  v{} {} ({})", version, name, applied_at),
        };

        write!(f, "{}", text)
    }
}
