/// Every message the application shows to the user.
///
/// The text of each variant is defined in the `Display` implementation in
/// [`super::display`].
#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(String),  // title
    TaskUpdated(String),  // title
    TaskDeleted(String),  // title
    TaskCompleted(String),
    TaskReactivated(String),
    TaskMoved(String, usize), // title, 1-based position
    TasksSorted,
    TasksDeletedCount(usize),
    NoCompletedTasks,
    NoActiveTasks,
    NoArchivedTasks,
    TasksHeader,
    ArchivedTasksHeader,
    AllTasksHeader,
    TaskNotFoundRef(String),
    AmbiguousTaskRef(String, usize), // reference, number of matches
    TaskPositionOutOfRange(usize, usize), // requested, active count
    TaskAlreadyCompleted(String),
    TaskNotCompleted(String),
    ConfirmDeleteTask(String),
    ConfirmClearCompleted(usize),
    OperationCancelled,
    NoChangesDetected,
    EditingTask(String),
    InvalidDueDate(String),
    EmptyTitle,
    Stats(usize, usize), // active, archived
    OperationFailed(String),
    StoreInitFailed(String),

    // === PROMPTS ===
    PromptTaskTitle,
    PromptTaskNotes,
    PromptTaskDue,

    // === FOCUS BAR ===
    FocusNow(String),
    NoFocusTask,
    FocusBarWatching(u64), // refresh interval in seconds
    FocusBarStopped,
    OpacityCurrent(f64),
    OpacitySaved(f64),

    // === CONFIG MESSAGES ===
    ConfigReadFailed(String),

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String), // version, name
    MigrationFailed(u32, String),  // version, error
    AllMigrationsCompleted,
    DbVersion(u32, u32), // current, latest
    MigrationHistoryHeader,
    MigrationEntry(u32, String, String), // version, name, applied at
}
