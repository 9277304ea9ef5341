//! Task entity and ordering rules.
//!
//! `Task` is the single entity the application stores. Every consumer outside
//! the store works with owned copies of it: the controller and the views
//! throw them away and rebuild them after each mutation.
//!
//! The ordering rules used by `fetch_sorted` and by the controller's
//! auto-sort live here so that every store implementation shares them.

use chrono::{DateTime, SubsecRound, Utc};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque, immutable task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, used when listing tasks.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub notes: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub is_completed: bool,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Builds an active task stamped with the current time.
    ///
    /// Stores call this after validating the title; it does no validation
    /// of its own.
    pub fn new(title: &str, notes: Option<String>, due_date: Option<DateTime<Utc>>, order: i32) -> Self {
        let now = now();
        Task {
            id: TaskId::new(),
            title: title.to_string(),
            notes,
            due_date: due_date.map(normalize),
            is_completed: false,
            order,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_overdue(&self, at: DateTime<Utc>) -> bool {
        !self.is_completed && self.due_date.is_some_and(|due| due < at)
    }
}

/// Returns `true` when the title has visible characters.
pub fn is_valid_title(title: &str) -> bool {
    !title.trim().is_empty()
}

/// Current time at the precision every store persists.
pub fn now() -> DateTime<Utc> {
    normalize(Utc::now())
}

/// Truncates a timestamp to microseconds.
pub fn normalize(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(6)
}

/// Sorting options for `TaskStore::fetch_sorted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSortOrder {
    DueDate { ascending: bool },
    CreatedDate { ascending: bool },
    Title { ascending: bool },
    ManualOrder,
}

impl TaskSortOrder {
    /// Compares two tasks under this sort order.
    ///
    /// Dated tasks always come before undated ones, whichever direction the
    /// due dates themselves are sorted in. Ties fall back to `order`.
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        match *self {
            TaskSortOrder::DueDate { ascending } => compare_due(a, b, ascending),
            TaskSortOrder::CreatedDate { ascending } => directed(a.created_at.cmp(&b.created_at), ascending),
            TaskSortOrder::Title { ascending } => directed(a.title.cmp(&b.title), ascending),
            TaskSortOrder::ManualOrder => a.order.cmp(&b.order),
        }
    }

    /// Stable sort of `tasks` under this order.
    pub fn sort(&self, tasks: &mut [Task]) {
        tasks.sort_by(|a, b| self.compare(a, b));
    }
}

fn directed(ordering: Ordering, ascending: bool) -> Ordering {
    if ascending {
        ordering
    } else {
        ordering.reverse()
    }
}

fn compare_due(a: &Task, b: &Task, ascending: bool) -> Ordering {
    match (a.due_date, b.due_date) {
        (Some(da), Some(db)) => directed(da.cmp(&db), ascending).then(a.order.cmp(&b.order)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.order.cmp(&b.order),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn task(title: &str, due_in_hours: Option<i64>, order: i32) -> Task {
        let base = now();
        let mut task = Task::new(title, None, due_in_hours.map(|h| base + Duration::hours(h)), order);
        task.created_at = base + Duration::seconds(order as i64);
        task
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn test_blank_titles_are_invalid() {
        assert!(!is_valid_title(""));
        assert!(!is_valid_title("   "));
        assert!(!is_valid_title("\n\t "));
        assert!(is_valid_title(" a "));
    }

    #[test]
    fn test_due_date_ascending_puts_undated_last() {
        let mut tasks = vec![task("none", None, 0), task("later", Some(2), 1), task("soon", Some(1), 2)];
        TaskSortOrder::DueDate { ascending: true }.sort(&mut tasks);
        assert_eq!(titles(&tasks), vec!["soon", "later", "none"]);
    }

    #[test]
    fn test_due_date_descending_still_puts_undated_last() {
        let mut tasks = vec![task("none", None, 0), task("soon", Some(1), 1), task("later", Some(2), 2)];
        TaskSortOrder::DueDate { ascending: false }.sort(&mut tasks);
        assert_eq!(titles(&tasks), vec!["later", "soon", "none"]);
    }

    #[test]
    fn test_due_date_ties_break_by_order() {
        let a = task("a", Some(1), 3);
        let mut b = task("b", Some(1), 1);
        b.due_date = a.due_date;
        let c = task("c", None, 2);
        let d = task("d", None, 0);
        let mut tasks = vec![a, c, b, d];
        TaskSortOrder::DueDate { ascending: true }.sort(&mut tasks);
        assert_eq!(titles(&tasks), vec!["b", "a", "d", "c"]);
    }

    #[test]
    fn test_title_and_created_directions() {
        let mut tasks = vec![task("b", None, 1), task("c", None, 2), task("a", None, 0)];
        TaskSortOrder::Title { ascending: false }.sort(&mut tasks);
        assert_eq!(titles(&tasks), vec!["c", "b", "a"]);
        TaskSortOrder::CreatedDate { ascending: true }.sort(&mut tasks);
        assert_eq!(titles(&tasks), vec!["a", "b", "c"]);
        TaskSortOrder::CreatedDate { ascending: false }.sort(&mut tasks);
        assert_eq!(titles(&tasks), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_task_id_round_trips_through_string() {
        let id = TaskId::new();
        let parsed: TaskId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert_eq!(id.short().len(), 8);
    }

    #[test]
    fn test_overdue_ignores_completed_tasks() {
        let mut t = task("x", Some(-1), 0);
        assert!(t.is_overdue(Utc::now()));
        t.is_completed = true;
        assert!(!t.is_overdue(Utc::now()));
    }
}
