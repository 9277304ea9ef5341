//! Storage capability for tasks.
//!
//! Consumers depend on the [`TaskStore`] trait only. Two implementations
//! ship with the crate:
//!
//! - [`crate::db::tasks::SqliteTaskStore`] persists to the SQLite database
//!   (file-backed, or in memory for throwaway sessions).
//! - [`crate::libs::memory::InMemoryTaskStore`] keeps everything in process
//!   and is what the controller tests run against.
//!
//! Every operation is asynchronous and maps to a single commit. A failed
//! operation leaves the stored tasks exactly as they were.

use super::task::{Task, TaskId, TaskSortOrder};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// Caller-supplied data breaks a store invariant.
    #[error("Invalid task data: {0}")]
    InvalidData(String),
    #[error("Task not found: {0}")]
    NotFound(TaskId),
    #[error("Failed to save or retrieve data: {0}")]
    Persistence(String),
    /// A batch operation received structurally invalid input.
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Persistence(err.to_string())
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        StoreError::Persistence(format!("storage worker stopped: {}", err))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

pub(crate) const EMPTY_TITLE: &str = "Title must not be empty";

#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Creates an active task appended after the current active tasks.
    ///
    /// Fails with [`StoreError::InvalidData`] when the title is blank.
    async fn create(&self, title: &str, notes: Option<String>, due_date: Option<DateTime<Utc>>) -> StoreResult<Task>;

    /// Overwrites title, notes, due date, completion and order of the stored
    /// task with the same id and refreshes `updated_at`.
    async fn update(&self, task: &Task) -> StoreResult<()>;

    async fn delete(&self, task: &Task) -> StoreResult<()>;

    /// Active tasks, ascending by `order`.
    async fn fetch_active(&self) -> StoreResult<Vec<Task>>;

    /// Completed tasks, ascending by `order`.
    async fn fetch_archived(&self) -> StoreResult<Vec<Task>>;

    /// All tasks under the given sort order.
    async fn fetch_sorted(&self, sort: TaskSortOrder) -> StoreResult<Vec<Task>>;

    async fn mark_complete(&self, task: &Task) -> StoreResult<Task>;

    async fn mark_active(&self, task: &Task) -> StoreResult<Task>;

    /// Sets each task's `order` to its index in `tasks`.
    ///
    /// All or nothing: an unknown id fails with [`StoreError::NotFound`] for
    /// the first one encountered, a repeated id with
    /// [`StoreError::Validation`], and in both cases nothing is written.
    async fn reorder(&self, tasks: &[Task]) -> StoreResult<()>;

    /// Deletes every completed task and returns how many were removed.
    async fn delete_all_completed(&self) -> StoreResult<usize>;

    async fn get_active_count(&self) -> StoreResult<usize>;

    async fn get_archived_count(&self) -> StoreResult<usize>;

    /// The task to work on now: the lowest-order active task.
    async fn fetch_next_focus(&self) -> StoreResult<Option<Task>> {
        Ok(self.fetch_active().await?.into_iter().next())
    }

    async fn create_simple(&self, title: &str) -> StoreResult<Task> {
        self.create(title, None, None).await
    }

    async fn has_active_tasks(&self) -> StoreResult<bool> {
        Ok(self.get_active_count().await? > 0)
    }

    async fn has_archived_tasks(&self) -> StoreResult<bool> {
        Ok(self.get_archived_count().await? > 0)
    }

    async fn get_total_count(&self) -> StoreResult<usize> {
        Ok(self.get_active_count().await? + self.get_archived_count().await?)
    }

    async fn find(&self, id: TaskId) -> StoreResult<Option<Task>> {
        let tasks = self.fetch_sorted(TaskSortOrder::ManualOrder).await?;
        Ok(tasks.into_iter().find(|task| task.id == id))
    }
}

/// Checks a reorder list for repeated ids before anything is written.
pub(crate) fn ensure_distinct(tasks: &[Task]) -> StoreResult<()> {
    let mut seen = std::collections::HashSet::with_capacity(tasks.len());
    for task in tasks {
        if !seen.insert(task.id) {
            return Err(StoreError::Validation(format!("task {} appears more than once", task.id)));
        }
    }
    Ok(())
}
