//! Task list workflows and the published list state.
//!
//! `TaskListController` sits between the presentation layer and a
//! [`TaskStore`]. Every mutation goes to the store first and is followed by a
//! full reload, so the projection it publishes is always a fresh copy of what
//! the store holds. Operations never return store errors; the first failure
//! of an operation is recorded in [`TaskListSnapshot::last_error`].
//!
//! Public operations are serialized. Two workflows fired concurrently run
//! one after the other, and a reload always sees the store after the
//! previous workflow committed.
//!
//! ```rust,no_run
//! use focusbar::libs::controller::TaskListController;
//! use focusbar::libs::memory::InMemoryTaskStore;
//! use std::sync::Arc;
//!
//! # async fn demo() {
//! let controller = TaskListController::new(Arc::new(InMemoryTaskStore::new()));
//! controller.create("Write release notes", None, None).await;
//! assert_eq!(controller.focus_task().map(|t| t.title), Some("Write release notes".to_string()));
//! # }
//! ```

use super::store::{StoreError, StoreResult, TaskStore};
use super::task::{Task, TaskSortOrder};
use crate::msg_debug;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};

/// One consistent view of the task list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskListSnapshot {
    pub active_tasks: Vec<Task>,
    pub archived_tasks: Vec<Task>,
    pub focus_task: Option<Task>,
    pub last_error: Option<StoreError>,
}

pub struct TaskListController {
    store: Arc<dyn TaskStore>,
    serial: Mutex<()>,
    state: watch::Sender<TaskListSnapshot>,
}

impl TaskListController {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        let (state, _) = watch::channel(TaskListSnapshot::default());
        Self {
            store,
            serial: Mutex::new(()),
            state,
        }
    }

    pub fn store(&self) -> &Arc<dyn TaskStore> {
        &self.store
    }

    /// Receives a new snapshot after every reload or recorded failure.
    pub fn subscribe(&self) -> watch::Receiver<TaskListSnapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> TaskListSnapshot {
        self.state.borrow().clone()
    }

    pub fn active_tasks(&self) -> Vec<Task> {
        self.state.borrow().active_tasks.clone()
    }

    pub fn archived_tasks(&self) -> Vec<Task> {
        self.state.borrow().archived_tasks.clone()
    }

    pub fn focus_task(&self) -> Option<Task> {
        self.state.borrow().focus_task.clone()
    }

    pub fn last_error(&self) -> Option<StoreError> {
        self.state.borrow().last_error.clone()
    }

    /// Replaces the whole projection with the store's current contents.
    ///
    /// On failure the lists and the focus task are cleared so nothing stale
    /// is shown next to the error.
    pub async fn reload(&self) {
        let _serial = self.serial.lock().await;
        self.reload_locked().await;
    }

    /// Rewrites the order of active tasks by due date (undated last) and
    /// persists it.
    pub async fn auto_sort_by_due_date(&self) {
        self.mutate(async {
            let mut active = self.store.fetch_active().await?;
            TaskSortOrder::DueDate { ascending: true }.sort(&mut active);
            for (index, task) in active.iter_mut().enumerate() {
                task.order = index as i32;
            }
            self.store.reorder(&active).await
        })
        .await;
    }

    /// Persists `new_order` as the manual order.
    pub async fn reorder(&self, new_order: &[Task]) {
        self.mutate(self.store.reorder(new_order)).await;
    }

    /// Archives a task; the focus moves on to the next active task.
    pub async fn complete(&self, task: &Task) {
        self.mutate(self.store.mark_complete(task)).await;
    }

    pub async fn reactivate(&self, task: &Task) {
        self.mutate(self.store.mark_active(task)).await;
    }

    pub async fn create(&self, title: &str, notes: Option<String>, due_date: Option<DateTime<Utc>>) -> Option<Task> {
        self.mutate(self.store.create(title, notes, due_date)).await
    }

    pub async fn update(&self, task: &Task) {
        self.mutate(self.store.update(task)).await;
    }

    pub async fn delete(&self, task: &Task) {
        self.mutate(self.store.delete(task)).await;
    }

    /// Deletes every archived task and returns how many went.
    pub async fn clear_completed(&self) -> Option<usize> {
        self.mutate(self.store.delete_all_completed()).await
    }

    /// Moves an active task to `position` (zero-based, clamped to the end of
    /// the list) and renumbers the active tasks around it.
    pub async fn move_to(&self, task: &Task, position: usize) {
        self.mutate(async {
            let mut active = self.store.fetch_active().await?;
            let from = active
                .iter()
                .position(|t| t.id == task.id)
                .ok_or(StoreError::NotFound(task.id))?;
            let moved = active.remove(from);
            active.insert(position.min(active.len()), moved);
            self.store.reorder(&active).await
        })
        .await;
    }

    async fn mutate<T, F>(&self, op: F) -> Option<T>
    where
        F: Future<Output = StoreResult<T>>,
    {
        let _serial = self.serial.lock().await;
        match op.await {
            Ok(value) => {
                self.reload_locked().await;
                Some(value)
            }
            Err(err) => {
                msg_debug!(format!("Task list operation failed: {}", err));
                self.state.send_modify(|state| state.last_error = Some(err));
                None
            }
        }
    }

    async fn reload_locked(&self) {
        match self.load().await {
            Ok((active_tasks, archived_tasks)) => {
                let focus_task = active_tasks.first().cloned();
                self.state.send_replace(TaskListSnapshot {
                    active_tasks,
                    archived_tasks,
                    focus_task,
                    last_error: None,
                });
            }
            Err(err) => {
                msg_debug!(format!("Task list reload failed: {}", err));
                self.state.send_replace(TaskListSnapshot {
                    last_error: Some(err),
                    ..TaskListSnapshot::default()
                });
            }
        }
    }

    async fn load(&self) -> StoreResult<(Vec<Task>, Vec<Task>)> {
        let mut active = self.store.fetch_active().await?;
        let mut archived = self.store.fetch_archived().await?;
        TaskSortOrder::ManualOrder.sort(&mut active);
        TaskSortOrder::ManualOrder.sort(&mut archived);
        Ok((active, archived))
    }
}
