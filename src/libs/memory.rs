//! In-process task store.
//!
//! Holds tasks in insertion order behind a mutex. Used for tests and for
//! sessions that should leave nothing on disk. `set_failing` makes every
//! operation fail with a persistence error, which is how the controller's
//! error handling is exercised.

use super::store::{ensure_distinct, StoreError, StoreResult, TaskStore, EMPTY_TITLE};
use super::task::{self, is_valid_title, Task, TaskSortOrder};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

#[derive(Default)]
struct State {
    tasks: Vec<Task>,
    failing: bool,
}

#[derive(Default)]
pub struct InMemoryTaskStore {
    state: Mutex<State>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with existing tasks, kept exactly as given.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            state: Mutex::new(State { tasks, failing: false }),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.state.lock().failing = failing;
    }

    fn guard(state: &State) -> StoreResult<()> {
        if state.failing {
            return Err(StoreError::Persistence("in-memory store is set to fail".to_string()));
        }
        Ok(())
    }

    fn partition(&self, completed: bool) -> StoreResult<Vec<Task>> {
        let state = self.state.lock();
        Self::guard(&state)?;
        let mut tasks: Vec<Task> = state.tasks.iter().filter(|t| t.is_completed == completed).cloned().collect();
        TaskSortOrder::ManualOrder.sort(&mut tasks);
        Ok(tasks)
    }

    fn set_completed(&self, target: &Task, completed: bool) -> StoreResult<Task> {
        let mut state = self.state.lock();
        Self::guard(&state)?;
        let stored = state.tasks.iter_mut().find(|t| t.id == target.id).ok_or(StoreError::NotFound(target.id))?;
        stored.is_completed = completed;
        stored.updated_at = task::now();
        Ok(stored.clone())
    }

    fn count(&self, completed: bool) -> StoreResult<usize> {
        let state = self.state.lock();
        Self::guard(&state)?;
        Ok(state.tasks.iter().filter(|t| t.is_completed == completed).count())
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn create(&self, title: &str, notes: Option<String>, due_date: Option<DateTime<Utc>>) -> StoreResult<Task> {
        if !is_valid_title(title) {
            return Err(StoreError::InvalidData(EMPTY_TITLE.to_string()));
        }
        let mut state = self.state.lock();
        Self::guard(&state)?;
        let order = state.tasks.iter().filter(|t| !t.is_completed).map(|t| t.order + 1).max().unwrap_or(0);
        let created = Task::new(title, notes, due_date, order);
        state.tasks.push(created.clone());
        Ok(created)
    }

    async fn update(&self, task: &Task) -> StoreResult<()> {
        if !is_valid_title(&task.title) {
            return Err(StoreError::InvalidData(EMPTY_TITLE.to_string()));
        }
        let mut state = self.state.lock();
        Self::guard(&state)?;
        let stored = state.tasks.iter_mut().find(|t| t.id == task.id).ok_or(StoreError::NotFound(task.id))?;
        stored.title = task.title.clone();
        stored.notes = task.notes.clone();
        stored.due_date = task.due_date.map(task::normalize);
        stored.is_completed = task.is_completed;
        stored.order = task.order;
        stored.updated_at = task::now();
        Ok(())
    }

    async fn delete(&self, task: &Task) -> StoreResult<()> {
        let mut state = self.state.lock();
        Self::guard(&state)?;
        let index = state.tasks.iter().position(|t| t.id == task.id).ok_or(StoreError::NotFound(task.id))?;
        state.tasks.remove(index);
        Ok(())
    }

    async fn fetch_active(&self) -> StoreResult<Vec<Task>> {
        self.partition(false)
    }

    async fn fetch_archived(&self) -> StoreResult<Vec<Task>> {
        self.partition(true)
    }

    async fn fetch_sorted(&self, sort: TaskSortOrder) -> StoreResult<Vec<Task>> {
        let state = self.state.lock();
        Self::guard(&state)?;
        let mut tasks = state.tasks.clone();
        sort.sort(&mut tasks);
        Ok(tasks)
    }

    async fn mark_complete(&self, task: &Task) -> StoreResult<Task> {
        self.set_completed(task, true)
    }

    async fn mark_active(&self, task: &Task) -> StoreResult<Task> {
        self.set_completed(task, false)
    }

    async fn reorder(&self, tasks: &[Task]) -> StoreResult<()> {
        let mut state = self.state.lock();
        Self::guard(&state)?;
        ensure_distinct(tasks)?;

        // Resolve every member first so a miss leaves the store untouched
        let mut positions = Vec::with_capacity(tasks.len());
        for wanted in tasks {
            let position = state.tasks.iter().position(|t| t.id == wanted.id).ok_or(StoreError::NotFound(wanted.id))?;
            positions.push(position);
        }

        let now = task::now();
        for (index, position) in positions.into_iter().enumerate() {
            let stored = &mut state.tasks[position];
            stored.order = index as i32;
            stored.updated_at = now;
        }
        Ok(())
    }

    async fn delete_all_completed(&self) -> StoreResult<usize> {
        let mut state = self.state.lock();
        Self::guard(&state)?;
        let before = state.tasks.len();
        state.tasks.retain(|t| !t.is_completed);
        Ok(before - state.tasks.len())
    }

    async fn get_active_count(&self) -> StoreResult<usize> {
        self.count(false)
    }

    async fn get_archived_count(&self) -> StoreResult<usize> {
        self.count(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_failing_store_rejects_every_operation() {
        let store = InMemoryTaskStore::new();
        let task = store.create_simple("Write report").await.unwrap();

        store.set_failing(true);
        assert!(matches!(store.fetch_active().await, Err(StoreError::Persistence(_))));
        assert!(matches!(store.mark_complete(&task).await, Err(StoreError::Persistence(_))));
        assert!(matches!(store.get_active_count().await, Err(StoreError::Persistence(_))));

        store.set_failing(false);
        assert_eq!(store.get_active_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_seeded_tasks_keep_their_order_values() {
        let a = Task::new("A", None, None, 5);
        let b = Task::new("B", None, None, 2);
        let store = InMemoryTaskStore::with_tasks(vec![a, b]);

        let titles: Vec<String> = store.fetch_active().await.unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["B", "A"]);

        let created = store.create_simple("C").await.unwrap();
        assert_eq!(created.order, 6);
    }
}
