use super::db::Db;
use crate::libs::store::{ensure_distinct, StoreError, StoreResult, TaskStore, EMPTY_TITLE};
use crate::libs::task::{self, is_valid_title, Task, TaskId, TaskSortOrder};
use crate::msg_debug;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::Arc;

const SELECT_TASKS: &str =
    "SELECT id, title, notes, due_date, is_completed, sort_order, created_at, updated_at FROM tasks";
const INSERT_TASK: &str = "INSERT INTO tasks (id, title, notes, due_date, is_completed, sort_order, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, FALSE, ?5, ?6, ?7)";
const UPDATE_TASK: &str = "UPDATE tasks
    SET title = ?2, notes = ?3, due_date = ?4, is_completed = ?5, sort_order = ?6, updated_at = ?7
    WHERE id = ?1";
const UPDATE_COMPLETED: &str = "UPDATE tasks SET is_completed = ?2, updated_at = ?3 WHERE id = ?1";
const UPDATE_ORDER: &str = "UPDATE tasks SET sort_order = ?2, updated_at = ?3 WHERE id = ?1";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";
const DELETE_COMPLETED: &str = "DELETE FROM tasks WHERE is_completed = TRUE";
const COUNT_BY_STATE: &str = "SELECT COUNT(*) FROM tasks WHERE is_completed = ?1";
const NEXT_ACTIVE_ORDER: &str = "SELECT COALESCE(MAX(sort_order) + 1, 0) FROM tasks WHERE is_completed = FALSE";
const WHERE_STATE: &str = "WHERE is_completed = ?1 ORDER BY sort_order ASC, rowid ASC";
const WHERE_ID: &str = "WHERE id = ?1";

/// SQLite-backed [`TaskStore`].
///
/// The connection sits behind a mutex and every operation runs on tokio's
/// blocking pool, so calls from any number of tasks are applied one at a
/// time and never stall the async workers.
#[derive(Clone)]
pub struct SqliteTaskStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteTaskStore {
    pub fn new(db: Db) -> Self {
        Self {
            conn: Arc::new(Mutex::new(db.conn)),
        }
    }

    /// A store over a fresh in-memory database.
    pub fn in_memory() -> anyhow::Result<Self> {
        Ok(Self::new(Db::open_in_memory()?))
    }

    async fn run<T, F>(&self, op: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> StoreResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut conn = conn.lock();
            op(&mut conn)
        })
        .await?
    }

    async fn partition(&self, completed: bool) -> StoreResult<Vec<Task>> {
        self.run(move |conn| {
            let mut stmt = conn.prepare(&format!("{} {}", SELECT_TASKS, WHERE_STATE))?;
            let task_iter = stmt.query_map(params![completed], task_from_row)?;
            let mut tasks = Vec::new();
            for task in task_iter {
                tasks.push(task?);
            }
            Ok(tasks)
        })
        .await
    }

    async fn set_completed(&self, target: &Task, completed: bool) -> StoreResult<Task> {
        let id = target.id;
        self.run(move |conn| {
            let tx = conn.transaction()?;
            let affected = tx.execute(UPDATE_COMPLETED, params![id.to_string(), completed, micros(task::now())])?;
            if affected == 0 {
                return Err(StoreError::NotFound(id));
            }
            let updated = tx.query_row(&format!("{} {}", SELECT_TASKS, WHERE_ID), params![id.to_string()], task_from_row)?;
            tx.commit()?;
            msg_debug!(format!("Task {} completed={}", id, completed));
            Ok(updated)
        })
        .await
    }

    async fn count(&self, completed: bool) -> StoreResult<usize> {
        self.run(move |conn| {
            let count: i64 = conn.query_row(COUNT_BY_STATE, params![completed], |row| row.get(0))?;
            Ok(count as usize)
        })
        .await
    }
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    async fn create(&self, title: &str, notes: Option<String>, due_date: Option<DateTime<Utc>>) -> StoreResult<Task> {
        if !is_valid_title(title) {
            return Err(StoreError::InvalidData(EMPTY_TITLE.to_string()));
        }
        let title = title.to_string();
        self.run(move |conn| {
            let tx = conn.transaction()?;
            let order: i32 = tx.query_row(NEXT_ACTIVE_ORDER, [], |row| row.get(0))?;
            let created = Task::new(&title, notes, due_date, order);
            tx.execute(
                INSERT_TASK,
                params![
                    created.id.to_string(),
                    created.title,
                    created.notes,
                    created.due_date.map(micros),
                    created.order,
                    micros(created.created_at),
                    micros(created.updated_at),
                ],
            )?;
            tx.commit()?;
            msg_debug!(format!("Task {} created at order {}", created.id, created.order));
            Ok(created)
        })
        .await
    }

    async fn update(&self, task: &Task) -> StoreResult<()> {
        if !is_valid_title(&task.title) {
            return Err(StoreError::InvalidData(EMPTY_TITLE.to_string()));
        }
        let task = task.clone();
        self.run(move |conn| {
            let affected = conn.execute(
                UPDATE_TASK,
                params![
                    task.id.to_string(),
                    task.title,
                    task.notes,
                    task.due_date.map(micros),
                    task.is_completed,
                    task.order,
                    micros(task::now()),
                ],
            )?;
            if affected == 0 {
                return Err(StoreError::NotFound(task.id));
            }
            msg_debug!(format!("Task {} updated", task.id));
            Ok(())
        })
        .await
    }

    async fn delete(&self, task: &Task) -> StoreResult<()> {
        let id = task.id;
        self.run(move |conn| {
            let affected = conn.execute(DELETE_TASK, params![id.to_string()])?;
            if affected == 0 {
                return Err(StoreError::NotFound(id));
            }
            msg_debug!(format!("Task {} deleted", id));
            Ok(())
        })
        .await
    }

    async fn fetch_active(&self) -> StoreResult<Vec<Task>> {
        self.partition(false).await
    }

    async fn fetch_archived(&self) -> StoreResult<Vec<Task>> {
        self.partition(true).await
    }

    async fn fetch_sorted(&self, sort: TaskSortOrder) -> StoreResult<Vec<Task>> {
        self.run(move |conn| {
            let mut stmt = conn.prepare(&format!("{} ORDER BY {}", SELECT_TASKS, order_by(sort)))?;
            let task_iter = stmt.query_map([], task_from_row)?;
            let mut tasks = Vec::new();
            for task in task_iter {
                tasks.push(task?);
            }
            Ok(tasks)
        })
        .await
    }

    async fn mark_complete(&self, task: &Task) -> StoreResult<Task> {
        self.set_completed(task, true).await
    }

    async fn mark_active(&self, task: &Task) -> StoreResult<Task> {
        self.set_completed(task, false).await
    }

    async fn reorder(&self, tasks: &[Task]) -> StoreResult<()> {
        ensure_distinct(tasks)?;
        let ids: Vec<TaskId> = tasks.iter().map(|t| t.id).collect();
        self.run(move |conn| {
            // Dropping the transaction on an early return rolls every write back
            let tx = conn.transaction()?;
            let now = micros(task::now());
            for (index, id) in ids.iter().enumerate() {
                let affected = tx.execute(UPDATE_ORDER, params![id.to_string(), index as i32, now])?;
                if affected == 0 {
                    return Err(StoreError::NotFound(*id));
                }
            }
            tx.commit()?;
            msg_debug!(format!("Reordered {} tasks", ids.len()));
            Ok(())
        })
        .await
    }

    async fn delete_all_completed(&self) -> StoreResult<usize> {
        self.run(|conn| {
            let deleted = conn.execute(DELETE_COMPLETED, [])?;
            msg_debug!(format!("Deleted {} completed tasks", deleted));
            Ok(deleted)
        })
        .await
    }

    async fn get_active_count(&self) -> StoreResult<usize> {
        self.count(false).await
    }

    async fn get_archived_count(&self) -> StoreResult<usize> {
        self.count(true).await
    }

    async fn find(&self, id: TaskId) -> StoreResult<Option<Task>> {
        self.run(move |conn| {
            let task = conn
                .query_row(&format!("{} {}", SELECT_TASKS, WHERE_ID), params![id.to_string()], task_from_row)
                .optional()?;
            Ok(task)
        })
        .await
    }
}

/// `ORDER BY` clause matching [`TaskSortOrder::compare`], with insertion
/// order as the final tie-breaker.
fn order_by(sort: TaskSortOrder) -> &'static str {
    match sort {
        TaskSortOrder::DueDate { ascending: true } => "due_date IS NULL, due_date ASC, sort_order ASC, rowid ASC",
        TaskSortOrder::DueDate { ascending: false } => "due_date IS NULL, due_date DESC, sort_order ASC, rowid ASC",
        TaskSortOrder::CreatedDate { ascending: true } => "created_at ASC, rowid ASC",
        TaskSortOrder::CreatedDate { ascending: false } => "created_at DESC, rowid ASC",
        TaskSortOrder::Title { ascending: true } => "title ASC, rowid ASC",
        TaskSortOrder::Title { ascending: false } => "title DESC, rowid ASC",
        TaskSortOrder::ManualOrder => "sort_order ASC, rowid ASC",
    }
}

fn micros(at: DateTime<Utc>) -> i64 {
    at.timestamp_micros()
}

fn from_micros(column: usize, value: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp_micros(value).ok_or(rusqlite::Error::IntegralValueOutOfRange(column, value))
}

fn task_from_row(row: &Row) -> rusqlite::Result<Task> {
    let id: String = row.get(0)?;
    let id = id
        .parse::<TaskId>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;
    let due_date = match row.get::<_, Option<i64>>(3)? {
        Some(value) => Some(from_micros(3, value)?),
        None => None,
    };

    Ok(Task {
        id,
        title: row.get(1)?,
        notes: row.get(2)?,
        due_date,
        is_completed: row.get(4)?,
        order: row.get(5)?,
        created_at: from_micros(6, row.get(6)?)?,
        updated_at: from_micros(7, row.get(7)?)?,
    })
}
