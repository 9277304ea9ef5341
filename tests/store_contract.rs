//! Behaviour every `TaskStore` implementation must share. Each check runs
//! against the SQLite store (backed by a temporary file) and the in-memory
//! store.

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use focusbar::db::{db::Db, tasks::SqliteTaskStore};
    use focusbar::libs::memory::InMemoryTaskStore;
    use focusbar::libs::store::{StoreError, TaskStore};
    use focusbar::libs::task::{Task, TaskSortOrder};
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};

    struct SqliteContext {
        _temp_dir: TempDir,
        store: SqliteTaskStore,
    }

    impl AsyncTestContext for SqliteContext {
        async fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("tasks.db")).unwrap();
            SqliteContext {
                store: SqliteTaskStore::new(db),
                _temp_dir: temp_dir,
            }
        }
    }

    fn titles(tasks: &[Task]) -> Vec<String> {
        tasks.iter().map(|t| t.title.clone()).collect()
    }

    fn orders(tasks: &[Task]) -> Vec<i32> {
        tasks.iter().map(|t| t.order).collect()
    }

    async fn blank_titles_are_rejected(store: &dyn TaskStore) {
        for title in ["", "   ", "\t\n"] {
            let result = store.create(title, None, None).await;
            assert!(matches!(result, Err(StoreError::InvalidData(_))), "title {:?}", title);
        }
        assert_eq!(store.get_total_count().await.unwrap(), 0);
    }

    async fn created_task_round_trips(store: &dyn TaskStore) {
        let due = Utc::now() + Duration::hours(3);
        let created = store
            .create("Write report", Some("Q3 numbers".to_string()), Some(due))
            .await
            .unwrap();

        let fetched = store.fetch_active().await.unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0], created);
        assert_eq!(fetched[0].title, "Write report");
        assert_eq!(fetched[0].notes.as_deref(), Some("Q3 numbers"));
        assert_eq!(fetched[0].due_date.unwrap().timestamp_micros(), due.timestamp_micros());
        assert!(!fetched[0].is_completed);
        assert_eq!(store.find(created.id).await.unwrap(), Some(created));
    }

    async fn tasks_live_in_exactly_one_partition(store: &dyn TaskStore) {
        let a = store.create_simple("A").await.unwrap();
        let b = store.create_simple("B").await.unwrap();
        store.mark_complete(&a).await.unwrap();

        let active = store.fetch_active().await.unwrap();
        let archived = store.fetch_archived().await.unwrap();
        assert_eq!(titles(&active), vec!["B"]);
        assert_eq!(titles(&archived), vec!["A"]);
        assert!(archived.iter().all(|t| t.is_completed));

        store.mark_active(&a).await.unwrap();
        store.mark_complete(&b).await.unwrap();
        let active = store.fetch_active().await.unwrap();
        let archived = store.fetch_archived().await.unwrap();
        assert_eq!(titles(&active), vec!["A"]);
        assert_eq!(titles(&archived), vec!["B"]);
    }

    async fn focus_is_lowest_order_active_task(store: &dyn TaskStore) {
        assert_eq!(store.fetch_next_focus().await.unwrap(), None);

        let first = store.create_simple("First").await.unwrap();
        let second = store.create_simple("Second").await.unwrap();
        assert_eq!(store.fetch_next_focus().await.unwrap().map(|t| t.id), Some(first.id));

        store.reorder(&[second.clone(), first.clone()]).await.unwrap();
        assert_eq!(store.fetch_next_focus().await.unwrap().map(|t| t.id), Some(second.id));

        store.mark_complete(&second).await.unwrap();
        assert_eq!(store.fetch_next_focus().await.unwrap().map(|t| t.id), Some(first.id));
    }

    async fn reorder_is_idempotent(store: &dyn TaskStore) {
        let t1 = store.create_simple("T1").await.unwrap();
        let t2 = store.create_simple("T2").await.unwrap();
        let t3 = store.create_simple("T3").await.unwrap();
        let order = [t3, t1, t2];

        store.reorder(&order).await.unwrap();
        let once = store.fetch_sorted(TaskSortOrder::ManualOrder).await.unwrap();
        store.reorder(&order).await.unwrap();
        let twice = store.fetch_sorted(TaskSortOrder::ManualOrder).await.unwrap();

        assert_eq!(titles(&once), titles(&twice));
        assert_eq!(orders(&once), orders(&twice));
    }

    async fn unknown_ids_are_not_found(store: &dyn TaskStore) {
        let ghost = Task::new("Ghost", None, None, 0);

        assert_eq!(store.update(&ghost).await, Err(StoreError::NotFound(ghost.id)));
        assert_eq!(store.delete(&ghost).await, Err(StoreError::NotFound(ghost.id)));
        assert_eq!(store.mark_complete(&ghost).await, Err(StoreError::NotFound(ghost.id)));
        assert_eq!(store.mark_active(&ghost).await, Err(StoreError::NotFound(ghost.id)));
        assert_eq!(store.find(ghost.id).await.unwrap(), None);
    }

    async fn due_date_sort_puts_soonest_first(store: &dyn TaskStore) {
        let now = Utc::now();
        store.create("T1", None, Some(now + Duration::hours(2))).await.unwrap();
        store.create("T2", None, Some(now)).await.unwrap();
        store.create("T3", None, Some(now + Duration::hours(1))).await.unwrap();

        let sorted = store.fetch_sorted(TaskSortOrder::DueDate { ascending: true }).await.unwrap();
        assert_eq!(titles(&sorted), vec!["T2", "T3", "T1"]);
    }

    async fn undated_tasks_sort_last_both_ways(store: &dyn TaskStore) {
        let now = Utc::now();
        store.create_simple("Someday").await.unwrap();
        store.create("Soon", None, Some(now + Duration::hours(1))).await.unwrap();
        store.create("Later", None, Some(now + Duration::days(1))).await.unwrap();

        let ascending = store.fetch_sorted(TaskSortOrder::DueDate { ascending: true }).await.unwrap();
        assert_eq!(titles(&ascending), vec!["Soon", "Later", "Someday"]);

        let descending = store.fetch_sorted(TaskSortOrder::DueDate { ascending: false }).await.unwrap();
        assert_eq!(titles(&descending), vec!["Later", "Soon", "Someday"]);
    }

    async fn title_sort_orders_alphabetically(store: &dyn TaskStore) {
        for title in ["banana", "apple", "cherry"] {
            store.create_simple(title).await.unwrap();
        }

        let ascending = store.fetch_sorted(TaskSortOrder::Title { ascending: true }).await.unwrap();
        assert_eq!(titles(&ascending), vec!["apple", "banana", "cherry"]);

        let descending = store.fetch_sorted(TaskSortOrder::Title { ascending: false }).await.unwrap();
        assert_eq!(titles(&descending), vec!["cherry", "banana", "apple"]);
    }

    async fn created_date_sort_both_directions(store: &dyn TaskStore) {
        for title in ["Oldest", "Middle", "Newest"] {
            store.create_simple(title).await.unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let ascending = store.fetch_sorted(TaskSortOrder::CreatedDate { ascending: true }).await.unwrap();
        assert_eq!(titles(&ascending), vec!["Oldest", "Middle", "Newest"]);

        let descending = store.fetch_sorted(TaskSortOrder::CreatedDate { ascending: false }).await.unwrap();
        assert_eq!(titles(&descending), vec!["Newest", "Middle", "Oldest"]);
    }

    async fn reorder_assigns_positions(store: &dyn TaskStore) {
        let t1 = store.create_simple("T1").await.unwrap();
        let t2 = store.create_simple("T2").await.unwrap();
        let t3 = store.create_simple("T3").await.unwrap();
        assert_eq!(vec![t1.order, t2.order, t3.order], vec![0, 1, 2]);

        store.reorder(&[t3, t1, t2]).await.unwrap();

        let sorted = store.fetch_sorted(TaskSortOrder::ManualOrder).await.unwrap();
        assert_eq!(titles(&sorted), vec!["T3", "T1", "T2"]);
        assert_eq!(orders(&sorted), vec![0, 1, 2]);
    }

    async fn reorder_is_all_or_nothing(store: &dyn TaskStore) {
        let t1 = store.create_simple("T1").await.unwrap();
        let t2 = store.create_simple("T2").await.unwrap();
        let ghost = Task::new("Ghost", None, None, 0);

        let result = store.reorder(&[t2.clone(), ghost.clone(), t1.clone()]).await;
        assert_eq!(result, Err(StoreError::NotFound(ghost.id)));

        let duplicate = store.reorder(&[t2.clone(), t2.clone(), t1.clone()]).await;
        assert!(matches!(duplicate, Err(StoreError::Validation(_))));

        let untouched = store.fetch_sorted(TaskSortOrder::ManualOrder).await.unwrap();
        assert_eq!(titles(&untouched), vec!["T1", "T2"]);
        assert_eq!(orders(&untouched), vec![0, 1]);

        store.reorder(&[]).await.unwrap();
        assert_eq!(orders(&store.fetch_active().await.unwrap()), vec![0, 1]);
    }

    async fn update_overwrites_fields(store: &dyn TaskStore) {
        let original = store.create_simple("Draft").await.unwrap();

        let mut edited = original.clone();
        edited.title = "Final".to_string();
        edited.notes = Some("ship it".to_string());
        edited.due_date = Some(Utc::now() + Duration::days(2));
        store.update(&edited).await.unwrap();

        let stored = store.find(original.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Final");
        assert_eq!(stored.notes.as_deref(), Some("ship it"));
        assert!(stored.due_date.is_some());
        assert_eq!(stored.created_at, original.created_at);
        assert!(stored.updated_at >= original.updated_at);
    }

    async fn update_rejects_blank_title(store: &dyn TaskStore) {
        let original = store.create_simple("Keep").await.unwrap();
        let mut blank = original.clone();
        blank.title = "  ".to_string();

        assert!(matches!(store.update(&blank).await, Err(StoreError::InvalidData(_))));
        assert_eq!(store.find(original.id).await.unwrap().unwrap().title, "Keep");
    }

    async fn clearing_completed_removes_only_archived(store: &dyn TaskStore) {
        let done = store.create_simple("Done").await.unwrap();
        store.create_simple("Open").await.unwrap();
        store.mark_complete(&done).await.unwrap();

        assert_eq!(store.delete_all_completed().await.unwrap(), 1);
        assert!(store.fetch_archived().await.unwrap().is_empty());
        assert_eq!(titles(&store.fetch_active().await.unwrap()), vec!["Open"]);
        assert_eq!(store.delete_all_completed().await.unwrap(), 0);
    }

    async fn counts_sum_to_total(store: &dyn TaskStore) {
        let check = move || async move {
            let active = store.get_active_count().await.unwrap();
            let archived = store.get_archived_count().await.unwrap();
            let all = store.fetch_sorted(TaskSortOrder::ManualOrder).await.unwrap().len();
            assert_eq!(active + archived, all);
            assert_eq!(store.get_total_count().await.unwrap(), all);
        };

        check().await;
        let a = store.create_simple("A").await.unwrap();
        let b = store.create_simple("B").await.unwrap();
        check().await;
        store.mark_complete(&a).await.unwrap();
        check().await;
        assert!(store.has_active_tasks().await.unwrap());
        assert!(store.has_archived_tasks().await.unwrap());
        store.delete(&b).await.unwrap();
        check().await;
        assert!(!store.has_active_tasks().await.unwrap());
    }

    async fn create_appends_after_active_tasks(store: &dyn TaskStore) {
        let a = store.create_simple("A").await.unwrap();
        let b = store.create_simple("B").await.unwrap();
        store.reorder(&[b.clone(), a.clone()]).await.unwrap();
        store.mark_complete(&a).await.unwrap();

        let c = store.create_simple("C").await.unwrap();
        assert_eq!(c.order, 1);
        assert_eq!(titles(&store.fetch_active().await.unwrap()), vec!["B", "C"]);
    }

    macro_rules! store_contract {
        ($($check:ident),* $(,)?) => {
            mod sqlite {
                use super::*;
                $(
                    #[test_context(SqliteContext)]
                    #[tokio::test]
                    async fn $check(ctx: &mut SqliteContext) {
                        super::$check(&ctx.store).await;
                    }
                )*
            }

            mod memory {
                use super::*;
                $(
                    #[tokio::test]
                    async fn $check() {
                        super::$check(&InMemoryTaskStore::new()).await;
                    }
                )*
            }
        };
    }

    store_contract!(
        blank_titles_are_rejected,
        created_task_round_trips,
        tasks_live_in_exactly_one_partition,
        focus_is_lowest_order_active_task,
        reorder_is_idempotent,
        unknown_ids_are_not_found,
        due_date_sort_puts_soonest_first,
        undated_tasks_sort_last_both_ways,
        title_sort_orders_alphabetically,
        created_date_sort_both_directions,
        reorder_assigns_positions,
        reorder_is_all_or_nothing,
        update_overwrites_fields,
        update_rejects_blank_title,
        clearing_completed_removes_only_archived,
        counts_sum_to_total,
        create_appends_after_active_tasks,
    );
}
