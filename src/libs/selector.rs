//! Resolves task references typed on the command line.
//!
//! A plain number is a 1-based position in the active list as `list` shows
//! it. Anything else, including a number past the end of the list, is
//! matched as a prefix of the task id (the `ID` column shows the first eight
//! digits) across active and completed tasks.

use super::controller::TaskListSnapshot;
use super::messages::Message;
use super::task::Task;
use crate::msg_error_anyhow;
use anyhow::Result;

pub fn select_task(snapshot: &TaskListSnapshot, reference: &str) -> Result<Task> {
    let reference = reference.trim();

    let position = reference.parse::<usize>().ok();
    if let Some(task) = position
        .and_then(|position| position.checked_sub(1))
        .and_then(|index| snapshot.active_tasks.get(index))
    {
        return Ok(task.clone());
    }

    let prefix = reference.to_lowercase().replace('-', "");
    if prefix.is_empty() {
        return Err(msg_error_anyhow!(Message::TaskNotFoundRef(reference.to_string())));
    }

    let matches: Vec<&Task> = snapshot
        .active_tasks
        .iter()
        .chain(snapshot.archived_tasks.iter())
        .filter(|task| task.id.to_string().replace('-', "").starts_with(&prefix))
        .collect();

    match matches.as_slice() {
        [task] => Ok((*task).clone()),
        [] => match position {
            Some(position) => Err(msg_error_anyhow!(Message::TaskPositionOutOfRange(
                position,
                snapshot.active_tasks.len()
            ))),
            None => Err(msg_error_anyhow!(Message::TaskNotFoundRef(reference.to_string()))),
        },
        many => Err(msg_error_anyhow!(Message::AmbiguousTaskRef(reference.to_string(), many.len()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_with_id(title: &str, id: &str, order: i32) -> Task {
        let mut task = Task::new(title, None, None, order);
        task.id = id.parse().unwrap();
        task
    }

    fn snapshot() -> TaskListSnapshot {
        let active = vec![
            task_with_id("First", "a1b2c3d4-0000-4000-8000-000000000001", 0),
            task_with_id("Second", "a1b2ffff-0000-4000-8000-000000000002", 1),
        ];
        let mut done = task_with_id("Done", "c0ffee00-0000-4000-8000-000000000003", 0);
        done.is_completed = true;
        TaskListSnapshot {
            focus_task: active.first().cloned(),
            active_tasks: active,
            archived_tasks: vec![done],
            last_error: None,
        }
    }

    #[test]
    fn test_select_by_position() {
        let snapshot = snapshot();
        assert_eq!(select_task(&snapshot, "2").unwrap().title, "Second");
        assert!(select_task(&snapshot, "0").is_err());
        assert!(select_task(&snapshot, "3").is_err());
    }

    #[test]
    fn test_select_by_id_prefix_includes_archived() {
        let snapshot = snapshot();
        let done = &snapshot.archived_tasks[0];
        let found = select_task(&snapshot, &done.id.short()).unwrap();
        assert_eq!(found.id, done.id);

        let full = select_task(&snapshot, &done.id.to_string().to_uppercase()).unwrap();
        assert_eq!(full.id, done.id);
    }

    #[test]
    fn test_numeric_id_prefix_past_the_list_selects_by_id() {
        let mut snapshot = snapshot();
        let mut done = task_with_id("Numeric id", "12345678-9abc-4def-8123-456789abcdef", 1);
        done.is_completed = true;
        snapshot.archived_tasks.push(done.clone());

        let found = select_task(&snapshot, "12345678").unwrap();
        assert_eq!(found.id, done.id);
    }

    #[test]
    fn test_out_of_range_position_without_id_match_fails() {
        let snapshot = snapshot();
        let err = select_task(&snapshot, "99999999").unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_unknown_reference_fails() {
        let snapshot = snapshot();
        assert!(select_task(&snapshot, "zzzz").is_err());
        assert!(select_task(&snapshot, "a1b2").is_err());
        assert!(select_task(&snapshot, "   ").is_err());
    }
}
