use super::ensure_ok;
use crate::{
    libs::{controller::TaskListController, messages::Message, view::View},
    msg_success,
};
use anyhow::Result;

pub async fn cmd(controller: &TaskListController) -> Result<()> {
    controller.auto_sort_by_due_date().await;
    ensure_ok(controller)?;
    msg_success!(Message::TasksSorted);

    let snapshot = controller.snapshot();
    if !snapshot.active_tasks.is_empty() {
        View::tasks(&snapshot.active_tasks, snapshot.focus_task.map(|t| t.id));
    }

    Ok(())
}
