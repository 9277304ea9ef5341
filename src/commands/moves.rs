use super::ensure_ok;
use crate::{
    libs::{controller::TaskListController, messages::Message, selector::select_task},
    msg_bail_anyhow, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct MoveArgs {
    /// Position in the active list or id prefix
    task: String,

    /// New 1-based position; 1 makes it the focus task
    position: usize,
}

pub async fn cmd(args: MoveArgs, controller: &TaskListController) -> Result<()> {
    let snapshot = controller.snapshot();
    let task = select_task(&snapshot, &args.task)?;

    if task.is_completed {
        msg_bail_anyhow!(Message::TaskAlreadyCompleted(task.title));
    }
    let count = snapshot.active_tasks.len();
    if args.position == 0 || args.position > count {
        msg_bail_anyhow!(Message::TaskPositionOutOfRange(args.position, count));
    }

    controller.move_to(&task, args.position - 1).await;
    ensure_ok(controller)?;
    msg_success!(Message::TaskMoved(task.title, args.position));

    Ok(())
}
