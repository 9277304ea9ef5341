use super::ensure_ok;
use crate::{
    libs::{controller::TaskListController, messages::Message, selector::select_task},
    msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct UndoArgs {
    /// Id prefix of a completed task
    task: String,
}

pub async fn cmd(args: UndoArgs, controller: &TaskListController) -> Result<()> {
    let task = select_task(&controller.snapshot(), &args.task)?;
    if !task.is_completed {
        msg_warning!(Message::TaskNotCompleted(task.title));
        return Ok(());
    }

    controller.reactivate(&task).await;
    ensure_ok(controller)?;
    msg_success!(Message::TaskReactivated(task.title));

    Ok(())
}
