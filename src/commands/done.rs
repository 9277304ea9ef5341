use super::ensure_ok;
use crate::{
    libs::{controller::TaskListController, messages::Message, selector::select_task},
    msg_bail_anyhow, msg_info, msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct DoneArgs {
    /// Position in the active list or id prefix; the focus task when omitted
    task: Option<String>,
}

pub async fn cmd(args: DoneArgs, controller: &TaskListController) -> Result<()> {
    let task = match args.task {
        Some(reference) => select_task(&controller.snapshot(), &reference)?,
        None => match controller.focus_task() {
            Some(task) => task,
            None => msg_bail_anyhow!(Message::NoFocusTask),
        },
    };

    if task.is_completed {
        msg_warning!(Message::TaskAlreadyCompleted(task.title));
        return Ok(());
    }

    controller.complete(&task).await;
    ensure_ok(controller)?;
    msg_success!(Message::TaskCompleted(task.title));

    match controller.focus_task() {
        Some(next) => msg_info!(Message::FocusNow(next.title)),
        None => msg_info!(Message::NoFocusTask),
    }

    Ok(())
}
