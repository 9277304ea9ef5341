use super::ensure_ok;
use crate::{
    libs::{controller::TaskListController, messages::Message, selector::select_task},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Position in the active list or id prefix
    task: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub async fn cmd(args: DeleteArgs, controller: &TaskListController) -> Result<()> {
    let task = select_task(&controller.snapshot(), &args.task)?;

    let confirmed = args.yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteTask(task.title.clone()).to_string())
            .default(false)
            .interact()?;

    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    controller.delete(&task).await;
    ensure_ok(controller)?;
    msg_success!(Message::TaskDeleted(task.title));

    Ok(())
}
