use super::ensure_ok;
use crate::{
    libs::{controller::TaskListController, messages::Message},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct CleanArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub async fn cmd(args: CleanArgs, controller: &TaskListController) -> Result<()> {
    let count = controller.archived_tasks().len();
    if count == 0 {
        msg_info!(Message::NoCompletedTasks);
        return Ok(());
    }

    let confirmed = args.yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmClearCompleted(count).to_string())
            .default(false)
            .interact()?;

    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    let deleted = controller.clear_completed().await;
    ensure_ok(controller)?;
    msg_success!(Message::TasksDeletedCount(deleted.unwrap_or_default()));

    Ok(())
}
