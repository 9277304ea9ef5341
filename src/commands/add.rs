use super::ensure_ok;
use crate::{
    libs::{controller::TaskListController, formatter::parse_due, messages::Message},
    msg_bail_anyhow, msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Task title; several words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    title: Vec<String>,

    #[arg(short, long)]
    notes: Option<String>,

    /// YYYY-MM-DD, "YYYY-MM-DD HH:MM" or +N(m|h|d|w)
    #[arg(short, long)]
    due: Option<String>,
}

pub async fn cmd(args: AddArgs, controller: &TaskListController) -> Result<()> {
    let title = args.title.join(" ").trim().to_string();
    if title.is_empty() {
        msg_bail_anyhow!(Message::EmptyTitle);
    }

    let due_date = args.due.as_deref().map(parse_due).transpose()?;
    let notes = args.notes.filter(|notes| !notes.trim().is_empty());

    let created = controller.create(&title, notes, due_date).await;
    ensure_ok(controller)?;

    if let Some(task) = created {
        msg_success!(Message::TaskCreated(task.title));
    }
    if let Some(focus) = controller.focus_task() {
        msg_info!(Message::FocusNow(focus.title));
    }

    Ok(())
}
