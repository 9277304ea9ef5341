use crate::{
    libs::{controller::TaskListController, formatter::format_timestamp, messages::Message},
    msg_info, msg_print,
};
use anyhow::Result;

pub async fn cmd(controller: &TaskListController) -> Result<()> {
    match controller.focus_task() {
        Some(task) => {
            msg_print!(Message::FocusNow(task.title.clone()));
            if let Some(due) = task.due_date.as_ref() {
                println!("  due {}", format_timestamp(due));
            }
            if let Some(notes) = task.notes.as_deref() {
                println!("  {}", notes);
            }
        }
        None => msg_info!(Message::NoFocusTask),
    }

    Ok(())
}
