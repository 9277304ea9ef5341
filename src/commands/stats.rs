use crate::{
    libs::{controller::TaskListController, messages::Message},
    msg_info, msg_print,
};
use anyhow::Result;

pub async fn cmd(controller: &TaskListController) -> Result<()> {
    let store = controller.store();
    let active = store.get_active_count().await?;
    let archived = store.get_archived_count().await?;

    msg_print!(Message::Stats(active, archived));
    if let Some(task) = store.fetch_next_focus().await? {
        msg_info!(Message::FocusNow(task.title));
    }

    Ok(())
}
