use super::ensure_ok;
use crate::{
    libs::{controller::TaskListController, messages::Message, task::TaskSortOrder, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use clap::{Args, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortKey {
    Manual,
    Due,
    Created,
    Title,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Show completed tasks instead of active ones
    #[arg(short, long, conflicts_with = "all")]
    archived: bool,

    /// Show active and completed tasks together
    #[arg(long)]
    all: bool,

    /// Sort order for --all
    #[arg(short, long, value_enum, default_value_t = SortKey::Manual)]
    sort: SortKey,

    #[arg(long)]
    desc: bool,
}

impl ListArgs {
    fn sort_order(&self) -> TaskSortOrder {
        let ascending = !self.desc;
        match self.sort {
            SortKey::Manual => TaskSortOrder::ManualOrder,
            SortKey::Due => TaskSortOrder::DueDate { ascending },
            SortKey::Created => TaskSortOrder::CreatedDate { ascending },
            SortKey::Title => TaskSortOrder::Title { ascending },
        }
    }
}

pub async fn cmd(args: ListArgs, controller: &TaskListController) -> Result<()> {
    if args.all {
        let tasks = controller.store().fetch_sorted(args.sort_order()).await?;
        if tasks.is_empty() {
            msg_info!(Message::NoActiveTasks);
            return Ok(());
        }
        msg_print!(Message::AllTasksHeader, true);
        View::tasks(&tasks, controller.focus_task().map(|t| t.id));
        return Ok(());
    }

    ensure_ok(controller)?;
    let snapshot = controller.snapshot();

    if args.archived {
        if snapshot.archived_tasks.is_empty() {
            msg_info!(Message::NoArchivedTasks);
            return Ok(());
        }
        msg_print!(Message::ArchivedTasksHeader, true);
        View::tasks(&snapshot.archived_tasks, None);
        return Ok(());
    }

    if snapshot.active_tasks.is_empty() {
        msg_info!(Message::NoActiveTasks);
        return Ok(());
    }
    msg_print!(Message::TasksHeader, true);
    View::tasks(&snapshot.active_tasks, snapshot.focus_task.map(|t| t.id));

    Ok(())
}
