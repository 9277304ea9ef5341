//! Command-line interface.
//!
//! Each subcommand lives in its own module with an `Args` struct and a
//! `cmd` entry point. Commands that touch tasks share one
//! [`TaskListController`] backed by the SQLite store.

pub mod add;
pub mod bar;
pub mod clean;
pub mod delete;
pub mod done;
pub mod edit;
pub mod focus;
pub mod list;
pub mod migrations;
pub mod moves;
pub mod opacity;
pub mod sort;
pub mod stats;
pub mod undo;

use crate::{
    db::{db::Db, tasks::SqliteTaskStore},
    libs::{controller::TaskListController, messages::Message},
    msg_bail_anyhow, msg_error_anyhow,
};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Add a task to the end of the list", arg_required_else_help = true)]
    Add(add::AddArgs),
    #[command(about = "List tasks", visible_alias = "ls")]
    List(list::ListArgs),
    #[command(about = "Edit a task's title, notes or due date", arg_required_else_help = true)]
    Edit(edit::EditArgs),
    #[command(about = "Complete a task (defaults to the focus task)")]
    Done(done::DoneArgs),
    #[command(about = "Make a completed task active again", arg_required_else_help = true)]
    Undo(undo::UndoArgs),
    #[command(about = "Delete a task", visible_alias = "rm", arg_required_else_help = true)]
    Delete(delete::DeleteArgs),
    #[command(about = "Move an active task to another position", name = "move", arg_required_else_help = true)]
    Move(moves::MoveArgs),
    #[command(about = "Order active tasks by due date")]
    Sort,
    #[command(about = "Delete all completed tasks")]
    Clean(clean::CleanArgs),
    #[command(about = "Show the task to work on now")]
    Focus,
    #[command(about = "Show the focus bar")]
    Bar(bar::BarArgs),
    #[command(about = "Show or set the focus bar opacity")]
    Opacity(opacity::OpacityArgs),
    #[command(about = "Show task counts")]
    Stats,
    #[command(about = "Inspect the database schema")]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Add(args) => add::cmd(args, &*open_controller().await?).await,
            Commands::List(args) => list::cmd(args, &*open_controller().await?).await,
            Commands::Edit(args) => edit::cmd(args, &*open_controller().await?).await,
            Commands::Done(args) => done::cmd(args, &*open_controller().await?).await,
            Commands::Undo(args) => undo::cmd(args, &*open_controller().await?).await,
            Commands::Delete(args) => delete::cmd(args, &*open_controller().await?).await,
            Commands::Move(args) => moves::cmd(args, &*open_controller().await?).await,
            Commands::Sort => sort::cmd(&*open_controller().await?).await,
            Commands::Clean(args) => clean::cmd(args, &*open_controller().await?).await,
            Commands::Focus => focus::cmd(&*open_controller().await?).await,
            Commands::Bar(args) => bar::cmd(args, open_controller().await?).await,
            Commands::Opacity(args) => opacity::cmd(args),
            Commands::Stats => stats::cmd(&*open_controller().await?).await,
            Commands::Migrations(args) => migrations::cmd(args),
        }
    }
}

/// Opens the task database and loads the list.
///
/// Without a store there is nothing the task commands can do, so a failure
/// here ends the command.
pub async fn open_controller() -> Result<Arc<TaskListController>> {
    let db = Db::new().map_err(|e| msg_error_anyhow!(Message::StoreInitFailed(e.to_string())))?;
    open_controller_with(db).await
}

/// Builds the controller over an already opened database.
pub async fn open_controller_with(db: Db) -> Result<Arc<TaskListController>> {
    let controller = Arc::new(TaskListController::new(Arc::new(SqliteTaskStore::new(db))));
    controller.reload().await;
    ensure_ok(&controller)?;
    Ok(controller)
}

/// Turns an error recorded by the last controller operation into a command
/// failure.
pub fn ensure_ok(controller: &TaskListController) -> Result<()> {
    if let Some(err) = controller.last_error() {
        msg_bail_anyhow!(Message::OperationFailed(err.to_string()));
    }
    Ok(())
}
