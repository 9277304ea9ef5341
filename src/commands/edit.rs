use super::ensure_ok;
use crate::{
    libs::{
        controller::TaskListController,
        formatter::{format_due, parse_due},
        messages::Message,
        selector::select_task,
        task::Task,
    },
    msg_bail_anyhow, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input};

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Position in the active list or id prefix
    task: String,

    #[arg(short, long)]
    title: Option<String>,

    /// New notes; an empty string removes them
    #[arg(short, long)]
    notes: Option<String>,

    /// New due date; YYYY-MM-DD, "YYYY-MM-DD HH:MM" or +N(m|h|d|w)
    #[arg(short, long, conflicts_with = "clear_due")]
    due: Option<String>,

    #[arg(long)]
    clear_due: bool,
}

impl EditArgs {
    fn is_interactive(&self) -> bool {
        self.title.is_none() && self.notes.is_none() && self.due.is_none() && !self.clear_due
    }
}

pub async fn cmd(args: EditArgs, controller: &TaskListController) -> Result<()> {
    let original = select_task(&controller.snapshot(), &args.task)?;

    let updated = if args.is_interactive() {
        prompt_changes(&original)?
    } else {
        apply_flags(&original, args)?
    };

    if updated == original {
        msg_info!(Message::NoChangesDetected);
        return Ok(());
    }

    controller.update(&updated).await;
    ensure_ok(controller)?;
    msg_success!(Message::TaskUpdated(updated.title));

    Ok(())
}

fn apply_flags(original: &Task, args: EditArgs) -> Result<Task> {
    let mut task = original.clone();
    if let Some(title) = args.title {
        if title.trim().is_empty() {
            msg_bail_anyhow!(Message::EmptyTitle);
        }
        task.title = title.trim().to_string();
    }
    if let Some(notes) = args.notes {
        task.notes = Some(notes).filter(|notes| !notes.trim().is_empty());
    }
    if let Some(due) = args.due {
        task.due_date = Some(parse_due(&due)?);
    }
    if args.clear_due {
        task.due_date = None;
    }
    Ok(task)
}

fn prompt_changes(original: &Task) -> Result<Task> {
    msg_print!(Message::EditingTask(original.title.clone()), true);
    let theme = ColorfulTheme::default();
    let empty_title = Message::EmptyTitle.to_string();

    let title: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskTitle.to_string())
        .default(original.title.clone())
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err(&empty_title)
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let notes: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskNotes.to_string())
        .default(original.notes.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    let due: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskDue.to_string())
        .default(format_due(original.due_date.as_ref()))
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), String> {
            if input.trim().is_empty() {
                return Ok(());
            }
            parse_due(input).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()?;

    let mut task = original.clone();
    task.title = title.trim().to_string();
    task.notes = Some(notes).filter(|notes| !notes.trim().is_empty());
    // An unchanged field keeps the stored value rather than the minute-rounded display.
    if due.trim() != format_due(original.due_date.as_ref()) {
        task.due_date = if due.trim().is_empty() { None } else { Some(parse_due(&due)?) };
    }
    Ok(task)
}
