//! Terminal rendition of the focus bar.
//!
//! Without `--watch` the bar is printed once. With it the line is redrawn in
//! place whenever the task list changes, and the list is reloaded from the
//! database every `refresh_interval` seconds so edits made from another
//! terminal show up.

use crate::{
    libs::{
        config::{Config, FocusBarSettings},
        controller::{TaskListController, TaskListSnapshot},
        messages::Message,
        view::render_focus_bar,
    },
    msg_debug, msg_info, msg_warning,
};
use anyhow::Result;
use clap::Args;
use std::future::Future;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

#[derive(Debug, Args)]
pub struct BarArgs {
    /// Keep the bar on screen and refresh it until Ctrl+C
    #[arg(short, long)]
    watch: bool,

    /// Width in columns; defaults to the configured width
    #[arg(long)]
    width: Option<usize>,
}

pub async fn cmd(args: BarArgs, controller: Arc<TaskListController>) -> Result<()> {
    let settings = Config::read()
        .unwrap_or_else(|e| {
            msg_warning!(Message::ConfigReadFailed(e.to_string()));
            Config::default()
        })
        .focus_bar();
    let width = args.width.unwrap_or(settings.width);

    if !args.watch {
        println!("{}", bar_line(&controller.snapshot(), width));
        return Ok(());
    }

    let interval = settings.refresh_interval.max(1);
    msg_info!(Message::FocusBarWatching(interval));

    let updates = controller.subscribe();
    let refresher = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(interval));
            ticker.tick().await;
            loop {
                ticker.tick().await;
                controller.reload().await;
            }
        })
    };

    let stop = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    let result = follow(updates, stop, |snapshot| redraw(&bar_line(snapshot, width))).await;

    refresher.abort();
    result?;
    println!();
    msg_info!(Message::FocusBarStopped);

    Ok(())
}

/// Draws the current snapshot, then every new one, until `stop` completes.
///
/// A change that is already pending when `stop` fires is still drawn.
async fn follow<S, D>(mut updates: watch::Receiver<TaskListSnapshot>, stop: S, mut draw: D) -> io::Result<()>
where
    S: Future<Output = ()>,
    D: FnMut(&TaskListSnapshot) -> io::Result<()>,
{
    tokio::pin!(stop);

    let snapshot = updates.borrow_and_update().clone();
    draw(&snapshot)?;
    loop {
        tokio::select! {
            biased;
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                draw(&snapshot)?;
            }
            _ = &mut stop => break,
        }
    }

    Ok(())
}

/// Opacity is read on every redraw so `focusbar opacity` takes effect on a
/// running bar.
fn bar_line(snapshot: &TaskListSnapshot, width: usize) -> String {
    if let Some(err) = &snapshot.last_error {
        msg_debug!(format!("Focus bar showing placeholder: {}", err));
    }
    let title = snapshot.focus_task.as_ref().map(|task| task.title.as_str());
    render_focus_bar(title, FocusBarSettings::load_opacity(), width)
}

fn redraw(line: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "\r{}", line)?;
    stdout.flush()
}
