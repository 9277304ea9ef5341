use crate::{
    libs::{config::FocusBarSettings, messages::Message},
    msg_print, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct OpacityArgs {
    /// New opacity between 0.2 and 1.0; values outside are clamped
    value: Option<f64>,
}

pub fn cmd(args: OpacityArgs) -> Result<()> {
    match args.value {
        Some(value) => {
            let stored = FocusBarSettings::save_opacity(value)?;
            msg_success!(Message::OpacitySaved(stored));
        }
        None => msg_print!(Message::OpacityCurrent(FocusBarSettings::load_opacity())),
    }

    Ok(())
}
