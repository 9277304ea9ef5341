//! # Focusbar
//!
//! A to-do list that always knows what to work on next.
//!
//! Tasks are kept in a manual order. The first active task is the *focus
//! task*, shown on a one-line focus bar. Completing it archives it and the
//! focus moves on to the next one.
//!
//! ```rust,no_run
//! use focusbar::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
