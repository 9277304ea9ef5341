//! SQLite persistence.
//!
//! [`db::Db`] opens the database file and runs pending schema migrations,
//! [`tasks::SqliteTaskStore`] implements the task store on top of it.

pub mod db;
pub mod migrations;
pub mod tasks;
