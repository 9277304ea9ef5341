use crate::{
    db::{
        db::Db,
        migrations::{get_db_version, MigrationManager},
    },
    libs::messages::Message,
    msg_print,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct MigrationsArgs {
    #[command(subcommand)]
    command: MigrationsCommand,
}

#[derive(Debug, Subcommand)]
enum MigrationsCommand {
    /// Show the current schema version
    Status,
    /// List applied migrations
    History,
}

pub fn cmd(args: MigrationsArgs) -> Result<()> {
    let conn = Db::open_without_migrations(Db::default_path()?)?;
    let manager = MigrationManager::new();

    match args.command {
        MigrationsCommand::Status => {
            let version = get_db_version(&conn)?;
            msg_print!(Message::DbVersion(version, manager.latest_version()));
        }
        MigrationsCommand::History => {
            msg_print!(Message::MigrationHistoryHeader, true);
            for (version, name, applied_at) in manager.get_migration_history(&conn)? {
                msg_print!(Message::MigrationEntry(version, name, applied_at));
            }
        }
    }

    Ok(())
}
