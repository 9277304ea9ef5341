use super::migrations::init_with_migrations;
use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

pub const DB_FILE_NAME: &str = "focusbar.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the application database in the platform data directory and
    /// brings its schema up to date.
    pub fn new() -> Result<Db> {
        Self::open(Self::default_path()?)
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(DataStorage::new().get_path(DB_FILE_NAME)?)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Db> {
        let mut conn = Connection::open(path)?;
        Self::configure(&conn)?;
        init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }

    /// A throwaway database with the full schema. Nothing touches disk.
    pub fn open_in_memory() -> Result<Db> {
        let mut conn = Connection::open_in_memory()?;
        Self::configure(&conn)?;
        init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }

    pub fn open_without_migrations<P: AsRef<Path>>(path: P) -> Result<Connection> {
        let conn = Connection::open(path)?;
        Self::configure(&conn)?;
        Ok(conn)
    }

    fn configure(conn: &Connection) -> Result<()> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(())
    }
}
