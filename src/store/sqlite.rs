use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

use crate::db::migrations::run_migrations;
use crate::db::repository::KvRepo;
use crate::store::ProgressStore;

/// Store backed by the `kv_store` table of the local database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Wrap an already migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Opening database at {:?}", path))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        run_migrations(&conn)?;
        Ok(Self::new(conn))
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl ProgressStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        KvRepo::get(&self.conn, key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        log::debug!("Writing {} ({} bytes)", key, value.len());
        KvRepo::set(&self.conn, key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        KvRepo::delete(&self.conn, key)
    }
}
