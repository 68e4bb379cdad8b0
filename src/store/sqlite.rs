use anyhow::Context;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::{schema, KeyValueStore};
use crate::error::{Error, Result};

/// Key-value store kept in a single SQLite file.
pub(crate) struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub(crate) fn open(path: &Path) -> anyhow::Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut store = Self { conn };
        store.migrate().context("Database migration failed")?;
        tracing::debug!(path = %path.display(), "opened key-value store");
        Ok(store)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&mut self) -> anyhow::Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        // A version table without a row counts as a fresh database.
        let current: i32 = if has_version_table {
            self.conn
                .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                    row.get(0)
                })
                .optional()?
                .unwrap_or(0)
        } else {
            0
        };

        if current == 0 {
            let tx = self.conn.transaction()?;
            tx.execute_batch(schema::SCHEMA_V1)?;
            tx.execute("DELETE FROM schema_version", [])?;
            tx.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            tx.commit()?;
            return Ok(());
        }

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn schema_version(&self) -> anyhow::Result<i32> {
        Ok(self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })?)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let result = self.conn.query_row(
            "SELECT value FROM kv WHERE key = ?1",
            params![key],
            |row| row.get(0),
        );
        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Error::PersistenceRead(e.to_string())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let write = |conn: &mut Connection| -> rusqlite::Result<()> {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, chrono::Utc::now().to_rfc3339()],
            )?;
            tx.commit()
        };
        write(&mut self.conn).map_err(|e| Error::PersistenceWrite(e.to_string()))
    }
}
