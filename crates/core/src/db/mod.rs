use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use crate::errors::{LoaderError, Result};

pub mod prompts;
pub mod schema;

/// Owned connection to the prompts database
///
/// The connection lives for exactly one load and is closed when the `Db` is
/// dropped or [`Db::close`] is called.
pub struct Db {
    conn: Connection,
}

impl Db {
    /// Open the database file, creating it if it does not exist
    ///
    /// Parent directories are not created.
    pub fn open(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "opening database");
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Run a schema script as one batch
    ///
    /// Statements are not wrapped in a transaction: if one fails, the ones
    /// before it stay applied.
    pub fn apply_schema(&self, script: &str) -> Result<()> {
        self.conn.execute_batch(script)?;
        Ok(())
    }

    /// Check that `prompts` exists with every column the loader writes
    pub fn verify_prompts_table(&self) -> Result<()> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM pragma_table_info(?1)")?;
        let columns = stmt
            .query_map([schema::PROMPTS_TABLE], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        if columns.is_empty() {
            return Err(LoaderError::Schema(format!(
                "table '{}' does not exist after applying the schema",
                schema::PROMPTS_TABLE
            )));
        }

        let missing: Vec<&str> = schema::PROMPT_COLUMNS
            .iter()
            .copied()
            .filter(|col| !columns.iter().any(|c| c.eq_ignore_ascii_case(col)))
            .collect();
        if !missing.is_empty() {
            return Err(LoaderError::Schema(format!(
                "table '{}' is missing columns: {}",
                schema::PROMPTS_TABLE,
                missing.join(", ")
            )));
        }

        Ok(())
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Close the connection, surfacing any error SQLite reports on close
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, err)| err.into())
    }
}
