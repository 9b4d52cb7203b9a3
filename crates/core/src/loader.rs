//! The load pipeline
//!
//! open database → apply schema → delete → parse JSON → insert → commit → close
//!
//! [`Loader::ensure_schema`] and [`Loader::load_data`] can be called on
//! their own; [`Loader::run`] chains them for one invocation.

use std::fs;

use rusqlite::Connection;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    config::{LoadMode, LoaderConfig, SchemaSource},
    db::{prompts, schema::BUNDLED_SCHEMA, Db},
    errors::{LoaderError, Result},
};

/// Outcome of a successful load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub mode:     LoadMode,
    /// Rows removed from the previous load
    pub deleted:  usize,
    pub inserted: usize,
}

pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Run every step for the configured paths
    ///
    /// Returns `None` when the configuration asks for the schema only.
    pub fn run(&self) -> Result<Option<LoadReport>> {
        let mut db = Db::open(&self.config.db_path())?;
        self.ensure_schema(&db)?;

        if self.config.schema_only {
            info!("schema applied, skipping data load");
            db.close()?;
            return Ok(None);
        }

        let report = self.load_data(&mut db)?;
        db.close()?;
        Ok(Some(report))
    }

    /// Apply the configured schema script and check the resulting table
    pub fn ensure_schema(&self, db: &Db) -> Result<()> {
        match self.config.schema {
            SchemaSource::File => {
                let path = self.config.schema_path();
                debug!(path = %path.display(), "applying schema");
                let script = fs::read_to_string(&path).map_err(|e| LoaderError::io(&path, e))?;
                db.apply_schema(&script)?;
            },
            SchemaSource::Bundled => {
                debug!("applying bundled schema");
                db.apply_schema(BUNDLED_SCHEMA)?;
            },
            SchemaSource::Skip => {
                debug!("schema step skipped");
            },
        }

        db.verify_prompts_table()
    }

    /// Replace the contents of `prompts` with the records of the JSON source
    pub fn load_data(&self, db: &mut Db) -> Result<LoadReport> {
        let mode = self.config.mode;
        let (deleted, inserted) = match mode {
            LoadMode::Replace => self.replace(db)?,
            LoadMode::Atomic => self.replace_atomically(db)?,
        };

        info!(
            mode = mode.as_str(),
            deleted,
            inserted,
            "loaded prompts"
        );
        Ok(LoadReport {
            mode,
            deleted,
            inserted,
        })
    }

    /// The delete autocommits before the JSON is read, so any later failure
    /// leaves the table empty.
    fn replace(&self, db: &mut Db) -> Result<(usize, usize)> {
        let deleted = prompts::clear_prompts(db.conn())?;
        debug!(deleted, "cleared prompts table");

        let json_path = self.config.json_path();
        let loaded = prompts::read_records(&json_path)
            .and_then(|records| insert_committed(db.conn_mut(), &records));

        match loaded {
            Ok(inserted) => Ok((deleted, inserted)),
            Err(err) => {
                warn!(deleted, "load failed after clearing the prompts table; table left empty");
                Err(err)
            },
        }
    }

    fn replace_atomically(&self, db: &mut Db) -> Result<(usize, usize)> {
        let records = prompts::read_records(&self.config.json_path())?;

        let tx = db.conn_mut().transaction()?;
        let deleted = prompts::clear_prompts(&tx)?;
        let inserted = prompts::insert_prompts(&tx, &records)?;
        tx.commit()?;

        Ok((deleted, inserted))
    }
}

/// Insert all records in one transaction; dropping it on error rolls back
fn insert_committed(conn: &mut Connection, records: &[Value]) -> Result<usize> {
    debug!(records = records.len(), "inserting prompts");
    let tx = conn.transaction()?;
    let inserted = prompts::insert_prompts(&tx, records)?;
    tx.commit()?;
    Ok(inserted)
}
