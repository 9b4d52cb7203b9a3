//! Command-line interface
//!
//! `prompts-load-sqlite [OPTIONS] [DB_PATH] [JSON_PATH] [SCHEMA_PATH]`
//!
//! Omitted trailing paths fall back to the files shipped next to the
//! program.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing::Level;

use crate::{
    config::{LoadMode, LoaderConfig, SchemaSource},
    errors::Result,
};

#[derive(Debug, Parser)]
#[command(name = "prompts-load-sqlite")]
#[command(version, about = "Load the prompt library JSON into its SQLite index")]
pub struct Cli {
    /// SQLite database to (re)build [default: prompts.sqlite]
    pub db_path: Option<PathBuf>,

    /// JSON array of prompt records [default: prompts.he.json]
    pub json_path: Option<PathBuf>,

    /// SQL script that creates the prompts table [default: prompts_index.sql]
    pub schema_path: Option<PathBuf>,

    /// Keep the previous rows if the load fails
    #[arg(long)]
    pub atomic: bool,

    /// Use the schema compiled into the program instead of SCHEMA_PATH
    #[arg(long, conflicts_with = "no_schema")]
    pub bundled_schema: bool,

    /// Apply the schema and exit without loading data
    #[arg(long, conflicts_with = "no_schema")]
    pub schema_only: bool,

    /// Do not apply any schema; the prompts table must already exist
    #[arg(long)]
    pub no_schema: bool,

    /// Resolve relative paths against DIR instead of the program's directory
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Log progress to stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    }

    pub fn into_config(self) -> Result<LoaderConfig> {
        let mut config = match self.base_dir {
            Some(dir) => LoaderConfig::new(dir),
            None => LoaderConfig::from_program_dir()?,
        };

        config.db_path = self.db_path;
        config.json_path = self.json_path;
        config.schema_path = self.schema_path;
        config.schema_only = self.schema_only;
        config.mode = if self.atomic {
            LoadMode::Atomic
        } else {
            LoadMode::Replace
        };
        config.schema = if self.no_schema {
            SchemaSource::Skip
        } else if self.bundled_schema {
            SchemaSource::Bundled
        } else {
            SchemaSource::File
        };

        Ok(config)
    }
}
