//! prompts_loader: builds the SQLite index of the Hebrew prompt library
//!
//! Reads `prompts.he.json` (an array of prompt records) and replaces the
//! contents of the `prompts` table with it:
//! - Schema (re)applied from `prompts_index.sql` on every run
//! - Full-table delete, then one insert per record, in array order
//! - Structured fields stored as JSON text (`*_json` columns)
//!
//! ## Layout
//!
//! - [`config`]: paths, defaults and load mode
//! - [`db`]: connection, schema, prompt rows
//! - [`encoding`]: JSON text for the `*_json` columns
//! - [`loader`]: the pipeline itself
//! - [`cli`]: argument parsing for the `prompts-load-sqlite` binary

// Module declarations
pub mod cli;
pub mod config;
pub mod db;
pub mod encoding;
pub mod errors;
pub mod loader;

pub use config::{LoadMode, LoaderConfig, SchemaSource};
pub use errors::{LoaderError, Result};
pub use loader::{LoadReport, Loader};

/// Load prompts with the given configuration
///
/// Returns `None` when `config.schema_only` is set.
pub fn run(config: LoaderConfig) -> Result<Option<LoadReport>> {
    Loader::new(config).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modules_exist() {
        // Ensure modules compile and are accessible
        let _error: errors::LoaderError = errors::LoaderError::Config("test".into());
        let _config = LoaderConfig::new("/tmp");
    }

    #[test]
    fn test_run_with_bundled_schema() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("prompts.he.json"), "[]").unwrap();

        let mut config = LoaderConfig::new(dir.path());
        config.schema = SchemaSource::Bundled;
        let report = run(config).unwrap().unwrap();
        assert_eq!(report.inserted, 0);
        assert!(dir.path().join("prompts.sqlite").exists());
    }
}
