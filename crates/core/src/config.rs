//! Loader configuration
//!
//! Relative paths are resolved against the directory that holds the
//! program, so the loader finds its bundled data files no matter where it is
//! invoked from.

use std::path::{Path, PathBuf};

use crate::errors::{LoaderError, Result};

/// Default database file name
pub const DEFAULT_DB_FILE: &str = "prompts.sqlite";
/// Default JSON source file name
pub const DEFAULT_JSON_FILE: &str = "prompts.he.json";
/// Default schema script file name
pub const DEFAULT_SCHEMA_FILE: &str = "prompts_index.sql";

/// How the delete and the inserts are grouped into transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Delete is committed on its own, inserts are committed together at the
    /// end. A failed load leaves the table empty.
    #[default]
    Replace,
    /// Delete and inserts share one transaction. A failed load leaves the
    /// previous rows in place.
    Atomic,
}

impl LoadMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadMode::Replace => "replace",
            LoadMode::Atomic => "atomic",
        }
    }
}

/// Where the schema script comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaSource {
    /// Read the script at the configured schema path
    #[default]
    File,
    /// Use the script compiled into the binary
    Bundled,
    /// Do not apply any schema; the table must already exist
    Skip,
}

/// Configuration for one loader run
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub base_dir:    PathBuf,
    pub db_path:     Option<PathBuf>,
    pub json_path:   Option<PathBuf>,
    pub schema_path: Option<PathBuf>,
    pub mode:        LoadMode,
    pub schema:      SchemaSource,
    /// Stop after the schema has been applied
    pub schema_only: bool,
}

impl LoaderConfig {
    /// Configuration with every path defaulted under `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir:    base_dir.into(),
            db_path:     None,
            json_path:   None,
            schema_path: None,
            mode:        LoadMode::default(),
            schema:      SchemaSource::default(),
            schema_only: false,
        }
    }

    /// Configuration rooted at the directory of the running executable
    pub fn from_program_dir() -> Result<Self> {
        Ok(Self::new(program_dir()?))
    }

    /// Resolved database path
    pub fn db_path(&self) -> PathBuf {
        self.resolve(self.db_path.as_deref(), DEFAULT_DB_FILE)
    }

    /// Resolved JSON source path
    pub fn json_path(&self) -> PathBuf {
        self.resolve(self.json_path.as_deref(), DEFAULT_JSON_FILE)
    }

    /// Resolved schema script path
    pub fn schema_path(&self) -> PathBuf {
        self.resolve(self.schema_path.as_deref(), DEFAULT_SCHEMA_FILE)
    }

    fn resolve(&self, supplied: Option<&Path>, default_name: &str) -> PathBuf {
        match supplied {
            Some(path) => resolve_path(path, &self.base_dir),
            None => self.base_dir.join(default_name),
        }
    }
}

/// Use `path` as-is when absolute, otherwise join it onto `base_dir`
pub fn resolve_path(path: &Path, base_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Directory containing the running executable
pub fn program_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()
        .map_err(|e| LoaderError::Config(format!("Could not locate the program: {}", e)))?;
    let exe = exe.canonicalize().unwrap_or(exe);

    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| LoaderError::Config("Program path has no parent directory".into()))
}
