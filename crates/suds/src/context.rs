//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds the state a command handler needs: resolved
//! data directory, global flags, and the store-opening helper.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::debug;

use suds_storage::SqliteStore;

use crate::cli::GlobalArgs;

/// Name of the data directory discovered upward from the working directory.
pub const SUDS_DIR_NAME: &str = ".suds";

/// Database file inside the data directory.
pub const DB_FILE_NAME: &str = "suds.db";

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Explicit data directory (from `--db`), if any.
    pub db_path: Option<PathBuf>,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Builds a `RuntimeContext` from parsed global arguments.
    pub fn from_global_args(global: &GlobalArgs) -> Self {
        Self {
            db_path: global.db.clone(),
            json: global.json,
            verbose: global.verbose,
            quiet: global.quiet,
        }
    }

    /// Discovers the `.suds` directory by walking up from the current
    /// directory.
    ///
    /// Returns `None` if no `.suds` directory is found.
    pub fn find_suds_dir() -> Option<PathBuf> {
        let mut dir = env::current_dir().ok()?;
        loop {
            let candidate = dir.join(SUDS_DIR_NAME);
            if candidate.is_dir() {
                return Some(candidate);
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Returns the resolved data directory, auto-discovering if needed.
    pub fn resolve_db_path(&self) -> Option<PathBuf> {
        if let Some(ref p) = self.db_path {
            return Some(p.clone());
        }
        Self::find_suds_dir()
    }

    /// Opens the store, failing with a hint when no data directory exists.
    pub fn open_store(&self) -> Result<SqliteStore> {
        let dir = self
            .resolve_db_path()
            .context("no suds data directory found. Run 'suds init' to create one.")?;
        let db_path = dir.join(DB_FILE_NAME);
        debug!(?db_path, "opening store");

        if !db_path.exists() {
            bail!(
                "no suds database found at {}\nHint: run 'suds init' to create one",
                db_path.display()
            );
        }

        SqliteStore::open(&db_path)
            .with_context(|| format!("failed to open database: {}", db_path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_db_path_wins() {
        let ctx = RuntimeContext {
            db_path: Some(PathBuf::from("/tmp/elsewhere")),
            json: false,
            verbose: false,
            quiet: false,
        };
        assert_eq!(ctx.resolve_db_path(), Some(PathBuf::from("/tmp/elsewhere")));
    }

    #[test]
    fn open_store_without_directory_fails_with_hint() {
        let ctx = RuntimeContext {
            db_path: Some(PathBuf::from("/nonexistent/.suds")),
            json: false,
            verbose: false,
            quiet: false,
        };
        let err = ctx.open_store().unwrap_err();
        assert!(format!("{err:#}").contains("suds init"));
    }
}
