//! `suds init` -- create and seed the data directory.

use std::fs;

use anyhow::{Context, Result};

use suds_core::data;
use suds_core::oil::OilCatalog;
use suds_storage::{SqliteStore, Storage};

use crate::context::{DB_FILE_NAME, RuntimeContext, SUDS_DIR_NAME};

/// Execute the `suds init` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let dir = match ctx.db_path.clone() {
        Some(p) => p,
        None => std::env::current_dir()?.join(SUDS_DIR_NAME),
    };
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;

    let db_path = dir.join(DB_FILE_NAME);
    let existed = db_path.exists();

    let store = SqliteStore::open(&db_path)
        .with_context(|| format!("failed to open database: {}", db_path.display()))?;

    // Seed the stock catalogs, but never clobber user data.
    if store.load_oils()?.is_empty() {
        store.save_oils(&OilCatalog::from(data::default_oils()))?;
    }
    if store.load_fragrances()?.is_empty() {
        store.save_fragrances(&data::default_fragrances())?;
    }

    if !ctx.quiet {
        if existed {
            println!("Reinitialized suds data in {}", db_path.display());
        } else {
            println!("Initialized suds data in {}", db_path.display());
        }
    }
    Ok(())
}
