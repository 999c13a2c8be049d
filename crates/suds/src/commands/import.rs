//! `suds import` -- read a snapshot file into the store.

use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};

use suds_core::snapshot::{SnapshotPayload, read_snapshot};
use suds_core::validation::{validate_oil, validate_recipe};
use suds_storage::Storage;

use crate::cli::ImportArgs;
use crate::context::RuntimeContext;

/// Execute the `suds import` command.
///
/// Single-record snapshots validate then upsert. Backups merge: records
/// whose id already exists locally are overwritten, everything else is
/// appended; local-only data is never removed.
pub fn run(ctx: &RuntimeContext, args: &ImportArgs) -> Result<()> {
    let file = File::open(&args.file)
        .with_context(|| format!("failed to open {}", args.file.display()))?;
    let snapshot = read_snapshot(BufReader::new(file))
        .with_context(|| format!("failed to read snapshot {}", args.file.display()))?;

    let store = ctx.open_store()?;

    match snapshot.payload {
        SnapshotPayload::Oil { data } => {
            validate_oil(&data).with_context(|| format!("invalid oil \"{}\"", data.name))?;
            store.upsert_oil(&data)?;
            if !ctx.quiet {
                println!("Imported oil: {}", data.id);
            }
        }
        SnapshotPayload::Recipe { data } => {
            validate_recipe(&data)
                .with_context(|| format!("invalid recipe \"{}\"", data.name))?;
            store.upsert_recipe(&data)?;
            if !ctx.quiet {
                println!("Imported recipe: {}", data.id);
            }
        }
        SnapshotPayload::Backup { oils, recipes } => {
            for oil in &oils {
                validate_oil(oil).with_context(|| format!("invalid oil \"{}\"", oil.name))?;
            }
            for recipe in &recipes {
                validate_recipe(recipe)
                    .with_context(|| format!("invalid recipe \"{}\"", recipe.name))?;
            }
            store.import_backup(&oils, &recipes)?;
            if !ctx.quiet {
                println!(
                    "Imported backup: {} oils, {} recipes",
                    oils.len(),
                    recipes.len()
                );
            }
        }
    }
    Ok(())
}
