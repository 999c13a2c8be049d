//! `suds export` -- write oil/recipe/backup snapshots.

use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use suds_core::snapshot::{Snapshot, write_snapshot};
use suds_storage::Storage;

use crate::cli::{ExportArgs, ExportCommands};
use crate::context::RuntimeContext;

/// Execute the `suds export` command.
pub fn run(ctx: &RuntimeContext, args: &ExportArgs) -> Result<()> {
    let store = ctx.open_store()?;

    let (snapshot, output, label) = match &args.command {
        ExportCommands::Oil { id, output } => {
            let oil = store
                .get_oil(id)
                .with_context(|| format!("failed to load oil {id}"))?;
            (Snapshot::oil(oil), output, format!("oil {id}"))
        }
        ExportCommands::Recipe { id, output } => {
            let recipe = store
                .get_recipe(id)
                .with_context(|| format!("failed to load recipe {id}"))?;
            (Snapshot::recipe(recipe), output, format!("recipe {id}"))
        }
        ExportCommands::Backup { output } => {
            let oils = store.load_oils()?.into_vec();
            let recipes = store.load_recipes()?;
            let label = format!("backup ({} oils, {} recipes)", oils.len(), recipes.len());
            (Snapshot::backup(oils, recipes), output, label)
        }
    };

    match output {
        Some(path) => {
            write_to_file(&snapshot, path)?;
            if !ctx.quiet {
                println!("Exported {} to {}", label, path.display());
            }
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_snapshot(&mut handle, &snapshot)?;
        }
    }
    Ok(())
}

fn write_to_file(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_snapshot(&mut file, snapshot)
        .with_context(|| format!("failed to write {}", path.display()))
}
