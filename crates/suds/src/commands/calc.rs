//! `suds calc` -- run the formulation engine against a recipe.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, bail};

use suds_core::calc;
use suds_core::recipe::Recipe;
use suds_core::snapshot::{self, SnapshotPayload};
use suds_storage::Storage;

use crate::cli::CalcArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `suds calc` command.
///
/// The engine is total: warnings appear in the output, but the command
/// still succeeds -- callers decide what an invalid formulation means.
pub fn run(ctx: &RuntimeContext, args: &CalcArgs) -> Result<()> {
    let store = ctx.open_store()?;

    let recipe = match (&args.recipe_id, &args.file) {
        (Some(id), _) => store
            .get_recipe(id)
            .with_context(|| format!("failed to load recipe {id}"))?,
        (None, Some(path)) => read_recipe_file(path)?,
        (None, None) => bail!("a recipe id or --file is required"),
    };

    let oils = store.load_oils()?;
    let result = calc::calculate(&recipe, &oils);

    if ctx.json {
        output_json(&result);
    } else {
        if !ctx.quiet {
            println!("{} ({:.0} g fat)", recipe.name, recipe.total_fat_weight);
            println!();
        }
        print!("{result}");
    }
    Ok(())
}

/// Reads a recipe from a JSON file: either a recipe snapshot or a plain
/// recipe document.
fn read_recipe_file(path: &Path) -> Result<Recipe> {
    let file = File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    match snapshot::read_snapshot(BufReader::new(file)) {
        Ok(snap) => match snap.payload {
            SnapshotPayload::Recipe { data } => Ok(data),
            SnapshotPayload::Oil { .. } | SnapshotPayload::Backup { .. } => {
                bail!("{} is not a recipe snapshot", path.display())
            }
        },
        // Not a snapshot envelope -- try a bare recipe document.
        Err(_) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("{} is not a recipe JSON file", path.display()))
        }
    }
}
