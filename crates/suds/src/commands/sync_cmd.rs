//! `suds sync` -- remote backup via the magic-key document store.

use anyhow::{Context, Result, bail};

use suds_storage::Storage;
use suds_sync::{MagicKey, SyncClient, SyncDocument};

use crate::cli::{SyncArgs, SyncCommands};
use crate::context::RuntimeContext;

/// Metadata key holding this device's magic key.
const META_SYNC_KEY: &str = "sync_key";

/// Execute the `suds sync` command.
pub fn run(ctx: &RuntimeContext, args: &SyncArgs) -> Result<()> {
    match &args.command {
        SyncCommands::Key { key } => run_key(ctx, key.as_deref()),
        SyncCommands::Push { remote } => run_push(ctx, remote),
        SyncCommands::Pull { remote } => run_pull(ctx, remote),
    }
}

/// Shows the stored key, stores a supplied one, or generates a fresh one.
fn run_key(ctx: &RuntimeContext, supplied: Option<&str>) -> Result<()> {
    let store = ctx.open_store()?;

    if let Some(raw) = supplied {
        let key: MagicKey = raw.parse().context("failed to parse magic key")?;
        store.set_meta(META_SYNC_KEY, &key.to_string())?;
        if !ctx.quiet {
            println!("Sync key stored.");
        }
        return Ok(());
    }

    match store.get_meta(META_SYNC_KEY) {
        Ok(key) => println!("{key}"),
        Err(e) if e.is_not_found() => {
            let key = MagicKey::generate();
            store.set_meta(META_SYNC_KEY, &key.to_string())?;
            println!("{key}");
            if !ctx.quiet {
                eprintln!("Generated a new sync key. Keep it safe: it is the only way to reach this backup.");
            }
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn run_push(ctx: &RuntimeContext, remote: &str) -> Result<()> {
    let store = ctx.open_store()?;
    let key = stored_key(&store)?;

    let document = SyncDocument::new(store.load_oils()?.into_vec(), store.load_recipes()?);
    let counts = (document.data.oils.len(), document.data.recipes.len());

    SyncClient::new(remote, key)
        .push(&document)
        .context("failed to push backup")?;

    if !ctx.quiet {
        println!("Pushed {} oils, {} recipes", counts.0, counts.1);
    }
    Ok(())
}

fn run_pull(ctx: &RuntimeContext, remote: &str) -> Result<()> {
    let store = ctx.open_store()?;
    let key = stored_key(&store)?;

    let document = SyncClient::new(remote, key)
        .pull()
        .context("failed to pull backup")?;

    match document {
        Some(document) => {
            // Merge rather than mirror: pulling must never wipe local data.
            store.import_backup(&document.data.oils, &document.data.recipes)?;
            if !ctx.quiet {
                println!(
                    "Pulled {} oils, {} recipes (remote last updated {})",
                    document.data.oils.len(),
                    document.data.recipes.len(),
                    document.last_updated.format("%Y-%m-%d %H:%M"),
                );
            }
        }
        None => {
            if !ctx.quiet {
                println!("No backup on the remote yet.");
            }
        }
    }
    Ok(())
}

/// Loads the device's magic key, with a hint when none is stored.
fn stored_key(store: &impl Storage) -> Result<MagicKey> {
    match store.get_meta(META_SYNC_KEY) {
        Ok(raw) => raw.parse::<MagicKey>().context("stored sync key is invalid"),
        Err(e) if e.is_not_found() => {
            bail!("no sync key stored. Run 'suds sync key' to generate one.")
        }
        Err(e) => Err(e.into()),
    }
}
