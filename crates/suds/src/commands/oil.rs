//! `suds oil` -- oil catalog CRUD.

use anyhow::{Context, Result, bail};
use chrono::Utc;

use suds_core::idgen;
use suds_core::oil::Oil;
use suds_core::validation::validate_oil;
use suds_storage::Storage;

use crate::cli::{OilArgs, OilCommands};
use crate::context::RuntimeContext;
use crate::output::{output_json, print_oil, print_oil_list};

/// Execute the `suds oil` command.
pub fn run(ctx: &RuntimeContext, args: &OilArgs) -> Result<()> {
    match &args.command {
        OilCommands::Add {
            name,
            id,
            sap_naoh,
            sap_koh,
            iodine,
            notes,
        } => {
            let store = ctx.open_store()?;
            let oils = store.load_oils()?;

            let oil_id = match id {
                Some(explicit) => {
                    if oils.contains(explicit) {
                        bail!("oil {explicit} already exists (remove it first)");
                    }
                    explicit.clone()
                }
                None => generate_oil_id(name, |candidate| oils.contains(candidate))?,
            };

            let oil = Oil {
                sap_naoh: *sap_naoh,
                sap_koh: *sap_koh,
                iodine: *iodine,
                notes: notes.clone(),
                ..Oil::new(oil_id, name.clone())
            };
            validate_oil(&oil).with_context(|| format!("invalid oil \"{name}\""))?;

            store.upsert_oil(&oil)?;

            if ctx.json {
                output_json(&oil);
            } else if !ctx.quiet {
                println!("Added oil: {}", oil.id);
                if oil.has_missing_sap() {
                    println!("  (draft: missing SAP values; recipes using it will warn)");
                }
            }
            Ok(())
        }

        OilCommands::List => {
            let store = ctx.open_store()?;
            let oils = store.load_oils()?;
            if ctx.json {
                output_json(&oils);
            } else {
                print_oil_list(&oils);
            }
            Ok(())
        }

        OilCommands::Show { id } => {
            let store = ctx.open_store()?;
            let oil = store
                .get_oil(id)
                .with_context(|| format!("failed to load oil {id}"))?;
            if ctx.json {
                output_json(&oil);
            } else {
                print_oil(&oil);
            }
            Ok(())
        }

        OilCommands::Remove { id } => {
            let store = ctx.open_store()?;
            store
                .delete_oil(id)
                .with_context(|| format!("failed to remove oil {id}"))?;
            if !ctx.quiet {
                println!("Removed oil: {id}");
            }
            Ok(())
        }
    }
}

/// Generates a fresh `oil-` id, trying up to 10 nonces to avoid collisions.
fn generate_oil_id(name: &str, exists: impl Fn(&str) -> bool) -> Result<String> {
    let now = Utc::now();
    for nonce in 0..10 {
        let candidate = idgen::generate_record_id("oil", name, now, nonce);
        if !exists(&candidate) {
            return Ok(candidate);
        }
    }
    bail!("failed to generate unique ID after 10 attempts");
}
