//! `suds recipe` -- recipe CRUD and editing.

use anyhow::{Context, Result, bail};
use chrono::Utc;

use suds_core::enums::LyeType;
use suds_core::idgen;
use suds_core::recipe::{Recipe, RecipeFragrance};
use suds_core::validation::validate_recipe;
use suds_storage::Storage;

use crate::cli::{RecipeArgs, RecipeCommands, RecipeSettings};
use crate::context::RuntimeContext;
use crate::output::{output_json, print_recipe, print_recipe_list};

/// Execute the `suds recipe` command.
pub fn run(ctx: &RuntimeContext, args: &RecipeArgs) -> Result<()> {
    match &args.command {
        RecipeCommands::New { name, id, settings } => new_recipe(ctx, name, id.as_deref(), settings),
        RecipeCommands::List => list(ctx),
        RecipeCommands::Show { id } => show(ctx, id),
        RecipeCommands::Remove { id } => remove(ctx, id),
        RecipeCommands::Set {
            id,
            settings,
            fragrance,
            fragrance_pct,
            no_fragrance,
        } => set(ctx, id, settings, fragrance.as_deref(), *fragrance_pct, *no_fragrance),
        RecipeCommands::AddOil {
            recipe_id,
            oil_id,
            percentage,
        } => add_oil(ctx, recipe_id, oil_id, *percentage),
        RecipeCommands::RemoveOil { recipe_id, item_id } => remove_oil(ctx, recipe_id, item_id),
    }
}

fn new_recipe(
    ctx: &RuntimeContext,
    name: &str,
    id: Option<&str>,
    settings: &RecipeSettings,
) -> Result<()> {
    let store = ctx.open_store()?;
    let recipes = store.load_recipes()?;

    let recipe_id = match id {
        Some(explicit) => {
            if recipes.iter().any(|r| r.id == explicit) {
                bail!("recipe {explicit} already exists (remove it first)");
            }
            explicit.to_owned()
        }
        None => generate_recipe_id(name, |candidate| recipes.iter().any(|r| r.id == candidate))?,
    };

    let mut recipe = Recipe::new(recipe_id, name);
    apply_settings(&mut recipe, settings)?;
    validate_recipe(&recipe).with_context(|| format!("invalid recipe \"{name}\""))?;

    store.upsert_recipe(&recipe)?;

    if ctx.json {
        output_json(&recipe);
    } else if !ctx.quiet {
        println!("Created recipe: {}", recipe.id);
    }
    Ok(())
}

fn list(ctx: &RuntimeContext) -> Result<()> {
    let store = ctx.open_store()?;
    let recipes = store.load_recipes()?;
    if ctx.json {
        output_json(&recipes);
    } else {
        print_recipe_list(&recipes);
    }
    Ok(())
}

fn show(ctx: &RuntimeContext, id: &str) -> Result<()> {
    let store = ctx.open_store()?;
    let recipe = store
        .get_recipe(id)
        .with_context(|| format!("failed to load recipe {id}"))?;
    if ctx.json {
        output_json(&recipe);
    } else {
        let oils = store.load_oils()?;
        print_recipe(&recipe, &oils);
    }
    Ok(())
}

fn remove(ctx: &RuntimeContext, id: &str) -> Result<()> {
    let store = ctx.open_store()?;
    store
        .delete_recipe(id)
        .with_context(|| format!("failed to remove recipe {id}"))?;
    if !ctx.quiet {
        println!("Removed recipe: {id}");
    }
    Ok(())
}

fn set(
    ctx: &RuntimeContext,
    id: &str,
    settings: &RecipeSettings,
    fragrance: Option<&str>,
    fragrance_pct: Option<f64>,
    no_fragrance: bool,
) -> Result<()> {
    let store = ctx.open_store()?;
    let mut recipe = store
        .get_recipe(id)
        .with_context(|| format!("failed to load recipe {id}"))?;

    apply_settings(&mut recipe, settings)?;

    if no_fragrance {
        recipe.fragrance = None;
    } else if let Some(fragrance_id) = fragrance {
        let library = store.load_fragrances()?;
        let entry = library
            .iter()
            .find(|f| f.id == fragrance_id)
            .with_context(|| format!("fragrance {fragrance_id} not found in the library"))?;
        recipe.fragrance = Some(RecipeFragrance {
            // `requires` in the CLI definition guarantees the percentage.
            percentage: fragrance_pct.unwrap_or_default(),
            kind: entry.kind,
            name: Some(entry.name.clone()),
        });
    } else if let Some(pct) = fragrance_pct {
        // Percentage alone adjusts an existing scent.
        match recipe.fragrance.as_mut() {
            Some(existing) => existing.percentage = pct,
            None => bail!("recipe has no fragrance; pass --fragrance <id> as well"),
        }
    }

    validate_recipe(&recipe).with_context(|| format!("invalid recipe \"{}\"", recipe.name))?;
    store.upsert_recipe(&recipe)?;

    if ctx.json {
        output_json(&recipe);
    } else if !ctx.quiet {
        let oils = store.load_oils()?;
        print_recipe(&recipe, &oils);
    }
    Ok(())
}

fn add_oil(ctx: &RuntimeContext, recipe_id: &str, oil_id: &str, percentage: f64) -> Result<()> {
    let store = ctx.open_store()?;
    let mut recipe = store
        .get_recipe(recipe_id)
        .with_context(|| format!("failed to load recipe {recipe_id}"))?;

    // The engine tolerates dangling references, but adding one on purpose
    // is almost certainly a typo.
    let oils = store.load_oils()?;
    if !oils.contains(oil_id) {
        bail!("oil {oil_id} not found in the catalog");
    }

    let item_id = generate_item_id(oil_id, |candidate| recipe.item(candidate).is_some())?;
    recipe.add_item(item_id.clone(), oil_id);
    recipe.set_item_percentage(&item_id, percentage);

    validate_recipe(&recipe).with_context(|| format!("invalid recipe \"{}\"", recipe.name))?;
    store.upsert_recipe(&recipe)?;

    if ctx.json {
        output_json(&recipe);
    } else if !ctx.quiet {
        println!("Added {oil_id} at {percentage}% as {item_id}");
    }
    Ok(())
}

fn remove_oil(ctx: &RuntimeContext, recipe_id: &str, item_id: &str) -> Result<()> {
    let store = ctx.open_store()?;
    let mut recipe = store
        .get_recipe(recipe_id)
        .with_context(|| format!("failed to load recipe {recipe_id}"))?;

    if !recipe.remove_item(item_id) {
        bail!("recipe {recipe_id} has no item {item_id}");
    }
    store.upsert_recipe(&recipe)?;

    if !ctx.quiet {
        println!("Removed item: {item_id}");
    }
    Ok(())
}

/// Applies the optional settings flags shared by `new` and `set`.
///
/// Changing the fat mass goes through [`Recipe::set_total_fat_weight`] so
/// every item's cached weight stays consistent.
fn apply_settings(recipe: &mut Recipe, settings: &RecipeSettings) -> Result<()> {
    if let Some(fat) = settings.total_fat_weight {
        recipe.set_total_fat_weight(fat);
    }
    if let Some(super_fat) = settings.super_fat {
        recipe.super_fat = super_fat;
    }
    if let Some(water) = settings.water_ratio {
        recipe.water_ratio = water;
    }
    if let Some(ref lye) = settings.lye_type {
        recipe.lye_type = lye.parse::<LyeType>()?;
    }
    if let Some(ratio) = settings.ratio_koh {
        recipe.ratio_koh = Some(ratio);
    }
    if let Some(ref notes) = settings.notes {
        recipe.notes = Some(notes.clone());
    }
    Ok(())
}

/// Generates a fresh `rcp-` id, trying up to 10 nonces to avoid collisions.
fn generate_recipe_id(name: &str, exists: impl Fn(&str) -> bool) -> Result<String> {
    let now = Utc::now();
    for nonce in 0..10 {
        let candidate = idgen::generate_record_id("rcp", name, now, nonce);
        if !exists(&candidate) {
            return Ok(candidate);
        }
    }
    bail!("failed to generate unique ID after 10 attempts");
}

/// Generates a fresh `itm-` id unique within the recipe.
fn generate_item_id(oil_id: &str, exists: impl Fn(&str) -> bool) -> Result<String> {
    let now = Utc::now();
    for nonce in 0..10 {
        let candidate = idgen::generate_record_id("itm", oil_id, now, nonce);
        if !exists(&candidate) {
            return Ok(candidate);
        }
    }
    bail!("failed to generate unique ID after 10 attempts");
}
