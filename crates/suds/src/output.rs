//! Output formatting helpers for the `suds` CLI.

use std::io::{self, Write};

use serde::Serialize;

use suds_core::oil::{Oil, OilCatalog};
use suds_core::recipe::Recipe;

/// Print a value as pretty-printed JSON to stdout.
///
/// Terminates the process with exit code 1 if serialization fails.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Formats an optional numeric cell, `-` when absent.
fn opt_cell(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{v:.precision$}"),
        None => "-".to_string(),
    }
}

/// Prints the oil catalog as a table.
pub fn print_oil_list(oils: &OilCatalog) {
    if oils.is_empty() {
        println!("No oils in the catalog.");
        return;
    }
    println!(
        "{:<16} {:<24} {:>8} {:>8} {:>7} {:>5}",
        "ID", "NAME", "SAP NaOH", "SAP KOH", "IODINE", "INS"
    );
    for oil in oils {
        println!(
            "{:<16} {:<24} {:>8} {:>8} {:>7} {:>5}",
            oil.id,
            oil.name,
            opt_cell(oil.sap_naoh, 3),
            opt_cell(oil.sap_koh, 3),
            opt_cell(oil.iodine, 0),
            opt_cell(oil.ins(), 0),
        );
    }
}

/// Prints one oil in detail.
pub fn print_oil(oil: &Oil) {
    println!("{} ({})", oil.name, oil.id);
    println!("  SAP NaOH: {}", opt_cell(oil.sap_naoh, 3));
    println!("  SAP KOH:  {}", opt_cell(oil.sap_koh, 3));
    println!("  Iodine:   {}", opt_cell(oil.iodine, 0));
    println!("  INS:      {}", opt_cell(oil.ins(), 0));
    if let Some(ref notes) = oil.notes {
        println!("  Notes:    {}", notes);
    }
    if oil.has_missing_sap() {
        println!("  (draft: missing SAP values)");
    }
}

/// Prints the recipe list, one line per recipe.
pub fn print_recipe_list(recipes: &[Recipe]) {
    if recipes.is_empty() {
        println!("No stored recipes.");
        return;
    }
    println!(
        "{:<16} {:<24} {:>8} {:>6} {:<20}",
        "ID", "NAME", "FAT (g)", "LYE", "CREATED"
    );
    for recipe in recipes {
        println!(
            "{:<16} {:<24} {:>8} {:>6} {:<20}",
            recipe.id,
            recipe.name,
            format!("{:.0}", recipe.total_fat_weight),
            recipe.lye_type.as_str(),
            recipe.created.format("%Y-%m-%d %H:%M"),
        );
    }
}

/// Prints a recipe's settings and item lines.
pub fn print_recipe(recipe: &Recipe, oils: &OilCatalog) {
    println!("{} ({})", recipe.name, recipe.id);
    println!("  Created:   {}", recipe.created.format("%Y-%m-%d %H:%M"));
    println!("  Total fat: {:.0} g", recipe.total_fat_weight);
    println!("  Superfat:  {}%", recipe.super_fat);
    println!("  Water:     {}%", recipe.water_ratio);
    print!("  Lye:       {}", recipe.lye_type);
    if let Some(ratio) = recipe.ratio_koh {
        print!(" ({ratio}% KOH)");
    }
    println!();
    if let Some(ref fragrance) = recipe.fragrance {
        println!(
            "  Fragrance: {} ({}%, {})",
            fragrance.name.as_deref().unwrap_or("unnamed"),
            fragrance.percentage,
            fragrance.kind
        );
    }
    if let Some(ref notes) = recipe.notes {
        println!("  Notes:     {}", notes);
    }

    if recipe.items.is_empty() {
        println!("  (no oils yet)");
        return;
    }
    println!();
    println!("  {:<16} {:<24} {:>6} {:>10}", "ITEM", "OIL", "%", "WEIGHT");
    for item in &recipe.items {
        let oil_name = oils
            .get(&item.oil_id)
            .map(|o| o.name.as_str())
            .unwrap_or("<missing oil>");
        println!(
            "  {:<16} {:<24} {:>6.1} {:>8.1} g",
            item.id, oil_name, item.percentage, item.weight
        );
    }
}
