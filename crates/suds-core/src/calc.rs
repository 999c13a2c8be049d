//! The formulation engine.
//!
//! [`calculate`] turns a [`Recipe`] and an [`OilCatalog`] into a
//! [`CalculationResult`]: alkali, water, and fragrance masses plus the
//! weighted quality indices. It is a total function -- every anomaly in the
//! input becomes an entry in `warnings`, never an error. Callers are
//! expected to re-run it on every edit; it is pure and linear in the number
//! of recipe items.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enums::LyeType;
use crate::oil::OilCatalog;
use crate::recipe::Recipe;

/// Molar-mass ratio KOH/NaOH, used to derive a KOH SAP value from a
/// custom NaOH one.
pub const KOH_CONVERSION_FACTOR: f64 = 1.4025;

/// Tolerance in percentage points for the sum-to-100% check.
pub const PERCENTAGE_EPSILON: f64 = 0.1;

/// Grams of each alkali required.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LyeAmount {
    pub naoh: f64,
    pub koh: f64,
}

/// The engine's output. A transient value: recomputed on every read, never
/// persisted, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// Alkali masses in grams, rounded to 2 decimals.
    pub lye_amount: LyeAmount,

    /// Liquid mass in grams, rounded to 2 decimals.
    pub water_amount: f64,

    /// Scent mass in grams, rounded to 2 decimals.
    pub fragrance_amount: f64,

    /// Fat + water + lye + fragrance, rounded to 2 decimals.
    pub total_weight: f64,

    /// Weighted iodine value across items, rounded to nearest integer.
    pub iodine: i32,

    /// Weighted INS value across items, rounded to nearest integer.
    pub ins: i32,

    /// Per-item issues in item order, then aggregate issues.
    pub warnings: Vec<String>,

    /// `true` iff `warnings` is empty.
    pub is_valid: bool,
}

/// Computes the formulation for a recipe against an oil catalog.
///
/// Single pass over the items, then fixed aggregate steps. An item whose
/// oil id does not resolve contributes to nothing -- not the lye totals,
/// not the indices, and not the percentage sum used for the 100% check.
pub fn calculate(recipe: &Recipe, oils: &OilCatalog) -> CalculationResult {
    let mut total_naoh_needed = 0.0;
    let mut total_koh_needed = 0.0;
    let mut current_total_percentage = 0.0;
    let mut weighted_iodine = 0.0;
    let mut weighted_ins = 0.0;
    let mut warnings: Vec<String> = Vec::new();

    for item in &recipe.items {
        let Some(oil) = oils.get(&item.oil_id) else {
            warnings.push(format!("Oil with ID {} not found.", item.oil_id));
            continue;
        };

        current_total_percentage += item.percentage;

        let item_weight = Recipe::item_weight(recipe.total_fat_weight, item.percentage);

        // SAP selection: an active custom override supplies the NaOH value
        // directly and derives the KOH value from it below.
        let custom_sap = if item.is_custom_sap {
            item.custom_sap_naoh
        } else {
            None
        };
        let sap_naoh = custom_sap.or(oil.sap_naoh).unwrap_or(0.0);
        let mut sap_koh = oil.sap_koh.unwrap_or(0.0);

        if !item.is_custom_sap && oil.has_missing_sap() {
            warnings.push(format!(
                "Oil \"{}\" has missing SAP values. Treated as 0.",
                oil.name
            ));
        }

        if let Some(custom) = custom_sap {
            sap_koh = custom * KOH_CONVERSION_FACTOR;
        }

        // Lye requirement for this item at 0% superfat.
        match recipe.lye_type {
            LyeType::NaOh => total_naoh_needed += item_weight * sap_naoh,
            LyeType::Koh => total_koh_needed += item_weight * sap_koh,
            LyeType::Mixed => {
                let koh_ratio = recipe.ratio_koh.unwrap_or(0.0) / 100.0;
                let naoh_ratio = 1.0 - koh_ratio;
                total_naoh_needed += item_weight * sap_naoh * naoh_ratio;
                total_koh_needed += item_weight * sap_koh * koh_ratio;
            }
        }

        // Indices use the KOH SAP value independent of the recipe's lye
        // choice, so INS stays a property of the oil blend.
        let iodine_value = oil.iodine.unwrap_or(0.0);
        let ins_value = sap_koh * 1000.0 - iodine_value;

        weighted_iodine += iodine_value * item.percentage / 100.0;
        weighted_ins += ins_value * item.percentage / 100.0;
    }

    if (current_total_percentage - 100.0).abs() > PERCENTAGE_EPSILON {
        warnings.push(format!(
            "Sum of oils is {current_total_percentage:.1}% (should be 100%)."
        ));
    }

    // Superfat: leave this fraction of the fat unsaponified.
    let super_fat_factor = 1.0 - recipe.super_fat / 100.0;
    total_naoh_needed *= super_fat_factor;
    total_koh_needed *= super_fat_factor;

    let water_amount = recipe.total_fat_weight * recipe.water_ratio / 100.0;

    let fragrance_amount = match &recipe.fragrance {
        Some(f) if f.percentage > 0.0 => recipe.total_fat_weight * f.percentage / 100.0,
        _ => 0.0,
    };

    let total_weight = recipe.total_fat_weight
        + water_amount
        + total_naoh_needed
        + total_koh_needed
        + fragrance_amount;

    // Rounding happens only here, over the full-precision sums.
    let is_valid = warnings.is_empty();
    CalculationResult {
        lye_amount: LyeAmount {
            naoh: round2(total_naoh_needed),
            koh: round2(total_koh_needed),
        },
        water_amount: round2(water_amount),
        fragrance_amount: round2(fragrance_amount),
        total_weight: round2(total_weight),
        iodine: weighted_iodine.round() as i32,
        ins: weighted_ins.round() as i32,
        warnings,
        is_valid,
    }
}

/// Rounds to 2 decimal places, half away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl fmt::Display for CalculationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Formulation ===")?;
        if self.lye_amount.naoh > 0.0 {
            writeln!(f, "  NaOH:      {:.2} g", self.lye_amount.naoh)?;
        }
        if self.lye_amount.koh > 0.0 {
            writeln!(f, "  KOH:       {:.2} g", self.lye_amount.koh)?;
        }
        writeln!(f, "  Water:     {:.2} g", self.water_amount)?;
        if self.fragrance_amount > 0.0 {
            writeln!(f, "  Fragrance: {:.2} g", self.fragrance_amount)?;
        }
        writeln!(f, "  Total:     {:.2} g", self.total_weight)?;
        writeln!(f)?;
        writeln!(f, "Quality indices:")?;
        writeln!(f, "  Iodine: {}", self.iodine)?;
        writeln!(f, "  INS:    {}", self.ins)?;

        if !self.warnings.is_empty() {
            writeln!(f)?;
            writeln!(f, "Warnings:")?;
            for warning in &self.warnings {
                writeln!(f, "  ! {warning}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oil::Oil;
    use crate::recipe::{RecipeFragrance, RecipeItem};
    use pretty_assertions::assert_eq;

    fn test_oils() -> OilCatalog {
        OilCatalog::from(vec![
            Oil {
                sap_naoh: Some(0.134),
                sap_koh: Some(0.188),
                iodine: Some(84.0),
                ..Oil::new("1", "Olive Oil")
            },
            Oil {
                sap_naoh: Some(0.183),
                sap_koh: Some(0.257),
                iodine: Some(10.0),
                ..Oil::new("2", "Coconut Oil")
            },
        ])
    }

    fn item(oil_id: &str, percentage: f64) -> RecipeItem {
        RecipeItem {
            percentage,
            ..RecipeItem::new(format!("item-{oil_id}"), oil_id)
        }
    }

    fn base_recipe() -> Recipe {
        let mut recipe = Recipe::new("test", "Test");
        recipe.items = vec![item("1", 100.0)];
        recipe
    }

    #[test]
    fn naoh_recipe_with_superfat() {
        // 500 g * 0.134 = 67 g pure NaOH, minus 5% superfat = 63.65 g.
        let recipe = base_recipe();
        let result = calculate(&recipe, &test_oils());

        assert_eq!(result.lye_amount.naoh, 63.65);
        assert_eq!(result.lye_amount.koh, 0.0);
        assert_eq!(result.water_amount, 165.0);
        assert!(result.is_valid);
    }

    #[test]
    fn koh_recipe_without_superfat() {
        let mut recipe = base_recipe();
        recipe.lye_type = LyeType::Koh;
        recipe.super_fat = 0.0;
        recipe.water_ratio = 30.0;

        let result = calculate(&recipe, &test_oils());

        assert_eq!(result.lye_amount.koh, 94.0);
        assert_eq!(result.lye_amount.naoh, 0.0);
        assert_eq!(result.water_amount, 150.0);
    }

    #[test]
    fn mixed_lye_splits_by_ratio() {
        let mut recipe = base_recipe();
        recipe.lye_type = LyeType::Mixed;
        recipe.ratio_koh = Some(50.0);
        recipe.super_fat = 0.0;
        recipe.total_fat_weight = 100.0;

        let result = calculate(&recipe, &test_oils());

        assert!((result.lye_amount.naoh - 6.7).abs() < 0.1);
        assert!((result.lye_amount.koh - 9.4).abs() < 0.1);
    }

    #[test]
    fn mixed_lye_without_ratio_is_all_naoh() {
        let mut recipe = base_recipe();
        recipe.lye_type = LyeType::Mixed;
        recipe.ratio_koh = None;
        recipe.super_fat = 0.0;

        let result = calculate(&recipe, &test_oils());

        assert_eq!(result.lye_amount.naoh, 67.0);
        assert_eq!(result.lye_amount.koh, 0.0);
    }

    #[test]
    fn water_derives_from_fat_weight_not_items() {
        let mut recipe = base_recipe();
        recipe.items.clear();

        let result = calculate(&recipe, &test_oils());
        assert_eq!(result.water_amount, 165.0);
    }

    #[test]
    fn percentage_imbalance_warns() {
        let mut recipe = base_recipe();
        recipe.items = vec![item("1", 90.0)];

        let result = calculate(&recipe, &test_oils());

        assert!(!result.is_valid);
        assert!(
            result
                .warnings
                .iter()
                .any(|w| w == "Sum of oils is 90.0% (should be 100%).")
        );
    }

    #[test]
    fn percentage_within_tolerance_passes() {
        let mut recipe = base_recipe();
        recipe.items = vec![item("1", 50.05), item("2", 50.0)];

        let result = calculate(&recipe, &test_oils());
        assert!(result.is_valid, "warnings: {:?}", result.warnings);
    }

    #[test]
    fn unresolved_oil_is_excluded_from_every_sum() {
        // The ghost item must not count toward the percentage sum either,
        // so a remaining 100% blend stays valid apart from the not-found
        // warning itself.
        let mut recipe = base_recipe();
        recipe.items = vec![item("ghost", 50.0), item("1", 100.0)];
        recipe.super_fat = 0.0;

        let result = calculate(&recipe, &test_oils());

        assert_eq!(result.warnings, vec!["Oil with ID ghost not found."]);
        assert_eq!(result.lye_amount.naoh, 67.0);
        assert_eq!(result.iodine, 84);
    }

    #[test]
    fn missing_sap_values_warn_and_count_as_zero() {
        let oils = OilCatalog::from(vec![Oil::new("draft", "Draft Oil")]);
        let mut recipe = base_recipe();
        recipe.items = vec![item("draft", 100.0)];

        let result = calculate(&recipe, &oils);

        assert_eq!(result.lye_amount.naoh, 0.0);
        assert!(
            result
                .warnings
                .contains(&"Oil \"Draft Oil\" has missing SAP values. Treated as 0.".to_string())
        );
    }

    #[test]
    fn custom_sap_overrides_oil_and_derives_koh() {
        let mut recipe = base_recipe();
        recipe.lye_type = LyeType::Koh;
        recipe.super_fat = 0.0;
        recipe.items[0].is_custom_sap = true;
        recipe.items[0].custom_sap_naoh = Some(0.2);

        let result = calculate(&recipe, &test_oils());

        // Derived KOH SAP: 0.2 * 1.4025 = 0.2805; 500 g -> 140.25 g.
        assert_eq!(result.lye_amount.koh, 140.25);
    }

    #[test]
    fn custom_sap_suppresses_missing_sap_warning() {
        let oils = OilCatalog::from(vec![Oil::new("draft", "Draft Oil")]);
        let mut recipe = base_recipe();
        recipe.super_fat = 0.0;
        recipe.items = vec![RecipeItem {
            percentage: 100.0,
            is_custom_sap: true,
            custom_sap_naoh: Some(0.134),
            ..RecipeItem::new("i1", "draft")
        }];

        let result = calculate(&recipe, &oils);

        assert!(result.is_valid, "warnings: {:?}", result.warnings);
        assert_eq!(result.lye_amount.naoh, 67.0);
    }

    #[test]
    fn fragrance_adds_mass_but_not_lye() {
        let mut recipe = base_recipe();
        recipe.super_fat = 0.0;
        recipe.fragrance = Some(RecipeFragrance {
            percentage: 3.0,
            kind: crate::enums::FragranceKind::Essential,
            name: None,
        });

        let result = calculate(&recipe, &test_oils());

        assert_eq!(result.fragrance_amount, 15.0);
        assert_eq!(result.lye_amount.naoh, 67.0);
        // 500 fat + 165 water + 67 lye + 15 fragrance
        assert_eq!(result.total_weight, 747.0);
    }

    #[test]
    fn zero_percentage_fragrance_is_ignored() {
        let mut recipe = base_recipe();
        recipe.fragrance = Some(RecipeFragrance {
            percentage: 0.0,
            kind: crate::enums::FragranceKind::None,
            name: None,
        });

        let result = calculate(&recipe, &test_oils());
        assert_eq!(result.fragrance_amount, 0.0);
    }

    #[test]
    fn indices_are_weighted_over_the_blend() {
        let mut recipe = base_recipe();
        recipe.items = vec![item("1", 50.0), item("2", 50.0)];

        let result = calculate(&recipe, &test_oils());

        // iodine: 84*0.5 + 10*0.5 = 47
        assert_eq!(result.iodine, 47);
        // ins: (188-84)*0.5 + (257-10)*0.5 = 52 + 123.5 = 175.5 -> 176
        assert_eq!(result.ins, 176);
    }

    #[test]
    fn indices_ignore_lye_type() {
        let mut naoh_recipe = base_recipe();
        naoh_recipe.items = vec![item("1", 50.0), item("2", 50.0)];
        let mut koh_recipe = naoh_recipe.clone();
        koh_recipe.lye_type = LyeType::Koh;

        let oils = test_oils();
        let a = calculate(&naoh_recipe, &oils);
        let b = calculate(&koh_recipe, &oils);

        assert_eq!(a.iodine, b.iodine);
        assert_eq!(a.ins, b.ins);
    }

    #[test]
    fn stale_item_weight_does_not_affect_result() {
        let mut recipe = base_recipe();
        recipe.items[0].weight = 9999.0;

        let fresh = base_recipe();
        assert_eq!(calculate(&recipe, &test_oils()), calculate(&fresh, &test_oils()));
    }

    #[test]
    fn calculate_is_idempotent() {
        let recipe = base_recipe();
        let oils = test_oils();

        let first = calculate(&recipe, &oils);
        let second = calculate(&recipe, &oils);

        assert_eq!(first, second);
    }

    #[test]
    fn result_serializes_with_camel_case_keys() {
        let result = calculate(&base_recipe(), &test_oils());
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"lyeAmount\""));
        assert!(json.contains("\"waterAmount\""));
        assert!(json.contains("\"isValid\":true"));
    }

    #[test]
    fn display_lists_warnings() {
        let mut recipe = base_recipe();
        recipe.items = vec![item("ghost", 100.0)];

        let rendered = calculate(&recipe, &test_oils()).to_string();
        assert!(rendered.contains("Oil with ID ghost not found."));
    }
}
