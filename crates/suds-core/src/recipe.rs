//! Recipe -- the central formulation request of the suds system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{FragranceKind, LyeType};

/// One line of a recipe, binding an oil to its share of the fat mass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeItem {
    /// Unique within the recipe.
    #[serde(default)]
    pub id: String,

    /// Weak reference into the oil catalog. The oil may no longer exist;
    /// the engine flags such items and excludes them from every sum.
    #[serde(default)]
    pub oil_id: String,

    /// Share of total fat mass, 0-100.
    #[serde(default)]
    pub percentage: f64,

    /// Cached derived mass in grams (`total_fat_weight * percentage / 100`).
    /// Never the source of truth -- `percentage` is. The engine recomputes
    /// this internally, so a stale value can only mislead a display.
    #[serde(default)]
    pub weight: f64,

    /// When set, `custom_sap_naoh` overrides the referenced oil's SAP data.
    #[serde(default)]
    pub is_custom_sap: bool,

    /// Item-supplied NaOH saponification value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_sap_naoh: Option<f64>,
}

impl RecipeItem {
    /// Creates an item for the given oil at 0%.
    pub fn new(id: impl Into<String>, oil_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            oil_id: oil_id.into(),
            percentage: 0.0,
            weight: 0.0,
            is_custom_sap: false,
            custom_sap_naoh: None,
        }
    }
}

/// Scent settings embedded in a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeFragrance {
    /// Percentage of total fat mass allocated to scent.
    pub percentage: f64,

    #[serde(rename = "type", default)]
    pub kind: FragranceKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A catalog entry in the fragrance library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragrance {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "type", default)]
    pub kind: FragranceKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A full formulation request.
///
/// `id`, `name`, `created`, and `notes` are bookkeeping only; the engine
/// reads the numeric fields and `items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Creation timestamp, RFC 3339 on the wire.
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,

    /// Total mass in grams of all fats combined -- the scaling basis for
    /// every derived quantity.
    #[serde(default)]
    pub total_fat_weight: f64,

    /// Percentage of fat intentionally left unsaponified (0-100).
    #[serde(default)]
    pub super_fat: f64,

    /// Percentage of `total_fat_weight` used as liquid.
    #[serde(default)]
    pub water_ratio: f64,

    #[serde(default)]
    pub lye_type: LyeType,

    /// Share of the alkali provided as KOH when `lye_type` is `Mixed`
    /// (0 = all NaOH, 100 = all KOH). Ignored otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio_koh: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragrance: Option<RecipeFragrance>,

    /// Ordered for display; order is irrelevant to the calculation.
    #[serde(default)]
    pub items: Vec<RecipeItem>,
}

impl Recipe {
    /// Creates a recipe with the stock defaults: 500 g fat, 5% superfat,
    /// 33% water ratio, NaOH, no items.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            created: Utc::now(),
            total_fat_weight: 500.0,
            super_fat: 5.0,
            water_ratio: 33.0,
            lye_type: LyeType::NaOh,
            ratio_koh: None,
            notes: None,
            fragrance: None,
            items: Vec::new(),
        }
    }

    /// The derived item mass: `total_fat_weight * percentage / 100`.
    pub fn item_weight(total_fat_weight: f64, percentage: f64) -> f64 {
        total_fat_weight * percentage / 100.0
    }

    /// Sets the total fat mass and recomputes every item's cached weight.
    pub fn set_total_fat_weight(&mut self, grams: f64) {
        self.total_fat_weight = grams;
        for item in &mut self.items {
            item.weight = Self::item_weight(grams, item.percentage);
        }
    }

    /// Sets one item's percentage and recomputes only that item's cached
    /// weight. Returns `false` if no item has the given id.
    pub fn set_item_percentage(&mut self, item_id: &str, percentage: f64) -> bool {
        let total = self.total_fat_weight;
        match self.items.iter_mut().find(|i| i.id == item_id) {
            Some(item) => {
                item.percentage = percentage;
                item.weight = Self::item_weight(total, percentage);
                true
            }
            None => false,
        }
    }

    /// Appends a new item for the given oil at 0% / 0 g.
    pub fn add_item(&mut self, item_id: impl Into<String>, oil_id: impl Into<String>) {
        self.items.push(RecipeItem::new(item_id, oil_id));
    }

    /// Removes the item with the given id. Returns `true` if one was removed.
    pub fn remove_item(&mut self, item_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != item_id);
        self.items.len() != before
    }

    /// Looks up an item by id.
    pub fn item(&self, item_id: &str) -> Option<&RecipeItem> {
        self.items.iter().find(|i| i.id == item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_recipe_has_stock_defaults() {
        let recipe = Recipe::new("r1", "My Recipe");
        assert_eq!(recipe.total_fat_weight, 500.0);
        assert_eq!(recipe.super_fat, 5.0);
        assert_eq!(recipe.water_ratio, 33.0);
        assert_eq!(recipe.lye_type, LyeType::NaOh);
        assert!(recipe.items.is_empty());
    }

    #[test]
    fn set_total_fat_weight_recomputes_all_item_weights() {
        let mut recipe = Recipe::new("r1", "Test");
        recipe.add_item("i1", "olive");
        recipe.add_item("i2", "coconut");
        recipe.set_item_percentage("i1", 70.0);
        recipe.set_item_percentage("i2", 30.0);

        recipe.set_total_fat_weight(1000.0);

        assert_eq!(recipe.item("i1").unwrap().weight, 700.0);
        assert_eq!(recipe.item("i2").unwrap().weight, 300.0);
    }

    #[test]
    fn set_item_percentage_touches_only_that_item() {
        let mut recipe = Recipe::new("r1", "Test");
        recipe.add_item("i1", "olive");
        recipe.add_item("i2", "coconut");
        recipe.set_item_percentage("i1", 80.0);

        assert_eq!(recipe.item("i1").unwrap().weight, 400.0);
        assert_eq!(recipe.item("i2").unwrap().weight, 0.0);
    }

    #[test]
    fn set_item_percentage_unknown_id_is_noop() {
        let mut recipe = Recipe::new("r1", "Test");
        assert!(!recipe.set_item_percentage("missing", 50.0));
    }

    #[test]
    fn remove_item() {
        let mut recipe = Recipe::new("r1", "Test");
        recipe.add_item("i1", "olive");
        assert!(recipe.remove_item("i1"));
        assert!(!recipe.remove_item("i1"));
        assert!(recipe.items.is_empty());
    }

    #[test]
    fn created_roundtrips_as_rfc3339() {
        let recipe = Recipe::new("r1", "Test");
        let json = serde_json::to_string(&recipe).unwrap();
        let back: Recipe = serde_json::from_str(&json).unwrap();
        assert_eq!(back.created, recipe.created);
    }

    #[test]
    fn wire_field_names_are_camel_case() {
        let recipe = Recipe::new("r1", "Test");
        let json = serde_json::to_string(&recipe).unwrap();
        assert!(json.contains("\"totalFatWeight\""));
        assert!(json.contains("\"superFat\""));
        assert!(json.contains("\"waterRatio\""));
        assert!(json.contains("\"lyeType\":\"NaOH\""));
    }

    #[test]
    fn fragrance_kind_uses_type_key() {
        let fragrance = RecipeFragrance {
            percentage: 3.0,
            kind: FragranceKind::Essential,
            name: Some("Lavender".into()),
        };
        let json = serde_json::to_string(&fragrance).unwrap();
        assert!(json.contains("\"type\":\"essential\""));
    }
}
