//! Record validation rules.
//!
//! These gate create/import paths. The formulation engine never validates --
//! it degrades gracefully and reports anomalies as warnings instead.

use crate::oil::Oil;
use crate::recipe::Recipe;

/// Error type for validation failures.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("name is required")]
    NameRequired,

    #[error("{field} must be a finite number (got {value})")]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field} cannot be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be between 0 and 100 (got {value})")]
    OutOfPercentRange { field: &'static str, value: f64 },

    #[error("total fat weight must be positive (got {0})")]
    NonPositiveFatWeight(f64),
}

/// Validates an oil record.
///
/// SAP and iodine values may be absent (draft oils are legal), but any
/// present value must be finite and non-negative.
pub fn validate_oil(oil: &Oil) -> Result<(), ValidationError> {
    if oil.name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    check_optional_non_negative("sapNaoh", oil.sap_naoh)?;
    check_optional_non_negative("sapKoh", oil.sap_koh)?;
    check_optional_non_negative("iodine", oil.iodine)?;
    Ok(())
}

/// Validates a recipe record.
pub fn validate_recipe(recipe: &Recipe) -> Result<(), ValidationError> {
    if recipe.name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if !recipe.total_fat_weight.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "totalFatWeight",
            value: recipe.total_fat_weight,
        });
    }
    if recipe.total_fat_weight <= 0.0 {
        return Err(ValidationError::NonPositiveFatWeight(recipe.total_fat_weight));
    }
    check_percent_range("superFat", recipe.super_fat)?;
    check_non_negative("waterRatio", recipe.water_ratio)?;
    if let Some(ratio) = recipe.ratio_koh {
        check_percent_range("ratioKoh", ratio)?;
    }
    if let Some(ref fragrance) = recipe.fragrance {
        check_non_negative("fragrance percentage", fragrance.percentage)?;
    }
    for item in &recipe.items {
        check_percent_range("item percentage", item.percentage)?;
        check_optional_non_negative("customSapNaoh", item.custom_sap_naoh)?;
    }
    Ok(())
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field, value });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(())
}

fn check_optional_non_negative(
    field: &'static str,
    value: Option<f64>,
) -> Result<(), ValidationError> {
    match value {
        Some(v) => check_non_negative(field, v),
        None => Ok(()),
    }
}

fn check_percent_range(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field, value });
    }
    if !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::OutOfPercentRange { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::RecipeItem;

    #[test]
    fn valid_oil_passes() {
        let oil = Oil {
            sap_naoh: Some(0.134),
            sap_koh: Some(0.188),
            iodine: Some(84.0),
            ..Oil::new("olive", "Olive Oil")
        };
        assert!(validate_oil(&oil).is_ok());
    }

    #[test]
    fn draft_oil_without_sap_passes() {
        assert!(validate_oil(&Oil::new("x", "Draft")).is_ok());
    }

    #[test]
    fn unnamed_oil_fails() {
        let oil = Oil::new("x", "");
        assert!(matches!(
            validate_oil(&oil),
            Err(ValidationError::NameRequired)
        ));
    }

    #[test]
    fn negative_sap_fails() {
        let oil = Oil {
            sap_naoh: Some(-0.1),
            ..Oil::new("x", "Bad")
        };
        match validate_oil(&oil) {
            Err(ValidationError::Negative { field, .. }) => assert_eq!(field, "sapNaoh"),
            other => panic!("expected Negative, got {:?}", other),
        }
    }

    #[test]
    fn nan_sap_fails() {
        let oil = Oil {
            sap_koh: Some(f64::NAN),
            ..Oil::new("x", "Bad")
        };
        assert!(matches!(
            validate_oil(&oil),
            Err(ValidationError::NotFinite { field: "sapKoh", .. })
        ));
    }

    #[test]
    fn zero_sap_is_valid() {
        let oil = Oil {
            sap_naoh: Some(0.0),
            sap_koh: Some(0.0),
            ..Oil::new("x", "Odd")
        };
        assert!(validate_oil(&oil).is_ok());
    }

    #[test]
    fn valid_recipe_passes() {
        assert!(validate_recipe(&Recipe::new("r", "Test")).is_ok());
    }

    #[test]
    fn zero_fat_weight_fails() {
        let mut recipe = Recipe::new("r", "Test");
        recipe.total_fat_weight = 0.0;
        assert!(matches!(
            validate_recipe(&recipe),
            Err(ValidationError::NonPositiveFatWeight(_))
        ));
    }

    #[test]
    fn superfat_above_100_fails() {
        let mut recipe = Recipe::new("r", "Test");
        recipe.super_fat = 101.0;
        assert!(matches!(
            validate_recipe(&recipe),
            Err(ValidationError::OutOfPercentRange { field: "superFat", .. })
        ));
    }

    #[test]
    fn ratio_koh_out_of_range_fails() {
        let mut recipe = Recipe::new("r", "Test");
        recipe.ratio_koh = Some(150.0);
        assert!(validate_recipe(&recipe).is_err());
    }

    #[test]
    fn item_percentage_out_of_range_fails() {
        let mut recipe = Recipe::new("r", "Test");
        recipe.items.push(RecipeItem {
            percentage: 120.0,
            ..RecipeItem::new("i1", "olive")
        });
        assert!(matches!(
            validate_recipe(&recipe),
            Err(ValidationError::OutOfPercentRange { .. })
        ));
    }
}
