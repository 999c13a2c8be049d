//! Seed catalogs for a fresh store.

use crate::enums::FragranceKind;
use crate::oil::Oil;
use crate::recipe::Fragrance;

fn oil(id: &str, name: &str, sap_naoh: f64, sap_koh: f64, iodine: f64) -> Oil {
    Oil {
        sap_naoh: Some(sap_naoh),
        sap_koh: Some(sap_koh),
        iodine: Some(iodine),
        ..Oil::new(id, name)
    }
}

/// Common soapmaking fats with published SAP and iodine values.
pub fn default_oils() -> Vec<Oil> {
    vec![
        oil("olive", "Olive Oil", 0.134, 0.188, 84.0),
        oil("coconut", "Coconut Oil", 0.183, 0.257, 10.0),
        oil("palm", "Palm Oil", 0.141, 0.199, 53.0),
        oil("castor", "Castor Oil", 0.128, 0.180, 86.0),
        oil("shea", "Shea Butter", 0.128, 0.179, 59.0),
        oil("cocoa", "Cocoa Butter", 0.137, 0.193, 37.0),
        oil("sunflower", "Sunflower Oil", 0.134, 0.189, 133.0),
        oil("rapeseed", "Rapeseed Oil", 0.124, 0.175, 108.0),
    ]
}

/// Stock fragrance library.
pub fn default_fragrances() -> Vec<Fragrance> {
    vec![
        Fragrance {
            id: "lavender_eo".into(),
            name: "Lavender (essential oil)".into(),
            kind: FragranceKind::Essential,
            notes: Some("Classic, calming. Holds up well in soap.".into()),
        },
        Fragrance {
            id: "lemongrass_eo".into(),
            name: "Lemongrass (essential oil)".into(),
            kind: FragranceKind::Essential,
            notes: Some("Fresh, citrusy. Accelerates trace.".into()),
        },
        Fragrance {
            id: "orange_eo".into(),
            name: "Orange 10-fold (essential oil)".into(),
            kind: FragranceKind::Essential,
            notes: Some("Volatile; dose high or anchor with a fixative.".into()),
        },
        Fragrance {
            id: "generic_fo".into(),
            name: "Fragrance oil (generic)".into(),
            kind: FragranceKind::FragranceOil,
            notes: Some("Check the manufacturer's skin-safe usage rate.".into()),
        },
    ]
}
