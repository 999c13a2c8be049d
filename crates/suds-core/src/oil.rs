//! Oil -- a fat with saponification properties, and the catalog holding them.

use serde::{Deserialize, Serialize};

/// A named fat/oil with its saponification data.
///
/// SAP values are grams of pure alkali needed to saponify one gram of this
/// oil. Both are optional: an oil may be stored as an incomplete draft, and
/// the formulation engine flags (rather than rejects) such oils wherever a
/// recipe uses them. Absent and present-but-zero are distinct states.
///
/// Wire field names are camelCase so records round-trip with existing
/// exports (`sapNaoh`, `sapKoh`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Oil {
    /// Opaque stable identifier, unique within a catalog.
    #[serde(default)]
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Grams of NaOH to saponify 1 g of this oil.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sap_naoh: Option<f64>,

    /// Grams of KOH to saponify 1 g of this oil.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sap_koh: Option<f64>,

    /// Iodine value (g I2 absorbed per 100 g oil).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iodine: Option<f64>,

    /// Free text, not used in calculation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Oil {
    /// Creates an oil with the given id and name and no saponification data.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sap_naoh: None,
            sap_koh: None,
            iodine: None,
            notes: None,
        }
    }

    /// Returns the INS hardness index (`SAP_KOH * 1000 - iodine`), or `None`
    /// when the KOH SAP value is missing. A missing iodine value counts as 0.
    pub fn ins(&self) -> Option<f64> {
        self.sap_koh
            .map(|sap| sap * 1000.0 - self.iodine.unwrap_or(0.0))
    }

    /// Returns `true` if either SAP value is missing.
    pub fn has_missing_sap(&self) -> bool {
        self.sap_naoh.is_none() || self.sap_koh.is_none()
    }
}

/// An ordered set of oils addressable by id.
///
/// Insertion order is preserved (it is the display order upstream).
/// Serializes transparently as a JSON array of oils.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OilCatalog {
    oils: Vec<Oil>,
}

impl OilCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up an oil by id.
    pub fn get(&self, id: &str) -> Option<&Oil> {
        self.oils.iter().find(|o| o.id == id)
    }

    /// Returns `true` if the catalog contains an oil with the given id.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Inserts an oil, replacing any existing oil with the same id in place.
    pub fn upsert(&mut self, oil: Oil) {
        match self.oils.iter_mut().find(|o| o.id == oil.id) {
            Some(existing) => *existing = oil,
            None => self.oils.push(oil),
        }
    }

    /// Removes the oil with the given id. Returns `true` if one was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.oils.len();
        self.oils.retain(|o| o.id != id);
        self.oils.len() != before
    }

    /// Iterates over the oils in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Oil> {
        self.oils.iter()
    }

    /// Number of oils in the catalog.
    pub fn len(&self) -> usize {
        self.oils.len()
    }

    /// Returns `true` if the catalog holds no oils.
    pub fn is_empty(&self) -> bool {
        self.oils.is_empty()
    }

    /// Borrows the underlying slice.
    pub fn as_slice(&self) -> &[Oil] {
        &self.oils
    }

    /// Consumes the catalog, returning the underlying vector.
    pub fn into_vec(self) -> Vec<Oil> {
        self.oils
    }
}

impl From<Vec<Oil>> for OilCatalog {
    fn from(oils: Vec<Oil>) -> Self {
        Self { oils }
    }
}

impl FromIterator<Oil> for OilCatalog {
    fn from_iter<I: IntoIterator<Item = Oil>>(iter: I) -> Self {
        Self {
            oils: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a OilCatalog {
    type Item = &'a Oil;
    type IntoIter = std::slice::Iter<'a, Oil>;

    fn into_iter(self) -> Self::IntoIter {
        self.oils.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn olive() -> Oil {
        Oil {
            sap_naoh: Some(0.134),
            sap_koh: Some(0.188),
            iodine: Some(84.0),
            ..Oil::new("olive", "Olive Oil")
        }
    }

    #[test]
    fn camel_case_wire_format() {
        let json = serde_json::to_string(&olive()).unwrap();
        assert!(json.contains("\"sapNaoh\":0.134"));
        assert!(json.contains("\"sapKoh\":0.188"));
        // Absent options are omitted entirely.
        assert!(!json.contains("notes"));
    }

    #[test]
    fn missing_sap_deserializes_as_none() {
        let oil: Oil = serde_json::from_str(r#"{"id":"x","name":"Draft"}"#).unwrap();
        assert_eq!(oil.sap_naoh, None);
        assert_eq!(oil.sap_koh, None);
        assert!(oil.has_missing_sap());
    }

    #[test]
    fn zero_sap_is_present_not_missing() {
        let oil: Oil = serde_json::from_str(r#"{"id":"x","name":"Odd","sapNaoh":0,"sapKoh":0}"#)
            .unwrap();
        assert_eq!(oil.sap_naoh, Some(0.0));
        assert!(!oil.has_missing_sap());
    }

    #[test]
    fn ins_uses_zero_for_missing_iodine() {
        let mut oil = olive();
        oil.iodine = None;
        assert_eq!(oil.ins(), Some(188.0));
    }

    #[test]
    fn catalog_upsert_replaces_in_place() {
        let mut catalog = OilCatalog::from(vec![olive(), Oil::new("coconut", "Coconut Oil")]);
        let mut updated = olive();
        updated.name = "Olive Oil (pomace)".into();
        catalog.upsert(updated);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("olive").unwrap().name, "Olive Oil (pomace)");
        // Order preserved.
        assert_eq!(catalog.as_slice()[0].id, "olive");
    }

    #[test]
    fn catalog_remove() {
        let mut catalog = OilCatalog::from(vec![olive()]);
        assert!(catalog.remove("olive"));
        assert!(!catalog.remove("olive"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn catalog_serializes_as_plain_array() {
        let catalog = OilCatalog::from(vec![olive()]);
        let json = serde_json::to_string(&catalog).unwrap();
        assert!(json.starts_with('['));
        let back: OilCatalog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, catalog);
    }
}
