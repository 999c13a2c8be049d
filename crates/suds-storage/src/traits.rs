//! The [`Storage`] trait -- the persistence boundary the rest of the system
//! programs against.
//!
//! The store is a key-value document store: each catalog persists as one
//! JSON array under a string key. Implementations must reconstruct recipe
//! `created` timestamps as proper date values on read.

use suds_core::oil::{Oil, OilCatalog};
use suds_core::recipe::{Fragrance, Recipe};

use crate::error::Result;

/// Persistence boundary for oils, recipes, and the fragrance library.
pub trait Storage {
    // -- Oils ----------------------------------------------------------------

    /// Loads the full oil catalog. An uninitialized key reads as empty.
    fn load_oils(&self) -> Result<OilCatalog>;

    /// Replaces the stored oil catalog.
    fn save_oils(&self, oils: &OilCatalog) -> Result<()>;

    /// Loads a single oil by id.
    fn get_oil(&self, id: &str) -> Result<Oil>;

    /// Inserts or replaces one oil, keyed by id.
    fn upsert_oil(&self, oil: &Oil) -> Result<()>;

    /// Deletes one oil. Fails with `NotFound` if it does not exist.
    fn delete_oil(&self, id: &str) -> Result<()>;

    // -- Recipes -------------------------------------------------------------

    /// Loads all recipes. An uninitialized key reads as empty.
    fn load_recipes(&self) -> Result<Vec<Recipe>>;

    /// Replaces the stored recipe list.
    fn save_recipes(&self, recipes: &[Recipe]) -> Result<()>;

    /// Loads a single recipe by id.
    fn get_recipe(&self, id: &str) -> Result<Recipe>;

    /// Inserts or replaces one recipe, keyed by id.
    fn upsert_recipe(&self, recipe: &Recipe) -> Result<()>;

    /// Deletes one recipe. Fails with `NotFound` if it does not exist.
    fn delete_recipe(&self, id: &str) -> Result<()>;

    // -- Fragrance library ---------------------------------------------------

    /// Loads the fragrance library. An uninitialized key reads as empty.
    fn load_fragrances(&self) -> Result<Vec<Fragrance>>;

    /// Replaces the stored fragrance library.
    fn save_fragrances(&self, fragrances: &[Fragrance]) -> Result<()>;

    // -- Backup import -------------------------------------------------------

    /// Merges a backup into the store: records whose id already exists are
    /// overwritten, everything else is appended. Never removes local data.
    fn import_backup(&self, oils: &[Oil], recipes: &[Recipe]) -> Result<()>;

    // -- Metadata ------------------------------------------------------------

    /// Reads a metadata value (e.g. the stored sync key).
    fn get_meta(&self, key: &str) -> Result<String>;

    /// Writes a metadata value.
    fn set_meta(&self, key: &str, value: &str) -> Result<()>;

    // -- Lifecycle -----------------------------------------------------------

    /// Releases underlying resources.
    fn close(&self) -> Result<()>;
}
