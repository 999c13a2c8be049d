//! Storage backend for the suds system.
//!
//! Provides the [`Storage`] trait and a SQLite implementation
//! ([`SqliteStore`]) that persists each catalog as a JSON array under a
//! string key.

pub mod error;
pub mod sqlite;
pub mod traits;

// Re-exports for convenience.
pub use error::StorageError;
pub use sqlite::SqliteStore;
pub use traits::Storage;

// ---------------------------------------------------------------------------
// Storage trait implementation for SqliteStore
// ---------------------------------------------------------------------------

use suds_core::oil::{Oil, OilCatalog};
use suds_core::recipe::{Fragrance, Recipe};

use crate::error::Result;

impl Storage for SqliteStore {
    fn load_oils(&self) -> Result<OilCatalog> {
        self.load_oils_impl()
    }

    fn save_oils(&self, oils: &OilCatalog) -> Result<()> {
        self.save_oils_impl(oils)
    }

    fn get_oil(&self, id: &str) -> Result<Oil> {
        self.get_oil_impl(id)
    }

    fn upsert_oil(&self, oil: &Oil) -> Result<()> {
        self.upsert_oil_impl(oil)
    }

    fn delete_oil(&self, id: &str) -> Result<()> {
        self.delete_oil_impl(id)
    }

    fn load_recipes(&self) -> Result<Vec<Recipe>> {
        self.load_recipes_impl()
    }

    fn save_recipes(&self, recipes: &[Recipe]) -> Result<()> {
        self.save_recipes_impl(recipes)
    }

    fn get_recipe(&self, id: &str) -> Result<Recipe> {
        self.get_recipe_impl(id)
    }

    fn upsert_recipe(&self, recipe: &Recipe) -> Result<()> {
        self.upsert_recipe_impl(recipe)
    }

    fn delete_recipe(&self, id: &str) -> Result<()> {
        self.delete_recipe_impl(id)
    }

    fn load_fragrances(&self) -> Result<Vec<Fragrance>> {
        self.load_fragrances_impl()
    }

    fn save_fragrances(&self, fragrances: &[Fragrance]) -> Result<()> {
        self.save_fragrances_impl(fragrances)
    }

    fn import_backup(&self, oils: &[Oil], recipes: &[Recipe]) -> Result<()> {
        self.import_backup_impl(oils, recipes)
    }

    fn get_meta(&self, key: &str) -> Result<String> {
        self.get_meta_impl(key)
    }

    fn set_meta(&self, key: &str, value: &str) -> Result<()> {
        self.set_meta_impl(key, value)
    }

    fn close(&self) -> Result<()> {
        // The SQLite connection is closed when the Connection is dropped.
        // The Mutex wrapper ensures thread safety.
        Ok(())
    }
}
