//! [`SqliteStore`] -- SQLite-backed key-value storage implementation.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use suds_core::oil::{Oil, OilCatalog};
use suds_core::recipe::{Fragrance, Recipe};

use crate::error::{Result, StorageError};

/// Storage key holding the oil catalog.
pub const KEY_OILS: &str = "oils";
/// Storage key holding the recipe list.
pub const KEY_RECIPES: &str = "recipes";
/// Storage key holding the fragrance library.
pub const KEY_FRAGRANCES: &str = "fragrances";

/// Schema version written into the `meta` table.
const CURRENT_SCHEMA_VERSION: i32 = 1;

/// DDL executed on every open; each statement is idempotent.
const SCHEMA_STATEMENTS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS records (
        key   TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );",
    "CREATE TABLE IF NOT EXISTS meta (
        key   TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );",
];

/// SQLite-backed implementation of the [`Storage`](crate::traits::Storage)
/// trait.
///
/// Wraps a [`rusqlite::Connection`] in a `Mutex` for thread safety. Each
/// catalog is stored as one JSON array under its key in the `records`
/// table; recipe `created` timestamps round-trip through RFC 3339 strings.
pub struct SqliteStore {
    /// The mutex-protected SQLite connection.
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) a SQLite database at the given path.
    ///
    /// Enables WAL mode, then initialises the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!(?path, "opening SQLite database");

        let conn = Connection::open(path).map_err(|e| {
            StorageError::Connection(format!("failed to open {}: {e}", path.display()))
        })?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.configure_connection()?;
        store.init_schema()?;

        Ok(store)
    }

    /// Opens an in-memory SQLite database (useful for tests).
    pub fn open_in_memory() -> Result<Self> {
        debug!("opening in-memory SQLite database");
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("failed to open in-memory db: {e}")))?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.configure_connection()?;
        store.init_schema()?;

        Ok(store)
    }

    /// Sets connection pragmas (WAL mode, busy timeout).
    fn configure_connection(&self) -> Result<()> {
        let conn = self.lock_conn()?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )
        .map_err(|e| StorageError::Connection(format!("failed to set pragmas: {e}")))?;
        Ok(())
    }

    /// Creates all tables if they do not exist and stamps the schema version.
    fn init_schema(&self) -> Result<()> {
        let conn = self.lock_conn()?;

        // Skip if the schema is already at the current version.
        let version: std::result::Result<i32, _> = conn.query_row(
            "SELECT value FROM meta WHERE key = 'schema_version'",
            [],
            |row| {
                let v: String = row.get(0)?;
                Ok(v.parse::<i32>().unwrap_or(0))
            },
        );
        if let Ok(v) = version {
            if v >= CURRENT_SCHEMA_VERSION {
                debug!(version = v, "schema already at current version, skipping init");
                return Ok(());
            }
        }

        for stmt in SCHEMA_STATEMENTS {
            conn.execute_batch(stmt)
                .map_err(|e| StorageError::Migration {
                    name: "init_schema".into(),
                    reason: e.to_string(),
                })?;
        }

        conn.execute(
            "INSERT OR REPLACE INTO meta (key, value) VALUES ('schema_version', ?1)",
            rusqlite::params![CURRENT_SCHEMA_VERSION.to_string()],
        )
        .map_err(|e| StorageError::Migration {
            name: "schema_version".into(),
            reason: e.to_string(),
        })?;

        info!("schema initialized (version {})", CURRENT_SCHEMA_VERSION);
        Ok(())
    }

    /// Acquires the connection lock.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StorageError::Connection(format!("mutex poisoned: {e}")))
    }

    // -- Record list helpers -------------------------------------------------

    /// Reads the JSON array stored under `key`. A missing key reads as empty.
    fn get_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let conn = self.lock_conn()?;
        get_list_on_conn(&conn, key)
    }

    /// Replaces the JSON array stored under `key`.
    fn set_list<T: Serialize>(&self, key: &str, values: &[T]) -> Result<()> {
        let conn = self.lock_conn()?;
        set_list_on_conn(&conn, key, values)
    }

    // -- Oils ----------------------------------------------------------------

    pub fn load_oils_impl(&self) -> Result<OilCatalog> {
        Ok(OilCatalog::from(self.get_list::<Oil>(KEY_OILS)?))
    }

    pub fn save_oils_impl(&self, oils: &OilCatalog) -> Result<()> {
        debug!(count = oils.len(), "saving oil catalog");
        self.set_list(KEY_OILS, oils.as_slice())
    }

    pub fn get_oil_impl(&self, id: &str) -> Result<Oil> {
        self.load_oils_impl()?
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::not_found("oil", id))
    }

    pub fn upsert_oil_impl(&self, oil: &Oil) -> Result<()> {
        let mut oils = self.load_oils_impl()?;
        oils.upsert(oil.clone());
        self.save_oils_impl(&oils)
    }

    pub fn delete_oil_impl(&self, id: &str) -> Result<()> {
        let mut oils = self.load_oils_impl()?;
        if !oils.remove(id) {
            return Err(StorageError::not_found("oil", id));
        }
        self.save_oils_impl(&oils)
    }

    // -- Recipes -------------------------------------------------------------

    pub fn load_recipes_impl(&self) -> Result<Vec<Recipe>> {
        self.get_list(KEY_RECIPES)
    }

    pub fn save_recipes_impl(&self, recipes: &[Recipe]) -> Result<()> {
        debug!(count = recipes.len(), "saving recipes");
        self.set_list(KEY_RECIPES, recipes)
    }

    pub fn get_recipe_impl(&self, id: &str) -> Result<Recipe> {
        self.load_recipes_impl()?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| StorageError::not_found("recipe", id))
    }

    pub fn upsert_recipe_impl(&self, recipe: &Recipe) -> Result<()> {
        let mut recipes = self.load_recipes_impl()?;
        match recipes.iter_mut().find(|r| r.id == recipe.id) {
            Some(existing) => *existing = recipe.clone(),
            None => recipes.push(recipe.clone()),
        }
        self.save_recipes_impl(&recipes)
    }

    pub fn delete_recipe_impl(&self, id: &str) -> Result<()> {
        let mut recipes = self.load_recipes_impl()?;
        let before = recipes.len();
        recipes.retain(|r| r.id != id);
        if recipes.len() == before {
            return Err(StorageError::not_found("recipe", id));
        }
        self.save_recipes_impl(&recipes)
    }

    // -- Fragrance library ---------------------------------------------------

    pub fn load_fragrances_impl(&self) -> Result<Vec<Fragrance>> {
        self.get_list(KEY_FRAGRANCES)
    }

    pub fn save_fragrances_impl(&self, fragrances: &[Fragrance]) -> Result<()> {
        self.set_list(KEY_FRAGRANCES, fragrances)
    }

    // -- Backup import -------------------------------------------------------

    /// Merge semantics: overwrite on id match, append otherwise. Both
    /// catalogs are written in one transaction.
    pub fn import_backup_impl(&self, oils: &[Oil], recipes: &[Recipe]) -> Result<()> {
        info!(
            oils = oils.len(),
            recipes = recipes.len(),
            "importing backup"
        );
        let mut conn = self.lock_conn()?;
        let tx = conn
            .transaction()
            .map_err(StorageError::Query)?;

        let mut merged_oils = OilCatalog::from(get_list_on_conn::<Oil>(&tx, KEY_OILS)?);
        for oil in oils {
            merged_oils.upsert(oil.clone());
        }
        set_list_on_conn(&tx, KEY_OILS, merged_oils.as_slice())?;

        let mut merged_recipes: Vec<Recipe> = get_list_on_conn(&tx, KEY_RECIPES)?;
        for recipe in recipes {
            match merged_recipes.iter_mut().find(|r| r.id == recipe.id) {
                Some(existing) => *existing = recipe.clone(),
                None => merged_recipes.push(recipe.clone()),
            }
        }
        set_list_on_conn(&tx, KEY_RECIPES, &merged_recipes)?;

        tx.commit().map_err(StorageError::Query)
    }

    // -- Metadata ------------------------------------------------------------

    pub fn get_meta_impl(&self, key: &str) -> Result<String> {
        let conn = self.lock_conn()?;
        conn.query_row(
            "SELECT value FROM meta WHERE key = ?1",
            rusqlite::params![key],
            |row| row.get::<_, String>(0),
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => StorageError::not_found("meta", key),
            other => StorageError::Query(other),
        })
    }

    pub fn set_meta_impl(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.lock_conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO meta (key, value) VALUES (?1, ?2)",
            rusqlite::params![key, value],
        )?;
        Ok(())
    }
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Connection-level helpers (shared with the import transaction)
// ---------------------------------------------------------------------------

fn get_list_on_conn<T: DeserializeOwned>(conn: &Connection, key: &str) -> Result<Vec<T>> {
    let raw: Option<String> = match conn.query_row(
        "SELECT value FROM records WHERE key = ?1",
        rusqlite::params![key],
        |row| row.get(0),
    ) {
        Ok(value) => Some(value),
        Err(rusqlite::Error::QueryReturnedNoRows) => None,
        Err(e) => return Err(StorageError::Query(e)),
    };

    match raw {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}

fn set_list_on_conn<T: Serialize>(conn: &Connection, key: &str, values: &[T]) -> Result<()> {
    let json = serde_json::to_string(values)?;
    conn.execute(
        "INSERT OR REPLACE INTO records (key, value) VALUES (?1, ?2)",
        rusqlite::params![key, json],
    )?;
    Ok(())
}
