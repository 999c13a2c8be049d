//! Blocking client for the remote backup document store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use suds_core::oil::Oil;
use suds_core::recipe::Recipe;

use crate::error::{Result, SyncError};
use crate::key::MagicKey;

/// Header carrying the magic-key secret on every request.
const AUTH_HEADER: &str = "X-Sync-Key";

/// The single document a device keeps in the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncDocument {
    pub last_updated: DateTime<Utc>,
    pub data: SyncPayload,
}

/// The backed-up catalogs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncPayload {
    pub oils: Vec<Oil>,
    pub recipes: Vec<Recipe>,
}

impl SyncDocument {
    /// Wraps the given catalogs, stamped with the current time.
    pub fn new(oils: Vec<Oil>, recipes: Vec<Recipe>) -> Self {
        Self {
            last_updated: Utc::now(),
            data: SyncPayload { oils, recipes },
        }
    }
}

/// Client for one backup document, addressed by the magic key's id and
/// authenticated by its secret.
pub struct SyncClient {
    base_url: String,
    key: MagicKey,
    agent: ureq::Agent,
}

impl SyncClient {
    /// Creates a client against the given document store base URL.
    pub fn new(base_url: impl Into<String>, key: MagicKey) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            key,
            agent: ureq::Agent::new_with_defaults(),
        }
    }

    /// URL of this key's backup document.
    fn document_url(&self) -> String {
        format!("{}/users/{}", self.base_url, self.key.id())
    }

    /// Uploads the document, replacing whatever the remote holds.
    pub fn push(&self, document: &SyncDocument) -> Result<()> {
        let url = self.document_url();
        debug!(%url, "pushing backup document");

        self.agent
            .put(&url)
            .header(AUTH_HEADER, self.key.password())
            .send_json(document)?;

        info!(
            oils = document.data.oils.len(),
            recipes = document.data.recipes.len(),
            "backup pushed"
        );
        Ok(())
    }

    /// Downloads the document. Returns `Ok(None)` when the remote holds no
    /// document yet for this key.
    pub fn pull(&self) -> Result<Option<SyncDocument>> {
        let url = self.document_url();
        debug!(%url, "pulling backup document");

        let mut response = match self
            .agent
            .get(&url)
            .header(AUTH_HEADER, self.key.password())
            .call()
        {
            Ok(response) => response,
            Err(e) => {
                let err = SyncError::from(e);
                if err.is_missing_document() {
                    info!("no backup document on remote yet");
                    return Ok(None);
                }
                return Err(err);
            }
        };

        let document: SyncDocument = response.body_mut().read_json()?;
        info!(
            oils = document.data.oils.len(),
            recipes = document.data.recipes.len(),
            last_updated = %document.last_updated,
            "backup pulled"
        );
        Ok(Some(document))
    }
}
