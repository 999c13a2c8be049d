//! Magic key -- the generated credential pair for remote sync.
//!
//! A key is `ID-PASSWORD`: an 8-character uppercase base36 identifier that
//! addresses the backup document, and a 16-character base36 secret that
//! authenticates writes to it. Users copy the whole string between devices
//! instead of registering an account.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::SyncError;

const KEY_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the document-addressing id part.
const ID_LENGTH: usize = 8;
/// Length of the secret part.
const PASSWORD_LENGTH: usize = 16;

/// A generated `ID-PASSWORD` credential pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagicKey {
    id: String,
    password: String,
}

impl MagicKey {
    /// Generates a fresh key from OS randomness.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let id: String = (0..ID_LENGTH)
            .map(|_| KEY_ALPHABET[rng.gen_range(0..KEY_ALPHABET.len())].to_ascii_uppercase() as char)
            .collect();
        let password: String = (0..PASSWORD_LENGTH)
            .map(|_| KEY_ALPHABET[rng.gen_range(0..KEY_ALPHABET.len())] as char)
            .collect();
        Self { id, password }
    }

    /// The document-addressing id part.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The secret part.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Display for MagicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.id, self.password)
    }
}

impl FromStr for MagicKey {
    type Err = SyncError;

    /// Splits on the first `-`; the remainder is the password (rejoined, in
    /// case it ever contains hyphens itself).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, '-');
        let id = parts.next().unwrap_or_default();
        let password = parts.next().unwrap_or_default();
        if id.is_empty() || password.is_empty() {
            return Err(SyncError::InvalidKey(s.to_owned()));
        }
        Ok(Self {
            id: id.to_owned(),
            password: password.to_owned(),
        })
    }
}
