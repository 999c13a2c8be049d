//! Sync error types.

/// Errors that can occur during sync operations.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// A magic key string did not have the `ID-PASSWORD` shape.
    #[error("invalid magic key: {0}")]
    InvalidKey(String),

    /// The remote answered with a non-success status.
    #[error("remote returned status {0}")]
    Status(u16),

    /// The request never completed (connection, TLS, timeout, body decode).
    #[error("transport error: {0}")]
    Transport(ureq::Error),
}

/// Result alias for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;

impl SyncError {
    /// Returns `true` if the remote simply does not hold a document yet.
    pub fn is_missing_document(&self) -> bool {
        matches!(self, Self::Status(404))
    }
}

impl From<ureq::Error> for SyncError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::StatusCode(code) => Self::Status(code),
            other => Self::Transport(other),
        }
    }
}
