//! Remote backup sync for the suds system.
//!
//! A device pushes its full backup (oils + recipes) as one JSON document to
//! a remote document store, addressed and authenticated by a generated
//! [`MagicKey`] -- no user-chosen account name involved.

pub mod client;
pub mod error;
pub mod key;

// Re-exports for convenience.
pub use client::{SyncClient, SyncDocument, SyncPayload};
pub use error::SyncError;
pub use key::MagicKey;
