//! Testament will ledger
//!
//! The encrypted-record ledger: an append-only sequence of will records,
//! persisted as one JSON blob under a fixed key in an external key-value
//! store.
//!
//! # Layers
//!
//! - [`record`] — the [`WillRecord`] wire type and the pure [`Ledger`]
//!   value (create, append, filter, tolerant blob codec)
//! - [`store`] — the [`WillStore`] port modeling the external store, plus
//!   an in-process [`MemoryStore`]
//! - [`vault`] — the [`WillVault`] service driving read-modify-write
//!   persistence over the single blob
//!
//! # Shared-blob caveat
//!
//! The store offers per-call atomicity only — no transactions, no
//! compare-and-swap. Two clients appending concurrently from the same
//! snapshot will each overwrite the other's write, and the last writer
//! wins. See [`vault`] for the full statement of this limitation.

pub mod record;
pub mod store;
pub mod vault;

pub use record::{Ledger, WillRecord};
pub use store::{MemoryStore, StoreError, WillStore};
pub use vault::{WillVault, WILLS_KEY};

use thiserror::Error;

/// Errors surfaced by ledger operations.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The operation requires a connected identity, but none is present.
    #[error("no connected identity")]
    NoIdentity,

    /// A will must name a beneficiary.
    #[error("beneficiary must not be empty")]
    MissingBeneficiary,

    /// The ledger could not be encoded for persistence.
    #[error("ledger serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The external key-value store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LedgerError {
    /// Short human-readable category for surfacing to a UI.
    pub fn category(&self) -> &'static str {
        match self {
            LedgerError::NoIdentity => "no identity",
            LedgerError::MissingBeneficiary => "missing beneficiary",
            LedgerError::Serialize(_) => "serialization failed",
            LedgerError::Store(_) => "store unavailable",
        }
    }

    /// Every ledger failure is retryable by re-invoking the operation.
    pub fn is_transient(&self) -> bool {
        true
    }
}
