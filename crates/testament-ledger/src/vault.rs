//! Will vault service
//!
//! Owns a client's in-memory ledger snapshot and the read-modify-write
//! cycle against the single persisted blob.
//!
//! # Concurrency
//!
//! The store offers no compare-and-swap, so two clients that refresh,
//! append, and persist concurrently will each overwrite the other's
//! append — the last writer wins and the earlier record is lost. That is
//! the semantics of the single-blob layout, not a bug to paper over here;
//! the window is narrowed by re-reading immediately before every write
//! but cannot be closed from this side of the store interface.
//!
//! Within one client the ordering is strict: every mutation awaits its
//! persist before returning, so a subsequent [`WillVault::refresh`] reads
//! the client's own write.

use std::sync::Arc;

use crate::record::{Ledger, WillRecord};
use crate::store::WillStore;
use crate::LedgerError;

/// Fixed store key holding the ledger blob.
pub const WILLS_KEY: &str = "wills";

/// Client-side service over the persisted will ledger.
pub struct WillVault {
    store: Arc<dyn WillStore>,
    ledger: Ledger,
}

impl WillVault {
    /// Create a vault over `store`. The snapshot starts empty; call
    /// [`refresh`](Self::refresh) to materialize persisted records.
    pub fn new(store: Arc<dyn WillStore>) -> Self {
        Self {
            store,
            ledger: Ledger::new(),
        }
    }

    /// Reload the snapshot from the persisted blob.
    ///
    /// An absent or unreadable blob yields an empty ledger; only a failed
    /// store call is an error.
    pub async fn refresh(&mut self) -> Result<&Ledger, LedgerError> {
        if !self.store.is_available().await {
            log::warn!("will store reports unavailable; refresh may fail or read stale data");
        }
        let bytes = self.store.get(WILLS_KEY).await?;
        self.ledger = Ledger::from_bytes(&bytes);
        Ok(&self.ledger)
    }

    /// Record a new will: re-read the blob, append the record, persist the
    /// whole blob back.
    ///
    /// `owner` is the connected identity, `None` when no wallet is
    /// connected. The asset value is encoded before the record ever leaves
    /// this call; the plaintext is not retained.
    pub async fn create_will(
        &mut self,
        owner: Option<&str>,
        beneficiary: &str,
        raw_assets: &str,
        conditions: &str,
    ) -> Result<WillRecord, LedgerError> {
        let owner = owner.ok_or(LedgerError::NoIdentity)?;

        self.refresh().await?;
        let record = self
            .ledger
            .create(owner, beneficiary, raw_assets, conditions)?;
        let next = self.ledger.append(record.clone());
        self.store.set(WILLS_KEY, next.to_bytes()?).await?;
        self.ledger = next;

        log::info!("recorded will #{} for {}", record.id, record.owner);
        Ok(record)
    }

    /// Records owned by `owner` in the current snapshot, creation order.
    pub fn wills_for(&self, owner: &str) -> Vec<&WillRecord> {
        self.ledger.list_for(owner)
    }

    /// The current snapshot.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
}
