//! Key-value store port
//!
//! Models the external storage primitive the ledger persists into:
//! per-call atomic `get`/`set` on a single key, no transactions, no
//! compare-and-swap. Concurrent writers to the same key race and the last
//! write wins.

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors from the external store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Read or write failed: node unreachable, transaction dropped.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// The external key-value storage capability.
///
/// Both calls may suspend (network round-trip, transaction confirmation);
/// the core imposes no timeout of its own.
#[async_trait]
pub trait WillStore: Send + Sync {
    /// Read the raw bytes under `key`; empty if the key was never written.
    async fn get(&self, key: &str) -> Result<Vec<u8>, StoreError>;

    /// Overwrite the bytes under `key`, resolving once the write is
    /// confirmed.
    async fn set(&self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError>;

    /// Liveness probe. Advisory only; a `true` here does not guarantee the
    /// next call succeeds.
    async fn is_available(&self) -> bool {
        true
    }
}

/// In-process store.
///
/// Reference implementation and test double. Sharing one instance between
/// vaults reproduces the shared-blob semantics of the real store —
/// including the lost-update window between one client's read and
/// another's write.
#[derive(Default)]
pub struct MemoryStore {
    cells: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WillStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        Ok(self
            .cells
            .lock()
            .await
            .get(key)
            .cloned()
            .unwrap_or_default())
    }

    async fn set(&self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        self.cells.lock().await.insert(key.to_string(), bytes);
        Ok(())
    }
}
