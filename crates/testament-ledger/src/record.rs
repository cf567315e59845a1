//! Will records and the append-only ledger value
//!
//! The wire layout is frozen: the persisted blob is a bare JSON array of
//! records with exactly the field names below — the format existing
//! deployments already hold. No envelope, no version header; any future
//! framing must be a non-breaking addition.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::LedgerError;

/// A single inheritance instruction.
///
/// `owner`, `beneficiary`, and `timestamp` are write-once; `id` is
/// assigned by the ledger, strictly increasing, and never reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WillRecord {
    pub id: u64,
    /// Creator's address.
    pub owner: String,
    /// Intended recipient's address.
    pub beneficiary: String,
    /// Output of [`testament_codec::encode`]; opaque to the ledger and
    /// only ever decoded under an authorized gate session.
    #[serde(rename = "encryptedAssets")]
    pub encrypted_assets: String,
    /// Advisory release condition, free text. Nothing parses or enforces
    /// this.
    #[serde(rename = "unlockConditions")]
    pub unlock_conditions: String,
    /// Unix seconds at creation.
    pub timestamp: u64,
}

/// Ordered, append-only collection of will records.
///
/// A pure value: mutation returns a new ledger and leaves the input
/// untouched. Persistence is the caller's concern (see
/// [`WillVault`](crate::WillVault)).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    records: Vec<WillRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in creation order.
    pub fn records(&self) -> &[WillRecord] {
        &self.records
    }

    /// Build a new record against this ledger without appending it.
    ///
    /// `beneficiary` must be non-empty. `raw_assets` is coerced, never
    /// rejected: blank or non-numeric input encodes as zero, matching the
    /// tolerant policy callers rely on. The id is one past the highest id
    /// present — never a reused one, even if a concurrent overwrite shrank
    /// the persisted array since the last refresh.
    pub fn create(
        &self,
        owner: &str,
        beneficiary: &str,
        raw_assets: &str,
        conditions: &str,
    ) -> Result<WillRecord, LedgerError> {
        if beneficiary.trim().is_empty() {
            return Err(LedgerError::MissingBeneficiary);
        }
        let value = testament_codec::parse_numeric(raw_assets).unwrap_or(0.0);
        Ok(WillRecord {
            id: self.next_id(),
            owner: owner.to_string(),
            beneficiary: beneficiary.to_string(),
            encrypted_assets: testament_codec::encode(value),
            unlock_conditions: conditions.to_string(),
            timestamp: current_timestamp(),
        })
    }

    /// A new ledger equal to this one with `record` appended.
    pub fn append(&self, record: WillRecord) -> Ledger {
        let mut records = self.records.clone();
        records.push(record);
        Ledger { records }
    }

    /// Records owned by `owner`, exact match, creation order.
    pub fn list_for(&self, owner: &str) -> Vec<&WillRecord> {
        self.records.iter().filter(|r| r.owner == owner).collect()
    }

    /// Encode the ledger as its persisted JSON-array blob.
    pub fn to_bytes(&self) -> Result<Vec<u8>, LedgerError> {
        Ok(serde_json::to_vec(&self.records)?)
    }

    /// Materialize a ledger from persisted bytes.
    ///
    /// Resilient by contract: empty, non-UTF-8, or malformed bytes yield an
    /// empty ledger rather than an error — a corrupt blob must not brick
    /// the client.
    pub fn from_bytes(bytes: &[u8]) -> Ledger {
        if bytes.is_empty() {
            return Ledger::default();
        }
        match serde_json::from_slice(bytes) {
            Ok(records) => Ledger { records },
            Err(e) => {
                log::warn!("unreadable will blob ({e}); treating as empty");
                Ledger::default()
            }
        }
    }

    fn next_id(&self) -> u64 {
        self.records.iter().map(|r| r.id).max().unwrap_or(0) + 1
    }
}

/// Current unix timestamp in seconds.
fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
