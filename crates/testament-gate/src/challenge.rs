//! Canonical authorization challenge
//!
//! The decryption challenge is a fixed, field-labeled, newline-delimited
//! message. Wallets sign this exact text, so the labels, field order, and
//! absence of a trailing newline are frozen: any byte change invalidates
//! signatures already granted against the old rendering.

use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Default signature validity window in days.
pub const DEFAULT_DURATION_DAYS: u32 = 30;

/// Byte length of a generated session key (2000 hex characters).
const SESSION_KEY_BYTES: usize = 1000;

/// Identity parameters for a decryption session.
///
/// Built once at startup from the connected wallet and contract, then
/// passed explicitly to every authorization. Read-only after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeContext {
    /// Session public key, `0x`-prefixed hex.
    pub public_key: String,
    /// Address of the storage contract.
    pub contract_address: String,
    /// Chain id the contract lives on.
    pub chain_id: u64,
    /// Unix seconds at session start.
    pub start_timestamp: u64,
    /// Validity window the signature grants.
    pub duration_days: u32,
}

impl ChallengeContext {
    /// Context with a freshly generated session key and the default
    /// validity window.
    pub fn new(contract_address: impl Into<String>, chain_id: u64, start_timestamp: u64) -> Self {
        Self {
            public_key: generate_public_key(),
            contract_address: contract_address.into(),
            chain_id,
            start_timestamp,
            duration_days: DEFAULT_DURATION_DAYS,
        }
    }

    /// Render the canonical challenge message.
    ///
    /// One `label:value` line per field, in fixed order, no trailing
    /// newline. Identical contexts must render byte-identical messages —
    /// the signature is computed over exactly these bytes.
    pub fn message(&self) -> String {
        format!(
            "publickey:{}\ncontractAddresses:{}\ncontractsChainId:{}\nstartTimestamp:{}\ndurationDays:{}",
            self.public_key,
            self.contract_address,
            self.chain_id,
            self.start_timestamp,
            self.duration_days,
        )
    }
}

/// Generate a fresh session public key: `0x` followed by 2000 lowercase hex
/// characters.
pub fn generate_public_key() -> String {
    let mut bytes = [0u8; SESSION_KEY_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("0x{}", hex::encode(bytes))
}
