//! End-to-end inheritance flow.
//!
//! Exercises the full path without a wallet or a chain:
//!
//! 1. Owner connects (identity string) and records a will
//! 2. The encrypted ledger blob is persisted and reloaded
//! 3. A signature challenge authorizes exactly one reveal
//!
//! Run with: cargo test -p testament-e2e

use std::sync::Arc;

use async_trait::async_trait;
use testament_gate::{
    ChallengeContext, GateError, GateState, SignatureGate, SignerError, WalletSigner,
};
use testament_ledger::{Ledger, MemoryStore, WillStore, WillVault, WILLS_KEY};

/// Signer double standing in for a browser wallet: records what it was
/// asked to sign and approves.
struct RecordingSigner {
    signed: std::sync::Mutex<Vec<String>>,
}

impl RecordingSigner {
    fn new() -> Self {
        Self {
            signed: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl WalletSigner for RecordingSigner {
    async fn sign(&self, message: &str) -> Result<String, SignerError> {
        self.signed.lock().unwrap().push(message.to_string());
        Ok("0xdeadbeefsignature".to_string())
    }
}

struct RejectingSigner;

#[async_trait]
impl WalletSigner for RejectingSigner {
    async fn sign(&self, _message: &str) -> Result<String, SignerError> {
        Err(SignerError::Rejected)
    }
}

fn session_context() -> ChallengeContext {
    ChallengeContext::new(
        "0x5FbDB2315678afecb367f032d93F642f64180aa3",
        8009,
        1_754_000_000,
    )
}

#[tokio::test]
async fn test_full_inheritance_flow() {
    let store = Arc::new(MemoryStore::new());

    // 1. Owner records a will.
    let mut vault = WillVault::new(store.clone());
    let record = vault
        .create_will(
            Some("0xA11CE"),
            "0xBEEF",
            "2.5",
            "after 2030-01-01",
        )
        .await
        .unwrap();
    assert_eq!(record.id, 1);
    assert!(record.encrypted_assets.starts_with("FHE-"));

    // 2. A fresh client materializes the ledger from the persisted blob.
    let mut reader = WillVault::new(store);
    reader.refresh().await.unwrap();
    let wills = reader.wills_for("0xA11CE");
    assert_eq!(wills.len(), 1);
    let stored = wills[0];
    assert_eq!(stored.beneficiary, "0xBEEF");
    assert_eq!(stored.unlock_conditions, "after 2030-01-01");

    // 3. The asset value only comes back through an authorized gate.
    let ctx = session_context();
    let signer = RecordingSigner::new();
    let mut gate = SignatureGate::new();

    let token = gate.authorize(&ctx, &signer).await.unwrap();
    let value = gate.decode(token, &stored.encrypted_assets).unwrap();
    assert_eq!(value, 2.5);
    // The stored ciphertext is exactly what the codec produces for 2.5.
    assert_eq!(stored.encrypted_assets, testament_codec::encode(2.5));

    // The wallet signed the canonical challenge, nothing else.
    let signed = signer.signed.lock().unwrap();
    assert_eq!(signed.len(), 1);
    assert_eq!(signed[0], ctx.message());
    assert!(signed[0].starts_with("publickey:0x"));
}

#[tokio::test]
async fn test_reveal_denied_without_authorization() {
    let ledger = Ledger::new();
    let record = ledger
        .create("0xA11CE", "0xBEEF", "1000", "on graduation")
        .unwrap();

    let mut gate = SignatureGate::new();
    let err = gate
        .authorize(&session_context(), &RejectingSigner)
        .await
        .unwrap_err();
    assert_eq!(err, GateError::UserRejected);
    assert_eq!(gate.state(), GateState::Denied);

    // The ciphertext stays opaque: nothing handed the caller a plaintext.
    assert!(record.encrypted_assets.starts_with("FHE-"));
}

#[tokio::test]
async fn test_one_signature_reveals_one_record() {
    let store = Arc::new(MemoryStore::new());
    let mut vault = WillVault::new(store);
    vault
        .create_will(Some("0xA11CE"), "0xBEEF", "2.5", "")
        .await
        .unwrap();
    vault
        .create_will(Some("0xA11CE"), "0xD00D", "7.25", "")
        .await
        .unwrap();

    let ctx = session_context();
    let signer = RecordingSigner::new();
    let mut gate = SignatureGate::new();

    // One grant, one reveal; the second record needs a fresh signature.
    let token = gate.authorize(&ctx, &signer).await.unwrap();
    let wills = vault.wills_for("0xA11CE");
    assert_eq!(gate.decode(token, &wills[0].encrypted_assets).unwrap(), 2.5);

    let token = gate.authorize(&ctx, &signer).await.unwrap();
    assert_eq!(
        gate.decode(token, &wills[1].encrypted_assets).unwrap(),
        7.25
    );

    assert_eq!(signer.signed.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_owner_filter_spans_persisted_state() {
    let store = Arc::new(MemoryStore::new());
    let mut vault = WillVault::new(store);

    for (owner, beneficiary) in [("0xA11CE", "0x1"), ("0xB0B", "0x2"), ("0xA11CE", "0x3")] {
        vault
            .create_will(Some(owner), beneficiary, "1", "")
            .await
            .unwrap();
    }

    let alice: Vec<&str> = vault
        .wills_for("0xA11CE")
        .iter()
        .map(|w| w.beneficiary.as_str())
        .collect();
    assert_eq!(alice, vec!["0x1", "0x3"]);
    assert!(vault.wills_for("0xCAFE").is_empty());
}

#[tokio::test]
async fn test_legacy_untagged_blob_still_reveals() {
    // A blob written before the tagged codec existed: raw numeric strings.
    let store = Arc::new(MemoryStore::new());
    let legacy = serde_json::json!([{
        "id": 1,
        "owner": "0xA11CE",
        "beneficiary": "0xBEEF",
        "encryptedAssets": "3.5",
        "unlockConditions": "legacy entry",
        "timestamp": 1_700_000_000u64
    }]);
    store
        .set(WILLS_KEY, serde_json::to_vec(&legacy).unwrap())
        .await
        .unwrap();

    let mut vault = WillVault::new(store);
    vault.refresh().await.unwrap();
    let wills = vault.wills_for("0xA11CE");
    assert_eq!(wills.len(), 1);

    let mut gate = SignatureGate::new();
    let token = gate
        .authorize(&session_context(), &RecordingSigner::new())
        .await
        .unwrap();
    assert_eq!(gate.decode(token, &wills[0].encrypted_assets).unwrap(), 3.5);
}
