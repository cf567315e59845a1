//! Wallet signer port
//!
//! The gate never talks to a wallet directly. Callers supply an
//! implementation of [`WalletSigner`] — a browser wallet bridge, a hardware
//! signer, or a test double.

use async_trait::async_trait;
use thiserror::Error;

/// Errors a signer may return.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignerError {
    /// The user declined to sign the challenge.
    #[error("signature request rejected by user")]
    Rejected,

    /// The signer failed for any other reason: disconnected wallet,
    /// transport failure, or a timeout imposed by the caller.
    #[error("signer unavailable: {0}")]
    Unavailable(String),
}

/// An external signing capability.
///
/// `sign` may suspend indefinitely while the user decides; rejection or
/// failure is the only non-success outcome — the core imposes no timeout
/// and offers no cancellation.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// Request a signature over `message`, returned in whatever text form
    /// the wallet produces (hex for EVM wallets).
    async fn sign(&self, message: &str) -> Result<String, SignerError>;
}
