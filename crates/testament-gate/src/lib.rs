//! Testament signature gate
//!
//! Conditional decryption for will records: a wallet signature over a
//! canonical challenge message authorizes exactly one decode of one
//! ciphertext.
//!
//! # Flow
//!
//! 1. Build a [`ChallengeContext`] once at startup (session key, contract
//!    address, chain id, validity window).
//! 2. Call [`SignatureGate::authorize`] with an external [`WalletSigner`];
//!    the user signs the rendered challenge text.
//! 3. Spend the returned [`AuthorizationToken`] on a single
//!    [`SignatureGate::decode`] of one record's ciphertext.
//!
//! Rejection and signer failure are surfaced as [`GateError`] values; every
//! operation is retryable by calling it again.

pub mod challenge;
pub mod gate;
pub mod signer;

pub use challenge::{generate_public_key, ChallengeContext, DEFAULT_DURATION_DAYS};
pub use gate::{AuthorizationToken, GateError, GateState, SignatureGate};
pub use signer::{SignerError, WalletSigner};
