//! Signature gate state machine
//!
//! `Idle → Requesting → Authorized | Denied`. A successful authorization
//! mints a token valid for exactly one decode; a denied gate can be
//! re-authorized at any time.

use rand::RngCore;
use thiserror::Error;

use crate::challenge::ChallengeContext;
use crate::signer::{SignerError, WalletSigner};

/// Errors surfaced by the gate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GateError {
    /// The user declined the signature request.
    #[error("signature request rejected by user")]
    UserRejected,

    /// The signer failed for a reason other than rejection.
    #[error("signer unavailable: {0}")]
    SignerUnavailable(String),

    /// Decode attempted without a live authorization token.
    #[error("decode attempted without a valid authorization")]
    NotAuthorized,

    /// The ciphertext had no recoverable numeric content.
    #[error(transparent)]
    Ciphertext(#[from] testament_codec::CodecError),
}

impl GateError {
    /// Short human-readable category for surfacing to a UI.
    pub fn category(&self) -> &'static str {
        match self {
            GateError::UserRejected => "signer rejected",
            GateError::SignerUnavailable(_) => "signer unavailable",
            GateError::NotAuthorized => "not authorized",
            GateError::Ciphertext(_) => "unreadable ciphertext",
        }
    }

    /// Every gate failure is retryable by re-invoking the operation.
    pub fn is_transient(&self) -> bool {
        true
    }
}

/// Authorization lifecycle of a [`SignatureGate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// No authorization attempted yet.
    Idle,
    /// A signature request is with the signer.
    Requesting,
    /// A challenge signature was obtained; a decode may proceed.
    Authorized,
    /// The signer rejected or failed; re-authorization required.
    Denied,
}

/// One-use credential minted by [`SignatureGate::authorize`].
///
/// Proves that a signature over the session challenge was obtained. It is
/// NOT bound to any record or ciphertext: one grant reveals any single
/// record, once. This matches the deployed behavior; binding the token to
/// a record id and ciphertext hash is the known hardening path and would
/// be a deliberate deviation.
///
/// The token is deliberately neither `Clone` nor `Copy` — spending it on
/// [`SignatureGate::decode`] consumes it.
#[derive(Debug)]
pub struct AuthorizationToken {
    gate_id: u64,
    serial: u64,
    /// Signature text returned by the wallet, kept for display and audit.
    pub signature: String,
}

/// Gates ciphertext decoding behind a signed challenge.
///
/// One gate per client session. The caller drives it single-threadedly;
/// both operations take `&mut self` and there is no internal locking.
pub struct SignatureGate {
    id: u64,
    state: GateState,
    /// Serial of the one token currently valid for a decode.
    live_serial: Option<u64>,
    next_serial: u64,
}

impl SignatureGate {
    pub fn new() -> Self {
        Self {
            id: rand::thread_rng().next_u64(),
            state: GateState::Idle,
            live_serial: None,
            next_serial: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> GateState {
        self.state
    }

    /// Request authorization: build the challenge for `ctx`, have `signer`
    /// sign it, and mint a single-use token.
    ///
    /// On rejection or failure the gate lands in [`GateState::Denied`];
    /// calling `authorize` again restarts the request. A re-authorization
    /// invalidates any token still outstanding from an earlier grant.
    pub async fn authorize(
        &mut self,
        ctx: &ChallengeContext,
        signer: &dyn WalletSigner,
    ) -> Result<AuthorizationToken, GateError> {
        self.state = GateState::Requesting;
        self.live_serial = None;

        let message = ctx.message();
        match signer.sign(&message).await {
            Ok(signature) => {
                let serial = self.next_serial;
                self.next_serial += 1;
                self.live_serial = Some(serial);
                self.state = GateState::Authorized;
                log::info!("decode authorization granted (serial {serial})");
                Ok(AuthorizationToken {
                    gate_id: self.id,
                    serial,
                    signature,
                })
            }
            Err(SignerError::Rejected) => {
                self.state = GateState::Denied;
                log::info!("decode authorization rejected by user");
                Err(GateError::UserRejected)
            }
            Err(SignerError::Unavailable(reason)) => {
                self.state = GateState::Denied;
                log::warn!("signer unavailable: {reason}");
                Err(GateError::SignerUnavailable(reason))
            }
        }
    }

    /// Decode `ciphertext`, spending `token`.
    ///
    /// Requires the gate to be [`GateState::Authorized`] and `token` to be
    /// the live token from the most recent grant; anything else is
    /// [`GateError::NotAuthorized`]. The token is consumed either way once
    /// it matches.
    pub fn decode(
        &mut self,
        token: AuthorizationToken,
        ciphertext: &str,
    ) -> Result<f64, GateError> {
        if self.state != GateState::Authorized
            || token.gate_id != self.id
            || self.live_serial != Some(token.serial)
        {
            return Err(GateError::NotAuthorized);
        }
        self.live_serial = None;
        Ok(testament_codec::decode(ciphertext)?)
    }
}

impl Default for SignatureGate {
    fn default() -> Self {
        Self::new()
    }
}
