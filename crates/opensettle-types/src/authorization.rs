//! # PaymentAuthorization — the signed transfer intent
//!
//! A `PaymentAuthorization` is signed by the payer off-band and later
//! submitted by an untrusted facilitator. The settlement engine never
//! trusts the submitted fields directly: it recomputes the canonical
//! signing bytes and verifies the payer's detached ed25519 signature
//! over them, so any tampering with amount, parties, nonce, or expiry
//! invalidates the signature.
//!
//! ## Canonical encoding
//!
//! ```text
//!   from (32) || to (32) || amount (8, LE) || nonce (32) || valid_until (8, LE)
//! ```
//!
//! 112 bytes total, no length prefixes, no padding.

use serde::{Deserialize, Serialize};

use crate::constants::AUTH_SIGNING_LEN;
use crate::{AccountId, Nonce, RecordKey};

/// A payer-signed description of one intended transfer. Immutable once
/// signed: every field is covered by the signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAuthorization {
    /// The payer. Must match the claimed signer at settlement.
    pub from: AccountId,
    /// The payee.
    pub to: AccountId,
    /// Transfer amount in the asset's smallest unit.
    pub amount: u64,
    /// Caller-chosen 32-byte nonce; consumed exactly once.
    pub nonce: Nonce,
    /// Last valid Unix second (inclusive).
    pub valid_until: u64,
}

impl PaymentAuthorization {
    /// Canonical signing bytes. Pure and deterministic; any change to
    /// any field changes the output.
    #[must_use]
    pub fn signing_bytes(&self) -> [u8; AUTH_SIGNING_LEN] {
        let mut buf = [0u8; AUTH_SIGNING_LEN];
        buf[0..32].copy_from_slice(self.from.as_bytes());
        buf[32..64].copy_from_slice(self.to.as_bytes());
        buf[64..72].copy_from_slice(&self.amount.to_le_bytes());
        buf[72..104].copy_from_slice(self.nonce.as_bytes());
        buf[104..112].copy_from_slice(&self.valid_until.to_le_bytes());
        buf
    }

    /// Whether the authorization has expired at `now`.
    /// `valid_until` itself is the last valid instant.
    #[must_use]
    pub fn is_expired(&self, now: u64) -> bool {
        now > self.valid_until
    }

    /// The replay-record key this authorization's nonce maps to.
    #[must_use]
    pub fn record_key(&self) -> RecordKey {
        RecordKey::derive(&self.nonce)
    }
}

/// Everything a facilitator submits for settlement: the authorization,
/// the payer's detached signature, and the claimed signer key.
#[derive(Debug, Clone)]
pub struct SettlePayload {
    pub payment_auth: PaymentAuthorization,
    /// Detached ed25519 signature over [`PaymentAuthorization::signing_bytes`].
    pub signature: [u8; 64],
    /// The key the facilitator claims produced `signature`. Checked
    /// against `payment_auth.from` before verification.
    pub signer_pubkey: [u8; 32],
}
