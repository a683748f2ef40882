//! Replay registry — one record per consumed nonce.
//!
//! A [`ReplayRecord`] for a given nonce exists if and only if a
//! settlement for that nonce has been accepted. Creating the record is
//! the sole gate for exactly-once settlement: of two racing submissions
//! for the same nonce, exactly one creates the record and the other
//! fails [`SettleError::NonceAlreadyUsed`].
//!
//! Unlike a bounded idempotency cache, the registry never evicts —
//! forgetting a nonce would reopen it for replay. Records leave the
//! registry only through the garbage collector, which requires them to
//! be expired first (and an expired authorization can no longer settle,
//! so a collected nonce is never replayable either).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use opensettle_types::{AccountId, Nonce, RecordKey, Result, SettleError};

/// Proof that a nonce has been settled, funded by the rent pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayRecord {
    /// The payer whose authorization consumed this nonce.
    pub payer: AccountId,
    /// The consumed nonce.
    pub nonce: Nonce,
    /// Unix second the settlement was accepted.
    pub created_at: u64,
    /// The authorization's `valid_until`; the record is collectible
    /// once this has passed.
    pub expires_at: u64,
    /// Storage deposit debited from the rent pool for this record.
    pub rent_paid: u64,
}

impl ReplayRecord {
    /// The record's deterministic storage key.
    #[must_use]
    pub fn key(&self) -> RecordKey {
        RecordKey::derive(&self.nonce)
    }

    /// Whether the record may be garbage-collected at `now`.
    #[must_use]
    pub fn is_expired(&self, now: u64) -> bool {
        now > self.expires_at
    }
}

/// The nonce → record store. Existence of a key means "already settled".
#[derive(Debug, Default)]
pub struct ReplayRegistry {
    records: HashMap<RecordKey, ReplayRecord>,
}

impl ReplayRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record if its key is free — the atomic insert-if-absent
    /// that makes settlement exactly-once.
    ///
    /// # Errors
    /// Returns [`SettleError::NonceAlreadyUsed`] if a record already
    /// exists for this nonce.
    pub fn insert_if_absent(&mut self, record: ReplayRecord) -> Result<RecordKey> {
        let key = record.key();
        if self.records.contains_key(&key) {
            return Err(SettleError::NonceAlreadyUsed(key));
        }
        self.records.insert(key, record);
        Ok(key)
    }

    /// Whether a record exists under `key`.
    #[must_use]
    pub fn contains(&self, key: &RecordKey) -> bool {
        self.records.contains_key(key)
    }

    /// Look up a record by key.
    #[must_use]
    pub fn get(&self, key: &RecordKey) -> Option<&ReplayRecord> {
        self.records.get(key)
    }

    /// Remove a record, returning it if present. Only the garbage
    /// collector calls this.
    pub fn remove(&mut self, key: &RecordKey) -> Option<ReplayRecord> {
        self.records.remove(key)
    }

    /// Number of live records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the registry holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
