//! Receipts confirming settlement and garbage-collection outcomes.
//!
//! Every accepted operation returns a receipt the caller can log or
//! relay; failures return a [`crate::SettleError`] and no receipt.

use serde::{Deserialize, Serialize};

use crate::{AccountId, Nonce, ReceiptId, RecordKey};

/// Confirmation of one settled payment: the amount, parties, and nonce
/// consumed, plus the facilitator that submitted it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub id: ReceiptId,
    /// The consumed nonce.
    pub nonce: Nonce,
    /// Key of the replay record created by this settlement.
    pub record_key: RecordKey,
    pub from: AccountId,
    pub to: AccountId,
    pub amount: u64,
    /// The third party that submitted the authorization.
    pub facilitator: AccountId,
    /// Unix second at which the settlement was accepted.
    pub settled_at: u64,
}

/// Confirmation of one garbage collection: how the reclaimed deposit
/// was split between the collector's reward and the pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectReceipt {
    pub id: ReceiptId,
    /// Key of the closed replay record.
    pub record_key: RecordKey,
    pub collector: AccountId,
    /// Full deposit reclaimed from the record.
    pub reclaimed: u64,
    /// Portion paid to the collector.
    pub reward: u64,
    /// Portion credited back to the rent pool.
    pub returned_to_pool: u64,
    /// Unix second at which the record was closed.
    pub collected_at: u64,
}
