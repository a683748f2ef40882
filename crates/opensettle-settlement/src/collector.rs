//! Garbage collection of expired replay records.
//!
//! Anyone may close an expired record; the reclaimed storage deposit
//! splits into a caller reward and a remainder credited back to the
//! pool. The reward is what keeps pool-funded storage from leaking
//! indefinitely without a privileged cleanup actor.
//!
//! Collecting a record frees its nonce key, but never reopens a replay
//! window: a record is only collectible after its authorization's
//! `valid_until`, and an expired authorization can no longer settle.

use opensettle_types::{
    AccountId, CollectReceipt, Nonce, ReceiptId, RecordKey, Result, SettleError, SettlementConfig,
};

use crate::rent_pool::RentPool;
use crate::replay::ReplayRegistry;

/// Close the expired record for `nonce`, splitting its deposit between
/// the collector's reward and the pool.
///
/// # Errors
/// - [`SettleError::RecordNotFound`] if no record exists for the nonce
/// - [`SettleError::RecordNotExpired`] if the record's `expires_at` has
///   not passed yet
pub fn collect_expired(
    registry: &mut ReplayRegistry,
    pool: &mut RentPool,
    config: &SettlementConfig,
    collector: AccountId,
    nonce: &Nonce,
    now: u64,
) -> Result<CollectReceipt> {
    let key = RecordKey::derive(nonce);
    let record = registry.get(&key).ok_or(SettleError::RecordNotFound(key))?;
    if !record.is_expired(now) {
        return Err(SettleError::RecordNotExpired {
            expires_at: record.expires_at,
            now,
        });
    }

    let reclaimed = record.rent_paid;
    let reward = config.gc_reward(reclaimed);
    let returned_to_pool = reclaimed - reward;

    // Credit first (the only fallible step), then close the record.
    pool.credit(returned_to_pool)?;
    registry.remove(&key);

    tracing::info!(
        record = %key,
        collector = %collector,
        reclaimed,
        reward,
        "replay record collected"
    );

    Ok(CollectReceipt {
        id: ReceiptId::new(),
        record_key: key,
        collector,
        reclaimed,
        reward,
        returned_to_pool,
        collected_at: now,
    })
}
