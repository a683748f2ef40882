//! Supply conservation ledger for the wrapped asset.
//!
//! Invariant enforced after deposits and withdrawals:
//! ```text
//! minted - burned == reserve == Σ account balances
//! ```
//! If this ever breaks, something has gone catastrophically wrong and
//! the check fails with a critical error rather than letting the vault
//! keep operating.

use opensettle_types::{Result, SettleError};

/// Tracks cumulative mints and burns of the wrapped asset.
#[derive(Debug, Clone, Default)]
pub struct SupplyLedger {
    /// Total wrapped units minted since genesis.
    minted: u64,
    /// Total wrapped units burned since genesis.
    burned: u64,
}

impl SupplyLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a mint.
    pub fn record_mint(&mut self, amount: u64) -> Result<()> {
        self.minted = self.minted.checked_add(amount).ok_or(SettleError::Overflow)?;
        Ok(())
    }

    /// Record a burn.
    pub fn record_burn(&mut self, amount: u64) -> Result<()> {
        self.burned = self.burned.checked_add(amount).ok_or(SettleError::Overflow)?;
        Ok(())
    }

    /// Expected circulating supply: minted - burned.
    #[must_use]
    pub fn expected_supply(&self) -> u64 {
        self.minted - self.burned
    }

    /// Verify that the actual supply and the reserve both match the
    /// expected supply.
    ///
    /// # Errors
    /// Returns [`SettleError::SupplyInvariantViolation`] on any mismatch.
    pub fn verify(&self, actual_supply: u64, reserve: u64) -> Result<()> {
        let expected = self.expected_supply();
        if actual_supply != expected || reserve != expected {
            return Err(SettleError::SupplyInvariantViolation {
                reason: format!(
                    "actual supply {actual_supply}, reserve {reserve}, expected {expected} \
                     (minted={}, burned={})",
                    self.minted, self.burned,
                ),
            });
        }
        Ok(())
    }

    /// Total mints since genesis.
    #[must_use]
    pub fn total_minted(&self) -> u64 {
        self.minted
    }

    /// Total burns since genesis.
    #[must_use]
    pub fn total_burned(&self) -> u64 {
        self.burned
    }
}
