//! Rent pool and contributor ledger.
//!
//! Third parties contribute rent units into a shared pool; settlements
//! spend from the aggregate to fund replay records, so facilitators
//! never pre-fund storage. Contributions are pooled for spending but
//! individually attributed for withdrawal: a contributor can withdraw
//! at most what their own ledger entry holds, and at most what the
//! aggregate still contains (settlements spend collectively, so the
//! aggregate can drop below the sum of ledger entries).

use std::collections::HashMap;

use opensettle_types::{AccountId, Result, SettleError};

/// The shared rent balance plus per-contributor attribution.
#[derive(Debug, Default)]
pub struct RentPool {
    /// Aggregate spendable balance, in rent units.
    balance: u64,
    /// Replay records funded from this pool since genesis.
    records_funded: u64,
    /// Contributed-and-not-yet-withdrawn balance per contributor.
    contributors: HashMap<AccountId, u64>,
}

impl RentPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate spendable balance.
    #[must_use]
    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Replay records funded from this pool since genesis.
    #[must_use]
    pub fn records_funded(&self) -> u64 {
        self.records_funded
    }

    /// A contributor's withdrawable balance (zero if never contributed).
    #[must_use]
    pub fn contribution_of(&self, contributor: &AccountId) -> u64 {
        self.contributors.get(contributor).copied().unwrap_or(0)
    }

    /// Whether the pool can fund one record costing `cost`.
    #[must_use]
    pub fn can_fund(&self, cost: u64) -> bool {
        self.balance >= cost
    }

    /// Add `amount` to both the aggregate and the contributor's entry.
    ///
    /// # Errors
    /// - [`SettleError::InvalidAmount`] if `amount` is zero
    /// - [`SettleError::Overflow`] if either total would wrap
    pub fn contribute(&mut self, contributor: AccountId, amount: u64) -> Result<()> {
        if amount == 0 {
            return Err(SettleError::InvalidAmount);
        }
        let new_balance = self
            .balance
            .checked_add(amount)
            .ok_or(SettleError::Overflow)?;
        let entry = self.contributors.entry(contributor).or_insert(0);
        *entry = entry.checked_add(amount).ok_or(SettleError::Overflow)?;
        self.balance = new_balance;
        Ok(())
    }

    /// Return `amount` to the contributor, decreasing both the
    /// aggregate and their entry.
    ///
    /// # Errors
    /// - [`SettleError::InvalidAmount`] if `amount` is zero
    /// - [`SettleError::InsufficientFunds`] if the contributor's entry
    ///   is short
    /// - [`SettleError::InsufficientRentPool`] if the aggregate itself
    ///   has been spent down below `amount`
    pub fn withdraw(&mut self, contributor: AccountId, amount: u64) -> Result<()> {
        if amount == 0 {
            return Err(SettleError::InvalidAmount);
        }
        let available = self.contribution_of(&contributor);
        if amount > available {
            return Err(SettleError::InsufficientFunds {
                requested: amount,
                available,
            });
        }
        if amount > self.balance {
            return Err(SettleError::InsufficientRentPool {
                needed: amount,
                available: self.balance,
            });
        }
        self.contributors.insert(contributor, available - amount);
        self.balance -= amount;
        Ok(())
    }

    /// Debit one record's creation cost from the aggregate. Fails
    /// closed — the balance is never driven below zero.
    ///
    /// # Errors
    /// Returns [`SettleError::InsufficientRentPool`] if the aggregate
    /// cannot cover `cost`.
    pub fn debit_record_rent(&mut self, cost: u64) -> Result<()> {
        if self.balance < cost {
            return Err(SettleError::InsufficientRentPool {
                needed: cost,
                available: self.balance,
            });
        }
        self.balance -= cost;
        self.records_funded += 1;
        Ok(())
    }

    /// Undo a [`Self::debit_record_rent`] whose settlement was rolled back.
    pub fn refund_record_rent(&mut self, cost: u64) -> Result<()> {
        self.balance = self.balance.checked_add(cost).ok_or(SettleError::Overflow)?;
        self.records_funded -= 1;
        Ok(())
    }

    /// Credit reclaimed rent back to the aggregate (garbage collection).
    pub fn credit(&mut self, amount: u64) -> Result<()> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(SettleError::Overflow)?;
        Ok(())
    }
}
