//! Wrapped-asset token accounts.
//!
//! One account per (mint, owner) pair, addressed by the deterministic
//! [`opensettle_types::AccountKey`]. The owner field is what the
//! settlement engine checks a payment authorization's parties against.

use serde::{Deserialize, Serialize};

use opensettle_types::AccountId;

/// A single wrapped-asset token account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WrappedAccount {
    /// The holder this account belongs to.
    pub owner: AccountId,
    /// Balance in the asset's smallest unit.
    pub balance: u64,
}

impl WrappedAccount {
    /// Create an empty account for `owner`.
    #[must_use]
    pub fn new(owner: AccountId) -> Self {
        Self { owner, balance: 0 }
    }

    /// Whether this account holds no funds.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.balance == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_account_is_empty() {
        let acct = WrappedAccount::new(AccountId([1u8; 32]));
        assert_eq!(acct.balance, 0);
        assert!(acct.is_empty());
    }

    #[test]
    fn serde_roundtrip() {
        let acct = WrappedAccount {
            owner: AccountId([2u8; 32]),
            balance: 123_456,
        };
        let json = serde_json::to_string(&acct).unwrap();
        let back: WrappedAccount = serde_json::from_str(&json).unwrap();
        assert_eq!(acct, back);
    }
}
