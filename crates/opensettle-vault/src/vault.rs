//! The vault: balances, 1:1 wrap/unwrap, delegated transfers.
//!
//! All mutations are atomic: every precondition (and every overflow
//! check) is evaluated before the first write, so a failed operation
//! leaves no partial state behind.

use std::collections::HashMap;

use opensettle_types::{AccountId, AccountKey, MintId, Result, SettleError};

use crate::account::WrappedAccount;
use crate::authority::{AuthorityId, TransferAuthority};
use crate::supply::SupplyLedger;

/// The wrapped-asset token service.
///
/// Holds per-user underlying balances, the underlying reserve backing
/// the wrapped supply, and the wrapped token accounts. The settlement
/// engine moves wrapped funds through [`Vault::transfer_delegated`]
/// using the [`TransferAuthority`] minted at construction.
pub struct Vault {
    wrapped_mint: MintId,
    underlying_mint: MintId,
    /// Identity of the one capability allowed to move funds by delegation.
    delegate: AuthorityId,
    /// Wrapped token accounts, at deterministic addresses.
    accounts: HashMap<AccountKey, WrappedAccount>,
    /// Per-user balances of the underlying asset (funded out-of-band).
    underlying: HashMap<AccountId, u64>,
    /// Underlying units locked to back the wrapped supply.
    reserve: u64,
    /// Mint/burn ledger for the supply-conservation invariant.
    supply: SupplyLedger,
}

impl Vault {
    /// Create a vault for one wrapped/underlying mint pair. Returns the
    /// vault and the transfer-authority capability — this is the only
    /// place the capability is ever produced.
    #[must_use]
    pub fn new(wrapped_mint: MintId, underlying_mint: MintId) -> (Self, TransferAuthority) {
        let delegate = AuthorityId::derive(&wrapped_mint);
        let vault = Self {
            wrapped_mint,
            underlying_mint,
            delegate,
            accounts: HashMap::new(),
            underlying: HashMap::new(),
            reserve: 0,
            supply: SupplyLedger::new(),
        };
        (vault, TransferAuthority::mint(delegate))
    }

    /// The wrapped mint this vault serves.
    #[must_use]
    pub fn wrapped_mint(&self) -> MintId {
        self.wrapped_mint
    }

    /// The underlying mint backing the wrapped asset.
    #[must_use]
    pub fn underlying_mint(&self) -> MintId {
        self.underlying_mint
    }

    /// Identity of the delegate authority the vault accepts.
    #[must_use]
    pub fn delegate_id(&self) -> AuthorityId {
        self.delegate
    }

    // -----------------------------------------------------------------
    // Accounts
    // -----------------------------------------------------------------

    /// Create the wrapped token account for `owner` if it does not
    /// exist. Idempotent; returns the account's deterministic key.
    pub fn create_account(&mut self, owner: AccountId) -> AccountKey {
        let key = AccountKey::derive(&self.wrapped_mint, &owner);
        self.accounts
            .entry(key)
            .or_insert_with(|| WrappedAccount::new(owner));
        key
    }

    /// Look up a wrapped account by key.
    #[must_use]
    pub fn account(&self, key: &AccountKey) -> Option<&WrappedAccount> {
        self.accounts.get(key)
    }

    /// Owner of the account at `key`.
    ///
    /// # Errors
    /// Returns [`SettleError::AccountNotFound`] if no account exists there.
    pub fn account_owner(&self, key: &AccountKey) -> Result<AccountId> {
        self.accounts
            .get(key)
            .map(|acct| acct.owner)
            .ok_or(SettleError::AccountNotFound(*key))
    }

    /// Wrapped balance of `owner`'s account (zero if never created).
    #[must_use]
    pub fn wrapped_balance(&self, owner: &AccountId) -> u64 {
        let key = AccountKey::derive(&self.wrapped_mint, owner);
        self.accounts.get(&key).map_or(0, |acct| acct.balance)
    }

    // -----------------------------------------------------------------
    // Underlying asset
    // -----------------------------------------------------------------

    /// Credit underlying units to `user` (models out-of-band funding,
    /// e.g. an on-ramp transfer into the user's underlying account).
    pub fn credit_underlying(&mut self, user: AccountId, amount: u64) -> Result<()> {
        let entry = self.underlying.entry(user).or_insert(0);
        *entry = entry.checked_add(amount).ok_or(SettleError::Overflow)?;
        Ok(())
    }

    /// Underlying balance of `user`.
    #[must_use]
    pub fn underlying_balance(&self, user: &AccountId) -> u64 {
        self.underlying.get(user).copied().unwrap_or(0)
    }

    // -----------------------------------------------------------------
    // Wrap / unwrap
    // -----------------------------------------------------------------

    /// Lock `amount` of the user's underlying asset in the reserve and
    /// mint the same amount of wrapped asset into their account.
    ///
    /// # Errors
    /// - [`SettleError::InvalidAmount`] if `amount` is zero
    /// - [`SettleError::InsufficientBalance`] if the user's underlying
    ///   balance is short
    /// - [`SettleError::AccountNotFound`] if the user's wrapped account
    ///   was never created
    pub fn deposit(&mut self, user: AccountId, amount: u64) -> Result<()> {
        if amount == 0 {
            return Err(SettleError::InvalidAmount);
        }
        let key = AccountKey::derive(&self.wrapped_mint, &user);
        let available = self.underlying.get(&user).copied().unwrap_or(0);
        if available < amount {
            return Err(SettleError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        let new_reserve = self
            .reserve
            .checked_add(amount)
            .ok_or(SettleError::Overflow)?;

        let acct = self
            .accounts
            .get_mut(&key)
            .ok_or(SettleError::AccountNotFound(key))?;
        let new_balance = acct
            .balance
            .checked_add(amount)
            .ok_or(SettleError::Overflow)?;
        self.supply.record_mint(amount)?;

        // Past the last fallible step; commit everything.
        acct.balance = new_balance;
        self.underlying.insert(user, available - amount);
        self.reserve = new_reserve;
        Ok(())
    }

    /// Burn `amount` of the user's wrapped asset and release the same
    /// amount of underlying from the reserve back to them.
    ///
    /// # Errors
    /// - [`SettleError::InvalidAmount`] if `amount` is zero
    /// - [`SettleError::AccountNotFound`] if the wrapped account is missing
    /// - [`SettleError::InsufficientBalance`] if the wrapped balance is short
    pub fn withdraw(&mut self, user: AccountId, amount: u64) -> Result<()> {
        if amount == 0 {
            return Err(SettleError::InvalidAmount);
        }
        let key = AccountKey::derive(&self.wrapped_mint, &user);
        let new_underlying = self
            .underlying
            .get(&user)
            .copied()
            .unwrap_or(0)
            .checked_add(amount)
            .ok_or(SettleError::Overflow)?;

        let acct = self
            .accounts
            .get_mut(&key)
            .ok_or(SettleError::AccountNotFound(key))?;
        if acct.balance < amount {
            return Err(SettleError::InsufficientBalance {
                needed: amount,
                available: acct.balance,
            });
        }
        self.supply.record_burn(amount)?;

        acct.balance -= amount;
        // The reserve covers the wrapped supply 1:1, so this never underflows.
        self.reserve -= amount;
        self.underlying.insert(user, new_underlying);
        Ok(())
    }

    // -----------------------------------------------------------------
    // Delegated transfers
    // -----------------------------------------------------------------

    /// Move wrapped funds between accounts under delegate authority.
    /// No holder signature is involved — the presented capability is
    /// the entire authorization, which is why the settlement engine
    /// verifies the payer's off-band signature before calling this.
    ///
    /// # Errors
    /// - [`SettleError::InvalidDelegate`] if the capability is not this
    ///   vault's transfer authority
    /// - [`SettleError::AccountNotFound`] if either account is missing
    /// - [`SettleError::InsufficientBalance`] if the source is short
    pub fn transfer_delegated(
        &mut self,
        authority: &TransferAuthority,
        from: AccountKey,
        to: AccountKey,
        amount: u64,
    ) -> Result<()> {
        if authority.id() != self.delegate {
            return Err(SettleError::InvalidDelegate);
        }
        let from_balance = self
            .accounts
            .get(&from)
            .ok_or(SettleError::AccountNotFound(from))?
            .balance;
        let to_balance = self
            .accounts
            .get(&to)
            .ok_or(SettleError::AccountNotFound(to))?
            .balance;
        if from_balance < amount {
            return Err(SettleError::InsufficientBalance {
                needed: amount,
                available: from_balance,
            });
        }
        if from == to {
            // Self-transfer is a funded no-op.
            return Ok(());
        }
        let new_to = to_balance
            .checked_add(amount)
            .ok_or(SettleError::Overflow)?;

        if let Some(acct) = self.accounts.get_mut(&from) {
            acct.balance = from_balance - amount;
        }
        if let Some(acct) = self.accounts.get_mut(&to) {
            acct.balance = new_to;
        }
        Ok(())
    }

    // -----------------------------------------------------------------
    // Supply invariant
    // -----------------------------------------------------------------

    /// Total wrapped supply: sum of all account balances.
    #[must_use]
    pub fn wrapped_supply(&self) -> u64 {
        self.accounts.values().map(|acct| acct.balance).sum()
    }

    /// Underlying units currently locked in the reserve.
    #[must_use]
    pub fn reserve(&self) -> u64 {
        self.reserve
    }

    /// Check `minted - burned == reserve == Σ accounts`.
    pub fn verify_supply(&self) -> Result<()> {
        self.supply.verify(self.wrapped_supply(), self.reserve)
    }
}
