//! Program-wide state singleton.
//!
//! Created exactly once by `initialize`; the pause flag is the only
//! field the admin may mutate afterwards.

use serde::{Deserialize, Serialize};

use opensettle_types::{AccountId, MintId};
use opensettle_vault::AuthorityId;

/// The settlement program's singleton state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramState {
    /// The single designated admin (may pause/unpause).
    pub admin: AccountId,
    /// The wrapped asset this program settles.
    pub wrapped_mint: MintId,
    /// The underlying asset backing the wrapped mint.
    pub underlying_mint: MintId,
    /// Identity of the vault's delegate transfer authority.
    pub transfer_authority: AuthorityId,
    /// When set, settlement, deposits, and withdrawals are rejected.
    pub paused: bool,
}

impl ProgramState {
    #[must_use]
    pub fn new(
        admin: AccountId,
        wrapped_mint: MintId,
        underlying_mint: MintId,
        transfer_authority: AuthorityId,
    ) -> Self {
        Self {
            admin,
            wrapped_mint,
            underlying_mint,
            transfer_authority,
            paused: false,
        }
    }

    /// Whether `caller` is the designated admin.
    #[must_use]
    pub fn is_admin(&self, caller: &AccountId) -> bool {
        self.admin == *caller
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_state() -> ProgramState {
        ProgramState::new(
            AccountId([1u8; 32]),
            MintId([2u8; 32]),
            MintId([3u8; 32]),
            AuthorityId::derive(&MintId([2u8; 32])),
        )
    }

    #[test]
    fn starts_unpaused() {
        assert!(!make_state().paused);
    }

    #[test]
    fn admin_check() {
        let state = make_state();
        assert!(state.is_admin(&AccountId([1u8; 32])));
        assert!(!state.is_admin(&AccountId([9u8; 32])));
    }

    #[test]
    fn serde_roundtrip() {
        let state = make_state();
        let json = serde_json::to_string(&state).unwrap();
        let back: ProgramState = serde_json::from_str(&json).unwrap();
        assert_eq!(state.admin, back.admin);
        assert_eq!(state.transfer_authority, back.transfer_authority);
        assert_eq!(state.paused, back.paused);
    }
}
