//! # opensettle-vault
//!
//! The wrapped-asset token service: one wrapped mint backed 1:1 by an
//! underlying reserve.
//!
//! ## Responsibilities
//!
//! 1. Token accounts for the wrapped asset, at deterministic addresses
//! 2. `deposit` — lock underlying in the reserve, mint wrapped 1:1
//! 3. `withdraw` — burn wrapped, release underlying 1:1
//! 4. Delegate-authority transfers: the settlement engine holds a
//!    [`TransferAuthority`] capability minted at vault construction and
//!    may move wrapped funds between accounts without a live holder
//!    signature — the vault checks the capability, nothing else
//! 5. Supply conservation: `minted - burned == reserve == Σ accounts`
//!
//! The settlement engine (`opensettle-settlement`) is the intended
//! holder of the transfer authority; this crate neither knows nor cares
//! who presents it.

pub mod account;
pub mod authority;
pub mod supply;
pub mod vault;

pub use account::WrappedAccount;
pub use authority::{AuthorityId, TransferAuthority};
pub use supply::SupplyLedger;
pub use vault::Vault;
