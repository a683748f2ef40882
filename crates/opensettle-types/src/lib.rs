//! # opensettle-types
//!
//! Shared types, errors, and configuration for the **OpenSettle**
//! settlement engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`MintId`], [`Nonce`], [`RecordKey`], [`AccountKey`], [`ReceiptId`]
//! - **Authorization model**: [`PaymentAuthorization`], [`SettlePayload`] and the canonical signing encoding
//! - **Signature verification**: [`verify_detached`]
//! - **Clock abstraction**: [`Clock`], [`SystemClock`] (and `ManualClock` behind `test-helpers`)
//! - **Receipts**: [`TransferReceipt`], [`CollectReceipt`]
//! - **Configuration**: [`SettlementConfig`]
//! - **Errors**: [`SettleError`] with `OS_ERR_` prefix codes
//! - **Constants**: encoding lengths, rent defaults

pub mod authorization;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod receipt;
pub mod signature;

// Re-export all primary types at crate root for ergonomic imports:
//   use opensettle_types::{PaymentAuthorization, AccountId, SettleError, ...};

pub use authorization::*;
pub use clock::*;
pub use config::*;
pub use error::*;
pub use ids::*;
pub use receipt::*;
pub use signature::*;

// Constants are accessed via `opensettle_types::constants::FOO`
// (not re-exported to avoid name collisions).
