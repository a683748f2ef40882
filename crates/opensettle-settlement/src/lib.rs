//! # opensettle-settlement
//!
//! The settlement program: verifies payer-signed payment authorizations
//! submitted by untrusted facilitators, executes each at most once, and
//! runs the rent-pool economy that funds replay protection.
//!
//! ## Architecture
//!
//! The [`SettlementEngine`] receives a [`opensettle_types::SettlePayload`] and:
//! 1. Checks the authorization is still valid in time
//! 2. Checks the claimed signer is the payer, then verifies the
//!    detached ed25519 signature over the recomputed canonical bytes
//! 3. Checks the submitted token accounts belong to the signed parties
//! 4. Consumes the nonce: creates the replay record (insert-if-absent
//!    is the exactly-once anchor), funded by the rent pool
//! 5. Executes the transfer under the vault's delegate authority
//!
//! Anything that fails leaves no observable state behind. Later, anyone
//! may garbage-collect an expired replay record; the reclaimed deposit
//! splits between a caller reward and the pool.

pub mod collector;
pub mod engine;
pub mod rent_pool;
pub mod replay;
pub mod state;

pub use engine::SettlementEngine;
pub use rent_pool::RentPool;
pub use replay::{ReplayRecord, ReplayRegistry};
pub use state::ProgramState;
