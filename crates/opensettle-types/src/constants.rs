//! System-wide constants for the OpenSettle settlement engine.

/// Length of the canonical authorization signing encoding:
/// `from (32) || to (32) || amount (8) || nonce (32) || valid_until (8)`.
pub const AUTH_SIGNING_LEN: usize = 112;

/// Length of a detached ed25519 signature.
pub const SIGNATURE_LEN: usize = 64;

/// Length of an ed25519 public key.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Length of a payment nonce.
pub const NONCE_LEN: usize = 32;

/// Default storage deposit debited from the rent pool per replay record,
/// in rent units.
pub const DEFAULT_RECORD_RENT: u64 = 1_002_240;

/// Default garbage-collection reward rate in basis points (10% of the
/// reclaimed deposit goes to the collector).
pub const DEFAULT_GC_REWARD_BPS: u16 = 1_000;

/// Basis-point denominator.
pub const MAX_BPS: u16 = 10_000;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "OpenSettle";
