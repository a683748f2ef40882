//! Error types for the OpenSettle settlement engine.
//!
//! All errors use the `OS_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Validation errors (structurally or semantically wrong input)
//! - 2xx: Authorization errors (the cryptographic/temporal contract failed)
//! - 3xx: State-conflict errors (operation conflicts with persisted state)
//! - 4xx: Resource errors (an accounting precondition failed)
//! - 9xx: Internal / invariant errors

use thiserror::Error;

use crate::{AccountKey, RecordKey};

/// Central error enum for all OpenSettle operations.
#[derive(Debug, Error)]
pub enum SettleError {
    // =================================================================
    // Validation Errors (1xx)
    // =================================================================
    /// A zero (or otherwise meaningless) amount was supplied.
    #[error("OS_ERR_100: Invalid amount: must be greater than zero")]
    InvalidAmount,

    /// The authorization does not match the accounts it was submitted with.
    #[error("OS_ERR_101: Invalid payment authorization: {reason}")]
    InvalidPaymentAuthorization { reason: String },

    // =================================================================
    // Authorization Errors (2xx)
    // =================================================================
    /// The ed25519 signature did not verify against the canonical bytes.
    #[error("OS_ERR_200: Invalid signature")]
    InvalidSignature,

    /// The claimed signer is not the payer named in the authorization.
    #[error("OS_ERR_201: Unauthorized signer")]
    UnauthorizedSigner,

    /// The authorization's validity window has passed.
    #[error("OS_ERR_202: Payment expired: valid until {valid_until}, now {now}")]
    PaymentExpired { valid_until: u64, now: u64 },

    /// An admin-only operation was attempted by a non-admin.
    #[error("OS_ERR_203: Unauthorized: admin only")]
    UnauthorizedAdmin,

    /// A delegated transfer presented the wrong authority capability.
    #[error("OS_ERR_204: Invalid transfer delegate")]
    InvalidDelegate,

    // =================================================================
    // State-Conflict Errors (3xx)
    // =================================================================
    /// A replay record for this nonce already exists (settled before).
    #[error("OS_ERR_300: Nonce already used: {0}")]
    NonceAlreadyUsed(RecordKey),

    /// The replay record has not expired yet, so it cannot be collected.
    #[error("OS_ERR_301: Record not expired: expires at {expires_at}, now {now}")]
    RecordNotExpired { expires_at: u64, now: u64 },

    /// No replay record exists under this key.
    #[error("OS_ERR_302: Record not found: {0}")]
    RecordNotFound(RecordKey),

    /// `initialize` was called on an already-initialized program.
    #[error("OS_ERR_303: Program already initialized")]
    AlreadyInitialized,

    /// The program has not been initialized yet.
    #[error("OS_ERR_304: Program not initialized")]
    NotInitialized,

    /// The program is paused by the admin.
    #[error("OS_ERR_305: Program is paused")]
    ProgramPaused,

    // =================================================================
    // Resource Errors (4xx)
    // =================================================================
    /// Not enough token balance to perform the operation.
    #[error("OS_ERR_400: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u64, available: u64 },

    /// A contributor tried to withdraw more rent than they contributed.
    #[error("OS_ERR_401: Insufficient funds: requested {requested}, have {available}")]
    InsufficientFunds { requested: u64, available: u64 },

    /// The rent pool cannot cover a replay record's creation cost.
    #[error("OS_ERR_402: Insufficient rent pool: need {needed}, have {available}")]
    InsufficientRentPool { needed: u64, available: u64 },

    /// The referenced token account does not exist.
    #[error("OS_ERR_403: Account not found: {0}")]
    AccountNotFound(AccountKey),

    // =================================================================
    // Internal / Invariant Errors (9xx)
    // =================================================================
    /// Checked arithmetic overflowed.
    #[error("OS_ERR_900: Arithmetic overflow")]
    Overflow,

    /// Supply conservation invariant violated — critical safety alert.
    #[error("OS_ERR_901: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, SettleError>;
