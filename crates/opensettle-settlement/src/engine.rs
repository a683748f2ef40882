//! The settlement engine: the program's state-transition logic.
//!
//! One engine instance owns the program state singleton, the replay
//! registry, and the rent pool. The vault is passed in per call, the
//! way the hosting layer wires collaborators together; the engine holds
//! no token balances itself.
//!
//! Every public operation is an independent execution unit against
//! `&mut self`: it either fully applies or fully fails, and concurrent
//! submitters are serialized by the hosting runtime. The exactly-once
//! guarantee for settlement comes from the replay registry's
//! insert-if-absent, not from any lock.

use opensettle_types::{
    AccountId, AccountKey, Clock, CollectReceipt, MintId, Nonce, ReceiptId, Result, SettleError,
    SettlePayload, SettlementConfig, SystemClock, TransferReceipt, verify_detached,
};
use opensettle_vault::{AuthorityId, TransferAuthority, Vault};

use crate::collector;
use crate::rent_pool::RentPool;
use crate::replay::{ReplayRecord, ReplayRegistry};
use crate::state::ProgramState;

/// Orchestrates verification, replay-record creation, rent accounting,
/// and the delegated value transfer.
pub struct SettlementEngine<C: Clock = SystemClock> {
    /// Init-once program state; `None` until `initialize` succeeds.
    state: Option<ProgramState>,
    replay: ReplayRegistry,
    rent_pool: RentPool,
    config: SettlementConfig,
    clock: C,
}

impl SettlementEngine<SystemClock> {
    /// Create an engine on the system clock.
    #[must_use]
    pub fn new(config: SettlementConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> SettlementEngine<C> {
    /// Create an engine with an explicit clock.
    #[must_use]
    pub fn with_clock(config: SettlementConfig, clock: C) -> Self {
        Self {
            state: None,
            replay: ReplayRegistry::new(),
            rent_pool: RentPool::new(),
            config,
            clock,
        }
    }

    // -----------------------------------------------------------------
    // Lifecycle & admin
    // -----------------------------------------------------------------

    /// Create the program state singleton. Callable exactly once.
    ///
    /// # Errors
    /// Returns [`SettleError::AlreadyInitialized`] on any later call.
    pub fn initialize(
        &mut self,
        admin: AccountId,
        wrapped_mint: MintId,
        underlying_mint: MintId,
        transfer_authority: AuthorityId,
    ) -> Result<()> {
        if self.state.is_some() {
            return Err(SettleError::AlreadyInitialized);
        }
        self.state = Some(ProgramState::new(
            admin,
            wrapped_mint,
            underlying_mint,
            transfer_authority,
        ));
        tracing::info!(admin = %admin, wrapped = %wrapped_mint, "program initialized");
        Ok(())
    }

    fn require_state(&self) -> Result<&ProgramState> {
        self.state.as_ref().ok_or(SettleError::NotInitialized)
    }

    /// The program state, if initialized.
    #[must_use]
    pub fn program_state(&self) -> Option<&ProgramState> {
        self.state.as_ref()
    }

    /// Whether the admin has paused the program.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.paused)
    }

    /// Pause settlement, deposits, and withdrawals. Admin only; idempotent.
    pub fn pause(&mut self, caller: AccountId) -> Result<()> {
        let state = self.state.as_mut().ok_or(SettleError::NotInitialized)?;
        if !state.is_admin(&caller) {
            return Err(SettleError::UnauthorizedAdmin);
        }
        state.paused = true;
        tracing::warn!(admin = %caller, "program paused");
        Ok(())
    }

    /// Resume after a pause. Admin only; idempotent.
    pub fn unpause(&mut self, caller: AccountId) -> Result<()> {
        let state = self.state.as_mut().ok_or(SettleError::NotInitialized)?;
        if !state.is_admin(&caller) {
            return Err(SettleError::UnauthorizedAdmin);
        }
        state.paused = false;
        tracing::info!(admin = %caller, "program unpaused");
        Ok(())
    }

    // -----------------------------------------------------------------
    // Rent pool
    // -----------------------------------------------------------------

    /// Contribute rent units to the pool. Allowed even while paused, so
    /// the pool stays fundable during an incident.
    pub fn contribute_rent(&mut self, contributor: AccountId, amount: u64) -> Result<()> {
        self.require_state()?;
        self.rent_pool.contribute(contributor, amount)
    }

    /// Withdraw previously contributed rent units.
    pub fn withdraw_rent(&mut self, contributor: AccountId, amount: u64) -> Result<()> {
        self.require_state()?;
        self.rent_pool.withdraw(contributor, amount)
    }

    /// The rent pool (aggregate balance, contributor ledger).
    #[must_use]
    pub fn rent_pool(&self) -> &RentPool {
        &self.rent_pool
    }

    /// The replay registry.
    #[must_use]
    pub fn replay_registry(&self) -> &ReplayRegistry {
        &self.replay
    }

    /// The engine's rent-economy configuration.
    #[must_use]
    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }

    // -----------------------------------------------------------------
    // Wrap / unwrap (pause-gated vault pass-throughs)
    // -----------------------------------------------------------------

    /// Lock underlying and mint wrapped 1:1 for `user`.
    pub fn deposit(&mut self, vault: &mut Vault, user: AccountId, amount: u64) -> Result<()> {
        let state = self.require_state()?;
        if state.paused {
            return Err(SettleError::ProgramPaused);
        }
        vault.deposit(user, amount)
    }

    /// Burn wrapped and release underlying 1:1 for `user`.
    pub fn withdraw(&mut self, vault: &mut Vault, user: AccountId, amount: u64) -> Result<()> {
        let state = self.require_state()?;
        if state.paused {
            return Err(SettleError::ProgramPaused);
        }
        vault.withdraw(user, amount)
    }

    // -----------------------------------------------------------------
    // Settlement
    // -----------------------------------------------------------------

    /// Settle one payer-signed authorization, submitted by `facilitator`.
    ///
    /// Preconditions are checked in a fixed order, each a hard
    /// rejection; no partial effects survive any failure. The replay
    /// record's creation is the exactly-once anchor: of two racing
    /// submissions for the same nonce, the second observes the record
    /// and fails.
    ///
    /// # Errors
    /// [`SettleError::PaymentExpired`], [`SettleError::UnauthorizedSigner`],
    /// [`SettleError::InvalidSignature`],
    /// [`SettleError::InvalidPaymentAuthorization`],
    /// [`SettleError::NonceAlreadyUsed`],
    /// [`SettleError::InsufficientRentPool`], plus
    /// [`SettleError::AccountNotFound`] /
    /// [`SettleError::InsufficientBalance`] from the vault and
    /// [`SettleError::NotInitialized`] / [`SettleError::ProgramPaused`] /
    /// [`SettleError::InvalidDelegate`] from the engine's own gates.
    pub fn settle_payment(
        &mut self,
        vault: &mut Vault,
        authority: &TransferAuthority,
        payload: &SettlePayload,
        facilitator: AccountId,
        from_account: AccountKey,
        to_account: AccountKey,
    ) -> Result<TransferReceipt> {
        let state = self.require_state()?;
        if state.paused {
            return Err(SettleError::ProgramPaused);
        }
        if authority.id() != state.transfer_authority {
            return Err(SettleError::InvalidDelegate);
        }

        let auth = &payload.payment_auth;
        let now = self.clock.unix_now();

        // 1. Temporal validity; `valid_until` is the last valid instant.
        if auth.is_expired(now) {
            return Err(SettleError::PaymentExpired {
                valid_until: auth.valid_until,
                now,
            });
        }

        // 2. The claimed signer must be the payer named in the authorization.
        let claimed_signer = AccountId::from_pubkey(payload.signer_pubkey);
        if claimed_signer != auth.from {
            return Err(SettleError::UnauthorizedSigner);
        }

        // 3. Verify against the recomputed canonical bytes — any field
        //    that differs from what was signed invalidates the signature.
        if !verify_detached(&auth.signing_bytes(), &payload.signature, &claimed_signer) {
            return Err(SettleError::InvalidSignature);
        }

        // 4. The submitted accounts must belong to the signed parties.
        if vault.account_owner(&from_account)? != auth.from {
            return Err(SettleError::InvalidPaymentAuthorization {
                reason: "source account is not owned by the payer".into(),
            });
        }
        if vault.account_owner(&to_account)? != auth.to {
            return Err(SettleError::InvalidPaymentAuthorization {
                reason: "destination account is not owned by the payee".into(),
            });
        }

        // 5. The nonce must be fresh.
        let record_key = auth.record_key();
        if self.replay.contains(&record_key) {
            return Err(SettleError::NonceAlreadyUsed(record_key));
        }

        // 6. Fund and create the replay record before the transfer.
        let rent = self.config.record_rent;
        self.rent_pool.debit_record_rent(rent)?;
        self.replay.insert_if_absent(ReplayRecord {
            payer: auth.from,
            nonce: auth.nonce,
            created_at: now,
            expires_at: auth.valid_until,
            rent_paid: rent,
        })?;

        // 7. Execute under delegate authority. On failure the record
        //    and the rent debit roll back together.
        if let Err(err) = vault.transfer_delegated(authority, from_account, to_account, auth.amount)
        {
            self.replay.remove(&record_key);
            self.rent_pool.refund_record_rent(rent)?;
            return Err(err);
        }

        tracing::info!(
            nonce = %auth.nonce,
            from = %auth.from,
            to = %auth.to,
            amount = auth.amount,
            facilitator = %facilitator,
            "payment settled"
        );

        Ok(TransferReceipt {
            id: ReceiptId::new(),
            nonce: auth.nonce,
            record_key,
            from: auth.from,
            to: auth.to,
            amount: auth.amount,
            facilitator,
            settled_at: now,
        })
    }

    // -----------------------------------------------------------------
    // Garbage collection
    // -----------------------------------------------------------------

    /// Close the expired replay record for `nonce`; `collector` earns
    /// the reward share of the reclaimed deposit. Allowed while paused
    /// (collection is maintenance, not value movement).
    pub fn garbage_collect(
        &mut self,
        collector: AccountId,
        nonce: &Nonce,
    ) -> Result<CollectReceipt> {
        self.require_state()?;
        let now = self.clock.unix_now();
        collector::collect_expired(
            &mut self.replay,
            &mut self.rent_pool,
            &self.config,
            collector,
            nonce,
            now,
        )
    }
}
