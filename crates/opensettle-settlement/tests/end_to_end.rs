//! End-to-end integration tests across the full settlement flow.
//!
//! These tests exercise the whole pipeline the way production would:
//! fund the vault, contribute rent, sign authorizations with real
//! ed25519 keys, submit them through a facilitator, and reclaim expired
//! replay records. They verify the exactly-once guarantee, the
//! tamper-evidence of the canonical encoding, the rent-pool economy,
//! and supply conservation.

use ed25519_dalek::{Signer, SigningKey};
use opensettle_settlement::SettlementEngine;
use opensettle_types::{
    AccountId, AccountKey, ManualClock, MintId, Nonce, PaymentAuthorization, SettleError,
    SettlePayload, SettlementConfig,
};
use opensettle_vault::{TransferAuthority, Vault};

const NOW: u64 = 1_700_000_000;
const RECORD_RENT: u64 = 1_000;

/// Deterministic keypair from a seed byte.
fn keypair(seed: u8) -> (SigningKey, AccountId) {
    let mut seed_bytes = [0u8; 32];
    seed_bytes[0] = seed;
    seed_bytes[31] = seed.wrapping_mul(17);
    let sk = SigningKey::from_bytes(&seed_bytes);
    let pk = AccountId::from_pubkey(sk.verifying_key().to_bytes());
    (sk, pk)
}

fn sign_payload(sk: &SigningKey, auth: PaymentAuthorization) -> SettlePayload {
    let signature = sk.sign(&auth.signing_bytes()).to_bytes();
    SettlePayload {
        payment_auth: auth,
        signature,
        signer_pubkey: sk.verifying_key().to_bytes(),
    }
}

/// Helper: a fully initialized program with a funded vault.
struct Program {
    engine: SettlementEngine<ManualClock>,
    vault: Vault,
    authority: TransferAuthority,
    clock: ManualClock,
    admin: AccountId,
    facilitator: AccountId,
}

impl Program {
    fn new() -> Self {
        let clock = ManualClock::new(NOW);
        let mut engine = SettlementEngine::with_clock(
            SettlementConfig::new(RECORD_RENT, 1_000),
            clock.clone(),
        );
        let wrapped = MintId([0xAA; 32]);
        let underlying = MintId([0xBB; 32]);
        let (vault, authority) = Vault::new(wrapped, underlying);
        let admin = AccountId([0xAD; 32]);
        engine
            .initialize(admin, wrapped, underlying, authority.id())
            .expect("initialize should succeed");
        Self {
            engine,
            vault,
            authority,
            clock,
            admin,
            facilitator: AccountId([0xFA; 32]),
        }
    }

    /// Create a wrapped account for `user` and fund it via the 1:1
    /// deposit path.
    fn fund_wrapped(&mut self, user: AccountId, amount: u64) -> AccountKey {
        let key = self.vault.create_account(user);
        if amount > 0 {
            self.vault
                .credit_underlying(user, amount)
                .expect("credit should succeed");
            self.engine
                .deposit(&mut self.vault, user, amount)
                .expect("deposit should succeed");
        }
        key
    }

    fn settle(
        &mut self,
        payload: &SettlePayload,
        from_key: AccountKey,
        to_key: AccountKey,
    ) -> Result<opensettle_types::TransferReceipt, SettleError> {
        self.engine.settle_payment(
            &mut self.vault,
            &self.authority,
            payload,
            self.facilitator,
            from_key,
            to_key,
        )
    }
}

// =============================================================================
// Test: the spec's concrete scenario, end to end
// =============================================================================
#[test]
fn e2e_facilitated_settlement() {
    let mut program = Program::new();
    let (alice_sk, alice) = keypair(1);
    let (_, bob) = keypair(2);

    let alice_key = program.fund_wrapped(alice, 100_000_000);
    let bob_key = program.fund_wrapped(bob, 0);
    program
        .engine
        .contribute_rent(program.facilitator, 10 * RECORD_RENT)
        .unwrap();

    // Alice signs off-band; the facilitator submits.
    let nonce = Nonce::random();
    let payload = sign_payload(
        &alice_sk,
        PaymentAuthorization {
            from: alice,
            to: bob,
            amount: 50_000_000,
            nonce,
            valid_until: NOW + 3_600,
        },
    );

    let receipt = program.settle(&payload, alice_key, bob_key).unwrap();

    assert_eq!(program.vault.wrapped_balance(&alice), 50_000_000);
    assert_eq!(program.vault.wrapped_balance(&bob), 50_000_000);
    assert_eq!(receipt.nonce, nonce);
    assert!(program.engine.replay_registry().contains(&receipt.record_key));
    program.vault.verify_supply().unwrap();

    // Resubmitting the identical payload fails and changes nothing.
    let err = program.settle(&payload, alice_key, bob_key).unwrap_err();
    assert!(matches!(err, SettleError::NonceAlreadyUsed(_)));
    assert_eq!(program.vault.wrapped_balance(&alice), 50_000_000);
    assert_eq!(program.vault.wrapped_balance(&bob), 50_000_000);

    // Tampering with the amount (signature unchanged) fails verification.
    let mut tampered = payload.clone();
    tampered.payment_auth.amount = 20_000_000;
    tampered.payment_auth.nonce = Nonce::random();
    let err = program.settle(&tampered, alice_key, bob_key).unwrap_err();
    assert!(matches!(err, SettleError::InvalidSignature));
    assert_eq!(program.vault.wrapped_balance(&alice), 50_000_000);
}

// =============================================================================
// Test: every signed field is tamper-evident
// =============================================================================
#[test]
fn e2e_any_field_tampering_fails_verification() {
    let mut program = Program::new();
    let (alice_sk, alice) = keypair(1);
    let (_, bob) = keypair(2);
    let (_, carol) = keypair(3);

    let alice_key = program.fund_wrapped(alice, 1_000_000);
    let bob_key = program.fund_wrapped(bob, 0);
    program.fund_wrapped(carol, 0);
    program
        .engine
        .contribute_rent(alice, 10 * RECORD_RENT)
        .unwrap();

    let signed = sign_payload(
        &alice_sk,
        PaymentAuthorization {
            from: alice,
            to: bob,
            amount: 1_000,
            nonce: Nonce::random(),
            valid_until: NOW + 3_600,
        },
    );

    // Redirect the payment (also rewire the destination account so the
    // ownership check passes — verification must still catch it).
    let mut redirect = signed.clone();
    redirect.payment_auth.to = carol;
    let carol_key = program.vault.create_account(carol);
    let err = program.settle(&redirect, alice_key, carol_key).unwrap_err();
    assert!(matches!(err, SettleError::InvalidSignature));

    // Extend the validity window.
    let mut extended = signed.clone();
    extended.payment_auth.valid_until += 86_400;
    let err = program.settle(&extended, alice_key, bob_key).unwrap_err();
    assert!(matches!(err, SettleError::InvalidSignature));

    // Swap the nonce.
    let mut renonced = signed.clone();
    renonced.payment_auth.nonce = Nonce::random();
    let err = program.settle(&renonced, alice_key, bob_key).unwrap_err();
    assert!(matches!(err, SettleError::InvalidSignature));

    // Flip one signature byte.
    let mut flipped = signed.clone();
    flipped.signature[17] ^= 0x01;
    let err = program.settle(&flipped, alice_key, bob_key).unwrap_err();
    assert!(matches!(err, SettleError::InvalidSignature));

    // The untampered original still settles.
    program.settle(&signed, alice_key, bob_key).unwrap();
}

// =============================================================================
// Test: full lifecycle — settle, expire, collect, rent recycled
// =============================================================================
#[test]
fn e2e_rent_lifecycle_with_garbage_collection() {
    let mut program = Program::new();
    let (alice_sk, alice) = keypair(1);
    let (_, bob) = keypair(2);
    let (_, contributor) = keypair(5);
    let collector = AccountId([0xCC; 32]);

    let alice_key = program.fund_wrapped(alice, 1_000_000);
    let bob_key = program.fund_wrapped(bob, 0);
    program
        .engine
        .contribute_rent(contributor, 3 * RECORD_RENT)
        .unwrap();

    // Three settlements drain three records' rent from the pool.
    let mut nonces = Vec::new();
    for i in 0..3 {
        let nonce = Nonce::random();
        nonces.push(nonce);
        let payload = sign_payload(
            &alice_sk,
            PaymentAuthorization {
                from: alice,
                to: bob,
                amount: 1_000 + i,
                nonce,
                valid_until: NOW + 60,
            },
        );
        program.settle(&payload, alice_key, bob_key).unwrap();
    }
    assert_eq!(program.engine.rent_pool().balance(), 0);
    assert_eq!(program.engine.rent_pool().records_funded(), 3);
    assert_eq!(program.engine.replay_registry().len(), 3);

    // A fourth settlement fails closed: the pool is empty.
    let payload = sign_payload(
        &alice_sk,
        PaymentAuthorization {
            from: alice,
            to: bob,
            amount: 1,
            nonce: Nonce::random(),
            valid_until: NOW + 60,
        },
    );
    let err = program.settle(&payload, alice_key, bob_key).unwrap_err();
    assert!(matches!(err, SettleError::InsufficientRentPool { .. }));

    // After expiry anyone may collect; 90% of each deposit returns.
    program.clock.set(NOW + 61);
    for nonce in &nonces {
        let receipt = program.engine.garbage_collect(collector, nonce).unwrap();
        assert_eq!(receipt.reclaimed, RECORD_RENT);
        assert_eq!(receipt.reward, RECORD_RENT / 10);
    }
    assert!(program.engine.replay_registry().is_empty());
    assert_eq!(program.engine.rent_pool().balance(), 3 * (RECORD_RENT - RECORD_RENT / 10));

    // The recycled rent funds new settlements again.
    let payload = sign_payload(
        &alice_sk,
        PaymentAuthorization {
            from: alice,
            to: bob,
            amount: 7,
            nonce: Nonce::random(),
            valid_until: NOW + 7_200,
        },
    );
    program.settle(&payload, alice_key, bob_key).unwrap();
}

// =============================================================================
// Test: collected nonces never reopen a replay window
// =============================================================================
#[test]
fn e2e_collected_nonce_is_not_replayable() {
    let mut program = Program::new();
    let (alice_sk, alice) = keypair(1);
    let (_, bob) = keypair(2);
    let collector = AccountId([0xCC; 32]);

    let alice_key = program.fund_wrapped(alice, 10_000);
    let bob_key = program.fund_wrapped(bob, 0);
    program
        .engine
        .contribute_rent(alice, 10 * RECORD_RENT)
        .unwrap();

    let nonce = Nonce::random();
    let payload = sign_payload(
        &alice_sk,
        PaymentAuthorization {
            from: alice,
            to: bob,
            amount: 500,
            nonce,
            valid_until: NOW + 30,
        },
    );
    program.settle(&payload, alice_key, bob_key).unwrap();

    program.clock.set(NOW + 31);
    program.engine.garbage_collect(collector, &nonce).unwrap();

    // The record is gone, but the authorization is expired — checked
    // before the nonce — so the payment cannot execute twice.
    let err = program.settle(&payload, alice_key, bob_key).unwrap_err();
    assert!(matches!(err, SettleError::PaymentExpired { .. }));
    assert_eq!(program.vault.wrapped_balance(&bob), 500);
}

// =============================================================================
// Test: contributor ledger accounting across interleaved operations
// =============================================================================
#[test]
fn e2e_contributor_ledger_accounting() {
    let mut program = Program::new();
    let (_, dana) = keypair(6);
    let (_, erin) = keypair(7);

    program.engine.contribute_rent(dana, 5_000).unwrap();
    program.engine.contribute_rent(erin, 2_000).unwrap();
    program.engine.contribute_rent(dana, 1_000).unwrap();

    assert_eq!(program.engine.rent_pool().balance(), 8_000);
    assert_eq!(program.engine.rent_pool().contribution_of(&dana), 6_000);
    assert_eq!(program.engine.rent_pool().contribution_of(&erin), 2_000);

    // Erin cannot withdraw Dana's share.
    let err = program.engine.withdraw_rent(erin, 2_001).unwrap_err();
    assert!(matches!(err, SettleError::InsufficientFunds { .. }));
    assert_eq!(program.engine.rent_pool().contribution_of(&erin), 2_000);

    // Zero amounts are rejected outright.
    assert!(matches!(
        program.engine.contribute_rent(dana, 0).unwrap_err(),
        SettleError::InvalidAmount
    ));
    assert!(matches!(
        program.engine.withdraw_rent(dana, 0).unwrap_err(),
        SettleError::InvalidAmount
    ));

    program.engine.withdraw_rent(dana, 6_000).unwrap();
    program.engine.withdraw_rent(erin, 2_000).unwrap();
    assert_eq!(program.engine.rent_pool().balance(), 0);
    assert_eq!(program.engine.rent_pool().contribution_of(&dana), 0);

    // Entries persist at zero and accept new contributions.
    program.engine.contribute_rent(dana, 300).unwrap();
    assert_eq!(program.engine.rent_pool().contribution_of(&dana), 300);
}

// =============================================================================
// Test: deposits and withdrawals stay 1:1 with the reserve
// =============================================================================
#[test]
fn e2e_wrap_unwrap_round_trip() {
    let mut program = Program::new();
    let (_, alice) = keypair(1);

    program.vault.create_account(alice);
    program.vault.credit_underlying(alice, 1_000_000).unwrap();

    program.engine.deposit(&mut program.vault, alice, 600_000).unwrap();
    assert_eq!(program.vault.wrapped_balance(&alice), 600_000);
    assert_eq!(program.vault.underlying_balance(&alice), 400_000);
    assert_eq!(program.vault.reserve(), 600_000);

    program.engine.withdraw(&mut program.vault, alice, 250_000).unwrap();
    assert_eq!(program.vault.wrapped_balance(&alice), 350_000);
    assert_eq!(program.vault.underlying_balance(&alice), 650_000);
    assert_eq!(program.vault.reserve(), 350_000);

    // Unwrapping more than the wrapped balance fails.
    let err = program
        .engine
        .withdraw(&mut program.vault, alice, 350_001)
        .unwrap_err();
    assert!(matches!(err, SettleError::InsufficientBalance { .. }));

    program.vault.verify_supply().unwrap();
}

// =============================================================================
// Test: many payers, many facilitators, shared pool
// =============================================================================
#[test]
fn e2e_concurrent_submitters_share_the_pool() {
    let mut program = Program::new();
    let (_, patron) = keypair(9);
    program
        .engine
        .contribute_rent(patron, 100 * RECORD_RENT)
        .unwrap();

    let (_, sink) = keypair(50);
    let sink_key = program.fund_wrapped(sink, 0);

    // Ten payers each sign one authorization; a different facilitator
    // submits each. All ten settle exactly once.
    for seed in 10..20 {
        let (sk, payer) = keypair(seed);
        let payer_key = program.fund_wrapped(payer, 10_000);
        let payload = sign_payload(
            &sk,
            PaymentAuthorization {
                from: payer,
                to: sink,
                amount: 2_500,
                nonce: Nonce::random(),
                valid_until: NOW + 3_600,
            },
        );
        program.facilitator = AccountId([seed; 32]);
        program.settle(&payload, payer_key, sink_key).unwrap();

        let err = program.settle(&payload, payer_key, sink_key).unwrap_err();
        assert!(matches!(err, SettleError::NonceAlreadyUsed(_)));
    }

    assert_eq!(program.vault.wrapped_balance(&sink), 25_000);
    assert_eq!(program.engine.rent_pool().records_funded(), 10);
    assert_eq!(
        program.engine.rent_pool().balance(),
        90 * RECORD_RENT
    );
    program.vault.verify_supply().unwrap();
}

// =============================================================================
// Test: admin pause halts value movement but not maintenance
// =============================================================================
#[test]
fn e2e_pause_gates_value_movement() {
    let mut program = Program::new();
    let (alice_sk, alice) = keypair(1);
    let (_, bob) = keypair(2);
    let collector = AccountId([0xCC; 32]);

    let alice_key = program.fund_wrapped(alice, 10_000);
    let bob_key = program.fund_wrapped(bob, 0);
    program
        .engine
        .contribute_rent(alice, 10 * RECORD_RENT)
        .unwrap();

    // One settled payment whose record will expire.
    let old_nonce = Nonce::random();
    let payload = sign_payload(
        &alice_sk,
        PaymentAuthorization {
            from: alice,
            to: bob,
            amount: 100,
            nonce: old_nonce,
            valid_until: NOW + 10,
        },
    );
    program.settle(&payload, alice_key, bob_key).unwrap();

    program.engine.pause(program.admin).unwrap();

    // Value movement is rejected while paused.
    let fresh = sign_payload(
        &alice_sk,
        PaymentAuthorization {
            from: alice,
            to: bob,
            amount: 100,
            nonce: Nonce::random(),
            valid_until: NOW + 3_600,
        },
    );
    assert!(matches!(
        program.settle(&fresh, alice_key, bob_key).unwrap_err(),
        SettleError::ProgramPaused
    ));
    assert!(matches!(
        program
            .engine
            .deposit(&mut program.vault, alice, 1)
            .unwrap_err(),
        SettleError::ProgramPaused
    ));

    // Rent contributions and garbage collection still run.
    program.engine.contribute_rent(alice, 500).unwrap();
    program.clock.set(NOW + 11);
    program.engine.garbage_collect(collector, &old_nonce).unwrap();

    // Unpause restores settlement.
    program.engine.unpause(program.admin).unwrap();
    program.settle(&fresh, alice_key, bob_key).unwrap();
    assert_eq!(program.vault.wrapped_balance(&bob), 200);
}
