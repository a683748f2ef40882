//! Detached ed25519 signature verification.
//!
//! Deterministic and side-effect free: the same (message, signature,
//! key) triple always produces the same answer, and any bit flip in
//! any of the three flips the result to `false`.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};

use crate::AccountId;

/// Verify a detached ed25519 signature over `message` against the
/// claimed signer's public key.
///
/// Returns `false` for malformed keys as well as for honest
/// verification failures — the caller only ever needs the boolean.
#[must_use]
pub fn verify_detached(message: &[u8], signature: &[u8; 64], signer: &AccountId) -> bool {
    let Ok(key) = VerifyingKey::from_bytes(signer.as_bytes()) else {
        return false;
    };
    let sig = Signature::from_bytes(signature);
    key.verify(message, &sig).is_ok()
}

#[cfg(test)]
mod tests {
    use ed25519_dalek::{Signer, SigningKey};

    use super::*;

    /// Deterministic test keypair from a seed byte.
    fn keypair(seed: u8) -> (SigningKey, AccountId) {
        let mut seed_bytes = [0u8; 32];
        seed_bytes[0] = seed;
        seed_bytes[31] = seed.wrapping_mul(17);
        let sk = SigningKey::from_bytes(&seed_bytes);
        let pk = AccountId::from_pubkey(sk.verifying_key().to_bytes());
        (sk, pk)
    }

    #[test]
    fn sign_then_verify_succeeds() {
        let (sk, pk) = keypair(1);
        let message = b"settle 50 units";
        let sig = sk.sign(message).to_bytes();
        assert!(verify_detached(message, &sig, &pk));
    }

    #[test]
    fn wrong_key_fails() {
        let (sk, _) = keypair(1);
        let (_, other_pk) = keypair(2);
        let message = b"settle 50 units";
        let sig = sk.sign(message).to_bytes();
        assert!(!verify_detached(message, &sig, &other_pk));
    }

    #[test]
    fn any_signature_byte_flip_fails() {
        let (sk, pk) = keypair(3);
        let message = b"settle 50 units";
        let sig = sk.sign(message).to_bytes();

        for i in 0..sig.len() {
            let mut tampered = sig;
            tampered[i] ^= 0x01;
            assert!(
                !verify_detached(message, &tampered, &pk),
                "flip at byte {i} must invalidate the signature"
            );
        }
    }

    #[test]
    fn message_tampering_fails() {
        let (sk, pk) = keypair(4);
        let message = b"settle 50 units";
        let sig = sk.sign(message).to_bytes();

        let mut tampered = *message;
        tampered[0] ^= 0x01;
        assert!(!verify_detached(&tampered, &sig, &pk));
    }

    #[test]
    fn garbage_key_fails_cleanly() {
        let (sk, _) = keypair(5);
        let message = b"anything";
        let sig = sk.sign(message).to_bytes();
        // Not a valid curve point for most values; must return false, not panic.
        let bogus = AccountId([0xFF; 32]);
        assert!(!verify_detached(message, &sig, &bogus));
    }

    #[test]
    fn verification_is_deterministic() {
        let (sk, pk) = keypair(6);
        let message = b"idempotent check";
        let sig = sk.sign(message).to_bytes();
        for _ in 0..3 {
            assert!(verify_detached(message, &sig, &pk));
        }
    }
}
