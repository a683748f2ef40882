//! The delegate transfer authority.
//!
//! A [`TransferAuthority`] is a capability token minted exactly once,
//! when the vault is constructed. Whoever holds it may move wrapped
//! funds between any accounts — this is what lets the settlement engine
//! execute a payer-signed transfer without the payer countersigning the
//! specific transaction. The vault validates the capability's id on
//! every delegated transfer; it is never reconstructible from public
//! API alone because the constructor hands it out once.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use opensettle_types::MintId;

/// Identity of the vault's transfer authority:
/// `SHA-256("transfer-authority" || wrapped_mint_bytes)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorityId(pub [u8; 32]);

impl AuthorityId {
    #[must_use]
    pub fn derive(wrapped_mint: &MintId) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"transfer-authority");
        hasher.update(wrapped_mint.as_bytes());
        let hash = hasher.finalize();
        Self(hash.into())
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for AuthorityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "auth:{}", hex::encode(&self.0[..8]))
    }
}

/// The capability token itself. Returned once from
/// [`crate::Vault::new`]; hold it where delegated transfers originate.
#[derive(Debug, Clone)]
pub struct TransferAuthority {
    id: AuthorityId,
}

impl TransferAuthority {
    pub(crate) fn mint(id: AuthorityId) -> Self {
        Self { id }
    }

    #[must_use]
    pub fn id(&self) -> AuthorityId {
        self.id
    }
}
