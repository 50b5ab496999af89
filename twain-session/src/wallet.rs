//! A derived wallet entry.

use twain::{DerivationPath, DerivedAccount, Result, Seed};

use crate::ChainType;

/// One derived account as shown to the user.
///
/// Holds no secret material; the private key is re-derived on demand
/// via [`crate::SessionController::reveal_private_key`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wallet {
    /// Account scheme.
    pub chain: ChainType,
    /// Account index (the hardened third path component).
    pub account: u32,
    /// Full derivation path.
    pub path: DerivationPath,
    /// Chain-native public address.
    pub address: String,
    /// Public key in hex.
    pub public_key_hex: String,
}

impl Wallet {
    /// Derive the wallet for (`seed`, `chain`, `account`).
    ///
    /// Pure: the same inputs always produce an identical wallet.
    pub fn derive(seed: &Seed, chain: ChainType, account: u32) -> Result<Self> {
        chain
            .derive(seed, account)
            .map(|derived| Self::from_derived(chain, derived))
    }

    fn from_derived(chain: ChainType, derived: DerivedAccount) -> Self {
        let DerivedAccount {
            account,
            path,
            address,
            public_key_hex,
            ..
        } = derived;
        Self {
            chain,
            account,
            path,
            address,
            public_key_hex,
        }
    }
}
