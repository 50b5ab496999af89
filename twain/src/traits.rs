//! The per-curve capability shared by every supported chain.
//!
//! A chain owns three steps of the pipeline:
//!
//! 1. [`Chain::derive_key_material`]: seed + account index to raw key material,
//!    using that curve's HD scheme;
//! 2. [`Chain::synthesize_key_pair`]: key material to a signing keypair;
//! 3. [`Chain::encode_address`]: public key to the chain-native address.
//!
//! [`Chain::derive_account`] runs the three in order.

use zeroize::Zeroizing;

use crate::{DerivationPath, Result, Seed};

/// A fully derived account, ready for display.
#[derive(Clone, PartialEq, Eq)]
pub struct DerivedAccount {
    /// Account index the path was built from.
    ///
    /// For explicit paths this is the third component's index, and 0 when
    /// the path has fewer than three steps.
    pub account: u32,
    /// Derivation path used.
    pub path: DerivationPath,
    /// Chain-native address.
    pub address: String,
    /// Public key in hex (compressed form for secp256k1, raw for Ed25519).
    pub public_key_hex: String,
    /// Chain-native private key export (zeroized on drop).
    pub secret: Zeroizing<String>,
}

impl core::fmt::Debug for DerivedAccount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DerivedAccount")
            .field("account", &self.account)
            .field("path", &self.path.to_string())
            .field("address", &self.address)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// HD derivation and address encoding for one curve.
pub trait Chain {
    /// Short human-readable chain name.
    const NAME: &'static str;

    /// Output of the HD scheme: private key bytes plus chain code.
    type KeyMaterial;

    /// Signing keypair for the curve.
    type KeyPair;

    /// Account path template for `account`.
    fn account_path(account: u32) -> Result<DerivationPath>;

    /// Walk the account path from the master seed.
    fn derive_key_material(seed: &Seed, account: u32) -> Result<Self::KeyMaterial>;

    /// Turn derived key material into a signing keypair.
    fn synthesize_key_pair(material: &Self::KeyMaterial) -> Result<Self::KeyPair>;

    /// Render the public half of `key_pair` as an address.
    fn encode_address(key_pair: &Self::KeyPair) -> String;

    /// Public key in hex.
    fn public_key_hex(key_pair: &Self::KeyPair) -> String;

    /// Private key in the chain's customary export format.
    fn export_secret(key_pair: &Self::KeyPair) -> Zeroizing<String>;

    /// Full pipeline for one account.
    fn derive_account(seed: &Seed, account: u32) -> Result<DerivedAccount> {
        let path = Self::account_path(account)?;
        let material = Self::derive_key_material(seed, account)?;
        let key_pair = Self::synthesize_key_pair(&material)?;

        tracing::debug!(chain = Self::NAME, %path, "derived account");

        Ok(DerivedAccount {
            account,
            path,
            address: Self::encode_address(&key_pair),
            public_key_hex: Self::public_key_hex(&key_pair),
            secret: Self::export_secret(&key_pair),
        })
    }
}
