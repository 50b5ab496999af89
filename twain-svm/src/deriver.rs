//! Solana-style account derivation from a master seed.

use ed25519_dalek::{SigningKey, VerifyingKey};
use twain::{Chain, DerivationPath, DerivedAccount, Result, Seed};
use zeroize::Zeroizing;

use crate::slip10::ExtendedKey;

/// SLIP-44 coin type for Solana.
pub const COIN_TYPE: u32 = 501;

/// Ed25519 signing keypair.
#[derive(Debug)]
pub struct SolanaKeyPair {
    signing_key: SigningKey,
}

impl SolanaKeyPair {
    /// The 32-byte public key.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// The 32-byte private seed.
    pub fn secret_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.signing_key.to_bytes())
    }

    /// The 64-byte `secret || public` keypair encoding used by Phantom,
    /// Backpack and `solana-keygen`.
    pub fn keypair_bytes(&self) -> Zeroizing<[u8; 64]> {
        Zeroizing::new(self.signing_key.to_keypair_bytes())
    }
}

/// The Ed25519 chain: SLIP-0010 along `m/44'/501'/{account}'/0'`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Solana;

impl Chain for Solana {
    const NAME: &'static str = "solana";

    type KeyMaterial = ExtendedKey;
    type KeyPair = SolanaKeyPair;

    fn account_path(account: u32) -> Result<DerivationPath> {
        DerivationPath::account(COIN_TYPE, account, 0, true)
    }

    fn derive_key_material(seed: &Seed, account: u32) -> Result<ExtendedKey> {
        ExtendedKey::derive_path(seed.as_bytes(), &Self::account_path(account)?)
    }

    fn synthesize_key_pair(material: &ExtendedKey) -> Result<SolanaKeyPair> {
        Ok(SolanaKeyPair {
            signing_key: SigningKey::from_bytes(&material.private_key),
        })
    }

    fn encode_address(key_pair: &SolanaKeyPair) -> String {
        bs58::encode(key_pair.verifying_key().as_bytes()).into_string()
    }

    fn public_key_hex(key_pair: &SolanaKeyPair) -> String {
        hex::encode(key_pair.verifying_key().as_bytes())
    }

    fn export_secret(key_pair: &SolanaKeyPair) -> Zeroizing<String> {
        Zeroizing::new(bs58::encode(key_pair.keypair_bytes().as_slice()).into_string())
    }
}

/// Solana address deriver bound to one seed.
#[derive(Debug)]
pub struct Deriver<'a> {
    seed: &'a Seed,
}

impl<'a> Deriver<'a> {
    /// Create a new deriver over `seed`.
    #[inline]
    #[must_use]
    pub const fn new(seed: &'a Seed) -> Self {
        Self { seed }
    }

    /// Derive the account at `m/44'/501'/{account}'/0'`.
    #[inline]
    pub fn derive(&self, account: u32) -> Result<DerivedAccount> {
        Solana::derive_account(self.seed, account)
    }

    /// Derive `count` consecutive accounts starting at `start`.
    pub fn derive_many(&self, start: u32, count: u32) -> Result<Vec<DerivedAccount>> {
        (start..start.saturating_add(count))
            .map(|account| self.derive(account))
            .collect()
    }

    /// Derive at an arbitrary fully hardened path.
    ///
    /// `account` on the result is the third path component, or 0 if the
    /// path is shorter.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<DerivedAccount> {
        let material = ExtendedKey::derive_path(self.seed.as_bytes(), path)?;
        let key_pair = Solana::synthesize_key_pair(&material)?;

        Ok(DerivedAccount {
            account: path.indices().get(2).map_or(0, twain::ChildIndex::index),
            path: path.clone(),
            address: Solana::encode_address(&key_pair),
            public_key_hex: Solana::public_key_hex(&key_pair),
            secret: Solana::export_secret(&key_pair),
        })
    }
}
