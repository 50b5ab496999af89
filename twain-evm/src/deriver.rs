//! Ethereum-style account derivation from a master seed.

use k256::ecdsa::{SigningKey, VerifyingKey};
use twain::{Chain, DerivationPath, DerivedAccount, Result, Seed};
use zeroize::Zeroizing;

use crate::address::{public_key_to_address, to_checksum_address};
use crate::bip32::ExtendedPrivateKey;

/// SLIP-44 coin type for Ethereum.
pub const COIN_TYPE: u32 = 60;

/// secp256k1 ECDSA keypair.
#[derive(Debug, Clone)]
pub struct EthereumKeyPair {
    signing_key: SigningKey,
}

impl EthereumKeyPair {
    /// The public key.
    pub fn verifying_key(&self) -> &VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// 65-byte uncompressed SEC1 public key (`0x04 || x || y`).
    pub fn uncompressed_public_key(&self) -> Vec<u8> {
        self.verifying_key().to_encoded_point(false).as_bytes().to_vec()
    }

    /// 32-byte private scalar.
    pub fn secret_bytes(&self) -> Zeroizing<[u8; 32]> {
        let mut out = Zeroizing::new([0u8; 32]);
        out.copy_from_slice(&self.signing_key.to_bytes());
        out
    }
}

/// The secp256k1 chain: BIP-32 along `m/44'/60'/{account}'/0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ethereum;

impl Chain for Ethereum {
    const NAME: &'static str = "ethereum";

    type KeyMaterial = ExtendedPrivateKey;
    type KeyPair = EthereumKeyPair;

    fn account_path(account: u32) -> Result<DerivationPath> {
        DerivationPath::account(COIN_TYPE, account, 0, false)
    }

    fn derive_key_material(seed: &Seed, account: u32) -> Result<ExtendedPrivateKey> {
        ExtendedPrivateKey::derive_path(seed.as_bytes(), &Self::account_path(account)?)
    }

    fn synthesize_key_pair(material: &ExtendedPrivateKey) -> Result<EthereumKeyPair> {
        Ok(EthereumKeyPair {
            signing_key: material.signing_key().clone(),
        })
    }

    fn encode_address(key_pair: &EthereumKeyPair) -> String {
        to_checksum_address(&public_key_to_address(&key_pair.uncompressed_public_key()))
    }

    fn public_key_hex(key_pair: &EthereumKeyPair) -> String {
        hex::encode(key_pair.verifying_key().to_encoded_point(true).as_bytes())
    }

    fn export_secret(key_pair: &EthereumKeyPair) -> Zeroizing<String> {
        Zeroizing::new(format!("0x{}", hex::encode(key_pair.secret_bytes().as_slice())))
    }
}

/// Ethereum address deriver bound to one seed.
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

    /// Derive the account at `m/44'/60'/{account}'/0`.
    #[inline]
    pub fn derive(&self, account: u32) -> Result<DerivedAccount> {
        Ethereum::derive_account(self.seed, account)
    }

    /// Derive `count` consecutive accounts starting at `start`.
    pub fn derive_many(&self, start: u32, count: u32) -> Result<Vec<DerivedAccount>> {
        (start..start.saturating_add(count))
            .map(|account| self.derive(account))
            .collect()
    }

    /// Derive at an arbitrary BIP-32 path, e.g. the MetaMask path
    /// `m/44'/60'/0'/0/0`.
    ///
    /// `account` on the result is the third path component, or 0 if the
    /// path is shorter.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<DerivedAccount> {
        let material = ExtendedPrivateKey::derive_path(self.seed.as_bytes(), path)?;
        let key_pair = Ethereum::synthesize_key_pair(&material)?;

        Ok(DerivedAccount {
            account: path.indices().get(2).map_or(0, twain::ChildIndex::index),
            path: path.clone(),
            address: Ethereum::encode_address(&key_pair),
            public_key_hex: Ethereum::public_key_hex(&key_pair),
            secret: Ethereum::export_secret(&key_pair),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::address::is_checksum_address;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn test_seed() -> Seed {
        Seed::from_phrase(TEST_MNEMONIC, "").unwrap()
    }

    #[test]
    fn known_address_account_0() {
        let seed = test_seed();
        let addr = Deriver::new(&seed).derive(0).unwrap();
        assert_eq!(addr.address, "0xB8Fd42000d00202DCbCF5e18d6640d656345FD6A");
        assert_eq!(addr.path.to_string(), "m/44'/60'/0'/0");
        assert_eq!(
            addr.secret.as_str(),
            "0xa29ac2cb17e31cdab42a8fe2d83f04f4b69c5e73bc8d3bf6b5dc96ac239b145a"
        );
        assert_eq!(
            addr.public_key_hex,
            "02ccf96184b4d342c523936910e0222be7131654842db75bb1a5cbc772fe21b2d6"
        );
    }

    #[test]
    fn known_addresses_accounts_1_and_2() {
        let seed = test_seed();
        let addrs = Deriver::new(&seed).derive_many(1, 2).unwrap();
        assert_eq!(addrs[0].address, "0xefE95D823dAF0EDb954033078957689dAb656a7f");
        assert_eq!(addrs[1].address, "0xDfAF07d617f94E2CC2A94c843E741d96Cc05da27");
    }

    #[test]
    fn metamask_path_cross_check() {
        let seed = test_seed();
        let addr = Deriver::new(&seed)
            .derive_path(&"m/44'/60'/0'/0/0".parse().unwrap())
            .unwrap();
        assert_eq!(addr.address, "0x9858EfFD232B4033E47d90003D41EC34EcaEda94");
    }

    #[test]
    fn short_path_reports_account_zero() {
        let seed = test_seed();
        let deriver = Deriver::new(&seed);
        let short = deriver.derive_path(&"m/44'/60'".parse().unwrap()).unwrap();
        assert_eq!(short.account, 0);
        let full = deriver.derive_path(&"m/44'/60'/5'/0/0".parse().unwrap()).unwrap();
        assert_eq!(full.account, 5);
    }

    #[test]
    fn address_format() {
        let seed = test_seed();
        for addr in Deriver::new(&seed).derive_many(0, 10).unwrap() {
            assert!(addr.address.starts_with("0x"));
            assert_eq!(addr.address.len(), 42);
            assert!(is_checksum_address(&addr.address));
        }
    }

    #[test]
    fn unique_and_deterministic() {
        let seed = test_seed();
        let deriver = Deriver::new(&seed);
        let addrs = deriver.derive_many(0, 5).unwrap();
        let unique: HashSet<_> = addrs.iter().map(|a| a.address.clone()).collect();
        assert_eq!(unique.len(), 5);
        assert_eq!(deriver.derive(3).unwrap(), addrs[3]);
    }

    #[test]
    fn passphrase_changes_addresses() {
        let plain = test_seed();
        let salted = Seed::from_phrase(TEST_MNEMONIC, "password").unwrap();
        assert_ne!(
            Deriver::new(&plain).derive(0).unwrap().address,
            Deriver::new(&salted).derive(0).unwrap().address
        );
    }

    #[test]
    fn rejects_hardened_bit_account() {
        let seed = test_seed();
        assert!(matches!(
            Deriver::new(&seed).derive(u32::MAX),
            Err(twain::Error::InvalidDerivationIndex(_))
        ));
        assert!(matches!(
            Deriver::new(&seed).derive(0x7FFF_FFFF),
            Err(twain::Error::InvalidDerivationIndex(0x7FFF_FFFF))
        ));
        assert!(Deriver::new(&seed).derive(0x7FFF_FFFE).is_ok());
    }
}
