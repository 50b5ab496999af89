//! BIP-32 hierarchical deterministic derivation on secp256k1.
//!
//! - master: `I = HMAC-SHA512("Bitcoin seed", seed)`
//! - hardened child: `I = HMAC-SHA512(c_par, 0x00 || ser256(k_par) || ser32(i))`
//! - normal child: `I = HMAC-SHA512(c_par, serP(point(k_par)) || ser32(i))`
//! - `k_child = parse256(I_L) + k_par (mod n)`, `c_child = I_R`
//!
//! BIP-32 declares a child invalid when `parse256(I_L) >= n` or the sum is
//! zero. Both are reported as [`Error::ScalarOverflow`]; the scalar is never
//! reduced into a plausible but wrong key.

use hmac::{Hmac, Mac};
use k256::ecdsa::SigningKey;
use k256::elliptic_curve::PrimeField;
use k256::{FieldBytes, Scalar};
use sha2::Sha512;
use twain::{ChildIndex, DerivationPath, Error, Result};
use zeroize::Zeroizing;

type HmacSha512 = Hmac<Sha512>;

const MASTER_KEY: &[u8] = b"Bitcoin seed";

/// BIP-32 extended private key.
#[derive(Clone)]
pub struct ExtendedPrivateKey {
    signing_key: SigningKey,
    chain_code: Zeroizing<[u8; 32]>,
    depth: u8,
    child_index: u32,
}

impl ExtendedPrivateKey {
    /// Derive the master key from a seed.
    ///
    /// # Errors
    ///
    /// [`Error::ScalarOverflow`] at depth 0 if `I_L` is zero or not below
    /// the curve order.
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        let mut mac =
            HmacSha512::new_from_slice(MASTER_KEY).map_err(|_| Error::Crypto("hmac key rejected"))?;
        mac.update(seed);
        let result = finalize(mac);

        let signing_key = SigningKey::from_slice(&result[..32])
            .map_err(|_| Error::ScalarOverflow { depth: 0, index: 0 })?;

        Ok(Self {
            signing_key,
            chain_code: chain_code(&result[32..]),
            depth: 0,
            child_index: 0,
        })
    }

    /// Derive one child step, hardened or normal.
    pub fn derive_child(&self, index: ChildIndex) -> Result<Self> {
        let depth = self
            .depth
            .checked_add(1)
            .ok_or_else(|| Error::InvalidDerivationPath("maximum depth exceeded".to_owned()))?;
        let raw_index = index.to_u32();

        let mut mac = HmacSha512::new_from_slice(&*self.chain_code)
            .map_err(|_| Error::Crypto("hmac key rejected"))?;

        if index.is_hardened() {
            mac.update(&[0x00]);
            mac.update(&self.signing_key.to_bytes());
        } else {
            mac.update(&self.compressed_public_key());
        }
        mac.update(&raw_index.to_be_bytes());

        let result = finalize(mac);
        let signing_key = tweak_add(&self.signing_key, &result[..32]).ok_or_else(|| {
            tracing::warn!(depth, index = raw_index, "bip32 child scalar out of range");
            Error::ScalarOverflow {
                depth,
                index: raw_index,
            }
        })?;

        Ok(Self {
            signing_key,
            chain_code: chain_code(&result[32..]),
            depth,
            child_index: raw_index,
        })
    }

    /// Derive the key at `path` from `seed`.
    pub fn derive_path(seed: &[u8], path: &DerivationPath) -> Result<Self> {
        path.indices()
            .iter()
            .try_fold(Self::from_seed(seed)?, |key, index| key.derive_child(*index))
    }

    /// The private scalar as an ECDSA signing key.
    #[inline]
    pub const fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }

    /// 33-byte compressed SEC1 public key.
    pub fn compressed_public_key(&self) -> Vec<u8> {
        self.signing_key
            .verifying_key()
            .to_encoded_point(true)
            .as_bytes()
            .to_vec()
    }

    /// The chain code.
    #[inline]
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// Depth in the derivation tree (0 for master).
    #[inline]
    pub const fn depth(&self) -> u8 {
        self.depth
    }

    /// Raw index of the step that produced this key, hardened bit included.
    #[inline]
    pub const fn child_index(&self) -> u32 {
        self.child_index
    }
}

/// `parse256(il) + k_par (mod n)`, or `None` when BIP-32 declares the child
/// invalid.
fn tweak_add(parent: &SigningKey, il: &[u8]) -> Option<SigningKey> {
    let tweak: Option<Scalar> = Scalar::from_repr(FieldBytes::clone_from_slice(il)).into();
    let parent: Scalar = *parent.as_nonzero_scalar().as_ref();
    let child = tweak? + parent;
    // from_bytes rejects zero.
    SigningKey::from_bytes(&child.to_bytes()).ok()
}

fn finalize(mac: HmacSha512) -> Zeroizing<[u8; 64]> {
    let mut out = Zeroizing::new([0u8; 64]);
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

fn chain_code(bytes: &[u8]) -> Zeroizing<[u8; 32]> {
    let mut code = Zeroizing::new([0u8; 32]);
    code.copy_from_slice(bytes);
    code
}

impl core::fmt::Debug for ExtendedPrivateKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ExtendedPrivateKey")
            .field("depth", &self.depth)
            .field("child_index", &self.child_index)
            .field("private_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    // BIP-32 test vector 1
    const TEST_SEED_1: [u8; 16] = hex!("000102030405060708090a0b0c0d0e0f");

    const CURVE_ORDER: [u8; 32] =
        hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141");

    fn derive(path: &str) -> ExtendedPrivateKey {
        ExtendedPrivateKey::derive_path(&TEST_SEED_1, &path.parse().unwrap()).unwrap()
    }

    #[test]
    fn vector_1_master() {
        let master = ExtendedPrivateKey::from_seed(&TEST_SEED_1).unwrap();
        assert_eq!(
            master.signing_key().to_bytes().as_slice(),
            hex!("e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35")
        );
        assert_eq!(
            master.chain_code(),
            &hex!("873dff81c02f525623fd1fe5167eac3a55a049de3d314bb42ee227ffed37d508")
        );
        assert_eq!(master.depth(), 0);
    }

    #[test]
    fn vector_1_hardened_child() {
        let child = derive("m/0'");
        assert_eq!(
            child.signing_key().to_bytes().as_slice(),
            hex!("edb2e14f9ee77d26dd93b4ecede8d16ed408ce149b6cd80b0715a2d911a0afea")
        );
        assert_eq!(child.child_index(), 0x8000_0000);
    }

    #[test]
    fn vector_1_normal_child() {
        let child = derive("m/0'/1");
        assert_eq!(
            child.signing_key().to_bytes().as_slice(),
            hex!("3c6cb8d0f6a264c91ea8b5030fadaa8e538b020f0a387421a12de9319dc93368")
        );
        assert_eq!(child.depth(), 2);
        assert_eq!(child.child_index(), 1);
    }

    #[test]
    fn hardened_and_normal_steps_differ() {
        let hardened = derive("m/44'/60'/0'/0'");
        let normal = derive("m/44'/60'/0'/0");
        assert_ne!(hardened.signing_key().to_bytes(), normal.signing_key().to_bytes());
    }

    #[test]
    fn tweak_at_curve_order_is_rejected() {
        let parent = SigningKey::from_slice(&hex!(
            "0000000000000000000000000000000000000000000000000000000000000001"
        ))
        .unwrap();
        assert!(tweak_add(&parent, &CURVE_ORDER).is_none());
        assert!(tweak_add(&parent, &[0xff; 32]).is_none());
    }

    #[test]
    fn tweak_summing_to_zero_is_rejected() {
        let parent = SigningKey::from_slice(&hex!(
            "0000000000000000000000000000000000000000000000000000000000000001"
        ))
        .unwrap();
        let n_minus_one = hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140");
        assert!(tweak_add(&parent, &n_minus_one).is_none());
    }

    #[test]
    fn tweak_wraps_modulo_order() {
        let parent = SigningKey::from_slice(&hex!(
            "0000000000000000000000000000000000000000000000000000000000000002"
        ))
        .unwrap();
        let n_minus_one = hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140");
        let child = tweak_add(&parent, &n_minus_one).unwrap();
        assert_eq!(
            child.to_bytes().as_slice(),
            hex!("0000000000000000000000000000000000000000000000000000000000000001")
        );
    }

    #[test]
    fn matches_bip32_crate() {
        for path in ["m/44'/60'/0'/0", "m/44'/60'/17'/0", "m/0/1/2'/3", "m/2147483647'/5"] {
            let ours = derive(path);
            let reference =
                bip32::XPrv::derive_from_path(TEST_SEED_1, &path.parse().unwrap()).unwrap();
            assert_eq!(
                ours.signing_key().to_bytes().as_slice(),
                reference.private_key().to_bytes().as_slice(),
                "mismatch at {path}"
            );
            assert_eq!(ours.chain_code(), &reference.attrs().chain_code);
        }
    }
}
