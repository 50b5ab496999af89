//! SLIP-0010 Ed25519 key derivation.
//!
//! Reference: https://github.com/satoshilabs/slips/blob/master/slip-0010.md
//!
//! Ed25519 has no public-key-only child derivation, so every step is
//! hardened: `I = HMAC-SHA512(chain_code, 0x00 || key || ser32(i | 2^31))`.
//! Non-hardened path components are refused, never silently hardened.

use hmac::{Hmac, Mac};
use sha2::Sha512;
use twain::{ChildIndex, DerivationPath, Error, Result};
use zeroize::Zeroizing;

type HmacSha512 = Hmac<Sha512>;

const ED25519_CURVE: &[u8] = b"ed25519 seed";

/// SLIP-0010 extended key: 32-byte key and 32-byte chain code.
pub struct ExtendedKey {
    /// Private key bytes; the Ed25519 signing seed at the leaf.
    pub private_key: Zeroizing<[u8; 32]>,
    /// Chain code carried to the next step.
    pub chain_code: Zeroizing<[u8; 32]>,
    depth: u8,
}

impl ExtendedKey {
    /// Derive the master key from a seed.
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        let mut mac = HmacSha512::new_from_slice(ED25519_CURVE)
            .map_err(|_| Error::Crypto("hmac key rejected"))?;
        mac.update(seed);
        Ok(Self::split(&mac.finalize().into_bytes(), 0))
    }

    /// Derive the hardened child `index'`.
    ///
    /// `index` is given without the hardened bit.
    pub fn derive_hardened(&self, index: u32) -> Result<Self> {
        let hardened_index = ChildIndex::hardened(index)?.to_u32();

        let mut mac = HmacSha512::new_from_slice(&*self.chain_code)
            .map_err(|_| Error::Crypto("hmac key rejected"))?;
        mac.update(&[0x00]);
        mac.update(&*self.private_key);
        mac.update(&hardened_index.to_be_bytes());

        Ok(Self::split(&mac.finalize().into_bytes(), self.depth.saturating_add(1)))
    }

    /// Derive one path step.
    ///
    /// # Errors
    ///
    /// [`Error::NonHardenedEd25519`] for a [`ChildIndex::Normal`] step.
    pub fn derive_child(&self, index: ChildIndex) -> Result<Self> {
        match index {
            ChildIndex::Hardened(i) => self.derive_hardened(i),
            ChildIndex::Normal(i) => {
                tracing::debug!(depth = self.depth, index = i, "slip10 refused non-hardened step");
                Err(Error::NonHardenedEd25519(i))
            }
        }
    }

    /// Derive the key at `path` from `seed`.
    pub fn derive_path(seed: &[u8], path: &DerivationPath) -> Result<Self> {
        path.indices()
            .iter()
            .try_fold(Self::from_seed(seed)?, |key, index| key.derive_child(*index))
    }

    /// Depth in the derivation tree (0 for master).
    #[inline]
    pub const fn depth(&self) -> u8 {
        self.depth
    }

    fn split(result: &[u8], depth: u8) -> Self {
        let mut private_key = Zeroizing::new([0u8; 32]);
        let mut chain_code = Zeroizing::new([0u8; 32]);
        private_key.copy_from_slice(&result[..32]);
        chain_code.copy_from_slice(&result[32..]);
        Self {
            private_key,
            chain_code,
            depth,
        }
    }
}

impl core::fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("depth", &self.depth)
            .field("private_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
