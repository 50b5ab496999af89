//! BIP-39 seed stretching.
//!
//! `seed = PBKDF2-HMAC-SHA512(password = phrase, salt = "mnemonic" || passphrase, 2048, 64)`

use core::fmt;

use sha2::Sha512;
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

use crate::{Mnemonic, Result};

/// PBKDF2 iteration count fixed by BIP-39.
pub const PBKDF2_ROUNDS: u32 = 2048;

/// Salt prefix fixed by BIP-39.
const SALT_PREFIX: &str = "mnemonic";

/// Length of the master seed in bytes.
pub const SEED_LEN: usize = 64;

/// The 64-byte master seed every account key is derived from.
///
/// Zeroized on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Seed(Zeroizing<[u8; SEED_LEN]>);

impl Seed {
    /// Stretch a validated mnemonic and optional passphrase into a seed.
    ///
    /// The passphrase is NFKD-normalized; pass `""` for none.
    pub fn derive(mnemonic: &Mnemonic, passphrase: &str) -> Self {
        let salt = Zeroizing::new(format!("{SALT_PREFIX}{passphrase}").nfkd().collect::<String>());
        let mut seed = Zeroizing::new([0u8; SEED_LEN]);
        pbkdf2::pbkdf2_hmac::<Sha512>(
            mnemonic.phrase().as_bytes(),
            salt.as_bytes(),
            PBKDF2_ROUNDS,
            seed.as_mut_slice(),
        );
        Self(seed)
    }

    /// Validate `phrase` and derive its seed.
    ///
    /// # Errors
    ///
    /// Refuses phrases that fail checksum validation with
    /// [`crate::Error::InvalidMnemonicChecksum`] instead of stretching them.
    pub fn from_phrase(phrase: &str, passphrase: &str) -> Result<Self> {
        let mnemonic = Mnemonic::from_phrase(phrase)?;
        Ok(Self::derive(&mnemonic, passphrase))
    }

    /// Wrap raw seed bytes, e.g. from another BIP-39 implementation.
    pub fn from_bytes(bytes: [u8; SEED_LEN]) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// The raw seed bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }
}

impl AsRef<[u8]> for Seed {
    fn as_ref(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed([REDACTED])")
    }
}
