//! Error types shared by every Twain crate.

use core::fmt;

/// A convenient Result type alias for Twain operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while generating phrases, deriving keys or
/// driving a wallet session.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// The OS secure random source could not be read.
    EntropySourceUnavailable(String),
    /// Unsupported number of mnemonic words.
    InvalidWordCount(usize),
    /// Malformed mnemonic phrase (unknown word, bad length, ...).
    Mnemonic(bip39::Error),
    /// The phrase is well formed but its checksum does not match the entropy.
    InvalidMnemonicChecksum,
    /// Account index collides with the hardened bit.
    InvalidDerivationIndex(u32),
    /// Ed25519 derivation was asked for a non-hardened step.
    NonHardenedEd25519(u32),
    /// Derivation path text could not be parsed.
    InvalidDerivationPath(String),
    /// BIP-32 produced a scalar outside `[1, n)` at this step.
    ScalarOverflow {
        /// Depth of the key that failed to derive (0 for the master key).
        depth: u8,
        /// Raw child index, hardened bit included.
        index: u32,
    },
    /// Private key bytes are not a valid key for the curve.
    InvalidPrivateKey,
    /// Low-level cryptographic primitive failure.
    Crypto(&'static str),
    /// A session operation was issued in a state that does not allow it.
    PreconditionNotMet(&'static str),
    /// Mnemonic prefix is too short for unambiguous expansion.
    PrefixTooShort {
        /// The prefix that was too short.
        prefix: String,
        /// Minimum required prefix length.
        min_len: usize,
    },
    /// Mnemonic prefix does not match any word in the wordlist.
    UnknownPrefix(String),
    /// Mnemonic prefix matches multiple words in the wordlist.
    AmbiguousPrefix {
        /// The ambiguous prefix.
        prefix: String,
        /// Words that match the prefix.
        candidates: Vec<String>,
    },
}

impl Error {
    /// Whether the error is a recoverable session precondition rather
    /// than a cryptographic failure.
    pub const fn is_precondition(&self) -> bool {
        matches!(self, Self::PreconditionNotMet(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EntropySourceUnavailable(msg) => {
                write!(f, "secure random source unavailable: {msg}")
            }
            Self::InvalidWordCount(n) => write!(f, "invalid word count {n}, must be 12 or 24"),
            Self::Mnemonic(e) => write!(f, "mnemonic error: {e}"),
            Self::InvalidMnemonicChecksum => write!(f, "mnemonic checksum does not validate"),
            Self::InvalidDerivationIndex(i) => {
                write!(f, "account index {i} is outside the non-hardened range")
            }
            Self::NonHardenedEd25519(i) => {
                write!(f, "ed25519 supports hardened derivation only (got index {i})")
            }
            Self::InvalidDerivationPath(path) => write!(f, "invalid derivation path: {path}"),
            Self::ScalarOverflow { depth, index } => write!(
                f,
                "derivation failed for index {index:#x} at depth {depth}: scalar outside curve order"
            ),
            Self::InvalidPrivateKey => write!(f, "invalid private key"),
            Self::Crypto(what) => write!(f, "cryptographic error: {what}"),
            Self::PreconditionNotMet(why) => write!(f, "precondition not met: {why}"),
            Self::PrefixTooShort { prefix, min_len } => {
                write!(f, "prefix \"{prefix}\" is too short (minimum {min_len} characters)")
            }
            Self::UnknownPrefix(prefix) => {
                write!(f, "prefix \"{prefix}\" does not match any BIP-39 word")
            }
            Self::AmbiguousPrefix { prefix, candidates } => {
                write!(f, "prefix \"{prefix}\" is ambiguous, matches: {}", candidates.join(", "))
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Mnemonic(e) => Some(e),
            _ => None,
        }
    }
}

impl From<bip39::Error> for Error {
    fn from(err: bip39::Error) -> Self {
        match err {
            bip39::Error::InvalidChecksum => Self::InvalidMnemonicChecksum,
            other => Self::Mnemonic(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_error_maps_to_dedicated_variant() {
        let err = Error::from(bip39::Error::InvalidChecksum);
        assert!(matches!(err, Error::InvalidMnemonicChecksum));
    }

    #[test]
    fn precondition_is_recoverable() {
        assert!(Error::PreconditionNotMet("no mnemonic").is_precondition());
        assert!(!Error::InvalidMnemonicChecksum.is_precondition());
    }

    #[test]
    fn scalar_overflow_message_names_index() {
        let msg = Error::ScalarOverflow { depth: 3, index: 0x8000_0001 }.to_string();
        assert!(msg.contains("0x80000001"));
    }
}
