//! BIP-39 recovery phrases.
//!
//! [`Mnemonic`] wraps a checksum-validated English phrase of 12 or 24 words.
//! Fresh phrases draw their entropy from the OS secure random source; existing
//! phrases can be imported with [`Mnemonic::from_phrase`], optionally after
//! expanding 4-letter abbreviations with [`expand`].
//!
//! # Example
//!
//! ```
//! use twain::mnemonic;
//!
//! let expanded = mnemonic::expand("aban aban aban aban aban aban aban aban aban aban aban abou").unwrap();
//! assert_eq!(
//!     expanded,
//!     "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about"
//! );
//! ```

use core::fmt;

use bip39::Language;
use zeroize::{Zeroize, Zeroizing};

use crate::{Error, Result};

/// Minimum prefix length required for unambiguous word expansion.
///
/// BIP-39 English wordlist guarantees uniqueness at 4 characters.
const MIN_PREFIX_LEN: usize = 4;

/// Supported phrase lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WordCount {
    /// 12 words, 128 bits of entropy.
    #[default]
    Twelve,
    /// 24 words, 256 bits of entropy.
    TwentyFour,
}

impl WordCount {
    /// Number of words in the phrase.
    pub const fn words(self) -> usize {
        match self {
            Self::Twelve => 12,
            Self::TwentyFour => 24,
        }
    }

    /// Entropy length in bytes (before the checksum is appended).
    pub const fn entropy_len(self) -> usize {
        match self {
            Self::Twelve => 16,
            Self::TwentyFour => 32,
        }
    }
}

impl TryFrom<usize> for WordCount {
    type Error = Error;

    fn try_from(words: usize) -> Result<Self> {
        match words {
            12 => Ok(Self::Twelve),
            24 => Ok(Self::TwentyFour),
            n => Err(Error::InvalidWordCount(n)),
        }
    }
}

impl fmt::Display for WordCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.words())
    }
}

/// A checksum-validated BIP-39 recovery phrase.
///
/// The phrase text is zeroized on drop. `Debug` never prints the words.
#[derive(Clone, PartialEq, Eq)]
pub struct Mnemonic {
    phrase: Zeroizing<String>,
    word_count: WordCount,
}

impl Mnemonic {
    /// Generate a new phrase from the OS secure random source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntropySourceUnavailable`] if no secure randomness
    /// can be read. Callers should treat this as fatal.
    pub fn generate(word_count: WordCount) -> Result<Self> {
        let mut entropy = Zeroizing::new([0u8; 32]);
        let entropy = &mut entropy[..word_count.entropy_len()];
        getrandom::fill(entropy).map_err(|e| Error::EntropySourceUnavailable(e.to_string()))?;

        let mnemonic = Self::from_entropy(entropy)?;
        tracing::debug!(words = word_count.words(), "generated mnemonic");
        Ok(mnemonic)
    }

    /// Build a phrase from raw entropy (16 bytes for 12 words, 32 for 24).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWordCount`] for any other entropy length.
    pub fn from_entropy(entropy: &[u8]) -> Result<Self> {
        let word_count = match entropy.len() {
            16 => WordCount::Twelve,
            32 => WordCount::TwentyFour,
            n => return Err(Error::InvalidWordCount(n * 3 / 4)),
        };
        let inner = bip39::Mnemonic::from_entropy_in(Language::English, entropy)?;
        Ok(Self {
            phrase: Zeroizing::new(inner.to_string()),
            word_count,
        })
    }

    /// Parse and validate an existing phrase.
    ///
    /// Surrounding and repeated whitespace is tolerated; the stored phrase is
    /// the canonical single-space form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMnemonicChecksum`] if the words are valid but
    /// the checksum is not, [`Error::InvalidWordCount`] for lengths other than
    /// 12 or 24, and [`Error::Mnemonic`] for unknown words.
    pub fn from_phrase(phrase: &str) -> Result<Self> {
        let mut normalized = phrase.split_whitespace().collect::<Vec<_>>().join(" ");
        let words = normalized.split(' ').filter(|w| !w.is_empty()).count();
        let word_count = WordCount::try_from(words);
        let parsed = bip39::Mnemonic::parse_in_normalized(Language::English, &normalized);
        normalized.zeroize();

        let inner = parsed?;
        Ok(Self {
            phrase: Zeroizing::new(inner.to_string()),
            word_count: word_count?,
        })
    }

    /// The phrase as a single space-separated string.
    ///
    /// **Security Warning**: this value reconstructs every derived key.
    #[inline]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Iterate over the words in order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.phrase.split(' ')
    }

    /// Number of words in the phrase.
    #[inline]
    pub const fn word_count(&self) -> WordCount {
        self.word_count
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mnemonic")
            .field("word_count", &self.word_count.words())
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

impl core::str::FromStr for Mnemonic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_phrase(s)
    }
}

/// Expand abbreviated words in a mnemonic phrase to their full BIP-39 form.
///
/// Each whitespace-separated token is matched against the English wordlist:
/// - If the token is an exact match, it is kept as-is.
/// - If the token is a prefix (>= 4 characters) that uniquely identifies
///   a single word, it is expanded to that word.
/// - Otherwise, an error is returned.
///
/// The result is not checksum-validated; pass it to [`Mnemonic::from_phrase`].
///
/// # Errors
///
/// Returns [`Error::UnknownPrefix`] if a token does not match any word.
/// Returns [`Error::AmbiguousPrefix`] if a token matches multiple words.
/// Returns [`Error::PrefixTooShort`] if a non-exact token has fewer than 4 characters.
pub fn expand(phrase: &str) -> Result<String> {
    let word_list = Language::English.word_list();

    let mut result = String::new();
    for (i, token) in phrase.split_whitespace().enumerate() {
        let word = resolve_token(word_list, &token.to_lowercase())?;
        if i > 0 {
            result.push(' ');
        }
        result.push_str(word);
    }
    Ok(result)
}

/// Resolve a single token against the wordlist.
fn resolve_token(word_list: &'static [&'static str; 2048], token: &str) -> Result<&'static str> {
    // Wordlist is sorted.
    if let Ok(pos) = word_list.binary_search_by(|w| (*w).cmp(token)) {
        return Ok(word_list[pos]);
    }

    if token.len() < MIN_PREFIX_LEN {
        return Err(Error::PrefixTooShort {
            prefix: token.to_owned(),
            min_len: MIN_PREFIX_LEN,
        });
    }

    let matches: Vec<&'static str> = word_list
        .iter()
        .copied()
        .filter(|word| word.starts_with(token))
        .collect();

    match matches.as_slice() {
        [] => Err(Error::UnknownPrefix(token.to_owned())),
        [word] => Ok(*word),
        _ => Err(Error::AmbiguousPrefix {
            prefix: token.to_owned(),
            candidates: matches.iter().map(|w| (*w).to_owned()).collect(),
        }),
    }
}
