//! Ed25519 (Solana-style) accounts for Twain.
//!
//! Keys follow SLIP-0010, which allows hardened steps only, along
//! `m/44'/501'/{account}'/0'`. The address is the base-58 encoding of the
//! 32-byte public key.
//!
//! # Usage
//!
//! ```
//! use twain::{Chain, Seed};
//! use twain_svm::Solana;
//!
//! let seed = Seed::from_phrase(
//!     "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
//!     "",
//! )?;
//! let account = Solana::derive_account(&seed, 0)?;
//! assert_eq!(account.address, "HAgk14JpMQLgt6rVgv7cBQFJWFto5Dqxi472uT3DKpqk");
//! # Ok::<(), twain::Error>(())
//! ```

#![forbid(unsafe_code)]

mod deriver;
pub mod slip10;

pub use deriver::{Deriver, Solana, SolanaKeyPair, COIN_TYPE};
pub use slip10::ExtendedKey;
