//! # Twain - two-chain HD wallet core
//!
//! Shared primitives for deriving Ed25519 (Solana-style) and secp256k1
//! (Ethereum-style) accounts from one BIP-39 recovery phrase:
//!
//! - [`Mnemonic`]: checksummed 12/24-word recovery phrases
//! - [`Seed`]: the 64-byte PBKDF2 master seed
//! - [`DerivationPath`]: structured `m/44'/…` paths
//! - [`Chain`]: the per-curve capability implemented by `twain-svm` and `twain-evm`
//!
//! # Example
//!
//! ```
//! use twain::{Mnemonic, Seed};
//!
//! let mnemonic = Mnemonic::from_phrase(
//!     "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
//! )?;
//! let seed = Seed::derive(&mnemonic, "");
//! assert_eq!(seed.as_bytes().len(), 64);
//! # Ok::<(), twain::Error>(())
//! ```

#![warn(
    missing_docs,
    rust_2018_idioms,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::doc_markdown,
    clippy::missing_const_for_fn
)]
#![forbid(unsafe_code)]

pub mod error;
pub mod hdpath;
pub mod mnemonic;
pub mod seed;
pub mod traits;

pub use error::{Error, Result};
pub use hdpath::{ChildIndex, DerivationPath};
pub use mnemonic::{Mnemonic, WordCount};
pub use seed::Seed;
pub use traits::{Chain, DerivedAccount};
