//! Property-based cross-check of BIP-32 derivation against the `bip32` crate.

use proptest::prelude::*;
use twain::DerivationPath;
use twain_evm::ExtendedPrivateKey;

fn path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec((0u32..0x8000_0000, any::<bool>()), 0..6).prop_map(|steps| {
        let mut path = String::from("m");
        for (index, hardened) in steps {
            path.push_str(&format!("/{index}{}", if hardened { "'" } else { "" }));
        }
        path
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: our derivation agrees with an independent BIP-32 implementation.
    #[test]
    fn prop_matches_reference(seed in prop::array::uniform32(any::<u8>()), path in path_strategy()) {
        let ours = DerivationPath::parse(&path)
            .and_then(|p| ExtendedPrivateKey::derive_path(&seed, &p));
        let reference = path
            .parse::<bip32::DerivationPath>()
            .map_err(|e| e.to_string())
            .and_then(|p| bip32::XPrv::derive_from_path(seed, &p).map_err(|e| e.to_string()));

        match (ours, reference) {
            (Ok(ours), Ok(reference)) => {
                let ours_key = ours.signing_key().to_bytes();
                let reference_key = reference.private_key().to_bytes();
                prop_assert_eq!(ours_key.as_slice(), reference_key.as_slice());
                prop_assert_eq!(ours.chain_code(), &reference.attrs().chain_code);
            }
            // Both sides must refuse the same invalid children.
            (Err(_), Err(_)) => {}
            (ours, reference) => prop_assert!(
                false,
                "disagreement at {}: ours ok = {}, reference ok = {}",
                path,
                ours.is_ok(),
                reference.is_ok()
            ),
        }
    }

    /// Property: derivation is a pure function of (seed, path).
    #[test]
    fn prop_deterministic(seed in prop::array::uniform32(any::<u8>()), account in 0u32..1000) {
        let path = DerivationPath::account(60, account, 0, false).unwrap();
        let a = ExtendedPrivateKey::derive_path(&seed, &path).unwrap();
        let b = ExtendedPrivateKey::derive_path(&seed, &path).unwrap();
        prop_assert_eq!(a.signing_key().to_bytes(), b.signing_key().to_bytes());
        prop_assert_eq!(a.chain_code(), b.chain_code());
    }
}
