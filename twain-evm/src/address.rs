//! Ethereum addresses with EIP-55 mixed-case checksums.

use sha3::{Digest, Keccak256};

/// Compute Keccak-256 hash.
#[inline]
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// Derive the 20-byte address from a public key.
///
/// Accepts the 65-byte uncompressed SEC1 encoding (leading `0x04` is
/// stripped) or the raw 64-byte `x || y`.
pub fn public_key_to_address(public_key: &[u8]) -> [u8; 20] {
    let key_bytes = match public_key {
        [0x04, rest @ ..] if rest.len() == 64 => rest,
        other => other,
    };

    let hash = keccak256(key_bytes);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Render an address in EIP-55 checksum form, `0x`-prefixed.
pub fn to_checksum_address(address: &[u8; 20]) -> String {
    let addr_hex = hex::encode(address);
    let hash = keccak256(addr_hex.as_bytes());

    let mut result = String::with_capacity(42);
    result.push_str("0x");

    for (i, c) in addr_hex.chars().enumerate() {
        let hash_nibble = (hash[i / 2] >> (4 * (1 - i % 2))) & 0xf;
        if c.is_ascii_alphabetic() && hash_nibble >= 8 {
            result.push(c.to_ascii_uppercase());
        } else {
            result.push(c);
        }
    }

    result
}

/// Whether `address` is `0x` + 40 hex digits with correct EIP-55 casing.
pub fn is_checksum_address(address: &str) -> bool {
    let Some(body) = address.strip_prefix("0x") else {
        return false;
    };
    if body.len() != 40 || !body.bytes().all(|b| b.is_ascii_hexdigit()) {
        return false;
    }

    let mut raw = [0u8; 20];
    if hex::decode_to_slice(body, &mut raw).is_err() {
        return false;
    }
    to_checksum_address(&raw) == address
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn keccak_empty() {
        assert_eq!(
            keccak256(b""),
            hex!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
        );
    }

    #[test]
    fn eip55_reference_vectors() {
        for expected in [
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
            "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
            "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
        ] {
            let mut raw = [0u8; 20];
            hex::decode_to_slice(&expected[2..], &mut raw).unwrap();
            assert_eq!(to_checksum_address(&raw), expected);
            assert!(is_checksum_address(expected));
        }
    }

    #[test]
    fn wrong_casing_is_rejected() {
        assert!(!is_checksum_address("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"));
        assert!(!is_checksum_address("0x5AAEB6053F3E94C9B9A09F33669435E7EF1BEAED"));
        assert!(!is_checksum_address("5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"));
        assert!(!is_checksum_address("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeA"));
    }

    #[test]
    fn uncompressed_prefix_is_stripped() {
        let xy = [7u8; 64];
        let mut sec1 = [0u8; 65];
        sec1[0] = 0x04;
        sec1[1..].copy_from_slice(&xy);
        assert_eq!(public_key_to_address(&sec1), public_key_to_address(&xy));
    }
}
