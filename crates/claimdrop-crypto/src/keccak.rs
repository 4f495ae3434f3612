//! # keccak256
//!
//! Ethereum's keccak256 (the pre-standard Keccak padding, not SHA3-256).

use claimdrop_core::{AbiEncoded, Digest32};
use tiny_keccak::{Hasher, Keccak};

/// keccak256 of a byte string.
pub fn keccak256(data: &[u8]) -> Digest32 {
    keccak256_concat(&[data])
}

/// keccak256 of the concatenation of `parts`, without allocating the
/// concatenation.
pub fn keccak256_concat(parts: &[&[u8]]) -> Digest32 {
    let mut keccak = Keccak::v256();
    for part in parts {
        keccak.update(part);
    }
    let mut out = [0u8; 32];
    keccak.finalize(&mut out);
    Digest32(out)
}

/// keccak256 of ABI-encoded words.
pub fn keccak256_abi(encoded: &AbiEncoded) -> Digest32 {
    keccak256(encoded.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_vector() {
        assert_eq!(
            keccak256(b"").to_hex(),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn abc_vector() {
        assert_eq!(
            keccak256(b"abc").to_hex(),
            "0x4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45"
        );
    }

    #[test]
    fn concat_equals_single_buffer() {
        assert_eq!(keccak256_concat(&[&b"ab"[..], &b"c"[..]]), keccak256(b"abc"));
        assert_eq!(keccak256_concat(&[]), keccak256(b""));
    }
}
