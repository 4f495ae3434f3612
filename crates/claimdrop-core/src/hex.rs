//! # Hex Utilities
//!
//! `0x`-prefixed lowercase hex, the encoding used for every address, digest
//! and signature that leaves the process. Kept local instead of pulling in a
//! hex crate.

use crate::error::CoreError;

/// Render bytes as `0x`-prefixed lowercase hex.
pub fn encode_prefixed(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 2);
    out.push_str("0x");
    for b in bytes {
        out.push_str(&format!("{b:02x}"));
    }
    out
}

/// First four bytes as hex, for `Debug` output.
pub fn prefix(bytes: &[u8]) -> String {
    bytes.iter().take(4).map(|b| format!("{b:02x}")).collect()
}

/// Decode a hex string, with or without `0x`, into bytes.
pub fn decode(s: &str) -> Result<Vec<u8>, CoreError> {
    let s = s.trim();
    let s = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if s.len() % 2 != 0 {
        return Err(CoreError::InvalidHex {
            reason: format!("odd length {}", s.len()),
        });
    }
    (0..s.len())
        .step_by(2)
        .map(|i| {
            let pair = s.get(i..i + 2).ok_or_else(|| CoreError::InvalidHex {
                reason: format!("non-ascii input at position {i}"),
            })?;
            u8::from_str_radix(pair, 16).map_err(|e| CoreError::InvalidHex {
                reason: format!("position {i}: {e}"),
            })
        })
        .collect()
}

/// Decode a hex string into exactly `N` bytes.
pub fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N], CoreError> {
    let bytes = decode(s)?;
    if bytes.len() != N {
        return Err(CoreError::InvalidLength {
            expected: N,
            actual: bytes.len(),
        });
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}
