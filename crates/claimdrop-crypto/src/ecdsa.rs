//! # secp256k1 Recoverable Signatures
//!
//! Ethereum-style `(v, r, s)` signatures over 32-byte digests, and recovery
//! of the signer's address without a separately supplied public key.
//!
//! ## Security Invariant
//!
//! [`recover_signer`] rejects, before touching the curve:
//!
//! - `v` outside `{27, 28}`;
//! - `r == 0` or `s == 0`;
//! - `s` in the upper half of the curve order. For every valid `(r, s)` the
//!   pair `(r, n - s)` also verifies; accepting only low-`s` makes each
//!   authorization have exactly one encoding.
//!
//! Private keys are never serialized or logged. `SigningKey` does not
//! implement `Serialize` and its `Debug` output is redacted.
//!
//! ## Serde
//!
//! Signatures serialize as the 65-byte `r ‖ s ‖ v` hex string used by
//! Ethereum wallets.

use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, PublicKey, SecretKey, SECP256K1};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use claimdrop_core::{hex, Address, CryptoError, Digest32};

use crate::keccak::keccak256;

/// `n / 2` for the secp256k1 group order, big-endian.
const HALF_ORDER: [u8; 32] = [
    0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0x5d, 0x57, 0x6e, 0x73, 0x57, 0xa4, 0x50, 0x1d, 0xdf, 0xe9, 0x2f, 0x46, 0x68, 0x1b, 0x20, 0xa0,
];

/// A detached recoverable signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EcdsaSignature {
    /// Recovery id, 27 or 28 for a well-formed signature.
    pub v: u8,
    /// The `r` scalar, big-endian.
    pub r: [u8; 32],
    /// The `s` scalar, big-endian.
    pub s: [u8; 32],
}

impl EcdsaSignature {
    /// Assemble from components.
    pub fn new(v: u8, r: [u8; 32], s: [u8; 32]) -> Self {
        Self { v, r, s }
    }

    /// Parse the 65-byte `r ‖ s ‖ v` wallet encoding.
    pub fn from_bytes(bytes: &[u8; 65]) -> Self {
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Self { v: bytes[64], r, s }
    }

    /// Serialize to `r ‖ s ‖ v`.
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }

    /// Parse from 130 hex characters, with or without `0x`.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode_fixed::<65>(s)
            .map_err(|e| CryptoError::MalformedSignature(e.to_string()))?;
        Ok(Self::from_bytes(&bytes))
    }

    /// Render as `0x`-prefixed lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode_prefixed(&self.to_bytes())
    }

    /// Whether `s` lies in the lower half of the curve order.
    pub fn is_low_s(&self) -> bool {
        self.s <= HALF_ORDER
    }

    fn recovery_id(&self) -> Result<RecoveryId, CryptoError> {
        let id = match self.v {
            27 => 0,
            28 => 1,
            other => {
                return Err(CryptoError::MalformedSignature(format!(
                    "recovery id must be 27 or 28, got {other}"
                )))
            }
        };
        RecoveryId::from_i32(id).map_err(|e| CryptoError::MalformedSignature(e.to_string()))
    }
}

impl Serialize for EcdsaSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for EcdsaSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for EcdsaSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "EcdsaSignature(v={}, r={}..., s={}...)",
            self.v,
            hex::prefix(&self.r),
            hex::prefix(&self.s)
        )
    }
}

impl std::fmt::Display for EcdsaSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A secp256k1 private key.
pub struct SigningKey {
    secret: SecretKey,
}

impl SigningKey {
    /// Generate a fresh random key from the OS RNG.
    pub fn generate() -> Self {
        Self {
            secret: SecretKey::new(&mut rand::rngs::OsRng),
        }
    }

    /// Load from a 32-byte scalar. Zero and values ≥ the curve order are
    /// rejected.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        SecretKey::from_slice(bytes)
            .map(|secret| Self { secret })
            .map_err(|e| CryptoError::KeyError(format!("invalid secp256k1 secret key: {e}")))
    }

    /// Load from 64 hex characters, with or without `0x`.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode_fixed::<32>(s)?;
        Self::from_bytes(&bytes)
    }

    /// The raw secret scalar, for writing key files.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.secret.secret_bytes()
    }

    /// The address controlled by this key.
    pub fn address(&self) -> Address {
        public_key_to_address(&PublicKey::from_secret_key(SECP256K1, &self.secret))
    }

    /// Sign a 32-byte digest. The output is always low-`s`.
    pub fn sign_digest(&self, digest: &Digest32) -> EcdsaSignature {
        let message = Message::from_digest(digest.0);
        let (recovery_id, compact) = SECP256K1
            .sign_ecdsa_recoverable(&message, &self.secret)
            .serialize_compact();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&compact[..32]);
        s.copy_from_slice(&compact[32..]);
        // to_i32 is 0 or 1 for an internally produced signature.
        let v = if recovery_id.to_i32() == 0 { 27 } else { 28 };
        EcdsaSignature { v, r, s }
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SigningKey(<private>)")
    }
}

/// `keccak256(uncompressed_pubkey[1..])[12..]`.
pub fn public_key_to_address(public_key: &PublicKey) -> Address {
    let uncompressed = public_key.serialize_uncompressed();
    let hash = keccak256(&uncompressed[1..]);
    let mut out = [0u8; 20];
    out.copy_from_slice(&hash.as_bytes()[12..]);
    Address(out)
}

/// Recover the address that produced `signature` over `digest`.
pub fn recover_signer(digest: &Digest32, signature: &EcdsaSignature) -> Result<Address, CryptoError> {
    let recovery_id = signature.recovery_id()?;
    if signature.r == [0u8; 32] || signature.s == [0u8; 32] {
        return Err(CryptoError::MalformedSignature(
            "zero r or s scalar".to_string(),
        ));
    }
    if !signature.is_low_s() {
        return Err(CryptoError::MalformedSignature(
            "s is in the upper half of the curve order".to_string(),
        ));
    }

    let mut compact = [0u8; 64];
    compact[..32].copy_from_slice(&signature.r);
    compact[32..].copy_from_slice(&signature.s);
    let recoverable = RecoverableSignature::from_compact(&compact, recovery_id)
        .map_err(|e| CryptoError::MalformedSignature(e.to_string()))?;

    let message = Message::from_digest(digest.0);
    let public_key = SECP256K1
        .recover_ecdsa(&message, &recoverable)
        .map_err(|e| CryptoError::RecoveryFailed(e.to_string()))?;
    Ok(public_key_to_address(&public_key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(last: u8) -> SigningKey {
        let mut bytes = [0u8; 32];
        bytes[31] = last;
        SigningKey::from_bytes(&bytes).unwrap()
    }

    #[test]
    fn known_key_addresses() {
        assert_eq!(
            key(1).address().to_hex(),
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
        assert_eq!(
            key(2).address().to_hex(),
            "0x2b5ad5c4795c026514f8317c7a215e218dccd6cf"
        );
    }

    #[test]
    fn sign_then_recover() {
        let k = SigningKey::generate();
        let digest = keccak256(b"claim");
        let sig = k.sign_digest(&digest);
        assert!(sig.v == 27 || sig.v == 28);
        assert!(sig.is_low_s());
        assert_eq!(recover_signer(&digest, &sig).unwrap(), k.address());
    }

    #[test]
    fn other_digest_recovers_other_address() {
        let k = key(7);
        let sig = k.sign_digest(&keccak256(b"one"));
        let recovered = recover_signer(&keccak256(b"two"), &sig);
        assert_ne!(recovered.ok(), Some(k.address()));
    }

    #[test]
    fn rejects_bad_recovery_ids() {
        let k = key(3);
        let digest = keccak256(b"x");
        let mut sig = k.sign_digest(&digest);
        for v in [0u8, 1, 26, 29, 35] {
            sig.v = v;
            assert!(matches!(
                recover_signer(&digest, &sig),
                Err(CryptoError::MalformedSignature(_))
            ));
        }
    }

    #[test]
    fn rejects_high_s_twin() {
        let k = key(4);
        let digest = keccak256(b"malleable");
        let mut sig = k.sign_digest(&digest);
        sig.s = [0xff; 32];
        assert!(!sig.is_low_s());
        assert!(recover_signer(&digest, &sig).is_err());
    }

    #[test]
    fn rejects_zero_scalars() {
        let digest = keccak256(b"zero");
        let sig = EcdsaSignature::new(27, [0u8; 32], [1u8; 32]);
        assert!(recover_signer(&digest, &sig).is_err());
        let sig = EcdsaSignature::new(27, [1u8; 32], [0u8; 32]);
        assert!(recover_signer(&digest, &sig).is_err());
    }

    #[test]
    fn wallet_encoding_roundtrip() {
        let sig = key(5).sign_digest(&keccak256(b"wallet"));
        let hex = sig.to_hex();
        assert_eq!(hex.len(), 2 + 130);
        assert_eq!(EcdsaSignature::from_hex(&hex).unwrap(), sig);
        let json = serde_json::to_string(&sig).unwrap();
        let back: EcdsaSignature = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sig);
    }

    #[test]
    fn rejects_invalid_secret_keys() {
        assert!(SigningKey::from_bytes(&[0u8; 32]).is_err());
        assert!(SigningKey::from_bytes(&[0xff; 32]).is_err());
        assert!(SigningKey::from_hex("0x1234").is_err());
    }

    #[test]
    fn debug_does_not_leak_private_key() {
        let debug = format!("{:?}", key(9));
        assert_eq!(debug, "SigningKey(<private>)");
    }
}
