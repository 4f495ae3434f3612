//! # EIP-712 Typed-Data Digests
//!
//! Binds a claim authorization to one ledger instance and one message
//! schema.
//!
//! ```text
//! domainSeparator = keccak256(DOMAIN_TYPEHASH ‖ keccak256(name) ‖ keccak256(version)
//!                             ‖ chainId ‖ verifyingContract)
//! structHash      = keccak256(CLAIM_TYPEHASH ‖ account ‖ amount)
//! digest          = keccak256(0x19 ‖ 0x01 ‖ domainSeparator ‖ structHash)
//! ```
//!
//! A signature made for a different ledger address, chain, name or version
//! recovers to an unrelated address and is rejected downstream.

use serde::{Deserialize, Serialize};

use claimdrop_core::{AbiEncoded, Address, Amount, Digest32};

use crate::keccak::{keccak256, keccak256_abi, keccak256_concat};

/// The EIP-712 domain type string.
pub const DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// The claim message type string.
pub const CLAIM_TYPE: &str = "RewardsClaim(address account,uint256 amount)";

/// Domain parameters of one ledger instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eip712Domain {
    /// Human-readable ledger name.
    pub name: String,
    /// Schema version string.
    pub version: String,
    /// Chain identifier.
    pub chain_id: u64,
    /// Address of the verifying ledger instance.
    pub verifying_contract: Address,
}

impl Eip712Domain {
    /// Compute the domain separator.
    pub fn separator(&self) -> Digest32 {
        let encoded = AbiEncoded::builder()
            .bytes32(&keccak256(DOMAIN_TYPE.as_bytes()))
            .bytes32(&keccak256(self.name.as_bytes()))
            .bytes32(&keccak256(self.version.as_bytes()))
            .uint64(self.chain_id)
            .address(&self.verifying_contract)
            .finish();
        keccak256_abi(&encoded)
    }
}

/// `keccak256(CLAIM_TYPE)`.
pub fn claim_type_hash() -> Digest32 {
    keccak256(CLAIM_TYPE.as_bytes())
}

/// The struct hash of a `RewardsClaim` message.
pub fn claim_struct_hash(account: &Address, amount: &Amount) -> Digest32 {
    let encoded = AbiEncoded::builder()
        .bytes32(&claim_type_hash())
        .address(account)
        .uint(amount)
        .finish();
    keccak256_abi(&encoded)
}

/// `keccak256(0x19 ‖ 0x01 ‖ domain_separator ‖ struct_hash)`.
pub fn typed_data_digest(domain_separator: &Digest32, struct_hash: &Digest32) -> Digest32 {
    keccak256_concat(&[
        &[0x19u8, 0x01][..],
        &domain_separator.as_bytes()[..],
        &struct_hash.as_bytes()[..],
    ])
}

/// The digest a claimant signs to authorize `amount` to `account`.
pub fn claim_digest(domain_separator: &Digest32, account: &Address, amount: &Amount) -> Digest32 {
    typed_data_digest(domain_separator, &claim_struct_hash(account, amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain() -> Eip712Domain {
        Eip712Domain {
            name: "RewardsLedger".into(),
            version: "1".into(),
            chain_id: 1,
            verifying_contract: Address::from_bytes([0x42; 20]),
        }
    }

    #[test]
    fn domain_type_hash_vector() {
        assert_eq!(
            keccak256(DOMAIN_TYPE.as_bytes()).to_hex(),
            "0x8b73c3c69bb8fe3d512ecc4cf759cc79239f7b179b0ffacaa9a75d522b39400f"
        );
    }

    #[test]
    fn separator_changes_with_every_field() {
        let base = domain().separator();
        let mut d = domain();
        d.name = "Other".into();
        assert_ne!(d.separator(), base);
        let mut d = domain();
        d.version = "2".into();
        assert_ne!(d.separator(), base);
        let mut d = domain();
        d.chain_id = 31337;
        assert_ne!(d.separator(), base);
        let mut d = domain();
        d.verifying_contract = Address::from_bytes([0x43; 20]);
        assert_ne!(d.separator(), base);
    }

    #[test]
    fn digest_binds_account_and_amount() {
        let sep = domain().separator();
        let a = Address::from_bytes([1; 20]);
        let b = Address::from_bytes([2; 20]);
        let base = claim_digest(&sep, &a, &Amount::from(10u64));
        assert_ne!(base, claim_digest(&sep, &b, &Amount::from(10u64)));
        assert_ne!(base, claim_digest(&sep, &a, &Amount::from(11u64)));
        assert_eq!(base, claim_digest(&sep, &a, &Amount::from(10u64)));
    }

    #[test]
    fn digest_layout() {
        let sep = Digest32([0xaa; 32]);
        let sh = Digest32([0xbb; 32]);
        let mut buf = vec![0x19, 0x01];
        buf.extend_from_slice(&[0xaa; 32]);
        buf.extend_from_slice(&[0xbb; 32]);
        assert_eq!(typed_data_digest(&sep, &sh), keccak256(&buf));
    }
}
