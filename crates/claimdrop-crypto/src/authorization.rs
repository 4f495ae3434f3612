//! # Claim Authorization
//!
//! The signature half of the double-factor claim check: a claimant proves
//! they authorized release of `amount` to `account` under one specific
//! ledger domain.

use claimdrop_core::{Address, Amount, Digest32};

use crate::ecdsa::{recover_signer, EcdsaSignature, SigningKey};
use crate::eip712::claim_digest;

/// Whether `signature` over the `RewardsClaim(account, amount)` digest for
/// `domain_separator` recovers to `expected_signer`.
///
/// Recovery failure and a wrong signer are the same observable outcome.
pub fn verify_authorization(
    account: &Address,
    amount: &Amount,
    signature: &EcdsaSignature,
    expected_signer: &Address,
    domain_separator: &Digest32,
) -> bool {
    let digest = claim_digest(domain_separator, account, amount);
    match recover_signer(&digest, signature) {
        Ok(signer) => {
            tracing::debug!(%account, %signer, expected = %expected_signer, "recovered claim signer");
            !signer.is_zero() && signer == *expected_signer
        }
        Err(e) => {
            tracing::debug!(%account, error = %e, "claim signature did not recover");
            false
        }
    }
}

/// Sign a `RewardsClaim(account, amount)` for `domain_separator`.
pub fn sign_claim(
    key: &SigningKey,
    domain_separator: &Digest32,
    account: &Address,
    amount: &Amount,
) -> EcdsaSignature {
    key.sign_digest(&claim_digest(domain_separator, account, amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eip712::Eip712Domain;

    fn separator(contract: u8) -> Digest32 {
        Eip712Domain {
            name: "RewardsLedger".into(),
            version: "1".into(),
            chain_id: 31337,
            verifying_contract: Address::from_bytes([contract; 20]),
        }
        .separator()
    }

    #[test]
    fn self_signed_claim_verifies() {
        let key = SigningKey::generate();
        let account = key.address();
        let amount = Amount::scaled(25, 18).unwrap();
        let sep = separator(1);
        let sig = sign_claim(&key, &sep, &account, &amount);
        assert!(verify_authorization(&account, &amount, &sig, &account, &sep));
    }

    #[test]
    fn other_key_is_rejected() {
        let claimant = SigningKey::generate();
        let attacker = SigningKey::generate();
        let account = claimant.address();
        let amount = Amount::from(100u64);
        let sep = separator(1);
        let sig = sign_claim(&attacker, &sep, &account, &amount);
        assert!(!verify_authorization(&account, &amount, &sig, &account, &sep));
    }

    #[test]
    fn signature_is_bound_to_domain() {
        let key = SigningKey::generate();
        let account = key.address();
        let amount = Amount::from(100u64);
        let sig = sign_claim(&key, &separator(1), &account, &amount);
        assert!(!verify_authorization(&account, &amount, &sig, &account, &separator(2)));
    }

    #[test]
    fn signature_is_bound_to_amount() {
        let key = SigningKey::generate();
        let account = key.address();
        let sep = separator(1);
        let sig = sign_claim(&key, &sep, &account, &Amount::from(100u64));
        assert!(!verify_authorization(&account, &Amount::from(101u64), &sig, &account, &sep));
    }

    #[test]
    fn malformed_signature_is_a_non_match() {
        let account = Address::from_bytes([9; 20]);
        let sig = EcdsaSignature::new(0, [1; 32], [1; 32]);
        assert!(!verify_authorization(&account, &Amount::from(1u64), &sig, &account, &separator(1)));
    }
}
