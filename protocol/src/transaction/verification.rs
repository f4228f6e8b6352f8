//! Checks a received transaction the way a node would.
//!
//! Signing never verifies anything: the owner key is not compared with
//! `senderPublicKey` and the id is taken as computed. These functions are
//! the other side. Each one recomputes a digest from the canonical encoding
//! and checks it against what the transaction carries.
//!
//! A co-signature can only be checked against the second public key the
//! sender registered on chain. That key is not part of the transaction, so
//! the caller supplies it.

use super::builder::Transaction;
use super::signing::{co_signer_digest, compute_id, owner_digest};
use super::TransactionError;
use crate::crypto::keys::ArkPublicKey;
use crate::crypto::signatures::verify_digest;

/// Verifies the owner signature against `senderPublicKey`.
pub fn verify_owner_signature(tx: &Transaction) -> Result<(), TransactionError> {
    let signature = tx
        .signature
        .as_ref()
        .ok_or(TransactionError::MissingSignature("signature"))?;
    let sender = tx
        .sender_public_key
        .as_ref()
        .ok_or(TransactionError::MissingField("senderPublicKey"))?;

    let digest = owner_digest(tx)?;
    if !verify_digest(sender, &digest, signature) {
        return Err(TransactionError::InvalidSignature("signature"));
    }
    Ok(())
}

/// Verifies the co-signature against the sender's registered second key.
pub fn verify_co_signature(
    tx: &Transaction,
    second_public_key: &ArkPublicKey,
) -> Result<(), TransactionError> {
    let signature = tx
        .second_signature
        .as_ref()
        .ok_or(TransactionError::MissingSignature("signSignature"))?;

    let digest = co_signer_digest(tx)?;
    if !verify_digest(second_public_key, &digest, signature) {
        return Err(TransactionError::InvalidSignature("signSignature"));
    }
    Ok(())
}

/// Verifies that the recorded id commits to the current content.
pub fn verify_id(tx: &Transaction) -> Result<(), TransactionError> {
    let actual = tx
        .id
        .as_ref()
        .ok_or(TransactionError::MissingField("id"))?;

    let expected = compute_id(tx)?;
    if *actual != expected {
        return Err(TransactionError::IdMismatch {
            expected,
            actual: actual.clone(),
        });
    }
    Ok(())
}

/// Runs every check that applies to `tx`.
///
/// 1. Owner signature.
/// 2. Co-signature, if `second_public_key` is given. A transaction that
///    carries a co-signature with no key to check it against is rejected.
/// 3. Id, if one is recorded.
///
/// # Errors
///
/// The first failing check.
pub fn verify_transaction(
    tx: &Transaction,
    second_public_key: Option<&ArkPublicKey>,
) -> Result<(), TransactionError> {
    verify_owner_signature(tx)?;

    match second_public_key {
        Some(key) => verify_co_signature(tx, key)?,
        None if tx.second_signature.is_some() => {
            return Err(TransactionError::UnexpectedSecondSignature);
        }
        None => {}
    }

    if tx.id.is_some() {
        verify_id(tx)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::ArkKeypair;
    use crate::transaction::builder::TransactionBuilder;
    use crate::transaction::signing::{sign_as_owner, sign_transfer};

    fn owner() -> ArkKeypair {
        ArkKeypair::from_passphrase("this is a top secret passphrase").unwrap()
    }

    fn second() -> ArkKeypair {
        ArkKeypair::from_passphrase("second secret passphrase").unwrap()
    }

    fn unsigned_tx() -> Transaction {
        TransactionBuilder::transfer()
            .sender(&owner())
            .recipient("DE8WweX5L4p4Rq1KPprB7FhiKN3Y33UZHS")
            .amount(100_000_000)
            .fee(10_000_000)
            .timestamp(100)
            .build()
    }

    #[test]
    fn owner_signed_transaction_passes() {
        let mut tx = unsigned_tx();
        sign_transfer(&mut tx, &owner(), None).unwrap();
        verify_transaction(&tx, None).unwrap();
    }

    #[test]
    fn co_signed_transaction_passes() {
        let mut tx = unsigned_tx();
        sign_transfer(&mut tx, &owner(), Some(&second())).unwrap();
        verify_transaction(&tx, Some(&second().public_key())).unwrap();
    }

    #[test]
    fn rejects_unsigned_transaction() {
        assert_eq!(
            verify_transaction(&unsigned_tx(), None),
            Err(TransactionError::MissingSignature("signature"))
        );
    }

    #[test]
    fn rejects_wrong_owner_key() {
        let mut tx = unsigned_tx();
        sign_as_owner(&mut tx, &second()).unwrap();
        assert_eq!(
            verify_owner_signature(&tx),
            Err(TransactionError::InvalidSignature("signature"))
        );
    }

    #[test]
    fn rejects_wrong_second_key() {
        let mut tx = unsigned_tx();
        sign_transfer(&mut tx, &owner(), Some(&second())).unwrap();
        assert_eq!(
            verify_transaction(&tx, Some(&owner().public_key())),
            Err(TransactionError::InvalidSignature("signSignature"))
        );
    }

    #[test]
    fn rejects_unverifiable_co_signature() {
        let mut tx = unsigned_tx();
        sign_transfer(&mut tx, &owner(), Some(&second())).unwrap();
        assert_eq!(
            verify_transaction(&tx, None),
            Err(TransactionError::UnexpectedSecondSignature)
        );
    }

    #[test]
    fn rejects_missing_co_signature() {
        let mut tx = unsigned_tx();
        sign_transfer(&mut tx, &owner(), None).unwrap();
        assert_eq!(
            verify_transaction(&tx, Some(&second().public_key())),
            Err(TransactionError::MissingSignature("signSignature"))
        );
    }

    #[test]
    fn rejects_tampered_amount() {
        let mut tx = unsigned_tx();
        sign_transfer(&mut tx, &owner(), None).unwrap();
        tx.amount = 1;
        assert_eq!(
            verify_transaction(&tx, None),
            Err(TransactionError::InvalidSignature("signature"))
        );
    }

    #[test]
    fn rejects_tampered_id() {
        let mut tx = unsigned_tx();
        sign_transfer(&mut tx, &owner(), None).unwrap();
        let recorded = tx.id.clone().unwrap();
        tx.id = Some("00".repeat(32));
        match verify_id(&tx) {
            Err(TransactionError::IdMismatch { expected, actual }) => {
                assert_eq!(expected, recorded);
                assert_eq!(actual, "00".repeat(32));
            }
            other => panic!("expected IdMismatch, got {:?}", other),
        }
    }

    #[test]
    fn verifies_transaction_parsed_from_json() {
        let mut tx = unsigned_tx();
        sign_transfer(&mut tx, &owner(), Some(&second())).unwrap();
        let json = serde_json::to_string(&tx).unwrap();
        let parsed: Transaction = serde_json::from_str(&json).unwrap();
        verify_transaction(&parsed, Some(&second().public_key())).unwrap();
    }
}
