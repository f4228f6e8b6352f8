//! The two-stage signing pipeline and transaction ids.
//!
//! ```text
//! Unsigned ──sign_as_owner──▶ OwnerSigned ──sign_as_co_signer──▶ CoSigned
//!                                  │                                 │
//!                                  └──────────assign_id──────────────┴──▶ Identified
//! ```
//!
//! Each step hashes a different view of the canonical encoding:
//!
//! | step                | SHA-256 over                         |
//! |---------------------|--------------------------------------|
//! | owner signature     | `encode(tx, false, false)`           |
//! | co-signature        | `encode(tx, true, false)`            |
//! | id (owner only)     | `encode(tx, true, false)`            |
//! | id (co-signed)      | `encode(tx, true, true)`             |
//!
//! So the co-signer commits to the owner's signature, and the id commits to
//! every signature present. Steps taken out of order fail with
//! [`TransactionError::InvalidStateTransition`] and leave the transaction
//! untouched.

use tracing::{debug, warn};

use super::builder::Transaction;
use super::encoding::encode;
use super::types::SigningState;
use super::TransactionError;
use crate::crypto::hash::sha256_array;
use crate::crypto::keys::ArkKeypair;
use crate::crypto::signatures::{sign_digest, DerSignature};

fn reject(tx: &Transaction, operation: &'static str) -> TransactionError {
    let from = tx.state();
    warn!(tx_type = %tx.tx_type, state = %from, operation, "rejected signing step");
    TransactionError::InvalidStateTransition { from, operation }
}

/// Digest the owner signs: the encoding with no signatures.
pub fn owner_digest(tx: &Transaction) -> Result<[u8; 32], TransactionError> {
    Ok(sha256_array(&encode(tx, false, false)?))
}

/// Digest the co-signer signs: the encoding including the owner signature.
pub fn co_signer_digest(tx: &Transaction) -> Result<[u8; 32], TransactionError> {
    Ok(sha256_array(&encode(tx, true, false)?))
}

/// Signs an unsigned transaction as its owner.
///
/// The key pair is not checked against `senderPublicKey`; a mismatch
/// produces a transaction that fails
/// [`verify_owner_signature`](super::verification::verify_owner_signature).
pub fn sign_as_owner<'a>(
    tx: &'a mut Transaction,
    keypair: &ArkKeypair,
) -> Result<&'a DerSignature, TransactionError> {
    if tx.state() != SigningState::Unsigned {
        return Err(reject(tx, "sign_as_owner"));
    }

    let digest = owner_digest(tx)?;
    let signature = sign_digest(keypair, &digest);
    debug!(
        tx_type = %tx.tx_type,
        signature_len = signature.len(),
        state = %SigningState::OwnerSigned,
        "owner signed transaction"
    );
    Ok(&*tx.signature.insert(signature))
}

/// Adds the co-signer's signature to an owner-signed transaction.
///
/// The co-signature covers the current business fields. If one of them was
/// changed after [`sign_as_owner`], this still succeeds and the owner
/// signature no longer matches; [`verify_transaction`](super::verification::verify_transaction)
/// reports it.
pub fn sign_as_co_signer<'a>(
    tx: &'a mut Transaction,
    keypair: &ArkKeypair,
) -> Result<&'a DerSignature, TransactionError> {
    if tx.state() != SigningState::OwnerSigned {
        return Err(reject(tx, "sign_as_co_signer"));
    }

    let digest = co_signer_digest(tx)?;
    let signature = sign_digest(keypair, &digest);
    debug!(
        tx_type = %tx.tx_type,
        signature_len = signature.len(),
        state = %SigningState::CoSigned,
        "co-signer signed transaction"
    );
    Ok(&*tx.second_signature.insert(signature))
}

/// Computes the id a signed transaction commits to, without storing it.
///
/// `hex(sha256(encode(tx, true, has_second_signature)))`. Fails on an
/// unsigned transaction.
pub fn compute_id(tx: &Transaction) -> Result<String, TransactionError> {
    if tx.signature.is_none() {
        return Err(TransactionError::InvalidStateTransition {
            from: SigningState::Unsigned,
            operation: "compute_id",
        });
    }

    let bytes = encode(tx, true, tx.second_signature.is_some())?;
    Ok(hex::encode(sha256_array(&bytes)))
}

/// Assigns the transaction id.
///
/// Calling this again on an identified transaction recomputes the id. If it
/// still matches, nothing changes. If the content changed since the id was
/// set, the call fails and the recorded id is kept.
pub fn assign_id(tx: &mut Transaction) -> Result<&str, TransactionError> {
    if tx.signature.is_none() {
        return Err(reject(tx, "assign_id"));
    }

    let id = compute_id(tx)?;
    if matches!(tx.id.as_deref(), Some(existing) if existing != id) {
        return Err(reject(tx, "assign_id"));
    }

    if tx.id.is_none() {
        debug!(
            tx_type = %tx.tx_type,
            co_signed = tx.second_signature.is_some(),
            state = %SigningState::Identified,
            "assigned transaction id"
        );
    }
    Ok(tx.id.get_or_insert(id).as_str())
}

/// Runs the whole pipeline: owner signature, optional co-signature, id.
///
/// # Example
///
/// ```rust
/// use ark_protocol::crypto::ArkKeypair;
/// use ark_protocol::transaction::{sign_transfer, TransactionBuilder};
///
/// let owner = ArkKeypair::from_passphrase("this is a top secret passphrase").unwrap();
/// let second = ArkKeypair::from_passphrase("second secret passphrase").unwrap();
///
/// let mut tx = TransactionBuilder::transfer()
///     .sender(&owner)
///     .recipient("DE8WweX5L4p4Rq1KPprB7FhiKN3Y33UZHS")
///     .amount(100_000_000)
///     .fee(10_000_000)
///     .timestamp(100)
///     .build();
///
/// let id = sign_transfer(&mut tx, &owner, Some(&second)).unwrap();
/// assert_eq!(id, "4e234db6372dafbe621c51df8d3d0b5972cc984ffe3c0d1d64a273b31400eda4");
/// ```
pub fn sign_transfer(
    tx: &mut Transaction,
    owner: &ArkKeypair,
    co_signer: Option<&ArkKeypair>,
) -> Result<String, TransactionError> {
    sign_as_owner(tx, owner)?;
    if let Some(co_signer) = co_signer {
        sign_as_co_signer(tx, co_signer)?;
    }
    assign_id(tx).map(str::to_owned)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
