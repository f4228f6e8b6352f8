//! # Transaction Module
//!
//! Building, encoding, signing and verifying Ark transactions.
//!
//! ## Architecture
//!
//! ```text
//! types.rs       : TransactionType, SigningState, per-type asset codecs
//! builder.rs     : The Transaction value and its fluent builder
//! encoding.rs    : Canonical byte layout; the input of every hash
//! signing.rs     : Owner and co-signer signatures, transaction ids
//! verification.rs: Signature and id checks for received transactions
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build**: [`TransactionBuilder`] assembles the fields and attaches
//!    the sender's public key.
//! 2. **Sign**: [`sign_as_owner`], then optionally [`sign_as_co_signer`]
//!    for wallets with a registered second passphrase.
//! 3. **Identify**: [`assign_id`] fixes the id. The transaction is final.
//! 4. **Verify**: the receiving side runs [`verify_transaction`].
//!
//! [`sign_transfer`] runs steps 2 and 3 in one call.
//!
//! ## Design Decisions
//!
//! - Amounts and fees are `u64` arktoshi. No floating point.
//! - Ids are single SHA-256 of the signed encoding, hex-encoded. The id
//!   changes with every signature added, so it is only assigned at the end.
//! - Signing state is derived from which slots are filled, never stored.

use thiserror::Error;

use crate::identity::address::AddressError;

pub mod builder;
pub mod encoding;
pub mod signing;
pub mod types;
pub mod verification;

pub use builder::{Transaction, TransactionBuilder};
pub use encoding::{encode, encoded_len};
pub use signing::{assign_id, compute_id, sign_as_co_signer, sign_as_owner, sign_transfer};
pub use types::{AssetCodec, SigningState, TransactionType, TransferAsset};
pub use verification::{verify_co_signature, verify_id, verify_owner_signature, verify_transaction};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised while encoding, signing or verifying a transaction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransactionError {
    /// A field the operation needs is absent.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A pipeline step was invoked in the wrong state.
    #[error("cannot {operation} a transaction in state {from}")]
    InvalidStateTransition {
        from: SigningState,
        operation: &'static str,
    },

    /// The transaction type has no defined encoding.
    #[error("unsupported transaction type: {0}")]
    UnsupportedType(u8),

    /// The recipient address does not decode.
    #[error("invalid recipient: {0}")]
    InvalidRecipient(#[from] AddressError),

    /// The recorded id does not match the content.
    #[error("transaction id mismatch: expected {expected}, got {actual}")]
    IdMismatch { expected: String, actual: String },

    /// A signature to be verified is absent.
    #[error("missing signature: {0}")]
    MissingSignature(&'static str),

    /// A signature does not verify against its public key.
    #[error("invalid signature: {0}")]
    InvalidSignature(&'static str),

    /// A co-signature is present but no second public key was supplied.
    #[error("second signature present but no second public key to verify it")]
    UnexpectedSecondSignature,
}
