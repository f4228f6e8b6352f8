//! Canonical byte encoding of a transaction.
//!
//! This is the single definition of the wire layout. Signing digests,
//! co-signing digests and ids are all SHA-256 over the output of [`encode`]
//! with different signature flags:
//!
//! ```text
//! offset  size  field
//! 0       1     type
//! 1       4     timestamp         i32, little-endian
//! 5       33    senderPublicKey   compressed secp256k1
//! 38      21    recipientId       Base58Check payload, zero-padded/truncated
//! 59      64    vendorField       UTF-8, zero-padded/truncated
//! 123     8     amount            u64, little-endian
//! 131     8     fee               u64, little-endian
//! 139     var   signature         DER, only if requested
//! ..      var   signSignature     DER, only if requested
//! ..      var   asset             per-type, empty for transfers
//! ```

use super::builder::Transaction;
use super::types::AssetCodec;
use super::TransactionError;
use crate::config::{FIXED_ENCODING_LENGTH, RECIPIENT_ID_LENGTH, VENDOR_FIELD_LENGTH};
use crate::crypto::signatures::DerSignature;
use crate::identity::address::decode_payload;

/// The parts of a transaction the encoder needs, resolved and checked.
struct Parts<'a> {
    codec: &'static dyn AssetCodec,
    signature: Option<&'a DerSignature>,
    second_signature: Option<&'a DerSignature>,
}

fn resolve(
    tx: &Transaction,
    include_signature: bool,
    include_second_signature: bool,
) -> Result<Parts<'_>, TransactionError> {
    let codec = tx
        .tx_type
        .asset_codec()
        .ok_or(TransactionError::UnsupportedType(tx.tx_type.as_u8()))?;

    let signature = if include_signature {
        Some(
            tx.signature
                .as_ref()
                .ok_or(TransactionError::MissingField("signature"))?,
        )
    } else {
        None
    };

    let second_signature = if include_second_signature {
        Some(
            tx.second_signature
                .as_ref()
                .ok_or(TransactionError::MissingField("signSignature"))?,
        )
    } else {
        None
    };

    Ok(Parts {
        codec,
        signature,
        second_signature,
    })
}

fn parts_len(tx: &Transaction, parts: &Parts<'_>) -> usize {
    FIXED_ENCODING_LENGTH
        + parts.signature.map_or(0, DerSignature::len)
        + parts.second_signature.map_or(0, DerSignature::len)
        + parts.codec.asset_size(tx)
}

/// Exact length of `encode(tx, include_signature, include_second_signature)`.
pub fn encoded_len(
    tx: &Transaction,
    include_signature: bool,
    include_second_signature: bool,
) -> Result<usize, TransactionError> {
    let parts = resolve(tx, include_signature, include_second_signature)?;
    Ok(parts_len(tx, &parts))
}

/// Serializes `tx` into its canonical bytes.
///
/// The signature flags select which signature slots are appended; each slot
/// takes the length of its own signature. Requesting a signature the
/// transaction does not have is an error, not an empty slot.
///
/// # Errors
///
/// - [`TransactionError::UnsupportedType`] for types without an asset codec.
/// - [`TransactionError::MissingField`] for a missing sender key or a
///   requested but absent signature.
/// - [`TransactionError::InvalidRecipient`] if the recipient is not valid
///   Base58Check.
pub fn encode(
    tx: &Transaction,
    include_signature: bool,
    include_second_signature: bool,
) -> Result<Vec<u8>, TransactionError> {
    let parts = resolve(tx, include_signature, include_second_signature)?;
    let sender = tx
        .sender_public_key
        .as_ref()
        .ok_or(TransactionError::MissingField("senderPublicKey"))?;
    let recipient = recipient_bytes(&tx.recipient_id)?;

    let capacity = parts_len(tx, &parts);
    let mut buf = Vec::with_capacity(capacity);

    buf.push(tx.tx_type.as_u8());
    buf.extend_from_slice(&tx.timestamp.to_le_bytes());
    buf.extend_from_slice(sender.as_bytes());
    buf.extend_from_slice(&recipient);
    buf.extend_from_slice(&vendor_field_bytes(tx.vendor_field.as_deref()));
    buf.extend_from_slice(&tx.amount.to_le_bytes());
    buf.extend_from_slice(&tx.fee.to_le_bytes());

    if let Some(sig) = parts.signature {
        buf.extend_from_slice(sig.as_bytes());
    }
    if let Some(sig) = parts.second_signature {
        buf.extend_from_slice(sig.as_bytes());
    }

    parts.codec.encode_asset(tx, &mut buf);

    debug_assert_eq!(buf.len(), capacity, "asset codec wrote the wrong size");
    Ok(buf)
}

/// The recipient slot: the checksum-verified Base58Check payload, copied
/// into 21 bytes.
pub fn recipient_bytes(address: &str) -> Result<[u8; RECIPIENT_ID_LENGTH], TransactionError> {
    let payload = decode_payload(address)?;
    let mut slot = [0u8; RECIPIENT_ID_LENGTH];
    let n = payload.len().min(RECIPIENT_ID_LENGTH);
    slot[..n].copy_from_slice(&payload[..n]);
    Ok(slot)
}

/// The vendor field slot: the memo's UTF-8 bytes, zero-padded or truncated
/// to 64 bytes. An absent memo is all zeros.
pub fn vendor_field_bytes(vendor_field: Option<&str>) -> [u8; VENDOR_FIELD_LENGTH] {
    let mut slot = [0u8; VENDOR_FIELD_LENGTH];
    if let Some(memo) = vendor_field {
        let bytes = memo.as_bytes();
        let n = bytes.len().min(VENDOR_FIELD_LENGTH);
        slot[..n].copy_from_slice(&bytes[..n]);
    }
    slot
}
