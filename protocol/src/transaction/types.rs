//! Core type definitions for Ark transactions.
//!
//! [`TransactionType`] is the one-byte tag at the front of every encoded
//! transaction. Each type owns an [`AssetCodec`] describing the bytes it
//! appends after the signatures. Only transfers have a defined layout; the
//! other Ark v1 types are listed so they can be named and rejected.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::builder::Transaction;

// ---------------------------------------------------------------------------
// TransactionType
// ---------------------------------------------------------------------------

/// The operation a transaction represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TransactionType {
    /// Plain value transfer with an optional vendor field.
    Transfer = 0,
    /// Registers a second public key that must co-sign future transactions.
    SecondSignatureRegistration = 1,
    /// Registers the sender as a delegate.
    DelegateRegistration = 2,
    /// Votes for or unvotes a delegate.
    Vote = 3,
    /// Registers a multi-signature wallet.
    MultiSignatureRegistration = 4,
}

impl TransactionType {
    /// The wire tag.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Maps a wire tag back to a type. `None` for tags Ark never assigned.
    pub fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Transfer),
            1 => Some(Self::SecondSignatureRegistration),
            2 => Some(Self::DelegateRegistration),
            3 => Some(Self::Vote),
            4 => Some(Self::MultiSignatureRegistration),
            _ => None,
        }
    }

    /// The asset layout for this type, or `None` if this crate cannot
    /// encode it.
    pub fn asset_codec(self) -> Option<&'static dyn AssetCodec> {
        match self {
            Self::Transfer => Some(&TransferAsset),
            Self::SecondSignatureRegistration
            | Self::DelegateRegistration
            | Self::Vote
            | Self::MultiSignatureRegistration => None,
        }
    }

    /// `true` if transactions of this type can be encoded and signed.
    pub fn is_supported(self) -> bool {
        self.asset_codec().is_some()
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transfer => write!(f, "Transfer"),
            Self::SecondSignatureRegistration => write!(f, "SecondSignatureRegistration"),
            Self::DelegateRegistration => write!(f, "DelegateRegistration"),
            Self::Vote => write!(f, "Vote"),
            Self::MultiSignatureRegistration => write!(f, "MultiSignatureRegistration"),
        }
    }
}

// Ark JSON carries the type as its numeric tag.
impl Serialize for TransactionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for TransactionType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = u8::deserialize(deserializer)?;
        Self::from_u8(tag)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown transaction type {}", tag)))
    }
}

// ---------------------------------------------------------------------------
// Asset codecs
// ---------------------------------------------------------------------------

/// Type-specific bytes appended to the canonical encoding.
///
/// The encoder asks for [`asset_size`](Self::asset_size) before allocating,
/// then calls [`encode_asset`](Self::encode_asset) exactly once. An
/// implementation must write exactly `asset_size` bytes.
pub trait AssetCodec: Send + Sync {
    /// Number of bytes [`encode_asset`](Self::encode_asset) will append.
    fn asset_size(&self, tx: &Transaction) -> usize;

    /// Appends the asset bytes to `buf`.
    fn encode_asset(&self, tx: &Transaction, buf: &mut Vec<u8>);
}

/// Transfers carry everything in the common header; their asset is empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransferAsset;

impl AssetCodec for TransferAsset {
    fn asset_size(&self, _tx: &Transaction) -> usize {
        0
    }

    fn encode_asset(&self, _tx: &Transaction, _buf: &mut Vec<u8>) {}
}

// ---------------------------------------------------------------------------
// SigningState
// ---------------------------------------------------------------------------

/// Where a transaction is in the signing pipeline.
///
/// Derived from which of the signature and id slots are filled; it is never
/// stored separately, so it cannot disagree with the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SigningState {
    /// No signatures yet.
    Unsigned,
    /// The owner has signed.
    OwnerSigned,
    /// Owner and co-signer have signed.
    CoSigned,
    /// The id has been assigned; the transaction is final.
    Identified,
}

impl fmt::Display for SigningState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsigned => write!(f, "Unsigned"),
            Self::OwnerSigned => write!(f, "OwnerSigned"),
            Self::CoSigned => write!(f, "CoSigned"),
            Self::Identified => write!(f, "Identified"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_type_tags() {
        for tag in 0..=4u8 {
            assert_eq!(TransactionType::from_u8(tag).unwrap().as_u8(), tag);
        }
        assert_eq!(TransactionType::from_u8(5), None);
    }

    #[test]
    fn only_transfers_are_supported() {
        assert!(TransactionType::Transfer.is_supported());
        assert!(!TransactionType::SecondSignatureRegistration.is_supported());
        assert!(!TransactionType::DelegateRegistration.is_supported());
        assert!(!TransactionType::Vote.is_supported());
        assert!(!TransactionType::MultiSignatureRegistration.is_supported());
    }

    #[test]
    fn transaction_type_serializes_as_number() {
        assert_eq!(serde_json::to_string(&TransactionType::Vote).unwrap(), "3");
        let parsed: TransactionType = serde_json::from_str("0").unwrap();
        assert_eq!(parsed, TransactionType::Transfer);
        assert!(serde_json::from_str::<TransactionType>("9").is_err());
    }

    #[test]
    fn transaction_type_display() {
        assert_eq!(TransactionType::Transfer.to_string(), "Transfer");
        assert_eq!(SigningState::CoSigned.to_string(), "CoSigned");
    }
}
