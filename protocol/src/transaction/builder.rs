//! The transaction value and its builder.
//!
//! [`TransactionBuilder`] assembles the business fields and attaches the
//! sender's public key. It does not sign. Signing, and the signature and id
//! slots it fills, belong to [`super::signing`]; outside this crate those
//! slots can only be read.

use serde::{Deserialize, Serialize};

use super::encoding;
use super::types::{SigningState, TransactionType};
use super::TransactionError;
use crate::config::{Network, NetworkInfo};
use crate::crypto::keys::{ArkKeypair, ArkPublicKey};
use crate::crypto::signatures::DerSignature;

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// An Ark transaction.
///
/// Field names serialize as in the Ark JSON API (`senderPublicKey`,
/// `recipientId`, `signSignature`, ...). Signatures and the public key are
/// lower-case hex on the wire.
///
/// The business fields are public. Once an id has been assigned, changing
/// one of them makes [`super::signing::assign_id`] and
/// [`super::verification::verify_id`] fail, because the recorded id no
/// longer commits to the content.
///
/// Deserializing rejects a `signSignature` or an `id` without the owner's
/// `signature`, so a parsed transaction is always in a reachable
/// [`SigningState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawTransaction")]
pub struct Transaction {
    /// The operation this transaction represents.
    #[serde(rename = "type")]
    pub tx_type: TransactionType,

    /// Seconds since the network epoch.
    pub timestamp: i32,

    /// Compressed public key of the sender, attached by the builder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) sender_public_key: Option<ArkPublicKey>,

    /// Base58Check address of the recipient.
    pub recipient_id: String,

    /// Free-text memo, at most 64 bytes on the wire.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_field: Option<String>,

    /// Amount in arktoshi.
    pub amount: u64,

    /// Fee in arktoshi.
    pub fee: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) signature: Option<DerSignature>,

    #[serde(rename = "signSignature", skip_serializing_if = "Option::is_none")]
    pub(crate) second_signature: Option<DerSignature>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<String>,
}

/// Wire shape of a [`Transaction`], before the signature slots are checked.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTransaction {
    #[serde(rename = "type")]
    tx_type: TransactionType,
    timestamp: i32,
    #[serde(default)]
    sender_public_key: Option<ArkPublicKey>,
    recipient_id: String,
    #[serde(default)]
    vendor_field: Option<String>,
    amount: u64,
    fee: u64,
    #[serde(default)]
    signature: Option<DerSignature>,
    #[serde(rename = "signSignature", default)]
    second_signature: Option<DerSignature>,
    #[serde(default)]
    id: Option<String>,
}

impl TryFrom<RawTransaction> for Transaction {
    type Error = TransactionError;

    fn try_from(raw: RawTransaction) -> Result<Self, Self::Error> {
        if raw.signature.is_none() && (raw.second_signature.is_some() || raw.id.is_some()) {
            return Err(TransactionError::MissingField("signature"));
        }
        Ok(Self {
            tx_type: raw.tx_type,
            timestamp: raw.timestamp,
            sender_public_key: raw.sender_public_key,
            recipient_id: raw.recipient_id,
            vendor_field: raw.vendor_field,
            amount: raw.amount,
            fee: raw.fee,
            signature: raw.signature,
            second_signature: raw.second_signature,
            id: raw.id,
        })
    }
}

impl Transaction {
    /// The sender's public key, if one is attached.
    pub fn sender_public_key(&self) -> Option<&ArkPublicKey> {
        self.sender_public_key.as_ref()
    }

    /// The owner's signature.
    pub fn signature(&self) -> Option<&DerSignature> {
        self.signature.as_ref()
    }

    /// The co-signer's signature.
    pub fn second_signature(&self) -> Option<&DerSignature> {
        self.second_signature.as_ref()
    }

    /// The transaction id, once assigned.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Where the transaction is in the signing pipeline.
    pub fn state(&self) -> SigningState {
        if self.id.is_some() {
            SigningState::Identified
        } else if self.second_signature.is_some() {
            SigningState::CoSigned
        } else if self.signature.is_some() {
            SigningState::OwnerSigned
        } else {
            SigningState::Unsigned
        }
    }

    /// Returns `true` if the owner has signed.
    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// Returns `true` if a co-signer has signed.
    pub fn is_co_signed(&self) -> bool {
        self.second_signature.is_some()
    }

    /// Canonical bytes, see [`encoding::encode`].
    pub fn to_bytes(
        &self,
        include_signature: bool,
        include_second_signature: bool,
    ) -> Result<Vec<u8>, TransactionError> {
        encoding::encode(self, include_signature, include_second_signature)
    }

    /// Wall-clock time of the transaction on the given network.
    pub fn datetime(&self, network: &NetworkInfo) -> chrono::DateTime<chrono::Utc> {
        network.to_datetime(self.timestamp)
    }
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for unsigned [`Transaction`]s.
///
/// ```rust
/// use ark_protocol::crypto::ArkKeypair;
/// use ark_protocol::transaction::TransactionBuilder;
///
/// let sender = ArkKeypair::from_passphrase("this is a top secret passphrase").unwrap();
/// let tx = TransactionBuilder::transfer()
///     .sender(&sender)
///     .recipient("DE8WweX5L4p4Rq1KPprB7FhiKN3Y33UZHS")
///     .amount(100_000_000)
///     .fee(10_000_000)
///     .vendor_field("hello")
///     .timestamp(100)
///     .build();
///
/// assert!(!tx.is_signed());
/// assert!(tx.id().is_none());
/// ```
///
/// If no timestamp is set, `build()` uses the current time counted from the
/// Ark epoch (shared by mainnet and devnet). Use
/// [`timestamp_now`](Self::timestamp_now) to count from a specific network.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    tx_type: TransactionType,
    timestamp: Option<i32>,
    sender_public_key: Option<ArkPublicKey>,
    recipient_id: String,
    vendor_field: Option<String>,
    amount: u64,
    fee: u64,
}

impl TransactionBuilder {
    /// Starts a builder for the given transaction type. Amount and fee
    /// default to zero.
    pub fn new(tx_type: TransactionType) -> Self {
        Self {
            tx_type,
            timestamp: None,
            sender_public_key: None,
            recipient_id: String::new(),
            vendor_field: None,
            amount: 0,
            fee: 0,
        }
    }

    /// Shorthand for `new(TransactionType::Transfer)`.
    pub fn transfer() -> Self {
        Self::new(TransactionType::Transfer)
    }

    /// Attaches the public key of the signing owner.
    pub fn sender(mut self, keypair: &ArkKeypair) -> Self {
        self.sender_public_key = Some(keypair.public_key());
        self
    }

    /// Attaches a sender public key directly, for transactions signed
    /// elsewhere.
    pub fn sender_public_key(mut self, public_key: ArkPublicKey) -> Self {
        self.sender_public_key = Some(public_key);
        self
    }

    /// Sets the recipient address.
    pub fn recipient(mut self, address: &str) -> Self {
        self.recipient_id = address.to_string();
        self
    }

    /// Sets the vendor field memo.
    pub fn vendor_field(mut self, memo: impl Into<String>) -> Self {
        self.vendor_field = Some(memo.into());
        self
    }

    /// Sets the amount in arktoshi.
    pub fn amount(mut self, amount: u64) -> Self {
        self.amount = amount;
        self
    }

    /// Sets the fee in arktoshi.
    pub fn fee(mut self, fee: u64) -> Self {
        self.fee = fee;
        self
    }

    /// Sets the network-relative timestamp explicitly.
    pub fn timestamp(mut self, timestamp: i32) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Sets the timestamp to the current time on `network`.
    pub fn timestamp_now(mut self, network: &NetworkInfo) -> Self {
        self.timestamp = Some(network.current_timestamp());
        self
    }

    /// Consumes the builder and produces an unsigned [`Transaction`].
    ///
    /// Nothing is validated here; missing or malformed fields surface when
    /// the transaction is encoded for signing.
    pub fn build(self) -> Transaction {
        let timestamp = self
            .timestamp
            .unwrap_or_else(|| NetworkInfo::for_network(Network::Mainnet).current_timestamp());

        Transaction {
            tx_type: self.tx_type,
            timestamp,
            sender_public_key: self.sender_public_key,
            recipient_id: self.recipient_id,
            vendor_field: self.vendor_field,
            amount: self.amount,
            fee: self.fee,
            signature: None,
            second_signature: None,
            id: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
