//! # Digital Signatures
//!
//! ECDSA over secp256k1, DER-encoded, exactly as Ark nodes expect them.
//!
//! Signatures are always computed over a 32-byte digest that the caller
//! produced. The transaction pipeline hashes the canonical encoding once
//! with SHA-256 and hands that digest here; nothing in this module hashes
//! again.
//!
//! ## Determinism
//!
//! Nonces are derived with RFC 6979 and `s` is normalised to the lower half
//! of the curve order, so a given (key, digest) pair always yields the same
//! DER bytes. The golden-vector tests depend on that.

use std::fmt;

use secp256k1::ecdsa::Signature;
use secp256k1::Message;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::keys::{secp, ArkKeypair, ArkPublicKey};

/// Errors during signature operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("signature verification failed")]
    VerificationFailed,

    #[error("invalid DER signature bytes")]
    InvalidDer,

    #[error("invalid public key")]
    InvalidPublicKey,
}

/// A DER-encoded ECDSA signature.
///
/// Between 8 and 72 bytes; typically 70 or 71. The bytes are validated as
/// DER on construction, so anything holding a `DerSignature` holds a
/// parseable signature.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DerSignature {
    bytes: Vec<u8>,
}

impl DerSignature {
    /// Wraps DER bytes after checking they parse.
    pub fn from_der(bytes: &[u8]) -> Result<Self, SignatureError> {
        Signature::from_der(bytes).map_err(|_| SignatureError::InvalidDer)?;
        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    /// Parses a hex-encoded DER signature.
    pub fn from_hex(s: &str) -> Result<Self, SignatureError> {
        let bytes = hex::decode(s).map_err(|_| SignatureError::InvalidDer)?;
        Self::from_der(&bytes)
    }

    /// Raw DER bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length of the DER encoding in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false` for a validated signature; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lower-case hex of the DER bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    fn to_secp(&self) -> Result<Signature, SignatureError> {
        Signature::from_der(&self.bytes).map_err(|_| SignatureError::InvalidDer)
    }
}

impl fmt::Display for DerSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for DerSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        if hex_str.len() > 16 {
            write!(
                f,
                "DerSignature({}...{})",
                &hex_str[..8],
                &hex_str[hex_str.len() - 8..]
            )
        } else {
            write!(f, "DerSignature({})", hex_str)
        }
    }
}

impl Serialize for DerSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for DerSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Sign a 32-byte digest with a key pair.
///
/// # Example
///
/// ```
/// use ark_protocol::crypto::{sha256_array, sign_digest, verify_digest, ArkKeypair};
///
/// let kp = ArkKeypair::from_passphrase("sign me").unwrap();
/// let digest = sha256_array(b"payload");
/// let sig = sign_digest(&kp, &digest);
/// assert!(verify_digest(&kp.public_key(), &digest, &sig));
/// ```
pub fn sign_digest(keypair: &ArkKeypair, digest: &[u8; 32]) -> DerSignature {
    let message = Message::from_digest(*digest);
    let mut signature = secp().sign_ecdsa(&message, keypair.secret_key());
    signature.normalize_s();
    DerSignature {
        bytes: signature.serialize_der().to_vec(),
    }
}

/// Verify a signature over a digest. `false` on any failure.
pub fn verify_digest(public_key: &ArkPublicKey, digest: &[u8; 32], signature: &DerSignature) -> bool {
    verify_raw(public_key.as_bytes(), digest, signature.as_bytes()).is_ok()
}

/// Verify using raw byte components, as they arrive off the wire.
pub fn verify_raw(
    public_key_bytes: &[u8],
    digest: &[u8; 32],
    der_bytes: &[u8],
) -> Result<(), SignatureError> {
    let public_key = ArkPublicKey::try_from_slice(public_key_bytes)
        .and_then(|pk| pk.to_secp())
        .map_err(|_| SignatureError::InvalidPublicKey)?;
    let signature = DerSignature::from_der(der_bytes)?.to_secp()?;
    let message = Message::from_digest(*digest);

    secp()
        .verify_ecdsa(&message, &signature, &public_key)
        .map_err(|_| SignatureError::VerificationFailed)
}
