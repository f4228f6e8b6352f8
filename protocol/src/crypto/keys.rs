//! # Key Management
//!
//! secp256k1 key pairs for Ark identities.
//!
//! An Ark key pair is derived straight from a passphrase: the private scalar
//! is `SHA-256(utf8(passphrase))`. There is no salt and no iteration count,
//! which is only acceptable because generated passphrases carry 128 bits of
//! entropy (see [`crate::identity::mnemonic`]). A human-chosen passphrase
//! is a brain wallet and will be swept.
//!
//! ## Security considerations
//!
//! - The scalar must lie in `[1, n-1]`. A digest outside that range is
//!   rejected with [`KeyError::InvalidSeed`] rather than silently reduced.
//! - `Debug` never prints secret material.
//! - Key bytes are never logged.

use std::fmt;
use std::sync::OnceLock;

use secp256k1::constants::CURVE_ORDER;
use secp256k1::{All, PublicKey, Secp256k1, SecretKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::hash::sha256_array;
use super::signatures::{self, DerSignature};
use crate::config::PUBLIC_KEY_LENGTH;
use crate::identity::address::derive_address;

/// Shared secp256k1 context. Built once, read-only afterwards.
pub(crate) fn secp() -> &'static Secp256k1<All> {
    static CONTEXT: OnceLock<Secp256k1<All>> = OnceLock::new();
    CONTEXT.get_or_init(Secp256k1::new)
}

/// Errors that can occur during key operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// The passphrase digest is zero or not below the curve order.
    #[error("seed cannot resolve to a valid secp256k1 private key")]
    InvalidSeed,

    #[error("invalid secret key bytes: wrong length or not a valid scalar")]
    InvalidSecretKey,

    #[error("invalid public key bytes: not a valid secp256k1 point")]
    InvalidPublicKey,
}

/// An Ark key pair: a secp256k1 private scalar and its compressed public key.
///
/// `ArkKeypair` does not implement `Serialize`. Exporting a private key
/// should be an explicit call to [`secret_key_bytes`](Self::secret_key_bytes).
///
/// # Examples
///
/// ```
/// use ark_protocol::crypto::ArkKeypair;
///
/// let kp = ArkKeypair::from_passphrase("this is a top secret passphrase").unwrap();
/// assert_eq!(
///     kp.public_key_hex(),
///     "034151a3ec46b5670a682b0a63394f863587d1bc97483b1b6c70eb58e7f0aed192"
/// );
/// assert_eq!(kp.address(0x1e), "D61mfSggzbvQgTUe6JhYKH2doHaqJ3Dyib");
/// ```
#[derive(Clone)]
pub struct ArkKeypair {
    secret: SecretKey,
    public: PublicKey,
}

impl ArkKeypair {
    /// Derives the key pair for a passphrase.
    ///
    /// # Errors
    ///
    /// [`KeyError::InvalidSeed`] if `SHA-256(passphrase)` is zero or not
    /// below the secp256k1 group order.
    pub fn from_passphrase(passphrase: &str) -> Result<Self, KeyError> {
        Self::from_digest(sha256_array(passphrase.as_bytes()))
    }

    /// Builds a key pair from a 32-byte big-endian scalar candidate.
    ///
    /// This is the range check behind [`from_passphrase`](Self::from_passphrase),
    /// exposed so the boundary cases can be exercised directly.
    pub fn from_digest(digest: [u8; 32]) -> Result<Self, KeyError> {
        // Both arrays are big-endian, so byte-wise ordering is numeric ordering.
        if digest == [0u8; 32] || digest >= CURVE_ORDER {
            return Err(KeyError::InvalidSeed);
        }
        let secret = SecretKey::from_slice(&digest).map_err(|_| KeyError::InvalidSeed)?;
        Ok(Self::from_secret_key(secret))
    }

    /// Reconstructs a key pair from raw secret key bytes.
    pub fn from_secret_bytes(bytes: &[u8; 32]) -> Result<Self, KeyError> {
        let secret = SecretKey::from_slice(bytes).map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self::from_secret_key(secret))
    }

    /// Reconstructs a key pair from a hex-encoded secret key.
    pub fn from_secret_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str).map_err(|_| KeyError::InvalidSecretKey)?;
        let arr: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::InvalidSecretKey)?;
        Self::from_secret_bytes(&arr)
    }

    fn from_secret_key(secret: SecretKey) -> Self {
        let public = PublicKey::from_secret_key(secp(), &secret);
        Self { secret, public }
    }

    /// Returns the public half of this key pair.
    pub fn public_key(&self) -> ArkPublicKey {
        ArkPublicKey {
            bytes: self.public.serialize(),
        }
    }

    /// Compressed public key bytes, as they appear on the wire.
    pub fn public_key_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.public.serialize()
    }

    /// Hex-encoded compressed public key.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key_bytes())
    }

    /// Exports the raw 32-byte private scalar.
    ///
    /// Anyone holding these bytes controls every address derived from them.
    pub fn secret_key_bytes(&self) -> [u8; 32] {
        self.secret.secret_bytes()
    }

    /// Signs a 32-byte digest. See [`signatures::sign_digest`].
    pub fn sign_digest(&self, digest: &[u8; 32]) -> DerSignature {
        signatures::sign_digest(self, digest)
    }

    /// Address of this key pair on the network identified by `version`.
    pub fn address(&self, version: u8) -> String {
        derive_address(&self.public_key_bytes(), version)
    }

    pub(crate) fn secret_key(&self) -> &SecretKey {
        &self.secret
    }
}

impl fmt::Debug for ArkKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArkKeypair(pub={})", self.public_key_hex())
    }
}

impl PartialEq for ArkKeypair {
    /// Two key pairs are equal if their public keys match.
    fn eq(&self, other: &Self) -> bool {
        self.public == other.public
    }
}

impl Eq for ArkKeypair {}

// ---------------------------------------------------------------------------
// ArkPublicKey
// ---------------------------------------------------------------------------

/// A compressed secp256k1 public key, validated on construction.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArkPublicKey {
    bytes: [u8; PUBLIC_KEY_LENGTH],
}

impl ArkPublicKey {
    /// Parses a compressed public key, rejecting bytes that are not a point
    /// on the curve.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        if slice.len() != PUBLIC_KEY_LENGTH {
            return Err(KeyError::InvalidPublicKey);
        }
        let key = PublicKey::from_slice(slice).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self {
            bytes: key.serialize(),
        })
    }

    /// Parses a hex-encoded compressed public key.
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(s).map_err(|_| KeyError::InvalidPublicKey)?;
        Self::try_from_slice(&bytes)
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.bytes
    }

    /// Hex-encoded representation. 66 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Address of this public key on the network identified by `version`.
    pub fn address(&self, version: u8) -> String {
        derive_address(&self.bytes, version)
    }

    /// Checks an ECDSA signature over a 32-byte digest.
    pub fn verify(&self, digest: &[u8; 32], signature: &DerSignature) -> bool {
        signatures::verify_digest(self, digest, signature)
    }

    pub(crate) fn to_secp(self) -> Result<PublicKey, KeyError> {
        PublicKey::from_slice(&self.bytes).map_err(|_| KeyError::InvalidPublicKey)
    }
}

impl From<&ArkKeypair> for ArkPublicKey {
    fn from(kp: &ArkKeypair) -> Self {
        kp.public_key()
    }
}

impl fmt::Display for ArkPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ArkPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArkPublicKey({})", self.to_hex())
    }
}

impl Serialize for ArkPublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ArkPublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
