//! # Hashing Utilities
//!
//! The three digests the Ark wire format is built from:
//!
//! - **SHA-256**: signing digests, transaction ids, and passphrase-to-key
//!   derivation.
//! - **RIPEMD-160**: the 20-byte public key hash inside every address.
//!   Ark hashes the compressed public key directly; there is no SHA-256
//!   step in front of it as in Bitcoin's HASH160.
//! - **double SHA-256**: Base58Check checksums and other callers that want
//!   the Bitcoin-style construction.
//!
//! All of them are thin wrappers over the RustCrypto crates.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash of the input data.
///
/// Returns a 32-byte digest as a `Vec<u8>` for call sites that want owned
/// bytes. Use [`sha256_array`] when a fixed-size array is more convenient.
///
/// # Example
///
/// ```
/// use ark_protocol::crypto::sha256;
///
/// let hash = sha256(b"ark");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> Vec<u8> {
    sha256_array(data).to_vec()
}

/// Compute the SHA-256 hash and return a fixed-size array.
pub fn sha256_array(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute the RIPEMD-160 hash of the input data.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute the double-SHA-256 hash: `SHA-256(SHA-256(data))`.
///
/// Each round uses a fresh hasher. Not part of the signing pipeline; the
/// signer hashes exactly once.
///
/// # Example
///
/// ```
/// use ark_protocol::crypto::{double_sha256, sha256_array};
///
/// let twice = double_sha256(b"raw bytes");
/// assert_eq!(twice, sha256_array(&sha256_array(b"raw bytes")));
/// ```
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256_array(&sha256_array(data))
}
