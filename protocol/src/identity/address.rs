//! Ark addresses: Base58Check over `version ‖ RIPEMD-160(public key)`.
//!
//! The version byte selects the network (`0x17` mainnet, `0x1e` devnet) and
//! also fixes the leading character of the encoded string. The checksum is
//! the first four bytes of double SHA-256 over the 21-byte payload, handled
//! by `bs58`'s `check` feature.
//!
//! ```
//! use ark_protocol::identity::address::{derive_address, validate_address};
//! use ark_protocol::crypto::ArkKeypair;
//!
//! let kp = ArkKeypair::from_passphrase("this is a top secret passphrase").unwrap();
//! let addr = derive_address(&kp.public_key_bytes(), 0x1e);
//! assert_eq!(addr, "D61mfSggzbvQgTUe6JhYKH2doHaqJ3Dyib");
//! assert!(validate_address(&addr, 0x1e));
//! assert!(!validate_address(&addr, 0x17));
//! ```

use thiserror::Error;

use crate::config::{ADDRESS_HASH_LENGTH, RECIPIENT_ID_LENGTH};
use crate::crypto::hash::ripemd160;

/// Errors from decoding or checking an address string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// The trailing four checksum bytes do not match the payload.
    #[error("address checksum mismatch")]
    InvalidChecksum,

    /// The string is not Base58 or is too short to carry a checksum.
    #[error("invalid base58 encoding: {0}")]
    InvalidEncoding(String),

    /// The decoded payload has the wrong size.
    #[error("invalid address length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    /// The address belongs to a different network.
    #[error("address version {got:#04x} does not match network version {expected:#04x}")]
    VersionMismatch { expected: u8, got: u8 },
}

impl From<bs58::decode::Error> for AddressError {
    fn from(e: bs58::decode::Error) -> Self {
        match e {
            bs58::decode::Error::InvalidChecksum { .. } => AddressError::InvalidChecksum,
            other => AddressError::InvalidEncoding(other.to_string()),
        }
    }
}

/// Derives the address of a public key.
///
/// `RIPEMD-160(public_key)` is prefixed with `version` and Base58Check
/// encoded. Deterministic; the same key and version always produce the
/// same string.
pub fn derive_address(public_key: &[u8], version: u8) -> String {
    let hash = ripemd160(public_key);
    let mut payload = [0u8; RECIPIENT_ID_LENGTH];
    payload[0] = version;
    payload[1..].copy_from_slice(&hash);
    bs58::encode(payload).with_check().into_string()
}

/// Base58Check-decodes an address and returns its payload, checksum removed.
///
/// No length requirement is applied; see [`decode_address`] for the strict
/// 21-byte form.
pub fn decode_payload(address: &str) -> Result<Vec<u8>, AddressError> {
    Ok(bs58::decode(address).with_check(None).into_vec()?)
}

/// Decodes an address into its 21-byte `version ‖ hash` payload.
pub fn decode_address(address: &str) -> Result<[u8; RECIPIENT_ID_LENGTH], AddressError> {
    let payload = decode_payload(address)?;
    payload
        .as_slice()
        .try_into()
        .map_err(|_| AddressError::InvalidLength {
            expected: RECIPIENT_ID_LENGTH,
            got: payload.len(),
        })
}

/// Returns the version byte of an address after verifying its checksum.
pub fn address_version(address: &str) -> Result<u8, AddressError> {
    decode_payload(address)?
        .first()
        .copied()
        .ok_or(AddressError::InvalidLength {
            expected: RECIPIENT_ID_LENGTH,
            got: 0,
        })
}

/// Returns the 20-byte public key hash of an address.
pub fn address_hash(address: &str) -> Result<[u8; ADDRESS_HASH_LENGTH], AddressError> {
    let payload = decode_address(address)?;
    let mut hash = [0u8; ADDRESS_HASH_LENGTH];
    hash.copy_from_slice(&payload[1..]);
    Ok(hash)
}

/// Checks an address against a network version, reporting why it fails.
pub fn check_address(address: &str, version: u8) -> Result<(), AddressError> {
    let got = address_version(address)?;
    if got != version {
        return Err(AddressError::VersionMismatch {
            expected: version,
            got,
        });
    }
    Ok(())
}

/// `true` if `address` has a valid checksum and belongs to `version`.
pub fn validate_address(address: &str, version: u8) -> bool {
    check_address(address, version).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::ArkKeypair;

    const DEVNET: u8 = 0x1e;
    const MAINNET: u8 = 0x17;

    fn public_key() -> [u8; 33] {
        ArkKeypair::from_passphrase("this is a top secret passphrase")
            .unwrap()
            .public_key_bytes()
    }

    #[test]
    fn test_known_address_vectors() {
        assert_eq!(
            derive_address(&public_key(), DEVNET),
            "D61mfSggzbvQgTUe6JhYKH2doHaqJ3Dyib"
        );
        assert_eq!(
            derive_address(&public_key(), MAINNET),
            "AGeYmgbg2LgGxRW2vNNJvQ88PknEJsYizC"
        );
    }

    #[test]
    fn test_roundtrip_validates() {
        let addr = derive_address(&public_key(), DEVNET);
        assert!(validate_address(&addr, DEVNET));
        assert_eq!(address_version(&addr).unwrap(), DEVNET);
        assert_eq!(address_hash(&addr).unwrap(), ripemd160(&public_key()));
    }

    #[test]
    fn test_wrong_version_rejected() {
        let addr = derive_address(&public_key(), DEVNET);
        assert_eq!(
            check_address(&addr, MAINNET),
            Err(AddressError::VersionMismatch {
                expected: MAINNET,
                got: DEVNET
            })
        );
    }

    #[test]
    fn test_every_single_character_alteration_fails() {
        let addr = derive_address(&public_key(), DEVNET);
        let alphabet = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

        for (i, original) in addr.char_indices() {
            let replacement = alphabet.chars().find(|c| *c != original).unwrap();
            let mut altered = addr.clone();
            altered.replace_range(i..i + 1, &replacement.to_string());
            assert!(
                !validate_address(&altered, DEVNET),
                "altering position {} must invalidate {}",
                i,
                altered
            );
        }
    }

    #[test]
    fn test_checksum_error_is_reported() {
        let addr = derive_address(&public_key(), DEVNET);
        let mut altered = addr.clone();
        let last = if addr.ends_with('b') { "c" } else { "b" };
        altered.replace_range(addr.len() - 1.., last);
        assert_eq!(decode_payload(&altered), Err(AddressError::InvalidChecksum));
    }

    #[test]
    fn test_garbage_is_an_encoding_error() {
        assert!(matches!(
            decode_payload("0OIl"),
            Err(AddressError::InvalidEncoding(_))
        ));
        assert!(!validate_address("", DEVNET));
    }

    #[test]
    fn test_decode_address_requires_21_bytes() {
        let short = bs58::encode([DEVNET, 1, 2, 3]).with_check().into_string();
        assert_eq!(
            decode_address(&short),
            Err(AddressError::InvalidLength {
                expected: 21,
                got: 4
            })
        );
    }
}
