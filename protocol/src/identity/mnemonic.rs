//! BIP-39 passphrases.
//!
//! A fresh passphrase is 128 bits drawn from the operating system's CSPRNG,
//! mapped to twelve words from the English BIP-39 list (the last word
//! carries a 4-bit checksum). The passphrase string itself, words joined by
//! single spaces, is what [`ArkKeypair::from_passphrase`] hashes. No BIP-39
//! seed stretching is involved.
//!
//! If the entropy source cannot be read, generation fails with
//! [`MnemonicError::EntropyUnavailable`]. It never returns an empty or
//! partial passphrase.

use std::fmt;

use bip39::{Language, Mnemonic};
use rand::rngs::OsRng;
use rand_core::RngCore;
use thiserror::Error;
use tracing::debug;

use crate::config::{PASSPHRASE_ENTROPY_LENGTH, PASSPHRASE_WORD_COUNT};
use crate::crypto::keys::{ArkKeypair, KeyError};

/// Errors raised while generating or parsing a passphrase.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MnemonicError {
    /// The secure random source could not be read.
    #[error("secure entropy source unavailable: {0}")]
    EntropyUnavailable(String),

    /// Unknown word, bad checksum, or wrong word count.
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),
}

/// A generated passphrase: twelve BIP-39 words.
///
/// `Display` yields the exact string to feed into key derivation. `Debug`
/// only reports the word count.
#[derive(Clone, PartialEq, Eq)]
pub struct Passphrase {
    words: Vec<String>,
}

impl Passphrase {
    /// The individual words, in order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// The words joined by single spaces.
    pub fn phrase(&self) -> String {
        self.words.join(" ")
    }

    /// Derives the key pair this passphrase controls.
    pub fn to_keypair(&self) -> Result<ArkKeypair, KeyError> {
        ArkKeypair::from_passphrase(&self.phrase())
    }
}

impl fmt::Display for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.phrase())
    }
}

impl fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Passphrase({} words)", self.words.len())
    }
}

/// Generates a fresh passphrase from the operating system's CSPRNG.
pub fn generate_passphrase() -> Result<Passphrase, MnemonicError> {
    generate_passphrase_with(&mut OsRng)
}

/// Generates a passphrase from a caller-supplied entropy source.
///
/// The source is read with `try_fill_bytes`; a failing source surfaces as
/// [`MnemonicError::EntropyUnavailable`].
pub fn generate_passphrase_with<R: RngCore + ?Sized>(
    rng: &mut R,
) -> Result<Passphrase, MnemonicError> {
    let mut entropy = [0u8; PASSPHRASE_ENTROPY_LENGTH];
    rng.try_fill_bytes(&mut entropy)
        .map_err(|e| MnemonicError::EntropyUnavailable(e.to_string()))?;

    let passphrase = passphrase_from_entropy(&entropy);
    debug!(words = passphrase.words.len(), "generated passphrase");
    Ok(passphrase)
}

/// Maps 16 bytes of entropy to their twelve-word passphrase.
pub fn passphrase_from_entropy(entropy: &[u8; PASSPHRASE_ENTROPY_LENGTH]) -> Passphrase {
    let mnemonic = Mnemonic::from_entropy_in(Language::English, entropy)
        .expect("16 bytes is a valid BIP-39 entropy length");
    let words = mnemonic
        .to_string()
        .split_whitespace()
        .map(str::to_owned)
        .collect();
    Passphrase { words }
}

/// Recovers the entropy behind a twelve-word passphrase.
///
/// Used by tooling that checks a user-typed passphrase before deriving keys
/// from it. Words are matched after whitespace normalisation; case matters.
pub fn passphrase_to_entropy(phrase: &str) -> Result<[u8; PASSPHRASE_ENTROPY_LENGTH], MnemonicError> {
    let normalized = phrase.split_whitespace().collect::<Vec<_>>().join(" ");
    let mnemonic = Mnemonic::parse_in_normalized(Language::English, &normalized)
        .map_err(|e| MnemonicError::InvalidMnemonic(e.to_string()))?;

    if mnemonic.word_count() != PASSPHRASE_WORD_COUNT {
        return Err(MnemonicError::InvalidMnemonic(format!(
            "expected {} words, got {}",
            PASSPHRASE_WORD_COUNT,
            mnemonic.word_count()
        )));
    }

    let (bytes, len) = mnemonic.to_entropy_array();
    let mut entropy = [0u8; PASSPHRASE_ENTROPY_LENGTH];
    entropy.copy_from_slice(&bytes[..len]);
    Ok(entropy)
}

/// `true` if `phrase` is a well-formed twelve-word passphrase.
pub fn validate_passphrase(phrase: &str) -> bool {
    passphrase_to_entropy(phrase).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// An entropy source that is always unavailable.
    struct BrokenRng;

    impl RngCore for BrokenRng {
        fn next_u32(&mut self) -> u32 {
            unreachable!("only try_fill_bytes is used")
        }

        fn next_u64(&mut self) -> u64 {
            unreachable!("only try_fill_bytes is used")
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            unreachable!("only try_fill_bytes is used")
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand_core::Error> {
            Err(rand_core::Error::new(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no entropy device",
            )))
        }
    }

    #[test]
    fn test_bip39_reference_vectors() {
        assert_eq!(
            passphrase_from_entropy(&[0x00; 16]).phrase(),
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about"
        );
        assert_eq!(
            passphrase_from_entropy(&[0x7f; 16]).phrase(),
            "legal winner thank year wave sausage worth useful legal winner thank yellow"
        );
        assert_eq!(
            passphrase_from_entropy(&[0x80; 16]).phrase(),
            "letter advice cage absurd amount doctor acoustic avoid letter advice cage above"
        );
        assert_eq!(
            passphrase_from_entropy(&[0xff; 16]).phrase(),
            "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong"
        );
    }

    #[test]
    fn test_generated_passphrase_has_twelve_words() {
        let passphrase = generate_passphrase().unwrap();
        assert_eq!(passphrase.words().len(), PASSPHRASE_WORD_COUNT);
        assert!(validate_passphrase(&passphrase.to_string()));
    }

    #[test]
    fn test_two_passphrases_differ() {
        assert_ne!(generate_passphrase().unwrap(), generate_passphrase().unwrap());
    }

    #[test]
    fn test_entropy_failure_is_an_error() {
        let result = generate_passphrase_with(&mut BrokenRng);
        assert!(matches!(result, Err(MnemonicError::EntropyUnavailable(_))));
    }

    #[test]
    fn test_entropy_roundtrip() {
        let entropy = [0x5a; 16];
        let phrase = passphrase_from_entropy(&entropy).to_string();
        assert_eq!(passphrase_to_entropy(&phrase).unwrap(), entropy);
        // Extra whitespace is tolerated.
        let spaced = format!("  {}  ", phrase.replace(' ', "   "));
        assert_eq!(passphrase_to_entropy(&spaced).unwrap(), entropy);
    }

    #[test]
    fn test_bad_checksum_rejected() {
        // Last word of the all-zero vector is "about"; "abandon" breaks the checksum.
        let bad = ["abandon"; 12].join(" ");
        assert!(matches!(
            passphrase_to_entropy(&bad),
            Err(MnemonicError::InvalidMnemonic(_))
        ));
    }

    #[test]
    fn test_wrong_word_count_rejected() {
        // Valid 24-word BIP-39 mnemonic, but not a 12-word Ark passphrase.
        let long = format!("{} art", ["abandon"; 23].join(" "));
        assert!(matches!(
            passphrase_to_entropy(&long),
            Err(MnemonicError::InvalidMnemonic(_))
        ));
        assert!(!validate_passphrase("not a passphrase"));
    }

    #[test]
    fn test_passphrase_derives_keys() {
        let passphrase = passphrase_from_entropy(&[0x00; 16]);
        let kp = passphrase.to_keypair().unwrap();
        assert_eq!(kp, ArkKeypair::from_passphrase(&passphrase.phrase()).unwrap());
    }

    #[test]
    fn debug_does_not_leak_words() {
        let passphrase = passphrase_from_entropy(&[0xff; 16]);
        assert_eq!(format!("{:?}", passphrase), "Passphrase(12 words)");
    }
}
