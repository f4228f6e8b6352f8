//! # Identity Module
//!
//! How an Ark participant is named and how they get their keys:
//!
//! 1. **Passphrase**: twelve BIP-39 words ([`mnemonic`]). The passphrase
//!    *is* the wallet; the private key is its SHA-256.
//! 2. **Key pair**: secp256k1, see [`crate::crypto::keys`].
//! 3. **Address**: Base58Check of a network version byte and the
//!    RIPEMD-160 of the compressed public key ([`address`]).

pub mod address;
pub mod mnemonic;

pub use address::{
    check_address, decode_address, derive_address, validate_address, AddressError,
};
pub use mnemonic::{
    generate_passphrase, passphrase_from_entropy, passphrase_to_entropy, MnemonicError,
    Passphrase,
};
