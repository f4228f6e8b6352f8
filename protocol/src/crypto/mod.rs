//! # Cryptographic Primitives for Ark
//!
//! Every signature, every address, and every transaction id flows through
//! here:
//!
//! - **secp256k1** ECDSA for signatures, DER-encoded on the wire.
//! - **SHA-256** for signing digests, ids and key derivation.
//! - **RIPEMD-160** for the public key hash inside addresses.
//!
//! ## A note on "rolling your own crypto"
//!
//! We don't. Everything here wraps `secp256k1`, `sha2` and `ripemd`. The
//! only logic of our own is the scalar range check on passphrase-derived
//! keys.

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{double_sha256, ripemd160, sha256, sha256_array};
pub use keys::{ArkKeypair, ArkPublicKey, KeyError};
pub use signatures::{sign_digest, verify_digest, DerSignature, SignatureError};
