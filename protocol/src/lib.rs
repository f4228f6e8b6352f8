// Copyright (c) 2026 Ark Core Contributors. MIT License.
// See LICENSE for details.

//! # Ark Protocol: Core Library
//!
//! Everything a client needs to produce a transaction the Ark network will
//! accept: keys derived from a passphrase, addresses derived from keys, and a
//! byte-exact canonical encoding that owner signatures, co-signer signatures
//! and transaction ids are all computed over.
//!
//! The wire format is consensus. A single byte out of place and the network
//! rejects the signature, or worse, the client reports an id nobody else
//! will ever see. Every layout decision therefore lives in exactly one place
//! ([`transaction::encoding`]) and is pinned by golden vectors in the tests.
//!
//! ## Architecture
//!
//! - **crypto**: SHA-256, RIPEMD-160, double-SHA-256, secp256k1 key pairs
//!   and DER-encoded ECDSA signatures. Thin wrappers over audited crates.
//! - **identity**: Base58Check addresses and BIP-39 passphrases.
//! - **transaction**: The transaction model, the canonical encoder, and
//!   the owner → co-signer → id signing pipeline.
//! - **config**: Network parameters (address version, epoch, nethash) as
//!   explicit values instead of process-wide state.
//!
//! ## Quick tour
//!
//! ```
//! use ark_protocol::config::{Network, NetworkInfo};
//! use ark_protocol::crypto::ArkKeypair;
//! use ark_protocol::transaction::{sign_transfer, TransactionBuilder};
//!
//! let devnet = NetworkInfo::for_network(Network::Devnet);
//! let sender = ArkKeypair::from_passphrase("this is a top secret passphrase").unwrap();
//! let recipient = ArkKeypair::from_passphrase("another passphrase").unwrap();
//!
//! let mut tx = TransactionBuilder::transfer()
//!     .sender(&sender)
//!     .recipient(&recipient.address(devnet.version))
//!     .amount(100_000_000)
//!     .fee(10_000_000)
//!     .timestamp(100)
//!     .build();
//!
//! let id = sign_transfer(&mut tx, &sender, None).unwrap();
//! assert_eq!(id.len(), 64);
//! ```

pub mod config;
pub mod crypto;
pub mod identity;
pub mod transaction;
