//! # Protocol Configuration & Constants
//!
//! Every wire width and network parameter lives here. The canonical encoder
//! reads its field sizes from these constants, so changing one of them
//! changes every signature and every transaction id on the network.
//!
//! Network parameters are plain values. Callers pick a [`NetworkInfo`] once
//! (from the built-in table or from a JSON file) and pass it to whatever
//! needs an address version byte or the network epoch. Nothing in the crate
//! caches "the current network" behind their back.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Wire Layout
// ---------------------------------------------------------------------------

/// Transaction type tag: one byte.
pub const TYPE_LENGTH: usize = 1;

/// Network-relative timestamp: signed 32-bit, little-endian.
pub const TIMESTAMP_LENGTH: usize = 4;

/// Compressed secp256k1 public key (`0x02`/`0x03` prefix + X coordinate).
pub const PUBLIC_KEY_LENGTH: usize = 33;

/// Decoded recipient address: version byte followed by RIPEMD-160 hash.
pub const RECIPIENT_ID_LENGTH: usize = 21;

/// Vendor field slot. Shorter memos are zero-padded, longer ones truncated.
pub const VENDOR_FIELD_LENGTH: usize = 64;

/// Amount in arktoshi, unsigned 64-bit little-endian.
pub const AMOUNT_LENGTH: usize = 8;

/// Fee in arktoshi, unsigned 64-bit little-endian.
pub const FEE_LENGTH: usize = 8;

/// Size of the signature-free part of every encoded transaction.
pub const FIXED_ENCODING_LENGTH: usize = TYPE_LENGTH
    + TIMESTAMP_LENGTH
    + PUBLIC_KEY_LENGTH
    + RECIPIENT_ID_LENGTH
    + VENDOR_FIELD_LENGTH
    + AMOUNT_LENGTH
    + FEE_LENGTH;

/// RIPEMD-160 output embedded in every address.
pub const ADDRESS_HASH_LENGTH: usize = 20;

// ---------------------------------------------------------------------------
// Passphrases
// ---------------------------------------------------------------------------

/// Entropy drawn for a fresh passphrase. 128 bits maps to 12 BIP-39 words.
pub const PASSPHRASE_ENTROPY_LENGTH: usize = 16;

/// Number of words in a generated passphrase.
pub const PASSPHRASE_WORD_COUNT: usize = 12;

// ---------------------------------------------------------------------------
// Networks
// ---------------------------------------------------------------------------

/// Built-in network table, compiled into the binary.
const BUILTIN_NETWORKS: &str = include_str!("networks.json");

/// Errors raised while selecting or loading network parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The requested network is not in the table.
    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    /// The network table file could not be read.
    #[error("failed to read network table: {0}")]
    Io(#[from] std::io::Error),

    /// The network table is not valid JSON or is missing fields.
    #[error("failed to parse network table: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The networks this client knows how to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Production network. Address version `0x17` (addresses start with `A`).
    Mainnet,
    /// Development network. Address version `0x1e` (addresses start with `D`).
    Devnet,
}

impl Network {
    /// The key this network is stored under in a network table.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Devnet => "devnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(Self::Mainnet),
            "devnet" | "dev" => Ok(Self::Devnet),
            other => Err(ConfigError::UnknownNetwork(other.to_string())),
        }
    }
}

/// Parameters of a single Ark network.
///
/// Only `version` takes part in key/address derivation. The rest is carried
/// for callers that build on top of this crate (peer handshakes need the
/// nethash, timestamps count from the epoch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    /// Human-readable name (`mainnet`, `devnet`).
    pub name: String,
    /// Address version byte prepended to the public key hash.
    pub version: u8,
    /// WIF prefix byte for exported private keys.
    pub wif: u8,
    /// Hex hash of the genesis block; identifies the network to peers.
    pub nethash: String,
    /// Instant that transaction timestamps count from.
    pub epoch: DateTime<Utc>,
    /// Default P2P port.
    pub port: u16,
}

impl NetworkInfo {
    /// Parameters for one of the built-in networks.
    pub fn for_network(network: Network) -> Self {
        NetworkTable::builtin()
            .get(network)
            .cloned()
            .expect("built-in table covers every Network variant")
    }

    /// Seconds elapsed between the network epoch and `now`.
    ///
    /// Saturates at the bounds of `i32`; the wire slot is four bytes wide.
    pub fn network_time(&self, now: DateTime<Utc>) -> i32 {
        let secs = now.signed_duration_since(self.epoch).num_seconds();
        secs.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }

    /// Network-relative timestamp for the current wall-clock time.
    pub fn current_timestamp(&self) -> i32 {
        self.network_time(Utc::now())
    }

    /// The network epoch as a Unix timestamp.
    pub fn epoch_seconds(&self) -> i64 {
        self.epoch.timestamp()
    }

    /// Converts a network-relative timestamp back to wall-clock time.
    pub fn to_datetime(&self, timestamp: i32) -> DateTime<Utc> {
        self.epoch + chrono::Duration::seconds(timestamp as i64)
    }
}

/// A set of named networks, as stored in `networks.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkTable {
    networks: HashMap<String, NetworkInfo>,
}

impl NetworkTable {
    /// The table compiled into the crate. Parsed once on first use.
    pub fn builtin() -> &'static NetworkTable {
        static TABLE: OnceLock<NetworkTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            NetworkTable::from_json(BUILTIN_NETWORKS).expect("built-in network table is valid")
        })
    }

    /// Parses a network table from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a network table from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Looks up a network by enum variant.
    pub fn get(&self, network: Network) -> Result<&NetworkInfo, ConfigError> {
        self.get_by_name(network.name())
    }

    /// Looks up a network by its table key.
    pub fn get_by_name(&self, name: &str) -> Result<&NetworkInfo, ConfigError> {
        self.networks
            .get(name)
            .ok_or_else(|| ConfigError::UnknownNetwork(name.to_string()))
    }

    /// Names of every network in the table, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.networks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
