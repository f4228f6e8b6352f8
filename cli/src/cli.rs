//! # CLI Interface
//!
//! Defines the command-line argument structure for `ark` using `clap`
//! derive. Passphrases are read from the environment by default so they do
//! not end up in shell history.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Ark wallet tools.
///
/// Generates passphrases, derives and validates addresses, and signs
/// transfers offline. Nothing is broadcast; signed transactions are printed
/// as JSON for whatever submits them.
#[derive(Parser, Debug)]
#[command(
    name = "ark",
    about = "Ark wallet tools: passphrases, addresses, signed transfers",
    version,
    propagate_version = true
)]
pub struct ArkCli {
    /// Load network parameters from this JSON file instead of the built-in
    /// table.
    #[arg(long, global = true, env = "ARK_NETWORKS_FILE")]
    pub networks_file: Option<PathBuf>,

    /// Default log filter when `RUST_LOG` is not set.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Log output format: `pretty` or `json`.
    #[arg(long, global = true, default_value = "pretty")]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the `ark` binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a fresh 12-word passphrase.
    Passphrase(PassphraseArgs),
    /// Print the address controlled by a passphrase.
    Address(AddressArgs),
    /// Check an address against a network. Exits 1 if invalid.
    Validate(ValidateArgs),
    /// Build and sign a transfer, printing it as JSON.
    Transfer(TransferArgs),
    /// List the networks in the active table.
    Networks,
    /// Print version information and exit.
    Version,
}

/// Network selection shared by every command that needs one.
#[derive(Args, Debug, Clone)]
pub struct NetworkArg {
    /// Network name: `mainnet`, `devnet`, or a key of `--networks-file`.
    #[arg(long, short = 'n', env = "ARK_NETWORK", default_value = "devnet")]
    pub network: String,
}

/// Arguments for the `passphrase` subcommand.
#[derive(Args, Debug)]
pub struct PassphraseArgs {
    /// Also print the address of the new passphrase on this network.
    #[arg(long, short = 'n')]
    pub network: Option<String>,
}

/// Arguments for the `address` subcommand.
#[derive(Args, Debug)]
pub struct AddressArgs {
    #[command(flatten)]
    pub network: NetworkArg,

    /// Wallet passphrase.
    #[arg(long, env = "ARK_PASSPHRASE", hide_env_values = true)]
    pub passphrase: String,
}

/// Arguments for the `validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Address to check.
    pub address: String,

    #[command(flatten)]
    pub network: NetworkArg,
}

/// Arguments for the `transfer` subcommand.
#[derive(Args, Debug)]
pub struct TransferArgs {
    #[command(flatten)]
    pub network: NetworkArg,

    /// Recipient address.
    #[arg(long, short = 'r')]
    pub recipient: String,

    /// Amount in arktoshi.
    #[arg(long, short = 'a')]
    pub amount: u64,

    /// Fee in arktoshi.
    #[arg(long, short = 'f')]
    pub fee: u64,

    /// Memo stored in the vendor field. Truncated to 64 bytes on the wire.
    #[arg(long)]
    pub vendor_field: Option<String>,

    /// Seconds since the network epoch. Defaults to now.
    #[arg(long, allow_hyphen_values = true)]
    pub timestamp: Option<i32>,

    /// Owner passphrase.
    #[arg(long, env = "ARK_PASSPHRASE", hide_env_values = true)]
    pub passphrase: String,

    /// Second passphrase, for wallets with a registered second signature.
    #[arg(long, env = "ARK_SECOND_PASSPHRASE", hide_env_values = true)]
    pub second_passphrase: Option<String>,
}
