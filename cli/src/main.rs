// Copyright (c) 2026 Ark Core Contributors. MIT License.
// See LICENSE for details.

//! # Ark Wallet CLI
//!
//! Entry point for the `ark` binary. Parses CLI arguments, initializes
//! logging, resolves the network table, and dispatches to a subcommand:
//!
//! - `passphrase`: generate a fresh 12-word passphrase
//! - `address`   : derive the address of a passphrase
//! - `validate`  : check an address against a network
//! - `transfer`  : build, sign and print a transfer
//! - `networks`  : list known networks
//! - `version`   : print build version information

mod cli;
mod logging;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use ark_protocol::config::{Network, NetworkInfo, NetworkTable};
use ark_protocol::crypto::ArkKeypair;
use ark_protocol::identity::mnemonic::validate_passphrase;
use ark_protocol::identity::{check_address, generate_passphrase};
use ark_protocol::transaction::{sign_transfer, Transaction, TransactionBuilder};

use cli::{ArkCli, Commands};
use logging::LogFormat;

fn main() -> Result<ExitCode> {
    let cli = ArkCli::parse();
    logging::init_logging(&cli.log_level, LogFormat::from_str_lossy(&cli.log_format));

    let table = load_networks(cli.networks_file.as_deref())?;

    match cli.command {
        Commands::Passphrase(args) => new_passphrase(args, &table),
        Commands::Address(args) => show_address(args, &table),
        Commands::Validate(args) => validate(args, &table),
        Commands::Transfer(args) => {
            let network = resolve_network(&table, &args.network.network)?;
            let tx = build_transfer(&args, network)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&tx).context("failed to serialize transaction")?
            );
            Ok(ExitCode::SUCCESS)
        }
        Commands::Networks => {
            list_networks(&table);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Version => {
            print_version();
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// The built-in network table, or the one in `path` if given.
fn load_networks(path: Option<&Path>) -> Result<NetworkTable> {
    match path {
        Some(path) => {
            let table = NetworkTable::from_file(path)
                .with_context(|| format!("failed to load networks from {}", path.display()))?;
            tracing::info!(path = %path.display(), networks = ?table.names(), "loaded network table");
            Ok(table)
        }
        None => Ok(NetworkTable::builtin().clone()),
    }
}

/// Looks a network up by name. Built-in aliases (`main`, `dev`, any case)
/// are accepted; anything else must be a key of the table.
fn resolve_network<'a>(table: &'a NetworkTable, name: &str) -> Result<&'a NetworkInfo> {
    let found = match name.parse::<Network>() {
        Ok(network) => table.get(network),
        Err(_) => table.get_by_name(name),
    };
    found.with_context(|| format!("network '{}' is not in the table", name))
}

/// Derives a key pair from a user-supplied passphrase.
///
/// Ark accepts any passphrase, so a non-BIP-39 phrase is only warned about.
fn keypair_from(passphrase: &str, which: &str) -> Result<ArkKeypair> {
    if !validate_passphrase(passphrase) {
        tracing::warn!(which, "passphrase is not a 12-word BIP-39 mnemonic");
    }
    ArkKeypair::from_passphrase(passphrase)
        .with_context(|| format!("cannot derive a key from the {} passphrase", which))
}

fn new_passphrase(args: cli::PassphraseArgs, table: &NetworkTable) -> Result<ExitCode> {
    let passphrase = generate_passphrase().context("failed to generate passphrase")?;
    println!("{}", passphrase);

    if let Some(name) = args.network {
        let network = resolve_network(table, &name)?;
        let keypair = passphrase
            .to_keypair()
            .context("generated passphrase does not yield a valid key")?;
        println!("{}", keypair.address(network.version));
    }
    Ok(ExitCode::SUCCESS)
}

fn show_address(args: cli::AddressArgs, table: &NetworkTable) -> Result<ExitCode> {
    let network = resolve_network(table, &args.network.network)?;
    let keypair = keypair_from(&args.passphrase, "owner")?;
    println!("{}", keypair.address(network.version));
    Ok(ExitCode::SUCCESS)
}

fn validate(args: cli::ValidateArgs, table: &NetworkTable) -> Result<ExitCode> {
    let network = resolve_network(table, &args.network.network)?;
    match check_address(&args.address, network.version) {
        Ok(()) => {
            println!("valid");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("invalid: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Builds and signs the transfer described by `args`.
fn build_transfer(args: &cli::TransferArgs, network: &NetworkInfo) -> Result<Transaction> {
    let owner = keypair_from(&args.passphrase, "owner")?;
    let second = args
        .second_passphrase
        .as_deref()
        .map(|p| keypair_from(p, "second"))
        .transpose()?;

    let mut builder = TransactionBuilder::transfer()
        .sender(&owner)
        .recipient(&args.recipient)
        .amount(args.amount)
        .fee(args.fee);
    builder = match args.timestamp {
        Some(ts) => builder.timestamp(ts),
        None => builder.timestamp_now(network),
    };
    if let Some(memo) = &args.vendor_field {
        builder = builder.vendor_field(memo.as_str());
    }
    let mut tx = builder.build();

    let id = sign_transfer(&mut tx, &owner, second.as_ref()).context("failed to sign transfer")?;
    tracing::info!(
        %id,
        network = %network.name,
        co_signed = second.is_some(),
        "signed transfer"
    );
    Ok(tx)
}

fn list_networks(table: &NetworkTable) {
    for name in table.names() {
        if let Ok(info) = table.get_by_name(name) {
            println!(
                "{:<10} version {:#04x}  epoch {}  nethash {}",
                name, info.version, info.epoch, info.nethash
            );
        }
    }
}

/// Prints version information to stdout.
fn print_version() {
    println!("ark {}", env!("CARGO_PKG_VERSION"));
}
