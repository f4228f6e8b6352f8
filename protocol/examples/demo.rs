//! Walkthrough of the Ark wallet flow, start to finish.
//!
//! Generates a passphrase, derives keys and addresses on both networks,
//! builds a transfer, signs it as owner and co-signer, and verifies the
//! result the way a node would.
//!
//! Run with:
//!   cargo run --example demo --release

use std::time::Instant;

use ark_protocol::config::{Network, NetworkInfo};
use ark_protocol::crypto::ArkKeypair;
use ark_protocol::identity::{generate_passphrase, validate_address};
use ark_protocol::transaction::{
    assign_id, encode, sign_as_co_signer, sign_as_owner, verify_transaction, TransactionBuilder,
};

// ---------------------------------------------------------------------------
// ANSI color constants
// ---------------------------------------------------------------------------

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const MAGENTA: &str = "\x1b[35m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

fn section(num: u32, title: &str) {
    println!();
    println!("{BOLD}{CYAN}===[{YELLOW} Step {num} {CYAN}]========================================{RESET}");
    println!("{BOLD}{WHITE}  {title}{RESET}");
}

fn success(text: &str) {
    println!("{GREEN}  [OK] {text}{RESET}");
}

fn info(label: &str, value: &str) {
    println!("{WHITE}  {BOLD}{label}:{RESET} {YELLOW}{value}{RESET}");
}

fn timing(label: &str, elapsed: std::time::Duration) {
    let ms = elapsed.as_secs_f64() * 1000.0;
    println!("{DIM}{MAGENTA}  [{label}: {ms:.2} ms]{RESET}");
}

fn main() {
    let devnet = NetworkInfo::for_network(Network::Devnet);
    let mainnet = NetworkInfo::for_network(Network::Mainnet);

    section(1, "Passphrase and keys");
    let t = Instant::now();
    let passphrase = generate_passphrase().expect("entropy source");
    let owner = passphrase.to_keypair().expect("passphrase key");
    let second = ArkKeypair::from_passphrase("second secret passphrase").expect("second key");
    timing("passphrase + key derivation", t.elapsed());

    info("Passphrase", &passphrase.to_string());
    info("Public key", &owner.public_key_hex());

    section(2, "Addresses");
    let devnet_address = owner.address(devnet.version);
    info("Devnet", &devnet_address);
    info("Mainnet", &owner.address(mainnet.version));
    assert!(validate_address(&devnet_address, devnet.version));
    assert!(!validate_address(&devnet_address, mainnet.version));
    success("Devnet address validates on devnet only");

    section(3, "Build a transfer");
    let recipient = second.address(devnet.version);
    let mut tx = TransactionBuilder::transfer()
        .sender(&owner)
        .recipient(&recipient)
        .amount(100_000_000)
        .fee(10_000_000)
        .vendor_field("ark demo")
        .timestamp_now(&devnet)
        .build();
    let unsigned = encode(&tx, false, false).expect("encodable transfer");
    info("Recipient", &recipient);
    info("Timestamp", &format!("{} ({})", tx.timestamp, tx.datetime(&devnet)));
    info("Unsigned bytes", &format!("{} bytes", unsigned.len()));

    section(4, "Sign, co-sign, identify");
    let t = Instant::now();
    let owner_sig = sign_as_owner(&mut tx, &owner).expect("owner signature").to_hex();
    let second_sig = sign_as_co_signer(&mut tx, &second).expect("co-signature").to_hex();
    let id = assign_id(&mut tx).expect("id").to_string();
    timing("signing pipeline", t.elapsed());
    info("Signature", &owner_sig);
    info("Second signature", &second_sig);
    info("Id", &id);
    info("State", &tx.state().to_string());

    section(5, "Verify as a node");
    verify_transaction(&tx, Some(&second.public_key())).expect("valid transaction");
    success("Owner signature, co-signature and id all check out");

    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&tx).expect("transaction serializes")
    );
}
