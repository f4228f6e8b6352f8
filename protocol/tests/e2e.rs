//! End-to-end integration tests for the Ark protocol core.
//!
//! These walk the whole path a wallet takes: passphrase to key pair, key
//! pair to address, build a transfer, sign it as owner and co-signer, assign
//! the id, ship it as JSON and verify it on the other side. The signatures
//! and ids are pinned to reference values; RFC 6979 nonces make them
//! reproducible.

use ark_protocol::config::{Network, NetworkInfo, NetworkTable};
use ark_protocol::crypto::{double_sha256, ArkKeypair, KeyError};
use ark_protocol::identity::{
    decode_address, generate_passphrase, passphrase_to_entropy, validate_address,
};
use ark_protocol::transaction::{
    assign_id, encode, sign_as_co_signer, sign_as_owner, sign_transfer, verify_transaction,
    SigningState, Transaction, TransactionBuilder, TransactionError,
};

const OWNER_PASSPHRASE: &str = "this is a top secret passphrase";
const SECOND_PASSPHRASE: &str = "second secret passphrase";
const RECIPIENT: &str = "DE8WweX5L4p4Rq1KPprB7FhiKN3Y33UZHS";

const OWNER_SIGNATURE: &str = "304402201d975d12bbe7d099a1fd280b8667012065db6e0526228b4a93bbb1b93174ba6802204088dceb6ed98e7eb66ea193c497c41518cf8d378b8a5989cc0b96ead50bef95";
const SECOND_SIGNATURE: &str = "3044022011662ba821ce7f4a18c2d15f012b26032287d7a409a9af28dc4e439e2bddfd05022035ea89cfefe74821765b9ebf549f334482b1c41e0534b58cdf558e5ee1658183";
const OWNER_ONLY_ID: &str = "b7ac139c885805e74824b83d608edb14286b5c6f1adcac3949ac9127a3c0e268";
const CO_SIGNED_ID: &str = "4e234db6372dafbe621c51df8d3d0b5972cc984ffe3c0d1d64a273b31400eda4";

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

fn owner() -> ArkKeypair {
    ArkKeypair::from_passphrase(OWNER_PASSPHRASE).expect("owner key")
}

fn second() -> ArkKeypair {
    ArkKeypair::from_passphrase(SECOND_PASSPHRASE).expect("second key")
}

fn reference_transfer() -> Transaction {
    TransactionBuilder::transfer()
        .sender(&owner())
        .recipient(RECIPIENT)
        .amount(100_000_000)
        .fee(10_000_000)
        .timestamp(100)
        .build()
}

// ---------------------------------------------------------------------------
// Golden vectors
// ---------------------------------------------------------------------------

#[test]
fn golden_keys_and_addresses() {
    let devnet = NetworkInfo::for_network(Network::Devnet);
    let mainnet = NetworkInfo::for_network(Network::Mainnet);

    assert_eq!(
        owner().public_key_hex(),
        "034151a3ec46b5670a682b0a63394f863587d1bc97483b1b6c70eb58e7f0aed192"
    );
    assert_eq!(owner().address(devnet.version), "D61mfSggzbvQgTUe6JhYKH2doHaqJ3Dyib");
    assert_eq!(owner().address(mainnet.version), "AGeYmgbg2LgGxRW2vNNJvQ88PknEJsYizC");

    // The reference recipient is the devnet address of the second key.
    assert_eq!(second().address(devnet.version), RECIPIENT);
    assert_eq!(
        hex::encode(decode_address(RECIPIENT).unwrap()),
        "1e629d163fbf6cb6fb17afd452a76ed0ad9af0b4ed"
    );
}

#[test]
fn golden_owner_only_transfer() {
    let mut tx = reference_transfer();
    let id = sign_transfer(&mut tx, &owner(), None).unwrap();

    assert_eq!(tx.signature().unwrap().to_hex(), OWNER_SIGNATURE);
    assert!(tx.second_signature().is_none());
    assert_eq!(id, OWNER_ONLY_ID);
}

#[test]
fn golden_co_signed_transfer() {
    let mut tx = reference_transfer();

    sign_as_owner(&mut tx, &owner()).unwrap();
    assert_eq!(tx.state(), SigningState::OwnerSigned);
    sign_as_co_signer(&mut tx, &second()).unwrap();
    assert_eq!(tx.state(), SigningState::CoSigned);
    let id = assign_id(&mut tx).unwrap().to_string();
    assert_eq!(tx.state(), SigningState::Identified);

    assert_eq!(tx.signature().unwrap().to_hex(), OWNER_SIGNATURE);
    assert_eq!(tx.second_signature().unwrap().to_hex(), SECOND_SIGNATURE);
    assert_eq!(id, CO_SIGNED_ID);
}

#[test]
fn golden_vendor_field_transfer() {
    let mut tx = TransactionBuilder::transfer()
        .sender(&owner())
        .recipient(RECIPIENT)
        .amount(100_000_000)
        .fee(10_000_000)
        .vendor_field("hello")
        .timestamp(100)
        .build();

    let id = sign_transfer(&mut tx, &owner(), None).unwrap();
    assert_eq!(
        id,
        "bb5bcc08dd9790125d54f79bcc62d1b82821b0805067626f0e861062c59d30fe"
    );
}

// ---------------------------------------------------------------------------
// Wallet round trip
// ---------------------------------------------------------------------------

#[test]
fn fresh_wallet_sends_and_receiver_verifies() {
    let devnet = NetworkInfo::for_network(Network::Devnet);

    let passphrase = generate_passphrase().unwrap();
    assert!(passphrase_to_entropy(&passphrase.to_string()).is_ok());
    let sender = passphrase.to_keypair().unwrap();
    let sender_address = sender.address(devnet.version);
    assert!(validate_address(&sender_address, devnet.version));

    let mut tx = TransactionBuilder::transfer()
        .sender(&sender)
        .recipient(RECIPIENT)
        .amount(5)
        .fee(1)
        .timestamp_now(&devnet)
        .build();
    let id = sign_transfer(&mut tx, &sender, None).unwrap();

    let wire = serde_json::to_string(&tx).unwrap();
    let received: Transaction = serde_json::from_str(&wire).unwrap();
    assert_eq!(received.id(), Some(id.as_str()));
    verify_transaction(&received, None).unwrap();
}

#[test]
fn co_signed_json_round_trip_verifies() {
    let mut tx = reference_transfer();
    sign_transfer(&mut tx, &owner(), Some(&second())).unwrap();

    let json = serde_json::to_value(&tx).unwrap();
    assert_eq!(json["signature"], OWNER_SIGNATURE);
    assert_eq!(json["signSignature"], SECOND_SIGNATURE);
    assert_eq!(json["id"], CO_SIGNED_ID);

    let received: Transaction = serde_json::from_value(json).unwrap();
    verify_transaction(&received, Some(&second().public_key())).unwrap();
}

#[test]
fn tampering_after_identification_is_detected() {
    let mut tx = reference_transfer();
    sign_transfer(&mut tx, &owner(), None).unwrap();

    let mut tampered = tx.clone();
    tampered.recipient_id = owner().address(0x1e);
    assert!(matches!(
        verify_transaction(&tampered, None),
        Err(TransactionError::InvalidSignature(_))
    ));
    assert!(matches!(
        assign_id(&mut tampered),
        Err(TransactionError::InvalidStateTransition { .. })
    ));
}

#[test]
fn signatures_extend_the_encoding() {
    let mut tx = reference_transfer();
    let unsigned = encode(&tx, false, false).unwrap();
    sign_transfer(&mut tx, &owner(), Some(&second())).unwrap();

    let full = encode(&tx, true, true).unwrap();
    let owner_len = tx.signature().unwrap().len();
    let second_len = tx.second_signature().unwrap().len();

    assert_eq!(full.len(), unsigned.len() + owner_len + second_len);
    assert_eq!(&full[..unsigned.len()], &unsigned[..]);
    assert_eq!(
        &full[unsigned.len()..unsigned.len() + owner_len],
        tx.signature().unwrap().as_bytes()
    );
    assert_eq!(
        &full[unsigned.len() + owner_len..],
        tx.second_signature().unwrap().as_bytes()
    );
}

// ---------------------------------------------------------------------------
// Edge cases
// ---------------------------------------------------------------------------

#[test]
fn seed_outside_curve_order_is_rejected() {
    let order = hex::decode("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141")
        .unwrap();
    let order: [u8; 32] = order.try_into().unwrap();

    assert_eq!(ArkKeypair::from_digest(order).unwrap_err(), KeyError::InvalidSeed);
    assert_eq!(ArkKeypair::from_digest([0u8; 32]).unwrap_err(), KeyError::InvalidSeed);
}

#[test]
fn double_sha256_known_values() {
    assert_eq!(
        hex::encode(double_sha256(b"")),
        "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
    );
    assert_eq!(
        hex::encode(double_sha256(b"abc")),
        "4f8b42c22dd3729b519ba6f68d2da7cc5b2d606d05daed5ad5128cc03e6c6358"
    );
}

#[test]
fn custom_network_table_drives_addresses() {
    let table = NetworkTable::from_json(
        r#"{"localnet": {"name": "localnet", "version": 30, "wif": 170,
            "nethash": "00", "epoch": "2017-03-21T13:00:00Z", "port": 4000}}"#,
    )
    .unwrap();
    let local = table.get_by_name("localnet").unwrap();
    assert_eq!(owner().address(local.version), "D61mfSggzbvQgTUe6JhYKH2doHaqJ3Dyib");
}
