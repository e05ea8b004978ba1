// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Receive → dispatch → decode, the way a control-plane peer handles a
//! certificate chain payload.

use cert_chain::{test_utils, DecodeMode, Validation};
use ctrl::{ChainRep, CtrlPayload, Error, Payload, ProtoId, INVALID_CHAIN_MARKER};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn receive(bytes: &[u8]) -> ChainRep {
    match Payload::decode(bytes) {
        Ok(Payload::CertChainRep(rep)) => rep,
        Ok(other) => panic!("unexpected payload {:?}", other.proto_id()),
        Err(e) => panic!("envelope rejected: {}", e),
    }
}

#[test]
fn test_send_receive_decode() {
    init_logger();
    let chain = test_utils::valid_chain();
    let sent = ChainRep::from_chain(&chain).unwrap();
    let wire = Payload::from(sent.clone()).encode().unwrap();

    let received = receive(&wire);
    assert_eq!(received, sent);
    assert_eq!(received.proto_id(), ProtoId::CertChainRep);

    let decoded = received.chain();
    assert!(decoded.is_ok(), "Decode failed: {:?}", decoded.err());
    let decoded = decoded.unwrap();
    assert_eq!(decoded, chain);
    assert_eq!(decoded.validation(), Validation::Full);
    assert_eq!(received.to_string(), decoded.to_string());
}

#[test]
fn test_dispatch_defers_decoding() {
    init_logger();
    let garbage = ChainRep::new(&b"\x30\x01not a certificate"[..]);
    let wire = Payload::from(garbage.clone()).encode().unwrap();

    // Dispatch succeeds; only the explicit decode fails.
    let received = receive(&wire);
    assert_eq!(received, garbage);
    assert!(matches!(received.chain(), Err(Error::ChainDecode(_))));
    assert!(received.to_string().starts_with(INVALID_CHAIN_MARKER));
}

#[test]
fn test_forward_without_decoding() {
    let chain = test_utils::valid_chain();
    let wire = Payload::from(ChainRep::from_chain(&chain).unwrap())
        .encode()
        .unwrap();

    let forwarded = Payload::CertChainRep(receive(&wire)).encode().unwrap();
    assert_eq!(forwarded, wire);
}

#[test]
fn test_structural_decode_for_logging() {
    let chain = test_utils::expired_chain();
    let wire = Payload::from(ChainRep::from_chain(&chain).unwrap())
        .encode()
        .unwrap();

    let received = receive(&wire);
    let logged = received.chain_with(DecodeMode::Structural).unwrap();
    assert_eq!(logged.validation(), Validation::Structural);
    assert_eq!(logged.len(), 3);
}

#[test]
fn test_envelope_rejections() {
    let wire = Payload::from(ChainRep::new(vec![0x30, 0x00])).encode().unwrap();

    assert!(matches!(
        Payload::decode(&wire[..4]),
        Err(Error::Truncated { .. })
    ));
    assert!(matches!(
        Payload::decode(&wire[..wire.len() - 1]),
        Err(Error::LengthMismatch {
            declared: 2,
            actual: 1
        })
    ));

    let mut reserved = wire.clone();
    reserved[3] = 0x80;
    assert_eq!(Payload::decode(&reserved), Err(Error::ReservedNonZero(0x8000)));

    let mut unknown = wire.clone();
    unknown[0] = 0x03;
    assert_eq!(Payload::decode(&unknown), Err(Error::UnknownProtoId(0x0C03)));
}
