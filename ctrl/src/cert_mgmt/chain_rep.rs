// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Wire representation of a certificate chain.
//!
//! A [`ChainRep`] holds the exact encoded chain bytes and nothing else.
//! Construction never inspects them; decoding happens on every call to
//! [`ChainRep::chain`], so a caller that needs the chain repeatedly should
//! keep the returned value.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use cert_chain::{
    decode_chain, decode_chain_with_backend, CertificateChain, CryptoBackend, DecodeMode,
    ValidationOptions,
};

use crate::error::{Error, Result};
use crate::proto::{CtrlPayload, ProtoId};

/// Prefix of the diagnostic text written for a chain that fails to decode.
pub const INVALID_CHAIN_MARKER: &str = "Invalid certificate chain";

/// Serialized certificate chain: DER certificates, leaf first, concatenated.
///
/// Equality and hashing are byte-for-byte over the stored encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ChainRep {
    raw: Vec<u8>,
}

impl ChainRep {
    /// Wrap received bytes as they are.
    pub fn new(raw: impl Into<Vec<u8>>) -> Self {
        Self { raw: raw.into() }
    }

    /// Encode a local chain for sending.
    pub fn from_chain(chain: &CertificateChain) -> Result<Self> {
        let raw = chain.to_der().map_err(Error::ChainEncode)?;
        Ok(Self { raw })
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.raw
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Decode and fully validate the chain.
    pub fn chain(&self) -> Result<CertificateChain> {
        self.chain_with(DecodeMode::Full)
    }

    /// Decode with an explicit mode. [`DecodeMode::Structural`] suits
    /// logging chains that are not trusted.
    pub fn chain_with(&self, mode: DecodeMode) -> Result<CertificateChain> {
        decode_chain(&self.raw, mode).map_err(Error::ChainDecode)
    }

    pub fn chain_with_backend<B: CryptoBackend + ?Sized>(
        &self,
        mode: DecodeMode,
        options: &ValidationOptions,
        backend: &B,
    ) -> Result<CertificateChain> {
        decode_chain_with_backend(&self.raw, mode, options, backend).map_err(Error::ChainDecode)
    }
}

impl CtrlPayload for ChainRep {
    const PROTO_ID: ProtoId = ProtoId::CertChainRep;

    fn encode_body(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.raw);
    }

    fn decode_body(body: &[u8]) -> Result<Self> {
        Ok(Self::new(body))
    }
}

/// Diagnostic text only; a successful format says nothing about validity.
impl fmt::Display for ChainRep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.chain() {
            Ok(chain) => write!(f, "{}", chain),
            Err(err) => {
                log::debug!("ChainRep: {} bytes failed to decode: {}", self.raw.len(), err);
                write!(f, "{}: {}", INVALID_CHAIN_MARKER, err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use cert_chain::error::{ChainError, ParseError, SignatureError, TimeError};
    use cert_chain::{test_utils, RingBackend, Validation};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn valid_rep() -> (CertificateChain, ChainRep) {
        let chain = test_utils::valid_chain();
        let rep = ChainRep::from_chain(&chain).unwrap();
        (chain, rep)
    }

    #[test]
    fn test_round_trip() {
        init_logger();
        let (chain, rep) = valid_rep();
        assert_eq!(rep.raw(), &chain.to_der().unwrap()[..]);

        let decoded = rep.chain();
        assert!(decoded.is_ok(), "Decode failed: {:?}", decoded.err());
        let decoded = decoded.unwrap();
        assert_eq!(decoded, chain);
        assert_eq!(decoded.validation(), Validation::Full);
    }

    #[test]
    fn test_construction_stores_bytes_verbatim() {
        let bytes = vec![0xDE, 0xAD, 0xBE, 0xEF];
        let rep = ChainRep::new(bytes.clone());
        assert_eq!(rep.raw(), &bytes[..]);
        assert_eq!(rep.len(), 4);
        assert!(!rep.is_empty());
        assert_eq!(rep.into_raw(), bytes);
    }

    #[test]
    fn test_equality_is_bytewise() {
        let (_, rep) = valid_rep();
        assert_eq!(rep, ChainRep::new(rep.raw().to_vec()));

        let mut other = rep.raw().to_vec();
        let last = other.len() - 1;
        other[last] ^= 0x01;
        assert_ne!(rep, ChainRep::new(other));
    }

    #[test]
    fn test_from_empty_chain_fails() {
        let empty = CertificateChain::new(Vec::new());
        assert_eq!(
            ChainRep::from_chain(&empty),
            Err(Error::ChainEncode(cert_chain::Error::Chain(ChainError::Empty)))
        );
    }

    #[test]
    fn test_decode_empty() {
        init_logger();
        let rep = ChainRep::new(Vec::new());
        assert!(rep.is_empty());
        assert_eq!(
            rep.chain(),
            Err(Error::ChainDecode(cert_chain::Error::Chain(ChainError::Empty)))
        );

        let text = rep.to_string();
        assert!(text.starts_with(INVALID_CHAIN_MARKER), "{}", text);
    }

    #[test]
    fn test_decode_structural_corruption() {
        let (_, rep) = valid_rep();
        let mut bytes = rep.into_raw();
        bytes[0] ^= 0xFF;
        let rep = ChainRep::new(bytes);

        match rep.chain() {
            Err(Error::ChainDecode(inner)) => assert!(inner.is_structural(), "{:?}", inner),
            other => panic!("expected a decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_is_idempotent() {
        let (_, rep) = valid_rep();
        let first = rep.chain().unwrap();
        let second = rep.chain().unwrap();
        assert_eq!(first, second);

        let garbage = ChainRep::new(&b"garbage"[..]);
        assert_eq!(garbage.chain(), garbage.chain());
    }

    #[test]
    fn test_structural_mode_accepts_bad_signature() {
        let (_, rep) = valid_rep();
        let mut bytes = rep.into_raw();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        let rep = ChainRep::new(bytes);

        let structural = rep.chain_with(DecodeMode::Structural);
        assert!(structural.is_ok(), "Structural failed: {:?}", structural.err());
        assert_eq!(structural.unwrap().validation(), Validation::Structural);

        assert_eq!(
            rep.chain(),
            Err(Error::ChainDecode(cert_chain::Error::Signature(
                SignatureError::VerificationFailed
            )))
        );
    }

    #[test]
    fn test_signature_padding_bits_fail_decode() {
        let (chain, rep) = valid_rep();
        let leaf = &chain.certificates()[0];
        // BIT STRING unused-bits octet sits right before the signature octets
        let pos = leaf.to_der().len() - leaf.signature_bytes().len() - 1;

        for bits in 1u8..=7 {
            let mut bytes = rep.raw().to_vec();
            assert_eq!(bytes[pos], 0x00);
            bytes[pos] = bits;
            let padded = ChainRep::new(bytes);

            for mode in [DecodeMode::Full, DecodeMode::Structural] {
                assert!(
                    matches!(
                        padded.chain_with(mode),
                        Err(Error::ChainDecode(cert_chain::Error::Parse(
                            ParseError::InvalidCertificate { index: 0, .. }
                        )))
                    ),
                    "unused bits {} accepted in {:?} mode",
                    bits,
                    mode
                );
            }
        }
    }

    #[test]
    fn test_structural_mode_accepts_expired_chain() {
        let rep = ChainRep::from_chain(&test_utils::expired_chain()).unwrap();
        assert!(rep.chain_with(DecodeMode::Structural).is_ok());

        if ValidationOptions::default().check_time {
            assert_eq!(
                rep.chain(),
                Err(Error::ChainDecode(cert_chain::Error::Time(
                    TimeError::Expired
                )))
            );
        }

        let options = ValidationOptions::new().skip_time_validation();
        let result = rep.chain_with_backend(DecodeMode::Full, &options, &RingBackend);
        assert!(result.is_ok(), "Decode failed: {:?}", result.err());
    }

    #[test]
    fn test_diagnostic_string_valid() {
        let (_, rep) = valid_rep();
        let expected = rep.chain().unwrap().to_string();
        assert_eq!(rep.to_string(), expected);
        assert!(!rep.to_string().contains(INVALID_CHAIN_MARKER));
    }

    #[test]
    fn test_diagnostic_string_garbage() {
        for raw in [
            &b""[..],
            &b"\x00"[..],
            &b"garbage bytes"[..],
            &[0x30, 0x84, 0xFF, 0xFF, 0xFF, 0xFF][..],
            &[0x30, 0x03, 0x02, 0x01, 0x00][..],
        ] {
            let rep = ChainRep::new(raw);
            let err = rep.chain().unwrap_err();
            let text = rep.to_string();
            assert!(text.starts_with(INVALID_CHAIN_MARKER), "{}", text);
            assert!(text.ends_with(&err.to_string()), "{}", text);
        }
    }

    #[test]
    fn test_proto_id_is_stable() {
        let (_, valid) = valid_rep();
        let empty = ChainRep::new(Vec::new());
        assert_eq!(ChainRep::PROTO_ID, ProtoId::CertChainRep);
        assert_eq!(valid.proto_id(), ProtoId::CertChainRep);
        assert_eq!(empty.proto_id(), valid.proto_id());
        assert_eq!(valid.proto_id(), valid.proto_id());
    }

    #[test]
    fn test_body_is_raw() {
        let (_, rep) = valid_rep();
        let mut body = Vec::new();
        rep.encode_body(&mut body);
        assert_eq!(body, rep.raw());
        assert_eq!(ChainRep::decode_body(&body).unwrap(), rep);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_concurrent_access() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ChainRep>();

        let (chain, rep) = valid_rep();
        let expected_text = rep.to_string();

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| (rep.chain(), rep.to_string(), rep.proto_id())))
                .collect();
            for handle in handles {
                let (decoded, text, id) = handle.join().unwrap();
                assert_eq!(decoded.unwrap(), chain);
                assert_eq!(text, expected_text);
                assert_eq!(id, ProtoId::CertChainRep);
            }
        });
    }
}
