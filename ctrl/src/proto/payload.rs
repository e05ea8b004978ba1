// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Payload envelope.
//!
//! ```text
//! struct ctrl_payload_t {
//!     uint16_t proto_id;   // ProtoId, little-endian
//!     uint16_t reserved;   // Must be 0
//!     uint32_t body_len;   // Bytes that follow, little-endian
//!     uint8_t  body[];
//! }
//! ```
//!
//! The envelope copies bodies verbatim. A certificate chain inside it is
//! not decoded until the receiver asks for it.

extern crate alloc;

use alloc::vec::Vec;

use super::{CtrlPayload, ProtoId};
use crate::cert_mgmt::ChainRep;
use crate::error::{Error, Result};

/// Size of the fixed envelope header
pub const HEADER_SIZE: usize = 8;

/// Registered payload types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Payload {
    CertChainRep(ChainRep),
}

impl Payload {
    pub fn proto_id(&self) -> ProtoId {
        match self {
            Payload::CertChainRep(rep) => rep.proto_id(),
        }
    }

    /// Header followed by the body.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut body = Vec::new();
        match self {
            Payload::CertChainRep(rep) => rep.encode_body(&mut body),
        }
        let body_len = u32::try_from(body.len()).map_err(|_| Error::BodyTooLarge(body.len()))?;

        let mut bytes = Vec::with_capacity(HEADER_SIZE + body.len());
        bytes.extend_from_slice(&self.proto_id().as_u16().to_le_bytes());
        bytes.extend_from_slice(&0u16.to_le_bytes());
        bytes.extend_from_slice(&body_len.to_le_bytes());
        bytes.extend_from_slice(&body);
        Ok(bytes)
    }

    /// Parse the header and hand the body to the payload type it names.
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(Error::Truncated {
                needed: HEADER_SIZE,
                available: data.len(),
            });
        }

        let proto_id = u16::from_le_bytes([data[0], data[1]]);

        let reserved = u16::from_le_bytes([data[2], data[3]]);
        if reserved != 0 {
            return Err(Error::ReservedNonZero(reserved));
        }

        let declared = u32::from_le_bytes([data[4], data[5], data[6], data[7]]) as usize;
        let body = &data[HEADER_SIZE..];
        if declared != body.len() {
            return Err(Error::LengthMismatch {
                declared,
                actual: body.len(),
            });
        }

        log::trace!(
            "Payload::decode: proto_id={:#06x}, body_len={}",
            proto_id,
            declared
        );

        match ProtoId::from_u16(proto_id) {
            Some(ProtoId::CertChainRep) => Ok(Payload::CertChainRep(ChainRep::decode_body(body)?)),
            None => Err(Error::UnknownProtoId(proto_id)),
        }
    }
}

impl From<ChainRep> for Payload {
    fn from(rep: ChainRep) -> Self {
        Payload::CertChainRep(rep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_header_serialization() {
        let payload = Payload::from(ChainRep::new(vec![0xAA, 0xBB, 0xCC]));
        let bytes = payload.encode().unwrap();

        assert_eq!(bytes.len(), HEADER_SIZE + 3);
        assert_eq!(&bytes[0..2], &[0x02, 0x0C]); // proto_id
        assert_eq!(&bytes[2..4], &[0x00, 0x00]); // reserved
        assert_eq!(&bytes[4..8], &[0x03, 0x00, 0x00, 0x00]); // body_len
        assert_eq!(&bytes[8..], &[0xAA, 0xBB, 0xCC]);
    }

    #[test]
    fn test_header_parsing() {
        let data = [0x02, 0x0C, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x30, 0x00];
        let payload = Payload::decode(&data).unwrap();
        assert_eq!(payload.proto_id(), ProtoId::CertChainRep);
        match payload {
            Payload::CertChainRep(rep) => assert_eq!(rep.raw(), &[0x30, 0x00]),
        }
    }

    #[test]
    fn test_empty_body() {
        let payload = Payload::from(ChainRep::new(Vec::new()));
        let bytes = payload.encode().unwrap();
        assert_eq!(bytes.len(), HEADER_SIZE);
        assert_eq!(Payload::decode(&bytes).unwrap(), payload);
    }

    #[test]
    fn test_header_parsing_truncated() {
        let result = Payload::decode(&[0x02, 0x0C, 0x00]);
        assert_eq!(
            result,
            Err(Error::Truncated {
                needed: HEADER_SIZE,
                available: 3
            })
        );
    }

    #[test]
    fn test_header_parsing_invalid_reserved() {
        let data = [0x02, 0x0C, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00];
        assert_eq!(Payload::decode(&data), Err(Error::ReservedNonZero(1)));
    }

    #[test]
    fn test_header_parsing_length_mismatch() {
        let data = [0x02, 0x0C, 0x00, 0x00, 0x05, 0x00, 0x00, 0x00, 0x30];
        assert_eq!(
            Payload::decode(&data),
            Err(Error::LengthMismatch {
                declared: 5,
                actual: 1
            })
        );
    }

    #[test]
    fn test_unknown_proto_id() {
        let data = [0xEF, 0xBE, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        assert_eq!(Payload::decode(&data), Err(Error::UnknownProtoId(0xBEEF)));
    }
}
