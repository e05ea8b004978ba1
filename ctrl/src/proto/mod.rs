// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Protocol type identifiers and the payload envelope.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use crate::error::Result;

mod payload;
pub use payload::*;

/// Protocol type identifiers.
///
/// Every peer must agree on these values; changing a discriminant breaks
/// the wire format.
#[repr(u16)]
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtoId {
    /// Serialized certificate chain ([`crate::ChainRep`])
    CertChainRep = 0x0C02,
}

impl ProtoId {
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Look up a registered identifier.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x0C02 => Some(ProtoId::CertChainRep),
            _ => None,
        }
    }
}

impl fmt::Display for ProtoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtoId::CertChainRep => write!(f, "CertChainRep ({:#06x})", self.as_u16()),
        }
    }
}

/// A payload type that can ride in a [`Payload`] envelope.
pub trait CtrlPayload: Sized {
    /// Identifier written into the envelope header
    const PROTO_ID: ProtoId;

    fn proto_id(&self) -> ProtoId {
        Self::PROTO_ID
    }

    /// Append the body bytes to `out`.
    fn encode_body(&self, out: &mut Vec<u8>);

    /// Rebuild the payload from its body bytes.
    fn decode_body(body: &[u8]) -> Result<Self>;
}
