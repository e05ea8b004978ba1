// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Error types for control payloads.

use core::fmt;

/// Result type for control payload operations
pub type Result<T> = core::result::Result<T, Error>;

/// Control payload errors.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A carried certificate chain failed to decode or validate
    ChainDecode(cert_chain::Error),

    /// A local certificate chain could not be encoded
    ChainEncode(cert_chain::Error),

    /// Envelope shorter than its fixed header
    Truncated { needed: usize, available: usize },

    /// Envelope reserved field is not zero
    ReservedNonZero(u16),

    /// Envelope body length disagrees with the bytes that follow the header
    LengthMismatch { declared: usize, actual: usize },

    /// No payload type is registered for this identifier
    UnknownProtoId(u16),

    /// Body does not fit the 32-bit length field
    BodyTooLarge(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ChainDecode(e) => write!(f, "Chain decode error: {}", e),
            Error::ChainEncode(e) => write!(f, "Chain encode error: {}", e),
            Error::Truncated { needed, available } => write!(
                f,
                "Envelope truncated: need {} bytes, got {}",
                needed, available
            ),
            Error::ReservedNonZero(value) => {
                write!(f, "Envelope reserved field must be 0, got {:#06x}", value)
            }
            Error::LengthMismatch { declared, actual } => write!(
                f,
                "Envelope body length mismatch: declared {}, actual {}",
                declared, actual
            ),
            Error::UnknownProtoId(id) => write!(f, "Unknown protocol type identifier {:#06x}", id),
            Error::BodyTooLarge(len) => write!(f, "Payload body too large: {} bytes", len),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ChainDecode(e) | Error::ChainEncode(e) => Some(e),
            _ => None,
        }
    }
}
