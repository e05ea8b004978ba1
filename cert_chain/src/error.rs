// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Error types for certificate chain decoding and validation.
//!
//! Every failure names the check that rejected the chain, so a caller (or a
//! log line) can tell a truncated buffer from an expired certificate or a bad
//! signature.

extern crate alloc;

use alloc::string::{String, ToString};
use core::fmt;

/// Result type alias for chain operations
pub type Result<T> = core::result::Result<T, Error>;

/// Error type for chain decoding and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The bytes are not a well-formed DER certificate sequence
    Parse(ParseError),

    /// A certificate signature did not verify
    Signature(SignatureError),

    /// Validity period checks failed
    Time(TimeError),

    /// An algorithm is unknown or unsupported by the backend
    Algorithm(AlgorithmError),

    /// Extension checks failed
    Extension(ExtensionError),

    /// Issuer linking or chain shape checks failed
    Chain(ChainError),

    /// PEM/DER conversion failed
    Encoding(EncodingError),

    /// Key usage or basic constraints do not allow the certificate's role
    Constraint(ConstraintError),

    /// Internal error (should not occur in normal operation)
    Internal(String),
}

/// DER structure errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input ended before a complete element was read
    UnexpectedEof,

    /// An element started with the wrong tag byte
    InvalidTag { expected: u8, found: u8 },

    /// A length field is malformed or out of range
    InvalidLength(String),

    /// A certificate element could not be decoded
    InvalidCertificate { index: usize, reason: String },

    /// Error reported by the `der` crate
    Der(String),

    /// The signature BIT STRING declares unused trailing bits
    SignatureUnusedBits(u8),
}

/// Signature verification errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    /// The signature does not verify under the issuer key
    VerificationFailed,

    /// `signatureAlgorithm` differs from the TBS `signature` field
    AlgorithmMismatch { cert_algo: String, tbs_algo: String },

    /// The crypto backend rejected the key or input
    Backend(String),
}

/// Validity period errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// notBefore is in the future
    NotYetValid,

    /// notAfter is in the past
    Expired,

    /// notAfter is before notBefore
    InvalidValidityPeriod {
        not_before: String,
        not_after: String,
    },

    /// No wall clock is available on this target
    ClockUnavailable,
}

/// Algorithm errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlgorithmError {
    /// Algorithm not supported
    Unsupported(String),
}

/// Extension errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionError {
    /// A critical extension this validator does not understand
    UnknownCritical(String),

    /// The same extension appears twice
    Duplicate(String),

    /// Basic Constraints is inconsistent
    BasicConstraints(String),

    /// An extension value does not decode
    InvalidEncoding(String),
}

/// Chain shape and linking errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// No certificates at all
    Empty,

    /// More than `max` certificates
    TooLong { max: usize },

    /// The issuer of the certificate at `depth` is not the subject of the next one
    IssuerMismatch { depth: usize },

    /// The certificate at `depth` issues another but is not a CA
    IssuerNotCa { depth: usize },

    /// A pathLenConstraint is exceeded at `depth`
    PathLengthExceeded { depth: usize },

    /// The last certificate, at `depth`, names an issuer other than itself
    AnchorNotSelfIssued { depth: usize },
}

/// PEM errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// Malformed PEM
    InvalidPem(String),

    /// PEM label other than `CERTIFICATE`
    WrongPemLabel(String),

    /// DER encoding of an in-memory structure failed
    Der(String),
}

/// Role constraint errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintError {
    /// Key Usage present without keyCertSign on a certificate acting as issuer
    MissingKeyCertSign { depth: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(e) => write!(f, "Parse error: {}", e),
            Error::Signature(e) => write!(f, "Signature error: {}", e),
            Error::Time(e) => write!(f, "Time validation error: {}", e),
            Error::Algorithm(e) => write!(f, "Algorithm error: {}", e),
            Error::Extension(e) => write!(f, "Extension error: {}", e),
            Error::Chain(e) => write!(f, "Chain validation error: {}", e),
            Error::Encoding(e) => write!(f, "Encoding error: {}", e),
            Error::Constraint(e) => write!(f, "Constraint violation: {}", e),
            Error::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedEof => write!(f, "Unexpected end of input"),
            ParseError::InvalidTag { expected, found } => write!(
                f,
                "Invalid tag: expected 0x{:02x}, found 0x{:02x}",
                expected, found
            ),
            ParseError::InvalidLength(msg) => write!(f, "Invalid length: {}", msg),
            ParseError::InvalidCertificate { index, reason } => {
                write!(f, "Certificate {} is malformed: {}", index, reason)
            }
            ParseError::Der(msg) => write!(f, "DER error: {}", msg),
            ParseError::SignatureUnusedBits(bits) => {
                write!(f, "Signature BIT STRING has {} unused bits", bits)
            }
        }
    }
}

impl fmt::Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureError::VerificationFailed => write!(f, "Signature verification failed"),
            SignatureError::AlgorithmMismatch {
                cert_algo,
                tbs_algo,
            } => write!(
                f,
                "Signature algorithm mismatch: cert={}, tbs={}",
                cert_algo, tbs_algo
            ),
            SignatureError::Backend(msg) => write!(f, "Cryptographic error: {}", msg),
        }
    }
}

impl fmt::Display for TimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeError::NotYetValid => write!(f, "Certificate not yet valid"),
            TimeError::Expired => write!(f, "Certificate has expired"),
            TimeError::InvalidValidityPeriod {
                not_before,
                not_after,
            } => write!(
                f,
                "Invalid validity period: notBefore={}, notAfter={}",
                not_before, not_after
            ),
            TimeError::ClockUnavailable => write!(f, "No clock available"),
        }
    }
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgorithmError::Unsupported(algo) => write!(f, "Unsupported algorithm: {}", algo),
        }
    }
}

impl fmt::Display for ExtensionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtensionError::UnknownCritical(oid) => {
                write!(f, "Unknown critical extension: {}", oid)
            }
            ExtensionError::Duplicate(oid) => write!(f, "Duplicate extension: {}", oid),
            ExtensionError::BasicConstraints(msg) => {
                write!(f, "Basic Constraints error: {}", msg)
            }
            ExtensionError::InvalidEncoding(msg) => {
                write!(f, "Invalid extension encoding: {}", msg)
            }
        }
    }
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainError::Empty => write!(f, "Certificate chain is empty"),
            ChainError::TooLong { max } => {
                write!(f, "Certificate chain exceeds {} certificates", max)
            }
            ChainError::IssuerMismatch { depth } => {
                write!(f, "Issuer name mismatch at depth {}", depth)
            }
            ChainError::IssuerNotCa { depth } => {
                write!(f, "Issuer at depth {} is not a CA certificate", depth)
            }
            ChainError::PathLengthExceeded { depth } => {
                write!(f, "Path length constraint exceeded at depth {}", depth)
            }
            ChainError::AnchorNotSelfIssued { depth } => {
                write!(f, "Trust anchor at depth {} is not self-issued", depth)
            }
        }
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingError::InvalidPem(msg) => write!(f, "Invalid PEM: {}", msg),
            EncodingError::WrongPemLabel(label) => {
                write!(f, "Invalid PEM label: expected 'CERTIFICATE', found '{}'", label)
            }
            EncodingError::Der(msg) => write!(f, "DER encoding failed: {}", msg),
        }
    }
}

impl fmt::Display for ConstraintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintError::MissingKeyCertSign { depth } => write!(
                f,
                "Issuer at depth {} does not assert keyCertSign in Key Usage",
                depth
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<der::Error> for Error {
    fn from(err: der::Error) -> Self {
        Error::Parse(ParseError::Der(err.to_string()))
    }
}

#[cfg(feature = "ring-backend")]
impl From<ring::error::KeyRejected> for Error {
    fn from(err: ring::error::KeyRejected) -> Self {
        Error::Signature(SignatureError::Backend(err.to_string()))
    }
}

impl From<pem_rfc7468::Error> for Error {
    fn from(err: pem_rfc7468::Error) -> Self {
        Error::Encoding(EncodingError::InvalidPem(err.to_string()))
    }
}

impl Error {
    /// Wrap a `der` failure that happened while encoding, not parsing.
    pub fn encoding(err: der::Error) -> Self {
        Error::Encoding(EncodingError::Der(err.to_string()))
    }

    /// Create a signature verification failure
    pub fn signature_failed() -> Self {
        Error::Signature(SignatureError::VerificationFailed)
    }

    /// Create an unsupported algorithm error
    pub fn unsupported_algorithm<S: Into<String>>(algo: S) -> Self {
        Error::Algorithm(AlgorithmError::Unsupported(algo.into()))
    }

    /// Create a certificate expired error
    pub fn expired() -> Self {
        Error::Time(TimeError::Expired)
    }

    /// True when the bytes themselves are malformed, as opposed to a
    /// well-formed chain that failed a validation check.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::Parse(_)
                | Error::Chain(ChainError::Empty)
                | Error::Chain(ChainError::TooLong { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::signature_failed();
        assert_eq!(
            err.to_string(),
            "Signature error: Signature verification failed"
        );

        let err = Error::expired();
        assert!(err.to_string().contains("expired"));

        let err = Error::Chain(ChainError::IssuerMismatch { depth: 1 });
        assert_eq!(
            err.to_string(),
            "Chain validation error: Issuer name mismatch at depth 1"
        );
    }

    #[test]
    fn test_der_error_conversion() {
        let der_err = der::Error::new(der::ErrorKind::Failed, der::Length::ZERO);
        let err: Error = der_err.into();
        assert!(matches!(err, Error::Parse(ParseError::Der(_))));
        assert!(err.is_structural());
    }

    #[test]
    fn test_structural_classification() {
        assert!(Error::Chain(ChainError::Empty).is_structural());
        assert!(Error::Parse(ParseError::UnexpectedEof).is_structural());
        assert!(!Error::expired().is_structural());
        assert!(!Error::signature_failed().is_structural());
        assert!(!Error::Chain(ChainError::IssuerNotCa { depth: 1 }).is_structural());
        assert!(Error::Parse(ParseError::SignatureUnusedBits(3)).is_structural());
        assert!(!Error::Chain(ChainError::AnchorNotSelfIssued { depth: 2 }).is_structural());
    }
}
