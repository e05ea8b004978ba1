// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate chain types.
//!
//! A [`CertificateChain`] is an ordered sequence of certificates from leaf
//! (end-entity) to root (trust anchor), tagged with how far it was checked.

extern crate alloc;

use alloc::string::ToString;
use alloc::vec::Vec;
use core::fmt;

use crate::certificate::Certificate;
use crate::error::{ChainError, EncodingError, Error, Result};

const PEM_BEGIN: &str = "-----BEGIN ";
const PEM_END: &str = "-----END ";
const PEM_BOUNDARY: &str = "-----";

/// How much checking a chain has been through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Validation {
    /// Built locally, never decoded
    Unchecked,
    /// Parsed as DER, no path validation
    Structural,
    /// Parsed and path-validated
    Full,
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validation::Unchecked => write!(f, "unchecked"),
            Validation::Structural => write!(f, "structurally parsed"),
            Validation::Full => write!(f, "fully validated"),
        }
    }
}

/// A certificate chain, ordered from leaf to root.
///
/// Equality ignores the [`Validation`] tag: a chain built locally equals the
/// chain decoded from its own encoding.
#[derive(Debug, Clone)]
pub struct CertificateChain {
    certificates: Vec<Certificate>,
    validation: Validation,
}

impl CertificateChain {
    /// Create an unchecked chain from certificates ordered leaf first.
    pub fn new(certificates: Vec<Certificate>) -> Self {
        Self {
            certificates,
            validation: Validation::Unchecked,
        }
    }

    pub(crate) fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self
    }

    /// Parse every `CERTIFICATE` block of a PEM bundle, in order.
    ///
    /// Text outside the blocks is ignored. The resulting chain is unchecked;
    /// run it through [`crate::decode_chain`] to validate it.
    pub fn from_pem_bundle(pem: &str) -> Result<Self> {
        let mut certificates = Vec::new();
        let mut rest = pem;

        while let Some(start) = rest.find(PEM_BEGIN) {
            let block = &rest[start..];
            let end = block.find(PEM_END).ok_or_else(|| {
                Error::Encoding(EncodingError::InvalidPem(
                    "missing encapsulation boundary".to_string(),
                ))
            })?;
            let tail = &block[end + PEM_END.len()..];
            let close = tail.find(PEM_BOUNDARY).ok_or_else(|| {
                Error::Encoding(EncodingError::InvalidPem(
                    "unterminated post-encapsulation boundary".to_string(),
                ))
            })?;
            let block_len = end + PEM_END.len() + close + PEM_BOUNDARY.len();

            certificates.push(Certificate::from_pem(&block[..block_len])?);
            rest = &block[block_len..];
        }

        if certificates.is_empty() {
            return Err(Error::Chain(ChainError::Empty));
        }

        log::trace!("from_pem_bundle: {} certificate(s)", certificates.len());
        Ok(Self::new(certificates))
    }

    /// Wire encoding: each certificate's DER, leaf first, no framing.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        if self.certificates.is_empty() {
            return Err(Error::Chain(ChainError::Empty));
        }
        let total = self.certificates.iter().map(|c| c.to_der().len()).sum();
        let mut out = Vec::with_capacity(total);
        for cert in &self.certificates {
            out.extend_from_slice(cert.to_der());
        }
        Ok(out)
    }

    pub fn validation(&self) -> Validation {
        self.validation
    }

    pub fn certificates(&self) -> &[Certificate] {
        &self.certificates
    }

    pub fn into_certificates(self) -> Vec<Certificate> {
        self.certificates
    }

    /// Get the leaf (end-entity) certificate
    pub fn leaf(&self) -> Option<&Certificate> {
        self.certificates.first()
    }

    /// Get the root (trust anchor) certificate
    pub fn root(&self) -> Option<&Certificate> {
        self.certificates.last()
    }

    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Certificate> {
        self.certificates.iter()
    }
}

impl PartialEq for CertificateChain {
    fn eq(&self, other: &Self) -> bool {
        self.certificates == other.certificates
    }
}

impl Eq for CertificateChain {}

impl<'a> IntoIterator for &'a CertificateChain {
    type Item = &'a Certificate;
    type IntoIter = core::slice::Iter<'a, Certificate>;

    fn into_iter(self) -> Self::IntoIter {
        self.certificates.iter()
    }
}

/// One header line, then one line per certificate from leaf to root.
impl fmt::Display for CertificateChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.certificates.len() == 1 {
            "certificate"
        } else {
            "certificates"
        };
        write!(
            f,
            "Certificate chain ({} {}, {})",
            self.certificates.len(),
            noun,
            self.validation
        )?;
        for (idx, cert) in self.certificates.iter().enumerate() {
            write!(
                f,
                "\n  [{}] subject: {}; issuer: {}; serial: {}",
                idx,
                cert.subject(),
                cert.issuer(),
                cert.serial_hex()
            )?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "ring-backend"))]
mod tests {
    use super::*;
    use crate::test_utils;
    use alloc::string::String;

    #[test]
    fn test_accessors() {
        let chain = test_utils::valid_chain();
        assert_eq!(chain.len(), 3);
        assert!(!chain.is_empty());
        assert_eq!(chain.validation(), Validation::Unchecked);
        assert_eq!(
            chain.leaf().and_then(|c| c.subject().common_name()).as_deref(),
            Some(test_utils::LEAF_CN)
        );
        assert_eq!(
            chain.root().and_then(|c| c.subject().common_name()).as_deref(),
            Some(test_utils::ROOT_CN)
        );
    }

    #[test]
    fn test_to_der_is_concatenation() {
        let chain = test_utils::valid_chain();
        let der = chain.to_der().unwrap();

        let mut expected = Vec::new();
        for cert in &chain {
            expected.extend_from_slice(cert.to_der());
        }
        assert_eq!(der, expected);
        assert_eq!(der[0], 0x30);
    }

    #[test]
    fn test_empty_chain_does_not_encode() {
        let chain = CertificateChain::new(Vec::new());
        assert_eq!(chain.to_der(), Err(Error::Chain(ChainError::Empty)));
    }

    #[test]
    fn test_equality_ignores_validation() {
        let chain = test_utils::valid_chain();
        let validated = chain.clone().with_validation(Validation::Full);
        assert_eq!(chain, validated);

        let shorter = CertificateChain::new(chain.certificates()[..2].to_vec());
        assert_ne!(chain, shorter);
    }

    #[test]
    fn test_display() {
        let chain = test_utils::valid_chain().with_validation(Validation::Structural);
        let text = chain.to_string();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("Certificate chain (3 certificates, structurally parsed)")
        );
        let leaf_line = lines.next().unwrap();
        assert!(leaf_line.starts_with("  [0] subject: CN=Leaf"));
        assert!(leaf_line.contains("issuer: CN=Intermediate CA"));
        assert!(leaf_line.contains("serial: 03"));
        assert_eq!(lines.count(), 2);
    }

    #[test]
    fn test_pem_bundle_round_trip() {
        let chain = test_utils::valid_chain();
        let mut bundle = String::from("# exported chain\n");
        for cert in &chain {
            bundle.push_str(&cert.to_pem().unwrap());
        }

        let parsed = CertificateChain::from_pem_bundle(&bundle);
        assert!(parsed.is_ok(), "Bundle parse failed: {:?}", parsed.err());
        assert_eq!(parsed.unwrap(), chain);
    }

    #[test]
    fn test_pem_bundle_without_blocks() {
        let result = CertificateChain::from_pem_bundle("no certificates here");
        assert_eq!(result, Err(Error::Chain(ChainError::Empty)));
    }

    #[test]
    fn test_pem_bundle_unterminated() {
        let result =
            CertificateChain::from_pem_bundle("-----BEGIN CERTIFICATE-----\nMIIB\n");
        assert!(matches!(
            result,
            Err(Error::Encoding(EncodingError::InvalidPem(_)))
        ));
    }
}
