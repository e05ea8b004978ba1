// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Path validation for a leaf-first chain.
//!
//! Each certificate must name the next one as issuer and carry a signature
//! that verifies under the next one's key. Every issuer must be a CA allowed
//! to sign certificates, and the last certificate must be self-signed.

extern crate alloc;

use alloc::string::ToString;
use alloc::vec::Vec;

use const_oid::ObjectIdentifier;

use super::decode::MAX_CHAIN_CERTIFICATES;
use super::extensions::KeyUsage;
use super::oids;
use crate::certificate::Certificate;
use crate::chain::CertificateChain;
#[cfg(feature = "ring-backend")]
use crate::crypto_backend::RingBackend;
use crate::crypto_backend::{CryptoBackend, SignatureAlgorithm};
use crate::error::{
    ChainError, ConstraintError, Error, ExtensionError, Result, SignatureError, TimeError,
};
use crate::time::Time;

/// Which checks [`Validator`] runs. Everything is on by default, except
/// the clock check when built with `no-time-check`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    pub check_time: bool,
    pub check_signature: bool,
    /// Critical extension, basic constraints and key usage checks
    pub check_extensions: bool,
    /// Longest chain accepted, at most [`MAX_CHAIN_CERTIFICATES`]
    pub max_chain_depth: usize,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            check_time: !cfg!(feature = "no-time-check"),
            check_signature: true,
            check_extensions: true,
            max_chain_depth: MAX_CHAIN_CERTIFICATES,
        }
    }
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip_time_validation(self) -> Self {
        Self {
            check_time: false,
            ..self
        }
    }

    /// Parse and link by name only; used for structural decoding.
    pub fn skip_signature_validation(self) -> Self {
        Self {
            check_signature: false,
            ..self
        }
    }

    pub fn with_max_chain_depth(self, depth: usize) -> Self {
        Self {
            max_chain_depth: depth.min(MAX_CHAIN_CERTIFICATES),
            ..self
        }
    }
}

/// Runs [`ValidationOptions`] checks, verifying signatures through `B`.
pub struct Validator<B: CryptoBackend> {
    backend: B,
}

#[cfg(feature = "ring-backend")]
impl Validator<RingBackend> {
    pub fn new() -> Self {
        Self::with_backend(RingBackend)
    }
}

#[cfg(feature = "ring-backend")]
impl Default for Validator<RingBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: CryptoBackend> Validator<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    /// Validate a single certificate on its own.
    ///
    /// `now` is the reference time for the validity check; `None` skips it.
    pub fn validate(
        &self,
        cert: &Certificate,
        options: &ValidationOptions,
        now: Option<&Time>,
    ) -> Result<()> {
        // RFC 5280 4.1.1.2: signatureAlgorithm MUST equal the TBS signature field,
        // parameters included.
        if cert.signature_algorithm != cert.tbs_certificate.signature {
            log::error!(
                "validate: signature algorithm mismatch for subject {}",
                cert.subject()
            );
            return Err(Error::Signature(SignatureError::AlgorithmMismatch {
                cert_algo: cert.signature_algorithm.oid.to_string(),
                tbs_algo: cert.tbs_certificate.signature.oid.to_string(),
            }));
        }

        if let (true, Some(now)) = (options.check_time, now) {
            cert.validity().check_at(now).map_err(|e| {
                log::error!("validate: {} for subject {}", e, cert.subject());
                e
            })?;
        }

        if options.check_extensions {
            self.validate_extensions(cert)?;
        }

        Ok(())
    }

    /// Verify `cert`'s signature with `issuer`'s public key.
    pub fn verify_signature(&self, cert: &Certificate, issuer: &Certificate) -> Result<()> {
        log::trace!(
            "verify_signature: subject={} issuer={}",
            cert.subject(),
            issuer.subject()
        );

        // Only ECC keys carry a named curve; RSA parameters are NULL.
        let issuer_spki = issuer.subject_public_key_info();
        let curve_oid = if issuer_spki.algorithm.oid == oids::ECPUBLICKEY {
            issuer_spki
                .algorithm
                .parameters
                .as_ref()
                .and_then(|p| p.decode_as::<ObjectIdentifier>().ok())
        } else {
            None
        };

        let sig_algo = SignatureAlgorithm::from_oid_with_params(
            &cert.signature_algorithm.oid,
            curve_oid.as_ref(),
            cert.signature_algorithm.parameters.as_ref(),
        )
        .map_err(|e| {
            log::error!(
                "verify_signature: unsupported signature algorithm OID: {}",
                cert.signature_algorithm.oid
            );
            e
        })?;
        log::trace!("verify_signature: signature algorithm = {:?}", sig_algo);

        let tbs_bytes = cert.tbs_der()?;
        let public_key_bytes = issuer_spki.subject_public_key.raw_bytes();

        self.backend
            .verify_signature(sig_algo, tbs_bytes, cert.signature_bytes(), public_key_bytes)
            .map_err(|e| {
                log::error!("verify_signature: FAILED: {}", e);
                e
            })
    }

    fn validate_extensions(&self, cert: &Certificate) -> Result<()> {
        let extensions = match cert.extensions() {
            Some(exts) => exts,
            None => return Ok(()),
        };

        log::trace!(
            "validate_extensions: checking {} extensions",
            extensions.len()
        );

        // RFC 5280 4.2: at most one instance of a particular extension.
        let mut seen: Vec<&ObjectIdentifier> = Vec::with_capacity(extensions.len());
        for ext in extensions.iter() {
            if seen.contains(&&ext.extn_id) {
                log::error!("validate_extensions: duplicate extension {}", ext.extn_id);
                return Err(Error::Extension(ExtensionError::Duplicate(
                    ext.extn_id.to_string(),
                )));
            }
            seen.push(&ext.extn_id);

            if ext.critical && !oids::is_understood_critical(&ext.extn_id) {
                log::error!(
                    "validate_extensions: UNKNOWN critical extension: {}",
                    ext.extn_id
                );
                return Err(Error::Extension(ExtensionError::UnknownCritical(
                    ext.extn_id.to_string(),
                )));
            }
        }

        self.validate_basic_constraints(cert)
    }

    /// pathLenConstraint requires cA, and a CA's Key Usage (when present)
    /// must assert keyCertSign (RFC 5280 4.2.1.9).
    fn validate_basic_constraints(&self, cert: &Certificate) -> Result<()> {
        let bc = match cert.basic_constraints()? {
            Some(bc) => bc,
            None => return Ok(()),
        };

        if bc.path_len_constraint.is_some() && !bc.ca {
            return Err(Error::Extension(ExtensionError::BasicConstraints(
                "pathLenConstraint present but cA is FALSE".to_string(),
            )));
        }

        if bc.ca {
            if let Some(ku) = cert.key_usage()? {
                if !ku.has(KeyUsage::KEY_CERT_SIGN) {
                    return Err(Error::Extension(ExtensionError::BasicConstraints(
                        "CA certificate missing keyCertSign in Key Usage".to_string(),
                    )));
                }
            }
        }

        Ok(())
    }

    /// Validate a chain ordered leaf first.
    pub fn validate_chain(
        &self,
        chain: &CertificateChain,
        options: &ValidationOptions,
    ) -> Result<()> {
        log::trace!(
            "validate_chain: starting validation, chain_len={}",
            chain.len()
        );

        if chain.is_empty() {
            return Err(Error::Chain(ChainError::Empty));
        }

        if chain.len() > options.max_chain_depth {
            return Err(Error::Chain(ChainError::TooLong {
                max: options.max_chain_depth,
            }));
        }

        let now = if options.check_time {
            match crate::time::current_time() {
                Ok(now) => Some(now),
                Err(Error::Time(TimeError::ClockUnavailable)) => {
                    log::trace!("validate_chain: no clock available, skipping validity checks");
                    None
                }
                Err(e) => return Err(e),
            }
        } else {
            None
        };

        let certs = chain.certificates();
        for (idx, cert) in certs.iter().enumerate() {
            log::trace!(
                "validate_chain: validating cert {} (subject={})",
                idx,
                cert.subject()
            );

            self.validate(cert, options, now.as_ref())?;

            match certs.get(idx + 1) {
                Some(issuer) => {
                    if cert.issuer() != issuer.subject() {
                        log::error!("validate_chain: ISSUER MISMATCH at cert {}", idx);
                        return Err(Error::Chain(ChainError::IssuerMismatch { depth: idx }));
                    }

                    if options.check_signature {
                        self.verify_signature(cert, issuer)?;
                    }

                    self.verify_issuer_is_ca(issuer, idx)?;

                    // RFC 5280 4.2.1.3: an issuer with Key Usage must assert keyCertSign.
                    if let Some(ku) = issuer.key_usage()? {
                        if !ku.has(KeyUsage::KEY_CERT_SIGN) {
                            log::error!(
                                "validate_chain: issuer at depth {} missing keyCertSign",
                                idx + 1
                            );
                            return Err(Error::Constraint(ConstraintError::MissingKeyCertSign {
                                depth: idx + 1,
                            }));
                        }
                    }
                }
                None => {
                    // Trust anchor: must be self-signed.
                    if !cert.is_self_issued() {
                        log::error!("validate_chain: anchor at depth {} is not self-issued", idx);
                        return Err(Error::Chain(ChainError::AnchorNotSelfIssued { depth: idx }));
                    }
                    if options.check_signature {
                        self.verify_signature(cert, cert)?;
                    }
                }
            }
        }

        log::trace!("validate_chain: SUCCESS all validations passed");
        Ok(())
    }

    /// `issued_depth` is the index of the certificate `issuer` signed, which
    /// is also the number of intermediates below `issuer`.
    fn verify_issuer_is_ca(&self, issuer: &Certificate, issued_depth: usize) -> Result<()> {
        let depth = issued_depth + 1;
        let bc = match issuer.basic_constraints()? {
            Some(bc) if bc.ca => bc,
            _ => {
                log::error!("verify_issuer_is_ca: issuer at depth {} is not a CA", depth);
                return Err(Error::Chain(ChainError::IssuerNotCa { depth }));
            }
        };

        if let Some(path_len) = bc.path_len_constraint {
            if issued_depth > path_len as usize {
                log::error!(
                    "verify_issuer_is_ca: pathLenConstraint {} exceeded at depth {}",
                    path_len,
                    depth
                );
                return Err(Error::Chain(ChainError::PathLengthExceeded { depth }));
            }
        }

        Ok(())
    }
}
