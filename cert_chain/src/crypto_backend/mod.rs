// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Cryptographic backend abstraction for signature verification.
//!
//! The validator never calls a crypto library directly. It maps the
//! certificate's algorithm identifiers to a [`SignatureAlgorithm`] and hands
//! the bytes to a [`CryptoBackend`].

extern crate alloc;

use const_oid::ObjectIdentifier;

use crate::error::{Error, Result};
use crate::x509::oids;

#[cfg(feature = "ring-backend")]
mod ring;
#[cfg(feature = "ring-backend")]
pub use self::ring::*;

/// A signature scheme the validator knows how to check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    EcdsaP256Sha256,
    EcdsaP256Sha384,
    EcdsaP384Sha256,
    EcdsaP384Sha384,
    /// RSASSA-PKCS1-v1_5
    RsaPkcs1Sha256,
    RsaPkcs1Sha384,
    RsaPkcs1Sha512,
    /// RSASSA-PSS, hash taken from the algorithm parameters
    RsaPssSha256,
    RsaPssSha384,
    RsaPssSha512,
    Ed25519,
}

impl SignatureAlgorithm {
    /// Resolve a certificate's signature algorithm.
    ///
    /// `curve_oid` is the named curve of the issuer key and is required for
    /// ECDSA. `params` are the signature AlgorithmIdentifier parameters and
    /// are required for RSA-PSS.
    pub fn from_oid_with_params(
        sig_oid: &ObjectIdentifier,
        curve_oid: Option<&ObjectIdentifier>,
        params: Option<&der::Any>,
    ) -> Result<Self> {
        use SignatureAlgorithm::*;

        let ecdsa = |p256: Self, p384: Self| match curve_oid {
            Some(curve) if *curve == oids::SECP256R1 => Ok(p256),
            Some(curve) if *curve == oids::SECP384R1 => Ok(p384),
            Some(curve) => Err(Error::unsupported_algorithm(alloc::format!(
                "ECDSA signature {} on curve {}",
                sig_oid, curve
            ))),
            None => Err(Error::unsupported_algorithm(alloc::format!(
                "ECDSA signature {} without a named curve",
                sig_oid
            ))),
        };

        match *sig_oid {
            oid if oid == oids::ECDSA_WITH_SHA256 => ecdsa(EcdsaP256Sha256, EcdsaP384Sha256),
            oid if oid == oids::ECDSA_WITH_SHA384 => ecdsa(EcdsaP256Sha384, EcdsaP384Sha384),
            oid if oid == oids::RSA_WITH_SHA256 => Ok(RsaPkcs1Sha256),
            oid if oid == oids::RSA_WITH_SHA384 => Ok(RsaPkcs1Sha384),
            oid if oid == oids::RSA_WITH_SHA512 => Ok(RsaPkcs1Sha512),
            oid if oid == oids::RSA_PSS => Self::rsa_pss(params),
            oid if oid == oids::ED25519 => Ok(Ed25519),
            _ => Err(Error::unsupported_algorithm(alloc::format!(
                "signature algorithm {}",
                sig_oid
            ))),
        }
    }

    /// Resolve an algorithm that needs neither a curve nor parameters.
    pub fn from_oid(oid: &ObjectIdentifier) -> Result<Self> {
        Self::from_oid_with_params(oid, None, None)
    }

    /// RSASSA-PSS-params `[0] hashAlgorithm`. Absent parameters or an absent
    /// hash mean SHA-1, which is refused.
    fn rsa_pss(params: Option<&der::Any>) -> Result<Self> {
        use der::{Reader, SliceReader, TagMode, TagNumber};
        use spki::AlgorithmIdentifier;

        let hash_oid = match params {
            Some(params) => SliceReader::new(params.value())
                .and_then(|mut reader| {
                    reader.context_specific::<AlgorithmIdentifier<der::Any>>(
                        TagNumber::N0,
                        TagMode::Explicit,
                    )
                })
                .map_err(|e| {
                    Error::unsupported_algorithm(alloc::format!("RSA-PSS parameters: {}", e))
                })?
                .map(|hash| hash.oid),
            None => None,
        };

        match hash_oid {
            Some(hash) if hash == oids::SHA256 => Ok(SignatureAlgorithm::RsaPssSha256),
            Some(hash) if hash == oids::SHA384 => Ok(SignatureAlgorithm::RsaPssSha384),
            Some(hash) if hash == oids::SHA512 => Ok(SignatureAlgorithm::RsaPssSha512),
            Some(hash) => Err(Error::unsupported_algorithm(alloc::format!(
                "RSA-PSS with hash {}",
                hash
            ))),
            None => Err(Error::unsupported_algorithm("RSA-PSS with default SHA-1 hash")),
        }
    }
}

/// Signature verification provider.
///
/// Decoding may run on several threads against one backend, so
/// implementations must be shareable.
pub trait CryptoBackend: Send + Sync {
    /// Verify `signature` over `tbs_data` with the raw subject public key
    /// bytes (the content of the SubjectPublicKeyInfo BIT STRING).
    fn verify_signature(
        &self,
        algorithm: SignatureAlgorithm,
        tbs_data: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<()>;
}

impl<T: CryptoBackend + ?Sized> CryptoBackend for &T {
    fn verify_signature(
        &self,
        algorithm: SignatureAlgorithm,
        tbs_data: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<()> {
        (**self).verify_signature(algorithm, tbs_data, signature, public_key)
    }
}
