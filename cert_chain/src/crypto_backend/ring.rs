// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Ring cryptographic backend implementation.

use super::{CryptoBackend, SignatureAlgorithm};
use crate::error::{Error, Result};
use ring::signature::{self, UnparsedPublicKey};

/// Ring-based cryptographic backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct RingBackend;

impl RingBackend {
    fn algorithm(algorithm: SignatureAlgorithm) -> &'static dyn signature::VerificationAlgorithm {
        match algorithm {
            SignatureAlgorithm::EcdsaP256Sha256 => &signature::ECDSA_P256_SHA256_ASN1,
            SignatureAlgorithm::EcdsaP256Sha384 => &signature::ECDSA_P256_SHA384_ASN1,
            SignatureAlgorithm::EcdsaP384Sha256 => &signature::ECDSA_P384_SHA256_ASN1,
            SignatureAlgorithm::EcdsaP384Sha384 => &signature::ECDSA_P384_SHA384_ASN1,
            SignatureAlgorithm::RsaPkcs1Sha256 => &signature::RSA_PKCS1_2048_8192_SHA256,
            SignatureAlgorithm::RsaPkcs1Sha384 => &signature::RSA_PKCS1_2048_8192_SHA384,
            SignatureAlgorithm::RsaPkcs1Sha512 => &signature::RSA_PKCS1_2048_8192_SHA512,
            SignatureAlgorithm::RsaPssSha256 => &signature::RSA_PSS_2048_8192_SHA256,
            SignatureAlgorithm::RsaPssSha384 => &signature::RSA_PSS_2048_8192_SHA384,
            SignatureAlgorithm::RsaPssSha512 => &signature::RSA_PSS_2048_8192_SHA512,
            SignatureAlgorithm::Ed25519 => &signature::ED25519,
        }
    }
}

impl CryptoBackend for RingBackend {
    fn verify_signature(
        &self,
        algorithm: SignatureAlgorithm,
        tbs_data: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<()> {
        log::trace!("Verifying signature with algorithm {:?}", algorithm);

        UnparsedPublicKey::new(Self::algorithm(algorithm), public_key)
            .verify(tbs_data, signature)
            .map_err(|_| {
                log::error!("Signature verification failed ({:?})", algorithm);
                Error::signature_failed()
            })?;

        log::trace!("Signature verification successful");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ring::signature::{Ed25519KeyPair, KeyPair};

    #[test]
    fn test_ed25519_verify() {
        let key = Ed25519KeyPair::from_seed_unchecked(&[7u8; 32]).unwrap();
        let msg = b"certificate body";
        let sig = key.sign(msg);

        let result = RingBackend.verify_signature(
            SignatureAlgorithm::Ed25519,
            msg,
            sig.as_ref(),
            key.public_key().as_ref(),
        );
        assert!(result.is_ok(), "Verification failed: {:?}", result.err());
    }

    #[test]
    fn test_ed25519_tampered_message_rejected() {
        let key = Ed25519KeyPair::from_seed_unchecked(&[7u8; 32]).unwrap();
        let sig = key.sign(b"certificate body");

        let result = RingBackend.verify_signature(
            SignatureAlgorithm::Ed25519,
            b"certificate bodY",
            sig.as_ref(),
            key.public_key().as_ref(),
        );
        assert_eq!(result, Err(Error::signature_failed()));
    }

    #[test]
    fn test_wrong_algorithm_rejected() {
        let key = Ed25519KeyPair::from_seed_unchecked(&[7u8; 32]).unwrap();
        let msg = b"certificate body";
        let sig = key.sign(msg);

        let result = RingBackend.verify_signature(
            SignatureAlgorithm::EcdsaP256Sha256,
            msg,
            sig.as_ref(),
            key.public_key().as_ref(),
        );
        assert!(result.is_err());
    }
}
