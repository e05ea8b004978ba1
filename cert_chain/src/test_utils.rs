// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Deterministic certificate fixtures.
//!
//! Builds a three-level Ed25519 chain (leaf, intermediate CA, root CA) from
//! fixed seeds, so tests need no binary fixture files. Enabled for this
//! crate's own tests and, through the `test-utils` feature, for dependents.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use der::{asn1::BitString, Encode};
use ring::signature::{Ed25519KeyPair, KeyPair};
use spki::{AlgorithmIdentifier, SubjectPublicKeyInfo};

use crate::certificate::name::Name;
use crate::certificate::{Certificate, Extension, Extensions, SpkiInfo, TbsCertificate};
use crate::chain::CertificateChain;
use crate::error::{Error, Result};
use crate::time::{Time, Validity};
use crate::x509::extensions::{BasicConstraints, KeyUsage};
use crate::x509::oids;

pub const ROOT_CN: &str = "Root CA";
pub const INTERMEDIATE_CN: &str = "Intermediate CA";
pub const LEAF_CN: &str = "Leaf";
pub const ORG: &str = "Example Org";

const ROOT_SEED: [u8; 32] = [0x01; 32];
const INTERMEDIATE_SEED: [u8; 32] = [0x02; 32];
const LEAF_SEED: [u8; 32] = [0x03; 32];

// 2020-01-01T00:00:00Z
const NOT_BEFORE: u64 = 1_577_836_800;
// 2099-01-01T00:00:00Z
const NOT_AFTER: u64 = 4_070_908_800;
// 2000-01-01T00:00:00Z .. 2001-01-01T00:00:00Z
const EXPIRED_NOT_BEFORE: u64 = 946_684_800;
const EXPIRED_NOT_AFTER: u64 = 978_307_200;

/// Keys and validity period shared by every certificate a fixture issues.
#[derive(Debug)]
pub struct Fixture {
    pub root_key: Ed25519KeyPair,
    pub intermediate_key: Ed25519KeyPair,
    pub leaf_key: Ed25519KeyPair,
    pub validity: Validity,
}

impl Fixture {
    /// Fixture valid from 2020 through 2099.
    ///
    /// # Panics
    /// Panics if the fixed seeds or dates are rejected, which would be a bug
    /// in this module.
    pub fn new() -> Self {
        Self::try_new(NOT_BEFORE, NOT_AFTER).expect("fixture keys and dates are valid")
    }

    /// Fixture whose certificates expired in 2001.
    ///
    /// # Panics
    /// See [`Fixture::new`].
    pub fn expired() -> Self {
        Self::try_new(EXPIRED_NOT_BEFORE, EXPIRED_NOT_AFTER)
            .expect("fixture keys and dates are valid")
    }

    fn try_new(not_before: u64, not_after: u64) -> Result<Self> {
        Ok(Self {
            root_key: Ed25519KeyPair::from_seed_unchecked(&ROOT_SEED)?,
            intermediate_key: Ed25519KeyPair::from_seed_unchecked(&INTERMEDIATE_SEED)?,
            leaf_key: Ed25519KeyPair::from_seed_unchecked(&LEAF_SEED)?,
            validity: Validity::new(
                Time::from_unix_secs(not_before)?,
                Time::from_unix_secs(not_after)?,
            ),
        })
    }

    /// Issue a certificate for `subject_key` signed by `issuer_key`.
    ///
    /// Names are `O=Example Org, CN=<cn>`. An empty `extensions` list omits
    /// the extensions field.
    pub fn issue(
        &self,
        subject_key: &Ed25519KeyPair,
        subject_cn: &str,
        issuer_key: &Ed25519KeyPair,
        issuer_cn: &str,
        serial: u8,
        extensions: Vec<Extension>,
    ) -> Result<Certificate> {
        let algorithm = ed25519_algorithm();
        let mut tbs = TbsCertificate::new(
            vec![serial],
            algorithm.clone(),
            Name::with_organization_and_cn(ORG, issuer_cn)?,
            self.validity,
            Name::with_organization_and_cn(ORG, subject_cn)?,
            ed25519_spki(subject_key)?,
        );
        if !extensions.is_empty() {
            tbs = tbs.with_extensions(Extensions::from_vec(extensions));
        }

        let tbs_der = tbs.to_der().map_err(Error::encoding)?;
        let signature = issuer_key.sign(&tbs_der);
        let signature = BitString::from_bytes(signature.as_ref()).map_err(Error::encoding)?;
        Certificate::new(tbs, algorithm, signature)
    }

    /// Leaf, intermediate and root, leaf first.
    pub fn chain(&self) -> Result<CertificateChain> {
        let ca_extensions = |path_len| -> Result<Vec<Extension>> {
            Ok(vec![
                BasicConstraints::new_ca(path_len).to_extension(true)?,
                KeyUsage::new(KeyUsage::KEY_CERT_SIGN | KeyUsage::CRL_SIGN).to_extension(true)?,
            ])
        };

        let root = self.issue(
            &self.root_key,
            ROOT_CN,
            &self.root_key,
            ROOT_CN,
            1,
            ca_extensions(None)?,
        )?;
        let intermediate = self.issue(
            &self.intermediate_key,
            INTERMEDIATE_CN,
            &self.root_key,
            ROOT_CN,
            2,
            ca_extensions(Some(0))?,
        )?;
        let leaf = self.issue(
            &self.leaf_key,
            LEAF_CN,
            &self.intermediate_key,
            INTERMEDIATE_CN,
            3,
            vec![
                BasicConstraints::new_end_entity().to_extension(false)?,
                KeyUsage::new(KeyUsage::DIGITAL_SIGNATURE).to_extension(true)?,
            ],
        )?;

        Ok(CertificateChain::new(vec![leaf, intermediate, root]))
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

fn ed25519_algorithm() -> AlgorithmIdentifier<der::Any> {
    AlgorithmIdentifier {
        oid: oids::ED25519,
        parameters: None,
    }
}

fn ed25519_spki(key: &Ed25519KeyPair) -> Result<SpkiInfo> {
    Ok(SubjectPublicKeyInfo {
        algorithm: ed25519_algorithm(),
        subject_public_key: BitString::from_bytes(key.public_key().as_ref())
            .map_err(Error::encoding)?,
    })
}

/// A valid leaf → intermediate → root chain.
///
/// # Panics
/// Panics if the fixture cannot be built.
pub fn valid_chain() -> CertificateChain {
    Fixture::new().chain().expect("valid fixture chain")
}

/// The same shape of chain, expired since 2001.
///
/// # Panics
/// Panics if the fixture cannot be built.
pub fn expired_chain() -> CertificateChain {
    Fixture::expired().chain().expect("expired fixture chain")
}

/// Copy of `cert` with the last signature byte flipped.
///
/// # Panics
/// Panics if the copy cannot be re-encoded.
pub fn with_corrupted_signature(cert: &Certificate) -> Certificate {
    let mut signature = cert.signature_bytes().to_vec();
    if let Some(last) = signature.last_mut() {
        *last ^= 0x01;
    }
    let signature = BitString::from_bytes(&signature).expect("signature bit string");
    Certificate::new(
        cert.tbs_certificate.clone(),
        cert.signature_algorithm.clone(),
        signature,
    )
    .expect("re-encoded certificate")
}
