// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! The X.509 v3 extensions that path validation reads.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use der::{asn1::BitString, Decode, Encode, Sequence};

use super::oids;
use crate::certificate::{Certificate, Extension};
use crate::error::{Error, ExtensionError, Result};

/// Basic Constraints extension.
///
/// ```asn1
/// BasicConstraints ::= SEQUENCE {
///     cA                      BOOLEAN DEFAULT FALSE,
///     pathLenConstraint       INTEGER (0..MAX) OPTIONAL
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Sequence)]
pub struct BasicConstraints {
    #[asn1(default = "default_false")]
    pub ca: bool,

    #[asn1(optional = "true")]
    pub path_len_constraint: Option<u32>,
}

fn default_false() -> bool {
    false
}

impl BasicConstraints {
    pub fn new_end_entity() -> Self {
        Self {
            ca: false,
            path_len_constraint: None,
        }
    }

    pub fn new_ca(path_len: Option<u32>) -> Self {
        Self {
            ca: true,
            path_len_constraint: path_len,
        }
    }

    pub fn from_extension(ext: &Extension) -> Result<Self> {
        Self::from_der(ext.value()).map_err(|e| invalid_encoding("BasicConstraints", e))
    }

    /// Wrap as an extension value.
    pub fn to_extension(&self, critical: bool) -> Result<Extension> {
        let value = self.to_der().map_err(Error::encoding)?;
        Extension::new(oids::BASIC_CONSTRAINTS, critical, value)
    }
}

/// Key Usage bit flags.
///
/// ```asn1
/// KeyUsage ::= BIT STRING {
///     digitalSignature        (0),
///     nonRepudiation          (1),
///     keyEncipherment         (2),
///     dataEncipherment        (3),
///     keyAgreement            (4),
///     keyCertSign             (5),
///     cRLSign                 (6),
///     encipherOnly            (7),
///     decipherOnly            (8)
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyUsage {
    bits: u16,
}

impl KeyUsage {
    // Named bit n is bit (15 - n) of the first two content bytes read
    // big-endian.

    pub const DIGITAL_SIGNATURE: u16 = 1 << 15;
    pub const NON_REPUDIATION: u16 = 1 << 14;
    pub const KEY_ENCIPHERMENT: u16 = 1 << 13;
    pub const DATA_ENCIPHERMENT: u16 = 1 << 12;
    pub const KEY_AGREEMENT: u16 = 1 << 11;
    pub const KEY_CERT_SIGN: u16 = 1 << 10;
    pub const CRL_SIGN: u16 = 1 << 9;
    pub const ENCIPHER_ONLY: u16 = 1 << 8;
    pub const DECIPHER_ONLY: u16 = 1 << 7;

    const NAMES: [(u16, &'static str); 9] = [
        (Self::DIGITAL_SIGNATURE, "digitalSignature"),
        (Self::NON_REPUDIATION, "nonRepudiation"),
        (Self::KEY_ENCIPHERMENT, "keyEncipherment"),
        (Self::DATA_ENCIPHERMENT, "dataEncipherment"),
        (Self::KEY_AGREEMENT, "keyAgreement"),
        (Self::KEY_CERT_SIGN, "keyCertSign"),
        (Self::CRL_SIGN, "cRLSign"),
        (Self::ENCIPHER_ONLY, "encipherOnly"),
        (Self::DECIPHER_ONLY, "decipherOnly"),
    ];

    pub fn new(bits: u16) -> Self {
        Self { bits }
    }

    pub fn has(&self, usage: u16) -> bool {
        (self.bits & usage) != 0
    }

    /// Parse a DER BIT STRING. Bits past decipherOnly are ignored.
    pub fn from_der(bytes: &[u8]) -> der::Result<Self> {
        let bit_string = BitString::from_der(bytes)?;
        let raw = bit_string.raw_bytes();
        let hi = raw.first().copied().unwrap_or(0);
        let lo = raw.get(1).copied().unwrap_or(0);
        Ok(Self {
            bits: u16::from_be_bytes([hi, lo]),
        })
    }

    pub fn from_extension(ext: &Extension) -> Result<Self> {
        Self::from_der(ext.value()).map_err(|e| invalid_encoding("KeyUsage", e))
    }

    /// Minimal DER BIT STRING encoding, as an extension value.
    pub fn to_extension(&self, critical: bool) -> Result<Extension> {
        let bytes = self.bits.to_be_bytes();
        let used = if bytes[1] != 0 { 2 } else { 1 };
        let last = bytes[used - 1];
        let unused = if last == 0 {
            0
        } else {
            last.trailing_zeros() as u8
        };
        let bit_string = BitString::new(unused, &bytes[..used]).map_err(Error::encoding)?;
        let value = bit_string.to_der().map_err(Error::encoding)?;
        Extension::new(oids::KEY_USAGE, critical, value)
    }
}

impl fmt::Display for KeyUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let usages: Vec<&str> = Self::NAMES
            .iter()
            .filter(|(bit, _)| self.has(*bit))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "{}", usages.join(", "))
    }
}

fn invalid_encoding(what: &str, err: der::Error) -> Error {
    Error::Extension(ExtensionError::InvalidEncoding(alloc::format!(
        "{}: {}",
        what, err
    )))
}

impl Certificate {
    /// Decoded Basic Constraints, if the extension is present.
    pub fn basic_constraints(&self) -> Result<Option<BasicConstraints>> {
        self.extensions()
            .and_then(|exts| exts.find(&oids::BASIC_CONSTRAINTS))
            .map(BasicConstraints::from_extension)
            .transpose()
    }

    /// Decoded Key Usage, if the extension is present.
    pub fn key_usage(&self) -> Result<Option<KeyUsage>> {
        self.extensions()
            .and_then(|exts| exts.find(&oids::KEY_USAGE))
            .map(KeyUsage::from_extension)
            .transpose()
    }

    /// True when Basic Constraints asserts cA.
    pub fn is_ca(&self) -> bool {
        matches!(self.basic_constraints(), Ok(Some(bc)) if bc.ca)
    }
}
