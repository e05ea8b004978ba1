// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Object identifiers used when decoding and validating chains.

use const_oid::ObjectIdentifier;

// =============================================================================
// Certificate extensions (RFC 5280 Section 4.2)
// =============================================================================

/// Subject Key Identifier - 2.5.29.14
pub const SUBJECT_KEY_IDENTIFIER: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.14");

/// Key Usage - 2.5.29.15
pub const KEY_USAGE: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.15");

/// Subject Alternative Name - 2.5.29.17
pub const SUBJECT_ALT_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.17");

/// Basic Constraints - 2.5.29.19
pub const BASIC_CONSTRAINTS: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.19");

/// Authority Key Identifier - 2.5.29.35
pub const AUTHORITY_KEY_IDENTIFIER: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.35");

/// Extended Key Usage - 2.5.29.37
pub const EXTENDED_KEY_USAGE: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.37");

/// Critical extensions the validator understands. A critical extension
/// outside this list rejects the certificate.
pub const UNDERSTOOD_CRITICAL_EXTENSIONS: &[ObjectIdentifier] = &[
    BASIC_CONSTRAINTS,
    KEY_USAGE,
    EXTENDED_KEY_USAGE,
    SUBJECT_ALT_NAME,
];

// =============================================================================
// Signature algorithms
// =============================================================================

/// ecdsa-with-SHA256 - 1.2.840.10045.4.3.2
pub const ECDSA_WITH_SHA256: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.2");

/// ecdsa-with-SHA384 - 1.2.840.10045.4.3.3
pub const ECDSA_WITH_SHA384: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.3");

/// sha256WithRSAEncryption - 1.2.840.113549.1.1.11
pub const RSA_WITH_SHA256: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.11");

/// sha384WithRSAEncryption - 1.2.840.113549.1.1.12
pub const RSA_WITH_SHA384: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.12");

/// sha512WithRSAEncryption - 1.2.840.113549.1.1.13
pub const RSA_WITH_SHA512: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.13");

/// RSASSA-PSS - 1.2.840.113549.1.1.10
pub const RSA_PSS: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.10");

// =============================================================================
// Key algorithms and curves
// =============================================================================

/// EC Public Key - 1.2.840.10045.2.1
pub const ECPUBLICKEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

/// secp256r1 - 1.2.840.10045.3.1.7
pub const SECP256R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");

/// secp384r1 - 1.3.132.0.34
pub const SECP384R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");

/// Ed25519, used both as key and signature algorithm - 1.3.101.112
pub const ED25519: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");

// =============================================================================
// Hash algorithms (RSA-PSS parameters)
// =============================================================================

/// SHA-256 - 2.16.840.1.101.3.4.2.1
pub const SHA256: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.1");

/// SHA-384 - 2.16.840.1.101.3.4.2.2
pub const SHA384: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.2");

/// SHA-512 - 2.16.840.1.101.3.4.2.3
pub const SHA512: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.3");

/// Whether a critical extension with this OID can be processed.
pub fn is_understood_critical(oid: &ObjectIdentifier) -> bool {
    UNDERSTOOD_CRITICAL_EXTENSIONS.contains(oid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_extension_oids() {
        assert_eq!(BASIC_CONSTRAINTS.to_string(), "2.5.29.19");
        assert_eq!(KEY_USAGE.to_string(), "2.5.29.15");
    }

    #[test]
    fn test_understood_critical() {
        assert!(is_understood_critical(&BASIC_CONSTRAINTS));
        assert!(is_understood_critical(&KEY_USAGE));
        assert!(!is_understood_critical(&AUTHORITY_KEY_IDENTIFIER));
        assert!(!is_understood_critical(&ObjectIdentifier::new_unwrap(
            "1.3.6.1.4.1.99999.1"
        )));
    }
}
