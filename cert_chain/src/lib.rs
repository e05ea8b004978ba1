// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate chain codec and validator.
//!
//! A chain travels as the concatenation of its certificates' DER encodings,
//! leaf first and root last, with no header or separator. This crate is the
//! paired encoder/decoder for that form:
//!
//! - [`CertificateChain::to_der`] produces the wire bytes.
//! - [`decode_chain`] turns wire bytes back into a [`CertificateChain`],
//!   either structurally ([`DecodeMode::Structural`]) or with full X.509 path
//!   validation ([`DecodeMode::Full`]).
//!
//! Signature checks go through the [`CryptoBackend`] trait; the `ring-backend`
//! feature provides [`RingBackend`].
//!
//! # Example
//! ```no_run
//! use cert_chain::{decode_chain, DecodeMode};
//!
//! # fn example(wire: &[u8]) -> cert_chain::Result<()> {
//! let chain = decode_chain(wire, DecodeMode::Full)?;
//! println!("{}", chain);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod certificate;
pub mod chain;
pub mod crypto_backend;
pub mod error;
pub mod time;
pub mod x509;

#[cfg(all(feature = "ring-backend", any(test, feature = "test-utils")))]
pub mod test_utils;

pub use certificate::Certificate;
pub use chain::{CertificateChain, Validation};
#[cfg(feature = "ring-backend")]
pub use crypto_backend::RingBackend;
pub use crypto_backend::{CryptoBackend, SignatureAlgorithm};
pub use error::{Error, Result};
#[cfg(feature = "ring-backend")]
pub use x509::decode_chain;
pub use x509::{
    decode_chain_with_backend, split_chain, DecodeMode, ValidationOptions, Validator,
    MAX_CHAIN_CERTIFICATES,
};
