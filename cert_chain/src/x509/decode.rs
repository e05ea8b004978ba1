// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Chain wire decoding.
//!
//! The wire form of a chain is the concatenation of its certificates' DER
//! encodings, leaf first, with no header or delimiter:
//!
//! ```text
//! | Certificate (leaf) | Certificate | ... | Certificate (root) |
//! ```
//!
//! Each element's extent is read from its own SEQUENCE header, so splitting
//! never depends on re-encoding.

extern crate alloc;

use alloc::string::ToString;
use alloc::vec::Vec;

use super::validator::{ValidationOptions, Validator};
use crate::certificate::Certificate;
use crate::chain::{CertificateChain, Validation};
use crate::crypto_backend::CryptoBackend;
#[cfg(feature = "ring-backend")]
use crate::crypto_backend::RingBackend;
use crate::error::{ChainError, Error, ParseError, Result};

/// Upper bound on the number of certificates accepted in one chain.
pub const MAX_CHAIN_CERTIFICATES: usize = 16;

/// How much of a chain [`decode_chain`] checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DecodeMode {
    /// DER structure only: every certificate parses, nothing is verified
    Structural,
    /// Structure plus X.509 path validation
    #[default]
    Full,
}

/// Split wire bytes into one slice per certificate, in order.
pub fn split_chain(mut data: &[u8]) -> Result<Vec<&[u8]>> {
    if data.is_empty() {
        return Err(Error::Chain(ChainError::Empty));
    }

    let mut certificates = Vec::new();
    while !data.is_empty() {
        if certificates.len() == MAX_CHAIN_CERTIFICATES {
            log::error!(
                "split_chain: more than {} certificates",
                MAX_CHAIN_CERTIFICATES
            );
            return Err(Error::Chain(ChainError::TooLong {
                max: MAX_CHAIN_CERTIFICATES,
            }));
        }

        let cert_len = der_sequence_total_length(data)?;
        if cert_len > data.len() {
            return Err(Error::Parse(ParseError::InvalidLength(alloc::format!(
                "certificate {} claims {} bytes, {} remain",
                certificates.len(),
                cert_len,
                data.len()
            ))));
        }

        let (cert, rest) = data.split_at(cert_len);
        certificates.push(cert);
        data = rest;
    }

    log::trace!("split_chain: {} certificate(s)", certificates.len());
    Ok(certificates)
}

/// Total size of the DER SEQUENCE at the start of `data`: tag byte, length
/// octets and content.
///
/// Short-form and 1-4 byte long-form lengths are accepted.
fn der_sequence_total_length(data: &[u8]) -> Result<usize> {
    if data.len() < 2 {
        return Err(Error::Parse(ParseError::UnexpectedEof));
    }

    if data[0] != 0x30 {
        return Err(Error::Parse(ParseError::InvalidTag {
            expected: 0x30,
            found: data[0],
        }));
    }

    let (content_len, header_len) = if data[1] & 0x80 == 0 {
        (data[1] as usize, 2usize)
    } else {
        let num_len_bytes = (data[1] & 0x7F) as usize;
        if num_len_bytes == 0 || num_len_bytes > 4 {
            return Err(Error::Parse(ParseError::InvalidLength(alloc::format!(
                "unsupported DER length encoding: {} length bytes",
                num_len_bytes
            ))));
        }
        let len_bytes = data
            .get(2..2 + num_len_bytes)
            .ok_or(Error::Parse(ParseError::UnexpectedEof))?;
        let len = len_bytes
            .iter()
            .fold(0usize, |acc, b| (acc << 8) | *b as usize);
        (len, 2 + num_len_bytes)
    };

    header_len
        .checked_add(content_len)
        .ok_or_else(|| Error::Parse(ParseError::InvalidLength("length overflow".to_string())))
}

/// Decode a chain with the ring backend and default [`ValidationOptions`].
#[cfg(feature = "ring-backend")]
pub fn decode_chain(bytes: &[u8], mode: DecodeMode) -> Result<CertificateChain> {
    decode_chain_with_backend(bytes, mode, &ValidationOptions::default(), &RingBackend)
}

/// Decode a chain, verifying signatures through `backend`.
///
/// The returned chain is tagged [`Validation::Structural`] or
/// [`Validation::Full`] according to `mode`. The input is never modified
/// and no state is kept between calls.
pub fn decode_chain_with_backend<B: CryptoBackend + ?Sized>(
    bytes: &[u8],
    mode: DecodeMode,
    options: &ValidationOptions,
    backend: &B,
) -> Result<CertificateChain> {
    log::trace!(
        "decode_chain: {} bytes, mode={:?}",
        bytes.len(),
        mode
    );

    let certificates = split_chain(bytes)?
        .into_iter()
        .enumerate()
        .map(|(index, der)| {
            Certificate::from_der(der).map_err(|e| {
                log::error!("decode_chain: certificate {} does not parse: {}", index, e);
                Error::Parse(ParseError::InvalidCertificate {
                    index,
                    reason: e.to_string(),
                })
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if certificates.len() > options.max_chain_depth {
        return Err(Error::Chain(ChainError::TooLong {
            max: options.max_chain_depth,
        }));
    }

    let chain = CertificateChain::new(certificates);
    match mode {
        DecodeMode::Structural => Ok(chain.with_validation(Validation::Structural)),
        DecodeMode::Full => {
            Validator::with_backend(backend).validate_chain(&chain, options)?;
            Ok(chain.with_validation(Validation::Full))
        }
    }
}
