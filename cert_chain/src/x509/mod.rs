// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! X.509 chain decoding and path validation.

pub mod decode;
pub mod extensions;
pub mod oids;
pub mod validator;

#[cfg(feature = "ring-backend")]
pub use decode::decode_chain;
pub use decode::{decode_chain_with_backend, split_chain, DecodeMode, MAX_CHAIN_CERTIFICATES};
pub use extensions::{BasicConstraints, KeyUsage};
pub use validator::{ValidationOptions, Validator};
