// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Trust-management control payloads.
//!
//! Payloads travel inside a small [`proto::Payload`] envelope that tags each
//! body with a stable [`proto::ProtoId`]. The first payload type is
//! [`ChainRep`], an opaque certificate chain that is only parsed and
//! validated when [`ChainRep::chain`] is called.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod cert_mgmt;
pub mod error;
pub mod proto;

pub use cert_chain::DecodeMode;
pub use cert_mgmt::{ChainRep, INVALID_CHAIN_MARKER};
pub use error::{Error, Result};
pub use proto::{CtrlPayload, Payload, ProtoId};
