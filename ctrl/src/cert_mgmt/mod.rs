// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate management payloads.

mod chain_rep;
pub use chain_rep::*;
