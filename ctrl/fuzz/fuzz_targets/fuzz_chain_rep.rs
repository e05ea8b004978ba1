// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

#![no_main]

use libfuzzer_sys::fuzz_target;

use ctrl::cert_mgmt::ChainRep;
use ctrl::proto::Payload;
use ctrl::DecodeMode;

fuzz_target!(|data: &[u8]| {
    // Envelope dispatch, then every read path of the carried chain
    if let Ok(Payload::CertChainRep(rep)) = Payload::decode(data) {
        let _ = rep.chain();
        let _ = rep.to_string();
    }

    // The raw input as a chain body
    let rep = ChainRep::new(data);
    let _ = rep.chain_with(DecodeMode::Structural);
    let _ = rep.chain();
    let _ = rep.to_string();
});
