// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! SHA-256 and HMAC-SHA256 helpers used by signers.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Lower-case hex of the SHA-256 digest of `content`.
pub fn hex_sha256(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}

/// Raw HMAC-SHA256 of `content` under `key`.
///
/// Signing keys are derived by chaining this function, so it returns the
/// 32 raw bytes rather than hex.
pub fn hmac_sha256(key: &[u8], content: &[u8]) -> [u8; 32] {
    let mut out = [0; 32];
    out.copy_from_slice(&mac(key, content).finalize().into_bytes());
    out
}

/// Lower-case hex of the HMAC-SHA256 of `content` under `key`.
pub fn hex_hmac_sha256(key: &[u8], content: &[u8]) -> String {
    hex::encode(mac(key, content).finalize().into_bytes())
}

fn mac(key: &[u8], content: &[u8]) -> HmacSha256 {
    // SAFETY: HMAC accepts keys of any length, new_from_slice never fails.
    let mut h = HmacSha256::new_from_slice(key).unwrap();
    h.update(content);
    h
}
