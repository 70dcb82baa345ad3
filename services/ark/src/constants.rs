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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Signing algorithm and scope terminator.
pub const ALGORITHM: &str = "HMAC-SHA256";
pub const SCOPE_TERMINATOR: &str = "request";

// Headers used in volcengine signing.
pub const HOST: &str = "Host";
pub const X_DATE: &str = "X-Date";
pub const X_CONTENT_SHA256: &str = "X-Content-Sha256";
pub const AUTHORIZATION: &str = "Authorization";
pub const X_API_ACCESS_KEY: &str = "X-Api-Access-Key";

// Env values used in volcengine services.
pub const VOLCENGINE_ACCESS_KEY_ID: &str = "VOLCENGINE_ACCESS_KEY_ID";
pub const VOLCENGINE_SECRET_ACCESS_KEY: &str = "VOLCENGINE_SECRET_ACCESS_KEY";
pub const VOLCENGINE_REGION: &str = "VOLCENGINE_REGION";
pub const VOLCENGINE_ENDPOINT: &str = "VOLCENGINE_ENDPOINT";
pub const VOLC_ACCESSKEY: &str = "VOLC_ACCESSKEY";
pub const VOLC_SECRETKEY: &str = "VOLC_SECRETKEY";
pub const VOLC_REGION: &str = "VOLC_REGION";
pub const ARK_API_KEY: &str = "ARK_API_KEY";
pub const ARK_AUTH_TYPE: &str = "ARK_AUTH_TYPE";

// Control-plane defaults for endpoint discovery.
pub const DEFAULT_REGION: &str = "cn-beijing";
pub const DEFAULT_HOST: &str = "open.volcengineapi.com";
pub const DEFAULT_PATH: &str = "/";
pub const ARK_SERVICE: &str = "ark";
pub const LIST_ENDPOINTS_ACTION: &str = "ListEndpoints";
pub const LIST_ENDPOINTS_VERSION: &str = "2024-01-01";
pub const LIST_ENDPOINTS_PAGE_SIZE: u32 = 100;

/// Status of an endpoint that can serve inference requests.
pub const STATUS_RUNNING: &str = "Running";

/// AsciiSet for RFC 3986 UriEncode.
///
/// Encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
/// `!`, `'`, `(`, `)` and `*` are encoded as well.
pub static URI_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Same as [`URI_ENCODE_SET`] but keeps `/` raw, for path segments.
pub static PATH_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
