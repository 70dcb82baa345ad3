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

use crate::constants::*;
use crate::Credential;
use async_trait::async_trait;
use bytes::Bytes;
use http::request::Parts;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use log::debug;
use percent_encoding::{percent_decode_str, utf8_percent_encode};
use std::collections::BTreeMap;
use volcsign_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use volcsign_core::time::{format_date, format_iso8601, now, DateTime};
use volcsign_core::{Context, Error, Result, SignRequest};

/// Everything the signer needs to know about a request.
///
/// `query` keys are unique and hold raw, not yet encoded, values.
#[derive(Debug, Clone)]
pub struct SignableRequest {
    /// HTTP method, used as given.
    pub method: Method,
    /// Host the request is sent to, also signed as the `Host` header.
    pub host: String,
    /// Request path, `/` when empty.
    pub path: String,
    /// Query parameters.
    pub query: BTreeMap<String, String>,
    /// Extra headers to send and sign.
    pub headers: Vec<(String, String)>,
    /// Request payload, empty when there is none.
    pub body: Bytes,
    /// Service name used in the credential scope, for example `ark`.
    pub service: String,
}

impl SignableRequest {
    /// Create a request for `/` without query, headers or body.
    pub fn new(method: Method, host: &str, service: &str) -> Self {
        Self {
            method,
            host: host.to_string(),
            path: DEFAULT_PATH.to_string(),
            query: BTreeMap::new(),
            headers: Vec::new(),
            body: Bytes::new(),
            service: service.to_string(),
        }
    }

    /// Set the path.
    pub fn with_path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    /// Set a query parameter, replacing any previous value for `key`.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Append a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Build a signable request from `http::request::Parts`.
    ///
    /// The query string is form-decoded so values are raw again. A literal
    /// `+` therefore decodes to a space and is signed as `%20`; callers
    /// that mean a plus sign must send it as `%2B`.
    pub fn from_parts(parts: &Parts, body: Bytes, service: &str) -> Result<Self> {
        let host = parts
            .uri
            .authority()
            .ok_or_else(|| {
                Error::request_invalid("request without authority is invalid for signing")
            })?
            .as_str()
            .to_string();
        let path = parts.uri.path();

        let query = parts
            .uri
            .query()
            .map(|v| {
                form_urlencoded::parse(v.as_bytes())
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect()
            })
            .unwrap_or_default();

        let headers = parts
            .headers
            .iter()
            .map(|(k, v)| -> Result<(String, String)> {
                Ok((k.as_str().to_string(), v.to_str()?.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            method: parts.method.clone(),
            host,
            path: if path.is_empty() {
                DEFAULT_PATH.to_string()
            } else {
                path.to_string()
            },
            query,
            headers,
            body,
            service: service.to_string(),
        })
    }

    /// Full `https` url of this request.
    ///
    /// The query string is the canonical one, so what is sent is exactly
    /// what was signed.
    pub fn url(&self) -> String {
        let query = canonical_query_string(&self.query);
        if query.is_empty() {
            format!("https://{}{}", self.host, self.path)
        } else {
            format!("https://{}{}?{}", self.host, self.path, query)
        }
    }
}

/// Headers produced by [`RequestSigner::sign`].
///
/// Names keep the case they were given with, but lookups and replacement
/// are case-insensitive so a name never appears twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignedHeaders(Vec<(String, String)>);

impl SignedHeaders {
    /// Insert a header, replacing the value of any header with the same
    /// name ignoring case.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let (name, value) = (name.into(), value.into());
        match self
            .0
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&name))
        {
            Some(entry) => *entry = (name, value),
            None => self.0.push((name, value)),
        }
    }

    /// Get a header value by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of headers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no headers.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert into a `http::HeaderMap`, marking `Authorization` sensitive.
    pub fn to_header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::with_capacity(self.0.len());
        for (k, v) in self.iter() {
            let name = HeaderName::from_bytes(k.as_bytes())?;
            let mut value = HeaderValue::from_str(v)?;
            if name == http::header::AUTHORIZATION {
                value.set_sensitive(true);
            }
            map.insert(name, value);
        }
        Ok(map)
    }
}

/// Percent-encode `s` per RFC 3986.
///
/// Only `A-Z a-z 0-9 - . _ ~` stay raw; `! ' ( ) *` are encoded too.
/// `encode_slash = false` keeps `/` raw, which is what path segments need.
/// Query keys and values are always encoded with `encode_slash = true`.
pub fn uri_encode(s: &str, encode_slash: bool) -> String {
    if encode_slash {
        utf8_percent_encode(s, &URI_ENCODE_SET).to_string()
    } else {
        utf8_percent_encode(s, &PATH_ENCODE_SET).to_string()
    }
}

/// Canonical query string: keys sorted by raw key, keys and values
/// encoded with [`uri_encode`], joined as `key=value` with `&`.
///
/// ```
/// use std::collections::BTreeMap;
/// use volcsign_ark::canonical_query_string;
///
/// let query = BTreeMap::from([
///     ("B".to_string(), "2".to_string()),
///     ("A".to_string(), "1 + 1".to_string()),
/// ]);
/// assert_eq!(canonical_query_string(&query), "A=1%20%2B%201&B=2");
/// ```
pub fn canonical_query_string(query: &BTreeMap<String, String>) -> String {
    query
        .iter()
        .map(|(k, v)| format!("{}={}", uri_encode(k, true), uri_encode(v, true)))
        .collect::<Vec<_>>()
        .join("&")
}

/// RequestSigner implements the Volcengine HMAC-SHA256 signature.
///
/// The scheme follows AWS SigV4 with its own names: algorithm `HMAC-SHA256`,
/// headers `X-Date` / `X-Content-Sha256`, scope terminator `request`, and
/// the secret key used as-is for the first HMAC round.
#[derive(Debug)]
pub struct RequestSigner {
    service: String,

    time: Option<DateTime>,
}

impl Default for RequestSigner {
    fn default() -> Self {
        Self::new(ARK_SERVICE)
    }
}

impl RequestSigner {
    /// Create a new signer for `service`.
    ///
    /// `service` is only used by [`SignRequest::sign_request`]; [`RequestSigner::sign`]
    /// takes the service from the request.
    pub fn new(service: &str) -> Self {
        Self {
            service: service.to_string(),

            time: None,
        }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Sign `req` with `cred` and return the headers to send.
    ///
    /// The result holds `Host`, `X-Date`, `X-Content-Sha256`, the caller's
    /// headers (which win over the first three on a name clash) and
    /// `Authorization`.
    ///
    /// This never fails. An empty secret still yields a well-formed, if
    /// useless, signature.
    pub fn sign(&self, cred: &Credential, req: &SignableRequest) -> SignedHeaders {
        let now = self.time.unwrap_or_else(now);
        let date = format_date(now);
        let datetime = format_iso8601(now);
        let payload_hash = hex_sha256(&req.body);

        let mut headers = SignedHeaders::default();
        headers.insert(HOST, req.host.as_str());
        headers.insert(X_DATE, datetime.as_str());
        headers.insert(X_CONTENT_SHA256, payload_hash.as_str());
        for (k, v) in &req.headers {
            headers.insert(k.as_str(), v.as_str());
        }

        let (creq, signed_headers) = canonical_request_string(req, &headers, &payload_hash);

        // Scope: "20220313/<region>/<service>/request"
        let scope = format!(
            "{}/{}/{}/{}",
            date,
            cred.region(),
            req.service,
            SCOPE_TERMINATOR
        );
        debug!("calculated scope: {scope}");

        // StringToSign:
        //
        // HMAC-SHA256
        // 20220313T072004Z
        // 20220313/<region>/<service>/request
        // <hashed_canonical_request>
        let string_to_sign = [
            ALGORITHM,
            datetime.as_str(),
            scope.as_str(),
            hex_sha256(creq.as_bytes()).as_str(),
        ]
        .join("\n");
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key =
            generate_signing_key(&cred.secret_access_key, &date, cred.region(), &req.service);
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

        headers.insert(
            AUTHORIZATION,
            format!(
                "{} Credential={}/{}, SignedHeaders={}, Signature={}",
                ALGORITHM, cred.access_key_id, scope, signed_headers, signature
            ),
        );

        headers
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut Parts,
        body: &Bytes,
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let cred = credential.ok_or_else(|| Error::credential_invalid("missing credential"))?;

        let signable = SignableRequest::from_parts(req, body.clone(), &self.service)?;
        let signed = self.sign(cred, &signable);

        for (name, value) in signed.to_header_map()? {
            if let Some(name) = name {
                req.headers.insert(name, value);
            }
        }

        Ok(())
    }
}

/// Build the canonical request, returning it together with the signed
/// headers list.
///
/// ```text
/// <method>
/// <canonical uri>
/// <canonical query string>
/// <name>:<trimmed value>      (one line per header, sorted by lower-cased name)
///
/// <signed headers>
/// <hex sha256 of body>
/// ```
fn canonical_request_string(
    req: &SignableRequest,
    headers: &SignedHeaders,
    payload_hash: &str,
) -> (String, String) {
    let mut canonical_headers = headers
        .iter()
        .map(|(k, v)| (k.to_lowercase(), v.trim()))
        .collect::<Vec<_>>();
    canonical_headers.sort_by(|a, b| a.0.cmp(&b.0));

    let signed_headers = canonical_headers
        .iter()
        .map(|(k, _)| k.as_str())
        .collect::<Vec<_>>()
        .join(";");
    let canonical_headers = canonical_headers
        .iter()
        .map(|(k, v)| format!("{k}:{v}\n"))
        .collect::<String>();

    let canonical_uri = canonical_uri(&req.path);
    let canonical_query = canonical_query_string(&req.query);
    let creq = [
        req.method.as_str(),
        canonical_uri.as_str(),
        canonical_query.as_str(),
        canonical_headers.as_str(),
        signed_headers.as_str(),
        payload_hash,
    ]
    .join("\n");
    debug!("calculated canonical request: {creq}");

    (creq, signed_headers)
}

/// The path is decoded first so that an already encoded path is not
/// encoded twice.
fn canonical_uri(path: &str) -> String {
    if path.is_empty() {
        return DEFAULT_PATH.to_string();
    }

    uri_encode(&percent_decode_str(path).decode_utf8_lossy(), false)
}

fn generate_signing_key(secret: &str, date: &str, region: &str, service: &str) -> [u8; 32] {
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), date.as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), SCOPE_TERMINATOR.as_bytes())
}
