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

//! Discovery of Running Ark endpoints for interactive selection.

use crate::constants::*;
use crate::endpoint::{EndpointItem, ListEndpointsResponse};
use crate::provide_credential::ConfigCredentialProvider;
use crate::{Config, Credential, RequestSigner, SignableRequest};
use bytes::Bytes;
use feruca::{Collator, Locale, Tailoring};
use http::Method;
use log::{debug, warn};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use volcsign_core::{Context, Error, ProvideCredential, Result, SigningCredential};

/// One row of a selection list.
///
/// An empty `value` marks an informational row that cannot be selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Text shown to the user.
    pub display_label: String,
    /// Endpoint id, or empty for informational rows.
    pub value: String,
}

impl SearchResult {
    fn sentinel(label: impl fmt::Display) -> Self {
        Self {
            display_label: label.to_string(),
            value: String::new(),
        }
    }

    /// Whether this row is an endpoint the user can pick.
    pub fn is_selectable(&self) -> bool {
        !self.value.is_empty()
    }
}

impl From<&EndpointItem> for SearchResult {
    fn from(item: &EndpointItem) -> Self {
        Self {
            display_label: item.label(),
            value: item.id.clone(),
        }
    }
}

/// Outcome of a discovery, before it is flattened into rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Running endpoints matching the filter, sorted by name.
    Found(Vec<EndpointItem>),
    /// Nothing to show.
    Empty(EmptyReason),
    /// Discovery could not complete.
    Error(SearchError),
}

impl SearchOutcome {
    /// Flatten into selection rows.
    ///
    /// `Found` is never empty, so the result always holds at least one row.
    pub fn into_results(self) -> Vec<SearchResult> {
        match self {
            SearchOutcome::Found(items) => items.iter().map(SearchResult::from).collect(),
            SearchOutcome::Empty(reason) => vec![SearchResult::sentinel(reason)],
            SearchOutcome::Error(err) => vec![SearchResult::sentinel(err)],
        }
    }
}

/// Why a discovery found nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyReason {
    /// No endpoint is Running.
    NoRunning,
    /// Running endpoints exist but none matches the filter.
    NoMatch(String),
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyReason::NoRunning => write!(f, "No Running endpoints"),
            EmptyReason::NoMatch(filter) => write!(f, "No Running endpoint matches \"{filter}\""),
        }
    }
}

/// Why a discovery could not complete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Access key id or secret access key is not configured.
    #[error("Please configure Access Key ID and Secret Access Key to list endpoints")]
    MissingCredential,
    /// The API answered with an error in `ResponseMetadata`.
    #[error("API Error: {code} - {message}")]
    Api {
        /// Error code, verbatim.
        code: String,
        /// Error message, verbatim.
        message: String,
    },
    /// Credential loading, transport or decoding failed.
    #[error("Failed to list endpoints: {0}")]
    Failed(String),
}

/// EndpointClient lists the Ark endpoints visible to a credential.
///
/// It holds no state between calls: every search loads the credential,
/// signs and sends exactly one request. Timeouts belong to the
/// [`volcsign_core::HttpSend`] configured in the context.
///
/// ```no_run
/// use volcsign_ark::{EndpointClient, EnvCredentialProvider};
/// use volcsign_core::{Context, OsEnv};
/// use volcsign_http_send_reqwest::ReqwestHttpSend;
///
/// # async fn example() {
/// let ctx = Context::new()
///     .with_http_send(ReqwestHttpSend::default())
///     .with_env(OsEnv);
/// let client = EndpointClient::new(ctx, EnvCredentialProvider::new());
///
/// for row in client.search(Some("doubao")).await {
///     println!("{} => {}", row.display_label, row.value);
/// }
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EndpointClient {
    ctx: Context,
    credential: Arc<dyn ProvideCredential<Credential = Credential>>,
    signer: Arc<RequestSigner>,
    host: String,
}

impl EndpointClient {
    /// Create a new client loading credentials from `provider`.
    pub fn new(ctx: Context, provider: impl ProvideCredential<Credential = Credential>) -> Self {
        Self {
            ctx,
            credential: Arc::new(provider),
            signer: Arc::new(RequestSigner::new(ARK_SERVICE)),
            host: DEFAULT_HOST.to_string(),
        }
    }

    /// Create a new client with credentials and host taken from `config`.
    pub fn from_config(ctx: Context, config: Config) -> Self {
        let host = config.host().to_string();
        Self::new(ctx, ConfigCredentialProvider::new(Arc::new(config))).with_host(&host)
    }

    /// Set the control-plane host.
    pub fn with_host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    /// Replace the signer, for example one with a fixed signing time.
    pub fn with_signer(mut self, signer: RequestSigner) -> Self {
        self.signer = Arc::new(signer);
        self
    }

    /// The signable description of the `ListEndpoints` call.
    pub fn list_endpoints_request(&self) -> SignableRequest {
        SignableRequest::new(Method::GET, &self.host, ARK_SERVICE)
            .with_query("Action", LIST_ENDPOINTS_ACTION)
            .with_query("Version", LIST_ENDPOINTS_VERSION)
            .with_query("PageSize", LIST_ENDPOINTS_PAGE_SIZE.to_string())
    }

    /// Call `ListEndpoints` and decode the response.
    ///
    /// The body is decoded whatever the HTTP status: an error carried in
    /// `ResponseMetadata` is returned as `Ok` for the caller to inspect.
    pub async fn list_endpoints(&self, cred: &Credential) -> Result<ListEndpointsResponse> {
        let req = self.list_endpoints_request();
        let url = req.url();
        let headers = self.signer.sign(cred, &req);

        let mut http_req = http::Request::builder()
            .method(req.method.clone())
            .uri(url.as_str())
            .body(Bytes::new())?;
        *http_req.headers_mut() = headers.to_header_map()?;

        debug!("sending ListEndpoints request to {url}");
        let resp = self.ctx.http_send(http_req).await?;
        let status = resp.status();
        let body = resp.into_body();
        debug!("got ListEndpoints response: {status}, {} bytes", body.len());

        match serde_json::from_slice::<ListEndpointsResponse>(&body) {
            Ok(v) if status.is_success() || v.response_metadata.error.is_some() => Ok(v),
            Err(err) if status.is_success() => {
                Err(Error::unexpected("failed to decode ListEndpoints response").with_source(err))
            }
            _ => Err(Error::unexpected(format!(
                "ListEndpoints returned {status}: {}",
                String::from_utf8_lossy(&body)
            ))),
        }
    }

    /// Discover Running endpoints matching `filter`.
    ///
    /// Never fails: every problem becomes a [`SearchOutcome::Error`].
    /// An empty filter is the same as no filter.
    pub async fn discover(&self, filter: Option<&str>) -> SearchOutcome {
        let filter = filter.filter(|v| !v.is_empty());

        let cred = match self.credential.provide_credential(&self.ctx).await {
            Ok(Some(cred)) if cred.is_valid() => cred,
            Ok(_) => {
                debug!("credential not configured, skip listing endpoints");
                return SearchOutcome::Error(SearchError::MissingCredential);
            }
            Err(err) => {
                warn!("failed to load credential: {err:?}");
                return SearchOutcome::Error(SearchError::Failed(err.to_detailed_string()));
            }
        };

        let resp = match self.list_endpoints(&cred).await {
            Ok(resp) => resp,
            Err(err) => {
                warn!("failed to list endpoints: {err:?}");
                return SearchOutcome::Error(SearchError::Failed(err.to_detailed_string()));
            }
        };

        if let Some(err) = resp.response_metadata.error {
            warn!(
                "ListEndpoints failed with {} (request id: {})",
                err.code, resp.response_metadata.request_id
            );
            return SearchOutcome::Error(SearchError::Api {
                code: err.code,
                message: err.message,
            });
        }

        select_endpoints(resp.into_items(), filter)
    }

    /// Discover Running endpoints matching `filter` as selection rows.
    ///
    /// Always returns at least one row; informational rows have an empty value.
    pub async fn search(&self, filter: Option<&str>) -> Vec<SearchResult> {
        self.discover(filter).await.into_results()
    }
}

/// Keep Running endpoints matching `filter`, sorted by name.
///
/// Names are collated with the CLDR root locale: punctuation before digits
/// before letters, accents as secondary differences, lower case first.
/// The sort is stable so endpoints with equal names keep their order.
pub fn select_endpoints(items: Vec<EndpointItem>, filter: Option<&str>) -> SearchOutcome {
    let total = items.len();
    let mut items = items
        .into_iter()
        .filter(EndpointItem::is_running)
        .filter(|item| filter.map_or(true, |f| item.matches(f)))
        .collect::<Vec<_>>();
    let mut collator = name_collator();
    items.sort_by(|a, b| collator.collate(a.name.as_str(), b.name.as_str()));
    debug!("selected {} of {total} endpoints", items.len());

    match (items.is_empty(), filter) {
        (false, _) => SearchOutcome::Found(items),
        (true, Some(f)) => SearchOutcome::Empty(EmptyReason::NoMatch(f.to_string())),
        (true, None) => SearchOutcome::Empty(EmptyReason::NoRunning),
    }
}

/// Non-ignorable collation so punctuation keeps its weight.
fn name_collator() -> Collator {
    Collator::new(Tailoring::Cldr(Locale::Root), false, true)
}
