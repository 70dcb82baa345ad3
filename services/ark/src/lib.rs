//! Volcengine request signing and Ark endpoint discovery.
//!
//! Control-plane requests are signed with HMAC-SHA256 over a canonical form
//! of the request, scoped to `<date>/<region>/<service>/request`:
//!
//! ```
//! use http::Method;
//! use volcsign_ark::{Credential, RequestSigner, SignableRequest};
//!
//! let cred = Credential::new("AKLTexample", "secretExample", "cn-beijing");
//! let req = SignableRequest::new(Method::GET, "open.volcengineapi.com", "ark")
//!     .with_query("Action", "ListEndpoints")
//!     .with_query("Version", "2024-01-01");
//!
//! let headers = RequestSigner::new("ark").sign(&cred, &req);
//! assert!(headers
//!     .get("Authorization")
//!     .is_some_and(|v| v.starts_with("HMAC-SHA256 Credential=AKLTexample/")));
//! ```
//!
//! [`EndpointClient`] builds on the signer to list the Running Ark
//! endpoints of an account as selection rows.

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod api_key;
pub use api_key::{ApiKeyAuth, AuthType};

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod discovery;
pub use discovery::{
    select_endpoints, EmptyReason, EndpointClient, SearchError, SearchOutcome, SearchResult,
};

mod endpoint;
pub use endpoint::{
    ApiError, EndpointItem, EndpointStatus, FoundationModel, ListEndpointsResponse,
    ListEndpointsResult, ModelInfo, ModelReference, ResponseMetadata,
};

mod provide_credential;
pub use provide_credential::{
    ConfigCredentialProvider, EnvCredentialProvider, StaticCredentialProvider,
};

mod sign_request;
pub use sign_request::{
    canonical_query_string, uri_encode, RequestSigner, SignableRequest, SignedHeaders,
};

mod constants;
