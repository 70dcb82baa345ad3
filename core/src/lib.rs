//! Shared building blocks for signing Volcengine API requests.
//!
//! Service crates such as `volcsign-ark` build on three pieces defined here:
//!
//! - [`Context`] injects side effects ([`HttpSend`], [`Env`]) so that
//!   providers and clients can be tested without network or process env.
//! - [`ProvideCredential`] loads a credential, [`SignRequest`] signs an
//!   `http` request with it, and [`SigningCredential`] tells whether a
//!   credential is complete.
//! - [`Error`] is the single error type, classified by [`ErrorKind`].
//!
//! [`hash`], [`time`] and [`utils`] hold the digest, timestamp and secret
//! redaction helpers that signers share.
//!
//! ```
//! use async_trait::async_trait;
//! use volcsign_core::{Context, ProvideCredential, Result, SigningCredential, StaticEnv};
//!
//! #[derive(Clone, Debug)]
//! struct Token(String);
//!
//! impl SigningCredential for Token {
//!     fn is_valid(&self) -> bool {
//!         !self.0.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct TokenFromEnv;
//!
//! #[async_trait]
//! impl ProvideCredential for TokenFromEnv {
//!     type Credential = Token;
//!
//!     async fn provide_credential(&self, ctx: &Context) -> Result<Option<Token>> {
//!         Ok(ctx.env_var("MY_TOKEN").map(Token))
//!     }
//! }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod api;
pub use api::{ProvideCredential, SignRequest, SigningCredential};

mod context;
pub use context::{Context, Env, HttpSend, NoopEnv, NoopHttpSend, OsEnv, StaticEnv};

mod error;
pub use error::{Error, ErrorKind, Result};
