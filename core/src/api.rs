use crate::{Context, Result};
use bytes::Bytes;
use http::request::Parts;
use std::fmt::Debug;

/// A credential that a signer can use.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Whether every field needed for signing is present.
    fn is_valid(&self) -> bool;
}

impl<T: SigningCredential> SigningCredential for Option<T> {
    fn is_valid(&self) -> bool {
        self.as_ref().is_some_and(T::is_valid)
    }
}

/// A source of credentials: static values, environment, config files.
///
/// `Ok(None)` means the source has nothing configured; errors are reserved
/// for sources that exist but cannot be read.
#[async_trait::async_trait]
pub trait ProvideCredential: Debug + Send + Sync + Unpin + 'static {
    /// Credential returned by this provider.
    type Credential: Send + Sync + Unpin + 'static;

    /// Load the credential.
    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>>;
}

/// Signs an `http` request in place.
#[async_trait::async_trait]
pub trait SignRequest: Debug + Send + Sync + Unpin + 'static {
    /// Credential used by this signer.
    type Credential: Send + Sync + Unpin + 'static;

    /// Add signature headers to `req`.
    ///
    /// `body` is the payload that will be sent with `req`; schemes that
    /// hash the payload need it.
    ///
    /// Implementations decide what a missing credential means. Most return
    /// an error.
    async fn sign_request(
        &self,
        ctx: &Context,
        req: &mut Parts,
        body: &Bytes,
        credential: Option<&Self::Credential>,
    ) -> Result<()>;
}
