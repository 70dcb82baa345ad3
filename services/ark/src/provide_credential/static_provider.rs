use crate::Credential;
use async_trait::async_trait;
use volcsign_core::{Context, ProvideCredential, Result};

/// StaticCredentialProvider provides static Volcengine credentials.
///
/// This provider is used when you have the access key ID and secret access key
/// directly, for example from a host application's credential store.
///
/// Empty keys are returned as-is; callers decide whether an incomplete
/// credential is usable through `SigningCredential::is_valid`.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    credential: Credential,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider with access key ID and secret access key.
    pub fn new(access_key_id: &str, secret_access_key: &str) -> Self {
        Self {
            credential: Credential::new(access_key_id, secret_access_key, ""),
        }
    }

    /// Set the region.
    pub fn with_region(mut self, region: &str) -> Self {
        self.credential.region = region.to_string();
        self
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(self.credential.clone()))
    }
}
