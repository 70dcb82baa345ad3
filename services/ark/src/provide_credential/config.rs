use crate::{Config, Credential};
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;
use volcsign_core::{Context, ProvideCredential, Result};

/// Static configuration based loader.
#[derive(Debug)]
pub struct ConfigCredentialProvider {
    config: Arc<Config>,
}

impl ConfigCredentialProvider {
    /// Create a new ConfigCredentialProvider
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        let config = self.config.as_ref();

        match (&config.access_key_id, &config.secret_access_key) {
            (Some(ak), Some(sk)) => {
                debug!("loading credential from config");
                Ok(Some(Credential::new(ak, sk, config.region())))
            }
            _ => {
                debug!("incomplete config, skipping");
                Ok(None)
            }
        }
    }
}
