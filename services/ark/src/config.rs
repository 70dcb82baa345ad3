use crate::api_key::AuthType;
use crate::constants::*;
use std::fmt::{Debug, Formatter};
use volcsign_core::utils::Redact;
use volcsign_core::Context;

/// Config for Volcengine Ark services.
#[derive(Clone, Default)]
pub struct Config {
    /// Access key id (AK) for the control-plane API.
    pub access_key_id: Option<String>,
    /// Secret access key (SK) for the control-plane API.
    pub secret_access_key: Option<String>,
    /// Region for volcengine services, defaults to `cn-beijing`.
    pub region: Option<String>,
    /// Control-plane host, defaults to `open.volcengineapi.com`.
    pub host: Option<String>,
    /// Ark API key for the inference (model) API.
    pub access_token: Option<String>,
    /// Which header carries `access_token`.
    pub auth_type: Option<AuthType>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("region", &self.region)
            .field("host", &self.host)
            .field("access_token", &Redact::from(&self.access_token))
            .field("auth_type", &self.auth_type)
            .finish()
    }
}

impl Config {
    /// Load config from environment variables.
    ///
    /// An `ARK_AUTH_TYPE` that is neither `bearer` nor `x-api-key` is
    /// ignored with a warning.
    pub fn from_env(ctx: &Context) -> Self {
        Self {
            access_key_id: ctx
                .env_var(VOLCENGINE_ACCESS_KEY_ID)
                .or_else(|| ctx.env_var(VOLC_ACCESSKEY)),
            secret_access_key: ctx
                .env_var(VOLCENGINE_SECRET_ACCESS_KEY)
                .or_else(|| ctx.env_var(VOLC_SECRETKEY)),
            region: ctx
                .env_var(VOLCENGINE_REGION)
                .or_else(|| ctx.env_var(VOLC_REGION)),
            host: ctx.env_var(VOLCENGINE_ENDPOINT),
            access_token: ctx.env_var(ARK_API_KEY),
            auth_type: ctx.env_var(ARK_AUTH_TYPE).and_then(|v| match v.parse() {
                Ok(v) => Some(v),
                Err(err) => {
                    log::warn!("ignore {ARK_AUTH_TYPE}: {err}");
                    None
                }
            }),
        }
    }

    /// Region, or `cn-beijing` when unset or empty.
    pub fn region(&self) -> &str {
        self.region
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_REGION)
    }

    /// Host, or `open.volcengineapi.com` when unset or empty.
    pub fn host(&self) -> &str {
        self.host
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_HOST)
    }
}
