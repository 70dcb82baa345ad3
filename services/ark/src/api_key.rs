//! API-key authentication for the Ark inference API.
//!
//! This is unrelated to the HMAC-SHA256 signing used by the control plane:
//! the inference API only checks a static token carried in one header.

use crate::constants::X_API_ACCESS_KEY;
use http::header::AUTHORIZATION;
use http::request::Parts;
use http::{HeaderName, HeaderValue};
use std::fmt::{Debug, Formatter};
use std::str::FromStr;
use volcsign_core::utils::Redact;
use volcsign_core::{Error, Result};

/// Which header carries the API key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthType {
    /// `Authorization: Bearer <token>`
    #[default]
    Bearer,
    /// `X-Api-Access-Key: <token>`
    XApiKey,
}

impl FromStr for AuthType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bearer" => Ok(AuthType::Bearer),
            "x-api-key" => Ok(AuthType::XApiKey),
            v => Err(Error::config_invalid(format!(
                "auth type must be `bearer` or `x-api-key`, got `{v}`"
            ))),
        }
    }
}

/// ApiKeyAuth attaches an Ark API key to inference requests.
#[derive(Clone)]
pub struct ApiKeyAuth {
    token: String,
    auth_type: AuthType,
}

impl Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyAuth")
            .field("token", &Redact::from(&self.token))
            .field("auth_type", &self.auth_type)
            .finish()
    }
}

impl ApiKeyAuth {
    /// Create a new ApiKeyAuth.
    pub fn new(token: &str, auth_type: AuthType) -> Self {
        Self {
            token: token.to_string(),
            auth_type,
        }
    }

    /// Set the selected header on the request, removing the other one.
    pub fn apply(&self, parts: &mut Parts) -> Result<()> {
        let (name, value) = match self.auth_type {
            AuthType::Bearer => (AUTHORIZATION, format!("Bearer {}", self.token)),
            AuthType::XApiKey => (
                HeaderName::from_bytes(X_API_ACCESS_KEY.as_bytes())?,
                self.token.clone(),
            ),
        };
        let mut value = HeaderValue::from_str(&value)?;
        value.set_sensitive(true);

        parts.headers.remove(AUTHORIZATION);
        parts.headers.remove(X_API_ACCESS_KEY);
        parts.headers.insert(name, value);
        Ok(())
    }
}
