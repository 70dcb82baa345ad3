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

use crate::{Error, Result};
use bytes::Bytes;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Context carries the side effects a credential provider or a client may
/// need: sending HTTP requests and reading the environment.
///
/// Nothing is wired up by default. A fresh context answers every HTTP
/// request with an error and sees an empty environment, which keeps unit
/// tests hermetic.
///
/// ```
/// use volcsign_core::{Context, OsEnv};
///
/// let ctx = Context::new().with_env(OsEnv);
/// let _region = ctx.env_var("VOLCENGINE_REGION");
/// ```
#[derive(Clone)]
pub struct Context {
    http: Arc<dyn HttpSend>,
    env: Arc<dyn Env>,
}

impl Debug for Context {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("http", &self.http)
            .field("env", &self.env)
            .finish()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a context backed by [`NoopHttpSend`] and [`NoopEnv`].
    pub fn new() -> Self {
        Self {
            http: Arc::new(NoopHttpSend),
            env: Arc::new(NoopEnv),
        }
    }

    /// Use `http` to send requests.
    pub fn with_http_send(mut self, http: impl HttpSend) -> Self {
        self.http = Arc::new(http);
        self
    }

    /// Use `env` to look up environment variables.
    pub fn with_env(mut self, env: impl Env) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// Send `req` through the configured [`HttpSend`].
    #[inline]
    pub async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.http.http_send(req).await
    }

    /// Look up an environment variable.
    ///
    /// A variable that is set to the empty string is reported as unset.
    pub fn env_var(&self, key: &str) -> Option<String> {
        self.env.var(key).filter(|v| !v.is_empty())
    }
}

/// HttpSend sends a request and buffers the whole response body.
///
/// Implementations own the transport policy: timeouts, proxies and TLS are
/// configured on the underlying client, never by the caller of this trait.
#[async_trait::async_trait]
pub trait HttpSend: Debug + Send + Sync + 'static {
    /// Send `req` and return the response.
    ///
    /// Any HTTP status is a successful send; only transport failures are
    /// errors.
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>>;
}

/// Env is a read-only view of environment variables.
pub trait Env: Debug + Send + Sync + 'static {
    /// Value of `key`, or `None` if it is unset or not valid UTF-8.
    fn var(&self, key: &str) -> Option<String>;
}

/// The environment of the current process.
#[derive(Debug, Copy, Clone)]
pub struct OsEnv;

impl Env for OsEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// A fixed set of variables, mostly for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    /// Variables visible through this env.
    pub envs: HashMap<String, String>,
}

impl Env for StaticEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.envs.get(key).cloned()
    }
}

/// HttpSend used when no client is configured; every send fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHttpSend;

#[async_trait::async_trait]
impl HttpSend for NoopHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        Err(Error::unexpected(format!(
            "no http client configured to send request to {}",
            req.uri()
        )))
    }
}

/// Env used when none is configured; every variable is unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEnv;

impl Env for NoopEnv {
    fn var(&self, _: &str) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_static_env() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                ("VOLCENGINE_REGION".to_string(), "cn-shanghai".to_string()),
                ("VOLCENGINE_ENDPOINT".to_string(), String::new()),
            ]),
        });

        assert_eq!(
            ctx.env_var("VOLCENGINE_REGION"),
            Some("cn-shanghai".to_string())
        );
        assert_eq!(ctx.env_var("VOLCENGINE_ENDPOINT"), None);
        assert_eq!(ctx.env_var("VOLC_REGION"), None);
    }

    #[test]
    fn test_noop_env() {
        assert_eq!(Context::new().env_var("PATH"), None);
    }

    #[tokio::test]
    async fn test_noop_http_send() -> anyhow::Result<()> {
        let req = http::Request::builder()
            .uri("https://open.volcengineapi.com/")
            .body(Bytes::new())?;

        let err = Context::new()
            .http_send(req)
            .await
            .expect_err("must fail without client");
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert!(err.to_string().contains("open.volcengineapi.com"));
        Ok(())
    }
}
