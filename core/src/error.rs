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

use std::fmt;
use thiserror::Error;

/// Error returned by volcsign operations.
///
/// `Display` prints only the message. Use [`Error::to_detailed_string`]
/// when the source chain should be shown as well.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// What went wrong, coarsely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The credential is missing or unusable.
    CredentialInvalid,
    /// The request cannot be signed or sent, for example an invalid header.
    RequestInvalid,
    /// A configuration value is malformed.
    ConfigInvalid,
    /// Transport, decoding and everything else.
    Unexpected,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::CredentialInvalid => "invalid credential",
            ErrorKind::RequestInvalid => "invalid request",
            ErrorKind::ConfigInvalid => "invalid configuration",
            ErrorKind::Unexpected => "unexpected error",
        })
    }
}

impl Error {
    /// Create an error of `kind`.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attach the underlying cause.
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Render the message followed by the chain of sources, separated by `: `.
    pub fn to_detailed_string(&self) -> String {
        match &self.source {
            None => self.message.clone(),
            Some(source) => format!("{}: {:#}", self.message, source),
        }
    }

    /// Shorthand for [`ErrorKind::CredentialInvalid`].
    pub fn credential_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialInvalid, message)
    }

    /// Shorthand for [`ErrorKind::RequestInvalid`].
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Shorthand for [`ErrorKind::ConfigInvalid`].
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Shorthand for [`ErrorKind::Unexpected`].
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

/// Result with [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

// Errors raised while turning caller input into an `http` request are all
// request errors.
macro_rules! impl_from_request_error {
    ($($ty:ty => $msg:literal),* $(,)?) => {
        $(
            impl From<$ty> for Error {
                fn from(err: $ty) -> Self {
                    Self::request_invalid($msg).with_source(err)
                }
            }
        )*
    };
}

impl_from_request_error! {
    http::Error => "failed to build http request",
    http::header::InvalidHeaderName => "invalid header name",
    http::header::InvalidHeaderValue => "invalid header value",
    http::header::ToStrError => "header value is not visible ascii",
    http::uri::InvalidUri => "invalid uri",
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind() {
        let err = Error::credential_invalid("missing access key");
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
        assert_eq!(err.to_string(), "missing access key");
        assert_eq!(ErrorKind::ConfigInvalid.to_string(), "invalid configuration");
    }

    #[test]
    fn test_detailed_string_includes_source() {
        let err = Error::unexpected("failed to send request")
            .with_source(anyhow::anyhow!("connection refused"));
        assert_eq!(err.to_string(), "failed to send request");
        assert_eq!(
            err.to_detailed_string(),
            "failed to send request: connection refused"
        );
    }

    #[test]
    fn test_from_http_error() {
        let err = Error::from(
            http::HeaderValue::from_str("a\nb").expect_err("newline is not allowed"),
        );
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
        assert!(err
            .to_detailed_string()
            .starts_with("invalid header value: "));
    }
}
