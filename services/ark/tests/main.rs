mod live;
mod signing;

use async_trait::async_trait;
use bytes::Bytes;
use http::StatusCode;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use volcsign_core::{Error, HttpSend, Result};

/// A recorded request: method, uri and headers.
pub type Recorded = (http::Method, String, http::HeaderMap);

/// HttpSend returning a canned response and recording every request.
#[derive(Debug, Clone)]
pub struct MockHttpSend {
    status: StatusCode,
    body: Bytes,
    calls: Arc<AtomicUsize>,
    last: Arc<Mutex<Option<Recorded>>>,
}

impl MockHttpSend {
    pub fn new(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: Bytes::from(body.to_string()),
            calls: Arc::default(),
            last: Arc::default(),
        }
    }

    pub fn ok(body: &str) -> Self {
        Self::new(StatusCode::OK, body)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<Recorded> {
        self.last.lock().expect("lock must not be poisoned").clone()
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().expect("lock must not be poisoned") = Some((
            req.method().clone(),
            req.uri().to_string(),
            req.headers().clone(),
        ));

        Ok(http::Response::builder()
            .status(self.status)
            .body(self.body.clone())?)
    }
}

/// HttpSend that always fails like an unreachable host.
#[derive(Debug, Clone, Default)]
pub struct FailingHttpSend {
    calls: Arc<AtomicUsize>,
}

impl FailingHttpSend {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpSend for FailingHttpSend {
    async fn http_send(&self, _: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(Error::unexpected("failed to send http request")
            .with_source(anyhow::anyhow!("connection refused")))
    }
}
