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

//! Reqwest-based HTTP client implementation for volar.
//!
//! This crate provides `ReqwestHttpSend`, which implements the `HttpSend`
//! trait from `volar_core` on top of a `reqwest::Client`.
//!
//! ## Example
//!
//! ```no_run
//! use std::time::Duration;
//! use volar_core::Context;
//! use volar_http_send_reqwest::ReqwestHttpSend;
//!
//! let ctx = Context::new()
//!     .with_http_send(ReqwestHttpSend::default().with_timeout(Duration::from_secs(120)));
//! ```
//!
//! ## Timeouts
//!
//! Requests sent through [`ReqwestHttpSend::default`] give up after
//! [`DEFAULT_TIMEOUT`]. A [`RequestTimeout`] extension on a request wins over
//! it, which is how object store writes get their longer timeout.

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use reqwest::{Client, Request};
use std::time::Duration;
use volar_core::{Error, HttpSend, RequestTimeout, Result};

/// Timeout applied to every request when no client is supplied.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Reqwest-based implementation of the `HttpSend` trait.
#[derive(Debug)]
pub struct ReqwestHttpSend {
    client: Client,
    timeout: Option<Duration>,
}

impl Default for ReqwestHttpSend {
    fn default() -> Self {
        Self {
            client: Client::new(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    ///
    /// The client's own timeout settings are used as is.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    /// Set the per request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn timeout_for(&self, req: &http::Request<Bytes>) -> Option<Duration> {
        req.extensions()
            .get::<RequestTimeout>()
            .map(|v| v.0)
            .or(self.timeout)
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let timeout = self.timeout_for(&req);
        let mut req = Request::try_from(req)
            .map_err(|e| Error::request_invalid("failed to convert http request").with_source(e))?;
        if let Some(timeout) = timeout {
            *req.timeout_mut() = Some(timeout);
        }

        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::transport(format!("request failed: {e}")).with_source(e))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| Error::transport(format!("failed to read response body: {e}")).with_source(e))?;
        Ok(http::Response::from_parts(parts, bs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use volar_core::ErrorKind;

    #[test]
    fn test_timeouts() {
        assert_eq!(ReqwestHttpSend::default().timeout, Some(DEFAULT_TIMEOUT));
        assert_eq!(ReqwestHttpSend::new(Client::new()).timeout, None);
        assert_eq!(
            ReqwestHttpSend::default()
                .with_timeout(Duration::from_secs(5))
                .timeout,
            Some(Duration::from_secs(5))
        );
    }

    #[test]
    fn test_request_timeout_overrides_default() {
        let send = ReqwestHttpSend::default();
        let mut req = http::Request::new(Bytes::new());
        assert_eq!(send.timeout_for(&req), Some(DEFAULT_TIMEOUT));

        req.extensions_mut()
            .insert(RequestTimeout(Duration::from_secs(3600)));
        assert_eq!(send.timeout_for(&req), Some(Duration::from_secs(3600)));

        let send = ReqwestHttpSend::new(Client::new());
        assert_eq!(send.timeout_for(&req), Some(Duration::from_secs(3600)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let send = ReqwestHttpSend::default().with_timeout(Duration::from_secs(2));
        let req = http::Request::builder()
            .uri("http://127.0.0.1:1/api/client/info")
            .body(Bytes::new())
            .expect("request must be valid");

        let err = send.http_send(req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
