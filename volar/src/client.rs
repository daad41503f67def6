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

use crate::constants::{API_KEY, SIGNATURE};
use crate::{Body, Config, Response};
use bytes::Bytes;
use http::{header, Method};
use log::debug;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;
use volar_core::utils::{trim_route, Redact};
use volar_core::{Context, Error, ErrorKind, Params, Result, Signer};
use volar_s3::DEFAULT_UPLOAD_TIMEOUT;

/// Client for the Volar CMS.
///
/// Every call signs its own request and returns its own result, so a client
/// can be cloned and shared between tasks freely.
#[derive(Clone)]
pub struct Client {
    pub(crate) ctx: Context,
    inner: Arc<Inner>,
}

struct Inner {
    api_key: String,
    signer: Signer,
    host: String,
    secure: bool,
    s3_region: Option<String>,
    s3_endpoint: Option<String>,
    upload_timeout: Duration,
}

impl Debug for Client {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("ctx", &self.ctx)
            .field("api_key", &Redact::from(&self.inner.api_key))
            .field("signer", &self.inner.signer)
            .field("host", &self.inner.host)
            .field("secure", &self.inner.secure)
            .finish()
    }
}

impl Client {
    /// Create a new client.
    ///
    /// Returns a `ConfigInvalid` error if `api_key`, `secret` or `base_url`
    /// is missing.
    pub fn new(ctx: Context, config: Config) -> Result<Self> {
        let api_key = required(config.api_key, "api_key")?;
        let secret = required(config.secret, "secret")?;
        let base_url = required(config.base_url, "base_url")?;

        let host = base_url.trim_end_matches('/');
        if host.contains("://") {
            return Err(Error::config_invalid(format!(
                "base_url {base_url} must be a host without scheme, use secure to pick https"
            )));
        }

        Ok(Self {
            ctx,
            inner: Arc::new(Inner {
                api_key,
                signer: Signer::new(secret),
                host: host.to_string(),
                secure: config.secure.unwrap_or(false),
                s3_region: config.s3_region.filter(|v| !v.is_empty()),
                s3_endpoint: config.s3_endpoint.filter(|v| !v.is_empty()),
                upload_timeout: config.upload_timeout.unwrap_or(DEFAULT_UPLOAD_TIMEOUT),
            }),
        })
    }

    /// Build a client from the environment, see [`Config::from_env`].
    pub fn from_env(ctx: Context) -> Result<Self> {
        let config = Config::default().from_env(&ctx);
        Self::new(ctx, config)
    }

    pub(crate) fn s3_region(&self) -> Option<&str> {
        self.inner.s3_region.as_deref()
    }

    pub(crate) fn s3_endpoint(&self) -> Option<&str> {
        self.inner.s3_endpoint.as_deref()
    }

    pub(crate) fn upload_timeout(&self) -> Duration {
        self.inner.upload_timeout
    }

    /// Address of `route` on the CMS.
    pub fn url(&self, route: &str) -> String {
        let scheme = if self.inner.secure { "https" } else { "http" };
        format!("{scheme}://{}/{}", self.inner.host, trim_route(route))
    }

    /// Send a signed request to the CMS.
    ///
    /// `api_key` and `signature` are added to `params`, which travel on the
    /// query string. `body` is only sent with `POST`.
    ///
    /// Every failure to get a JSON document back is a `Transport` error. The
    /// status code is not inspected: a JSON error document is returned as is.
    pub async fn request(
        &self,
        route: &str,
        method: Method,
        mut params: Params,
        body: Option<Body>,
    ) -> Result<Response> {
        let route = trim_route(route);
        let body = if method == Method::GET {
            if body.is_some() {
                debug!("dropping body of GET {route}");
            }
            None
        } else {
            body
        };

        params.insert(API_KEY, self.inner.api_key.as_str());
        let mut query = params.canonicalize()?;
        let signed_body = match &body {
            Some(Body::Text(v)) => Some(v.as_str()),
            _ => None,
        };
        let signature = self.inner.signer.sign(&method, route, &query, signed_body);
        query.push(SIGNATURE, signature);

        let url = format!("{}?{}", self.url(route), query.to_query_string());
        let mut req = http::Request::builder().method(method.clone()).uri(url);
        let payload = match body {
            None => Bytes::new(),
            Some(Body::Text(v)) => Bytes::from(v),
            Some(Body::Form(form)) => {
                let (content_type, payload) = form.encode();
                req = req.header(header::CONTENT_TYPE, content_type);
                payload
            }
        };
        let req = req.body(payload)?;

        debug!("sending {method} {route} with {} parameters", query.len());
        let resp = self.ctx.http_send(req).await.map_err(|e| match e.kind() {
            ErrorKind::Transport => e,
            _ => Error::transport(format!("request failed: {}", e.message())).with_source(e),
        })?;
        debug!("{method} {route} answered with {}", resp.status());

        let value: serde_json::Value = serde_json::from_slice(resp.body()).map_err(|e| {
            Error::transport(format!(
                "response of {route} is not valid JSON ({}): {e}",
                resp.status()
            ))
            .with_source(e)
        })?;

        Ok(Response::new(value))
    }
}

fn required(v: Option<String>, name: &str) -> Result<String> {
    match v {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::config_invalid(format!("{name} is required"))),
    }
}
