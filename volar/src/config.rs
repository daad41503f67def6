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

use crate::constants::*;
use log::warn;
use std::fmt::{Debug, Formatter};
use std::time::Duration;
use volar_core::utils::Redact;
use volar_core::Context;

/// Config for the Volar CMS client.
///
/// Fields left as `None` can be filled from the environment with
/// [`Config::from_env`].
#[derive(Clone, Default)]
pub struct Config {
    /// API key of the api user.
    pub api_key: Option<String>,
    /// Shared secret used to sign every request.
    pub secret: Option<String>,
    /// Host of the CMS, like `vcloud.volarvideo.com`.
    pub base_url: Option<String>,
    /// Talk to the CMS over https, defaults to `false`.
    pub secure: Option<bool>,
    /// Region of the upload bucket, defaults to `us-east-1`.
    pub s3_region: Option<String>,
    /// Endpoint of an S3 compatible store used instead of AWS.
    pub s3_endpoint: Option<String>,
    /// Timeout of the object store write, defaults to one hour.
    ///
    /// CMS calls keep the timeout of the http sender.
    pub upload_timeout: Option<Duration>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &Redact::from(&self.api_key))
            .field("secret", &Redact::from(&self.secret))
            .field("base_url", &self.base_url)
            .field("secure", &self.secure)
            .field("s3_region", &self.s3_region)
            .field("s3_endpoint", &self.s3_endpoint)
            .field("upload_timeout", &self.upload_timeout)
            .finish()
    }
}

impl Config {
    /// Create a config with the three values every client needs.
    pub fn new(
        api_key: impl Into<String>,
        secret: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key: Some(api_key.into()),
            secret: Some(secret.into()),
            base_url: Some(base_url.into()),
            ..Default::default()
        }
    }

    /// Talk to the CMS over https.
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    /// Set the timeout of object store writes.
    pub fn with_upload_timeout(mut self, timeout: Duration) -> Self {
        self.upload_timeout = Some(timeout);
        self
    }

    /// Load unset fields from environment variables.
    ///
    /// Values already present on the config win over the environment.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if self.api_key.is_none() {
            self.api_key = ctx.env_var(VOLAR_API_KEY);
        }
        if self.secret.is_none() {
            self.secret = ctx.env_var(VOLAR_SECRET);
        }
        if self.base_url.is_none() {
            self.base_url = ctx.env_var(VOLAR_BASE_URL);
        }
        if self.secure.is_none() {
            self.secure = ctx.env_var(VOLAR_SECURE).and_then(|v| parse_bool(&v));
        }
        if self.s3_region.is_none() {
            self.s3_region = ctx.env_var(VOLAR_S3_REGION);
        }
        if self.s3_endpoint.is_none() {
            self.s3_endpoint = ctx.env_var(VOLAR_S3_ENDPOINT);
        }
        if self.upload_timeout.is_none() {
            self.upload_timeout = ctx
                .env_var(VOLAR_UPLOAD_TIMEOUT)
                .and_then(|v| parse_seconds(&v));
        }
        self
    }
}

fn parse_seconds(v: &str) -> Option<Duration> {
    match v.trim().parse::<u64>() {
        Ok(secs) => Some(Duration::from_secs(secs)),
        Err(_) => {
            warn!("ignoring {VOLAR_UPLOAD_TIMEOUT}={v}, expect a number of seconds");
            None
        }
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => {
            warn!("ignoring {VOLAR_SECURE}={v}, expect true or false");
            None
        }
    }
}
