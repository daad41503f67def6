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

use crate::constants::{
    AWS_URI_ENCODE_SET, DEFAULT_REGION, DEFAULT_UPLOAD_TIMEOUT, X_AMZ_ACL, X_AMZ_CONTENT_SHA_256,
};
use crate::{Credential, RequestSigner};
use bytes::Bytes;
use http::{header, HeaderValue, Method, Uri};
use log::debug;
use percent_encoding::utf8_percent_encode;
use std::time::Duration;
use volar_core::hash::hex_sha256;
use volar_core::{Context, Error, RequestTimeout, Result};

/// Canned ACL applied to an uploaded object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acl {
    /// Only the owner can read the object.
    Private,
    /// Anyone can read the object.
    PublicRead,
}

impl Acl {
    fn as_str(&self) -> &'static str {
        match self {
            Acl::Private => "private",
            Acl::PublicRead => "public-read",
        }
    }
}

/// A single object write.
#[derive(Debug, Clone)]
pub struct PutObject {
    key: String,
    body: Bytes,
    content_disposition: Option<String>,
    content_type: Option<String>,
    acl: Option<Acl>,
}

impl PutObject {
    /// Write `body` under `key`.
    pub fn new(key: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            key: key.into(),
            body: body.into(),
            content_disposition: None,
            content_type: None,
            acl: None,
        }
    }

    /// Mark the object as a download named `file_name`.
    ///
    /// Double quotes are stripped from the name so the header stays well formed.
    pub fn with_attachment_name(mut self, file_name: &str) -> Self {
        self.content_disposition = Some(format!(
            "attachment; filename=\"{}\"",
            file_name.replace('"', "")
        ));
        self
    }

    /// Set the object content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Set the canned ACL.
    pub fn with_acl(mut self, acl: Acl) -> Self {
        self.acl = Some(acl);
        self
    }
}

/// Bucket is a session on one bucket opened with temporary credentials.
#[derive(Debug, Clone)]
pub struct Bucket {
    name: String,
    region: String,
    endpoint: Option<String>,
    credential: Credential,
    timeout: Duration,
}

impl Bucket {
    /// Open a session on bucket `name`.
    ///
    /// Without `endpoint` objects are addressed virtual-hosted style on AWS,
    /// with it they are addressed path style as `<endpoint>/<bucket>/<key>`.
    ///
    /// Fails with a `Connection` error when the credential or the address is unusable.
    pub fn connect(
        name: &str,
        credential: Credential,
        region: Option<&str>,
        endpoint: Option<&str>,
    ) -> Result<Self> {
        if !credential.is_valid() {
            return Err(Error::connection(
                "Connection failed: object store credential is incomplete",
            ));
        }
        if name.is_empty() {
            return Err(Error::connection("Connection failed: bucket name is empty"));
        }

        let bucket = Self {
            name: name.to_string(),
            region: region
                .filter(|v| !v.is_empty())
                .unwrap_or(DEFAULT_REGION)
                .to_string(),
            endpoint: endpoint.map(|v| v.trim_end_matches('/').to_string()),
            credential,
            timeout: DEFAULT_UPLOAD_TIMEOUT,
        };
        // Make sure the bucket can be addressed at all.
        bucket.object_uri("")?;

        Ok(bucket)
    }

    /// Set the timeout of object writes, [`DEFAULT_UPLOAD_TIMEOUT`] by default.
    ///
    /// It replaces the sender's own timeout for writes only.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Name of the bucket.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Address of the object stored under `key`.
    pub fn object_uri(&self, key: &str) -> Result<Uri> {
        let key = utf8_percent_encode(key.trim_start_matches('/'), &AWS_URI_ENCODE_SET);
        let url = match &self.endpoint {
            Some(endpoint) => format!("{endpoint}/{}/{key}", self.name),
            None if self.region == DEFAULT_REGION => {
                format!("https://{}.s3.amazonaws.com/{key}", self.name)
            }
            None => format!("https://{}.s3.{}.amazonaws.com/{key}", self.name, self.region),
        };

        url.parse::<Uri>()
            .map_err(|e| Error::connection(format!("Connection failed: {e}")).with_source(e))
    }

    /// Upload an object, returning the number of bytes written.
    ///
    /// The whole body is held in memory while it is sent.
    pub async fn put_object(&self, ctx: &Context, input: PutObject) -> Result<u64> {
        let size = input.body.len() as u64;
        let uri = self.object_uri(&input.key)?;
        debug!("uploading {size} bytes to {uri}");

        let mut req = http::Request::builder()
            .method(Method::PUT)
            .uri(uri)
            .header(header::CONTENT_LENGTH, size)
            .header(X_AMZ_CONTENT_SHA_256, hex_sha256(&input.body));
        if let Some(v) = &input.content_disposition {
            req = req.header(header::CONTENT_DISPOSITION, HeaderValue::from_str(v)?);
        }
        if let Some(v) = &input.content_type {
            req = req.header(header::CONTENT_TYPE, HeaderValue::from_str(v)?);
        }
        if let Some(acl) = input.acl {
            req = req.header(X_AMZ_ACL, acl.as_str());
        }

        let (mut parts, body) = req.body(input.body)?.into_parts();
        parts.extensions.insert(RequestTimeout(self.timeout));
        RequestSigner::new("s3", &self.region).sign(&mut parts, &self.credential)?;

        let resp = ctx
            .http_send_as_string(http::Request::from_parts(parts, body))
            .await
            .map_err(|e| Error::upload(e.message().to_string()).with_source(e))?;

        if !resp.status().is_success() {
            return Err(Error::upload(format!(
                "object store responded with {}: {}",
                resp.status(),
                resp.body()
            )));
        }

        debug!("uploaded {size} bytes into bucket {}", self.name);
        Ok(size)
    }
}
