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

use crate::hash::base64_sha256;
use crate::utils::{trim_route, Redact};
use crate::CanonicalParams;
use http::Method;
use log::debug;
use std::fmt::{Debug, Formatter};

/// Upper bound of a signature length.
///
/// A SHA256 digest is 44 base64 characters, the last one being padding.
pub const SIGNATURE_LEN: usize = 43;

/// Signer computes the `signature` parameter carried by every CMS request.
///
/// The string to sign is
///
/// ```text
/// <secret><METHOD><route without surrounding slashes><k1>=<v1><k2>=<v2>...<raw body>
/// ```
///
/// where the pairs come from [`CanonicalParams`] in order, concatenated
/// without any separator, and the raw body is only present for textual POST
/// bodies. The signature is the base64 encoded SHA256 of that string,
/// truncated to [`SIGNATURE_LEN`] characters with `=` padding removed.
#[derive(Clone)]
pub struct Signer {
    secret: String,
}

impl Debug for Signer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("secret", &Redact::from(&self.secret))
            .finish()
    }
}

impl Signer {
    /// Create a new signer with the shared secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Build the string to sign.
    ///
    /// The result embeds the secret, never log it.
    pub fn string_to_sign(
        &self,
        method: &Method,
        route: &str,
        params: &CanonicalParams,
        body: Option<&str>,
    ) -> String {
        let route = trim_route(route);
        let params_size = params.iter().map(|(k, v)| k.len() + v.len() + 1).sum::<usize>();
        let mut s = String::with_capacity(
            self.secret.len()
                + method.as_str().len()
                + route.len()
                + params_size
                + body.map_or(0, str::len),
        );

        s.push_str(&self.secret);
        s.push_str(&method.as_str().to_ascii_uppercase());
        s.push_str(route);
        for (k, v) in params.iter() {
            s.push_str(k);
            s.push('=');
            s.push_str(v);
        }
        if let Some(body) = body {
            s.push_str(body);
        }

        s
    }

    /// Calculate the signature for a request.
    pub fn sign(
        &self,
        method: &Method,
        route: &str,
        params: &CanonicalParams,
        body: Option<&str>,
    ) -> String {
        let string_to_sign = self.string_to_sign(method, route, params, body);

        let mut signature = base64_sha256(string_to_sign.as_bytes());
        signature.truncate(SIGNATURE_LEN);
        let signature = signature.trim_end_matches('=').to_string();
        debug!(
            "calculated signature for {method} {}: {signature}",
            trim_route(route)
        );

        signature
    }
}
