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
    AWS_QUERY_ENCODE_SET, AWS_URI_ENCODE_SET, X_AMZ_CONTENT_SHA_256, X_AMZ_DATE,
    X_AMZ_SECURITY_TOKEN,
};
use crate::Credential;
use http::request::Parts;
use http::{header, HeaderValue};
use log::debug;
use percent_encoding::{percent_decode_str, utf8_percent_encode};
use std::fmt::Write;
use volar_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use volar_core::time::{format_date, format_iso8601, now, DateTime};
use volar_core::{Error, Result};

/// RequestSigner that implement AWS SigV4 in header mode.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
#[derive(Debug)]
pub struct RequestSigner {
    service: String,
    region: String,

    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer for the given service and region.
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.into(),
            region: region.into(),

            time: None,
        }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Sign the request in place by inserting the `authorization` header.
    ///
    /// Every header present on the request is signed. `host`, `x-amz-date`,
    /// `x-amz-content-sha256` and `x-amz-security-token` are added when missing.
    pub fn sign(&self, req: &mut Parts, cred: &Credential) -> Result<()> {
        let now = self.time.unwrap_or_else(now);

        canonicalize_header(req, cred, now)?;
        let creq = canonical_request_string(req)?;
        let encoded_req = hex_sha256(creq.as_bytes());

        // Scope: "20220313/<region>/<service>/aws4_request"
        let scope = format!(
            "{}/{}/{}/aws4_request",
            format_date(now),
            self.region,
            self.service
        );
        debug!("calculated scope: {scope}");

        // StringToSign:
        //
        // AWS4-HMAC-SHA256
        // 20220313T072004Z
        // 20220313/<region>/<service>/aws4_request
        // <hashed_canonical_request>
        let string_to_sign = {
            let mut f = String::new();
            writeln!(f, "AWS4-HMAC-SHA256")?;
            writeln!(f, "{}", format_iso8601(now))?;
            writeln!(f, "{}", &scope)?;
            write!(f, "{}", &encoded_req)?;
            f
        };
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key =
            generate_signing_key(&cred.secret_access_key, now, &self.region, &self.service);
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

        let mut authorization = HeaderValue::from_str(&format!(
            "AWS4-HMAC-SHA256 Credential={}/{}, SignedHeaders={}, Signature={}",
            cred.access_key_id,
            scope,
            signed_header_names(req).join(";"),
            signature
        ))?;
        authorization.set_sensitive(true);
        req.headers.insert(header::AUTHORIZATION, authorization);

        Ok(())
    }
}

fn signed_header_names(req: &Parts) -> Vec<&str> {
    let mut h = req.headers.keys().map(|k| k.as_str()).collect::<Vec<&str>>();
    h.sort_unstable();
    h
}

fn canonical_request_string(req: &Parts) -> Result<String> {
    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    // Insert method
    writeln!(f, "{}", req.method)?;
    // Insert encoded path
    let path = percent_decode_str(req.uri.path())
        .decode_utf8()
        .map_err(|e| Error::request_invalid(format!("failed to decode path: {e}")))?;
    writeln!(f, "{}", utf8_percent_encode(&path, &AWS_URI_ENCODE_SET))?;
    // Insert query
    writeln!(f, "{}", canonical_query_string(req))?;
    // Insert signed headers
    let signed_headers = signed_header_names(req);
    for name in signed_headers.iter() {
        let value = req.headers[*name].to_str()?;
        writeln!(f, "{name}:{value}")?;
    }
    writeln!(f)?;
    writeln!(f, "{}", signed_headers.join(";"))?;

    match req.headers.get(X_AMZ_CONTENT_SHA_256) {
        Some(v) => write!(f, "{}", v.to_str()?)?,
        None => write!(f, "UNSIGNED-PAYLOAD")?,
    }

    Ok(f)
}

fn canonical_query_string(req: &Parts) -> String {
    let Some(query) = req.uri.query() else {
        return String::new();
    };

    let mut pairs = form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect::<Vec<_>>();
    // Sort by param name
    pairs.sort();

    pairs
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                utf8_percent_encode(k, &AWS_QUERY_ENCODE_SET),
                utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn canonicalize_header(req: &mut Parts, cred: &Credential, now: DateTime) -> Result<()> {
    // Header values need to be trimmed according to Step 4 of https://docs.aws.amazon.com/general/latest/gr/sigv4-create-canonical-request.html
    for (_, value) in req.headers.iter_mut() {
        header_value_normalize(value)?;
    }

    // Insert HOST header if not present.
    if req.headers.get(header::HOST).is_none() {
        let authority = req
            .uri
            .authority()
            .ok_or_else(|| Error::request_invalid("request without authority is invalid for signing"))?;
        req.headers
            .insert(header::HOST, HeaderValue::from_str(authority.as_str())?);
    }

    // Insert DATE header if not present.
    if req.headers.get(X_AMZ_DATE).is_none() {
        req.headers
            .insert(X_AMZ_DATE, HeaderValue::try_from(format_iso8601(now))?);
    }

    // Insert X_AMZ_CONTENT_SHA_256 header if not present.
    if req.headers.get(X_AMZ_CONTENT_SHA_256).is_none() {
        req.headers.insert(
            X_AMZ_CONTENT_SHA_256,
            HeaderValue::from_static("UNSIGNED-PAYLOAD"),
        );
    }

    // Insert X_AMZ_SECURITY_TOKEN header if security token exists.
    if let Some(token) = &cred.session_token {
        let mut value = HeaderValue::from_str(token)?;
        // Set token value sensitive to valid leaking.
        value.set_sensitive(true);

        req.headers.insert(X_AMZ_SECURITY_TOKEN, value);
    }

    Ok(())
}

fn header_value_normalize(v: &mut HeaderValue) -> Result<()> {
    let bs = v.as_bytes();

    let starting_index = bs.iter().position(|b| *b != b' ').unwrap_or(0);
    let ending_offset = bs.iter().rev().position(|b| *b != b' ').unwrap_or(0);
    let ending_index = bs.len() - ending_offset;

    *v = HeaderValue::from_bytes(&bs[starting_index..ending_index])?;
    Ok(())
}

fn generate_signing_key(secret: &str, time: DateTime, region: &str, service: &str) -> Vec<u8> {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), format_date(time).as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), "aws4_request".as_bytes())
}
