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

use crate::Client;
use http::Method;
use log::debug;
use serde::{Deserialize, Deserializer};
use std::path::Path;
use volar_core::utils::base_name;
use volar_core::{Error, Params, Result};
use volar_s3::{Acl, Bucket, Credential, PutObject};

const HANDSHAKE_ROUTE: &str = "api/client/broadcast/s3handshake";

/// Temporary object store access issued by the CMS for one upload.
#[derive(Deserialize)]
struct Handshake {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    key: String,
    bucket: String,
    access_key: String,
    secret: String,
    #[serde(default)]
    token: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        String(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::String(v) => v,
        Id::Number(v) => v.to_string(),
    })
}

/// Result of a finished upload.
///
/// Merge it into the parameters of the follow-up CMS call to attach the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Id of the temporary file record on the CMS.
    pub tmp_file_id: String,
    /// Object key the file was written to.
    pub tmp_file_name: String,
    /// Number of bytes written.
    pub bytes_uploaded: u64,
}

impl From<Upload> for Params {
    fn from(v: Upload) -> Self {
        Params::new()
            .with("tmp_file_id", v.tmp_file_id)
            .with("tmp_file_name", v.tmp_file_name)
            .with(
                "bytes_uploaded",
                i64::try_from(v.bytes_uploaded).unwrap_or(i64::MAX),
            )
    }
}

impl Client {
    /// Upload a local file straight into the object store.
    ///
    /// The CMS first issues temporary credentials for the file name, then the
    /// file is written with them. Fails with `Handshake`, `Connection` or
    /// `Upload` depending on the step that went wrong.
    ///
    /// The file is read into memory in full before it is written. The write
    /// runs under [`Config::upload_timeout`](crate::Config::upload_timeout)
    /// instead of the sender's timeout.
    pub async fn upload_file(&self, path: &str) -> Result<Upload> {
        let file_name = base_name(Path::new(path))
            .ok_or_else(|| Error::request_invalid(format!("{path} does not name a file")))?;

        let resp = self
            .request(
                HANDSHAKE_ROUTE,
                Method::GET,
                Params::new().with("filename", file_name.as_str()),
                None,
            )
            .await
            .map_err(|e| Error::handshake(e.message().to_string()).with_source(e))?;
        let handshake: Handshake = serde_json::from_value(resp.into_value())
            .map_err(|e| Error::handshake("Could not initiate file upload").with_source(e))?;
        debug!(
            "upload of {file_name} granted as {} in bucket {}",
            handshake.key, handshake.bucket
        );

        let cred = Credential::new(handshake.access_key, handshake.secret, handshake.token);
        let bucket = Bucket::connect(
            &handshake.bucket,
            cred,
            self.s3_region(),
            self.s3_endpoint(),
        )?
        .with_timeout(self.upload_timeout());

        let content = self
            .ctx
            .file_read(path)
            .await
            .map_err(|e| Error::upload(e.message().to_string()).with_source(e))?;
        let bytes_uploaded = bucket
            .put_object(
                &self.ctx,
                PutObject::new(handshake.key.as_str(), content)
                    .with_attachment_name(&file_name)
                    .with_acl(Acl::PublicRead),
            )
            .await?;

        Ok(Upload {
            tmp_file_id: handshake.id,
            tmp_file_name: handshake.key,
            bytes_uploaded,
        })
    }
}
