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

use crate::{query_value, respond, MockServer};
use anyhow::Result;
use http::{header, Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;
use volar::s3::DEFAULT_UPLOAD_TIMEOUT;
use volar::{Config, ErrorKind, Params, Upload};

const CONTENT: &[u8] = b"0123456789abcdef";

fn handshake() -> serde_json::Value {
    json!({
        "id": 42,
        "key": "tmp/42/game.mp4",
        "bucket": "volar-uploads",
        "access_key": "ASIAEXAMPLE",
        "secret": "temporary-secret",
        "token": "temporary-token"
    })
}

/// CMS answering the handshake with `handshake`, object store answering with `store`.
fn server(handshake: serde_json::Value, store: StatusCode) -> MockServer {
    MockServer::new(move |req| match (req.uri().host(), req.uri().path()) {
        (Some("s3.test"), _) => respond(store, ""),
        (_, "/api/client/broadcast/s3handshake") => respond(StatusCode::OK, handshake.to_string()),
        _ => respond(StatusCode::OK, r#"{"success": true, "fileinfo": {}}"#),
    })
}

fn local_file() -> Result<(NamedTempFile, String)> {
    let mut file = tempfile::Builder::new()
        .prefix("game")
        .suffix(".mp4")
        .tempfile()?;
    file.write_all(CONTENT)?;
    let path = file.path().to_string_lossy().to_string();
    Ok((file, path))
}

#[tokio::test]
async fn test_upload_file() -> Result<()> {
    let server = server(handshake(), StatusCode::OK);
    let (file, path) = local_file()?;
    let file_name = file
        .path()
        .file_name()
        .map(|v| v.to_string_lossy().to_string())
        .unwrap_or_default();

    let upload = server.client().upload_file(&path).await?;
    assert_eq!(
        upload,
        Upload {
            tmp_file_id: "42".to_string(),
            tmp_file_name: "tmp/42/game.mp4".to_string(),
            bytes_uploaded: CONTENT.len() as u64,
        }
    );

    let requests = server.requests();
    assert_eq!(requests.len(), 2);

    let hs = &requests[0];
    assert_eq!(hs.method(), Method::GET);
    assert_eq!(hs.uri().path(), "/api/client/broadcast/s3handshake");
    assert_eq!(query_value(hs, "filename"), Some(file_name.clone()));

    let put = &requests[1];
    assert_eq!(put.method(), Method::PUT);
    assert_eq!(
        put.uri().to_string(),
        "http://s3.test/volar-uploads/tmp/42/game.mp4"
    );
    assert_eq!(put.body().as_ref(), CONTENT);
    assert_eq!(put.headers()["x-amz-acl"], "public-read");
    assert_eq!(put.headers()["x-amz-security-token"], "temporary-token");
    assert_eq!(
        put.headers()[header::CONTENT_DISPOSITION].to_str()?,
        format!("attachment; filename=\"{file_name}\"")
    );
    assert!(put.headers()[header::AUTHORIZATION]
        .to_str()?
        .starts_with("AWS4-HMAC-SHA256 Credential=ASIAEXAMPLE/"));
    Ok(())
}

#[tokio::test]
async fn test_only_the_write_gets_the_upload_timeout() -> Result<()> {
    let server = server(handshake(), StatusCode::OK);
    let (_file, path) = local_file()?;

    server.client().upload_file(&path).await?;
    let requests = server.requests();
    assert_eq!(requests[0].timeout(), None);
    assert_eq!(requests[1].timeout(), Some(DEFAULT_UPLOAD_TIMEOUT));

    let client = server.client_with(
        Config::new("key", "secret", crate::CMS_HOST)
            .with_upload_timeout(Duration::from_secs(4 * 60 * 60)),
    );
    client.upload_file(&path).await?;
    let requests = server.requests();
    assert_eq!(requests[2].timeout(), None);
    assert_eq!(requests[3].timeout(), Some(Duration::from_secs(4 * 60 * 60)));
    Ok(())
}

#[tokio::test]
async fn test_archive_with_file() -> Result<()> {
    let mut doc = handshake();
    doc["id"] = json!("clip-42");
    let server = server(doc, StatusCode::OK);
    let (_file, path) = local_file()?;

    let resp = server
        .client()
        .videoclip_archive(
            Params::new().with("site", "mysite").with("id", 7),
            Some(&path),
        )
        .await?;
    assert!(resp.is_success());

    let requests = server.requests();
    assert_eq!(requests.len(), 3);

    let archive = &requests[2];
    assert_eq!(archive.method(), Method::GET);
    assert_eq!(archive.uri().path(), "/api/client/videoclip/archive");
    assert_eq!(query_value(archive, "site").as_deref(), Some("mysite"));
    assert_eq!(query_value(archive, "tmp_file_id").as_deref(), Some("clip-42"));
    assert_eq!(
        query_value(archive, "tmp_file_name").as_deref(),
        Some("tmp/42/game.mp4")
    );
    assert_eq!(
        query_value(archive, "bytes_uploaded"),
        Some(CONTENT.len().to_string())
    );
    Ok(())
}

#[tokio::test]
async fn test_handshake_transport_failure() -> Result<()> {
    let server = MockServer::new(|_| respond(StatusCode::BAD_GATEWAY, "bad gateway"));
    let (_file, path) = local_file()?;

    let err = server.client().upload_file(&path).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Handshake);
    assert!(err.to_string().contains("not valid JSON"));
    Ok(())
}

#[tokio::test]
async fn test_handshake_without_credentials() -> Result<()> {
    let server = server(
        json!({"success": false, "errors": ["not allowed"]}),
        StatusCode::OK,
    );
    let (_file, path) = local_file()?;

    let err = server
        .client()
        .broadcast_archive(Params::new().with("site", "mysite"), Some(&path))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Handshake);
    assert_eq!(err.to_string(), "Could not initiate file upload");
    // The archive call itself never happens.
    assert_eq!(server.requests().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_connection_failure() -> Result<()> {
    let mut doc = handshake();
    doc["access_key"] = json!("");
    let server = server(doc, StatusCode::OK);
    let (_file, path) = local_file()?;

    let err = server.client().upload_file(&path).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Connection);
    assert!(err.to_string().starts_with("Connection failed: "));
    assert_eq!(server.requests().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_object_store_rejects_upload() -> Result<()> {
    let server = server(handshake(), StatusCode::FORBIDDEN);
    let (_file, path) = local_file()?;

    let err = server.client().upload_file(&path).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Upload);
    assert!(err.is_upload_error());
    Ok(())
}

#[tokio::test]
async fn test_missing_local_file() {
    let server = server(handshake(), StatusCode::OK);

    let err = server
        .client()
        .upload_file("/definitely/not/here/game.mp4")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Upload);
    // Handshake only, nothing was written.
    assert_eq!(server.requests().len(), 1);
}
