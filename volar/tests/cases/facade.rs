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

use crate::{query_pairs, query_value, respond, MockServer, CMS_HOST};
use anyhow::Result;
use http::{header, Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;
use test_case::test_case;
use volar::hash::base64_sha256;
use volar::{Client, Config, ErrorKind, Params, Signer};

fn expected_signature(method: Method, route: &str, params: Params, body: Option<&str>) -> String {
    let canonical = params
        .with("api_key", "key")
        .canonicalize()
        .expect("params must be valid");
    Signer::new("secret").sign(&method, route, &canonical, body)
}

#[tokio::test]
async fn test_sites_request() -> Result<()> {
    let server = MockServer::json(json!({"success": true, "sites": []}));

    let resp = server.client().sites(Params::new()).await?;
    assert!(resp.is_success());

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_eq!(req.method(), Method::GET);
    assert_eq!(req.uri().scheme_str(), Some("http"));
    assert_eq!(req.uri().host(), Some(CMS_HOST));
    assert_eq!(req.uri().path(), "/api/client/info");
    assert!(req.body().is_empty());
    assert_eq!(
        query_pairs(req),
        vec![
            ("api_key".to_string(), "key".to_string()),
            (
                "signature".to_string(),
                expected_signature(Method::GET, "api/client/info", Params::new(), None)
            ),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_secure_client() -> Result<()> {
    let server = MockServer::json(json!({"success": true}));
    let client = server.client_with(Config::new("key", "secret", CMS_HOST).with_secure(true));

    client.sites(Params::new()).await?;
    assert_eq!(server.requests()[0].uri().scheme_str(), Some("https"));
    Ok(())
}

#[tokio::test]
async fn test_listing_flattens_params() -> Result<()> {
    let server = MockServer::json(json!({"success": true, "broadcasts": []}));
    let params = Params::new()
        .with("site", "mysite")
        .with("autoplay", true)
        .with(
            "template_data",
            Params::new()
                .with("home team", "Hawks")
                .with("away team", "Owls"),
        )
        .with("ids", vec![3, 1, 2]);

    server.client().broadcasts(params.clone()).await?;

    let req = &server.requests()[0];
    assert_eq!(req.uri().path(), "/api/client/broadcast");
    let pairs = query_pairs(req);
    let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "api_key",
            "autoplay",
            "ids[0]",
            "ids[1]",
            "ids[2]",
            "site",
            "template_data[away team]",
            "template_data[home team]",
            "signature",
        ]
    );
    assert_eq!(query_value(req, "autoplay").as_deref(), Some("1"));
    assert_eq!(query_value(req, "ids[0]").as_deref(), Some("3"));
    assert_eq!(
        query_value(req, "signature"),
        Some(expected_signature(
            Method::GET,
            "api/client/broadcast",
            params,
            None
        ))
    );
    Ok(())
}

#[tokio::test]
async fn test_prefixed_keys_follow_flat_order() -> Result<()> {
    let server = MockServer::json(json!({"success": true, "broadcasts": []}));
    let params = Params::new()
        .with("site", "mysite")
        .with("filter", Params::new().with("page", 2))
        .with("filter2", "x");

    server.client().broadcasts(params).await?;

    let req = &server.requests()[0];
    let keys: Vec<String> = query_pairs(req).into_iter().map(|(k, _)| k).collect();
    assert_eq!(
        keys,
        vec!["api_key", "filter2", "filter[page]", "site", "signature"]
    );

    let mut expected = base64_sha256(
        b"secretGETapi/client/broadcastapi_key=keyfilter2=xfilter[page]=2site=mysite",
    );
    expected.truncate(43);
    assert_eq!(query_value(req, "signature"), Some(expected));
    Ok(())
}

#[tokio::test]
async fn test_route_normalization() -> Result<()> {
    let server = MockServer::json(json!({"success": true}));
    let client = server.client();

    for route in ["api/client/info", "/api/client/info", "//api/client/info/"] {
        client
            .request(route, Method::GET, Params::new(), None)
            .await?;
    }

    let requests = server.requests();
    assert_eq!(requests[0].uri(), requests[1].uri());
    assert_eq!(requests[1].uri(), requests[2].uri());
    Ok(())
}

#[tokio::test]
async fn test_create_sends_json_body() -> Result<()> {
    let server = MockServer::json(json!({"success": true, "broadcast": {"id": 7}}));
    let params = Params::new()
        .with("site", "mysite")
        .with("title", "My new broadcast")
        .with("contact_email", "contact@email.com");

    let resp = server.client().broadcast_create(params).await?;
    assert_eq!(resp.get("broadcast"), Some(&json!({"id": 7})));

    let req = &server.requests()[0];
    assert_eq!(req.method(), Method::POST);
    assert_eq!(req.uri().path(), "/api/client/broadcast/create");

    let body = std::str::from_utf8(req.body())?;
    let doc: serde_json::Value = serde_json::from_str(body)?;
    assert_eq!(
        doc,
        json!({"title": "My new broadcast", "contact_email": "contact@email.com"})
    );

    let keys: Vec<String> = query_pairs(req).into_iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["api_key", "site", "signature"]);
    assert_eq!(
        query_value(req, "signature"),
        Some(expected_signature(
            Method::POST,
            "api/client/broadcast/create",
            Params::new().with("site", "mysite"),
            Some(body)
        ))
    );
    Ok(())
}

#[test_case("api/client/broadcast/update" ; "broadcast update")]
#[test_case("api/client/videoclip/delete" ; "videoclip delete")]
#[test_case("api/client/template/create" ; "template create")]
#[test_case("api/client/playlist/update" ; "playlist update")]
#[tokio::test]
async fn test_mutations_post_to_route(route: &str) -> Result<()> {
    let server = MockServer::json(json!({"success": true}));
    let client = server.client();
    let params = Params::new().with("site", "mysite").with("id", 7);

    match route {
        "api/client/broadcast/update" => client.broadcast_update(params).await?,
        "api/client/videoclip/delete" => client.videoclip_delete(params).await?,
        "api/client/template/create" => client.template_create(params).await?,
        "api/client/playlist/update" => client.playlist_update(params).await?,
        _ => unreachable!(),
    };

    let req = &server.requests()[0];
    assert_eq!(req.method(), Method::POST);
    assert_eq!(req.uri().path(), format!("/{route}"));
    assert_eq!(query_value(req, "site").as_deref(), Some("mysite"));
    assert_eq!(req.body().as_ref(), br#"{"id":7}"#);
    Ok(())
}

#[tokio::test]
async fn test_required_fields_gate_requests() {
    let server = MockServer::json(json!({"success": true}));
    let client = server.client();
    let no_site = || Params::new().with("id", 7);

    let listings = [
        client.broadcasts(no_site()).await,
        client.videoclips(no_site()).await,
        client.sections(no_site()).await,
        client.playlists(no_site()).await,
    ];
    for result in listings {
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
        assert_eq!(err.to_string(), "\"site\" or \"sites\" parameter is required");
    }

    let others = [
        client.broadcast_create(no_site()).await,
        client.broadcast_assign_playlist(no_site()).await,
        client.videoclip_remove_playlist(no_site()).await,
        client.template_delete(no_site()).await,
        client.playlist_create(no_site()).await,
        client.broadcast_poster(no_site(), Some("/tmp/poster.png")).await,
        client.videoclip_archive(no_site(), Some("/tmp/clip.mp4")).await,
    ];
    for result in others {
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
        assert_eq!(err.to_string(), "site is required");
    }

    let err = client
        .templates(Params::new().with("sites", "a,b"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    assert_eq!(err.to_string(), "\"site\" parameter is required");

    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_sites_accepts_multiple_sites() -> Result<()> {
    let server = MockServer::json(json!({"success": true}));

    server
        .client()
        .videoclips(Params::new().with("sites", "a,b"))
        .await?;
    assert_eq!(
        query_value(&server.requests()[0], "sites").as_deref(),
        Some("a,b")
    );
    Ok(())
}

#[tokio::test]
async fn test_assign_playlist_is_get() -> Result<()> {
    let server = MockServer::json(json!({"success": true}));

    server
        .client()
        .videoclip_assign_playlist(
            Params::new()
                .with("site", "mysite")
                .with("id", 7)
                .with("playlist_id", 3),
        )
        .await?;

    let req = &server.requests()[0];
    assert_eq!(req.method(), Method::GET);
    assert_eq!(req.uri().path(), "/api/client/videoclip/assignplaylist");
    assert_eq!(query_value(req, "playlist_id").as_deref(), Some("3"));
    Ok(())
}

#[tokio::test]
async fn test_poster_without_file() -> Result<()> {
    let server = MockServer::json(json!({"success": true}));

    server
        .client()
        .broadcast_poster(Params::new().with("site", "mysite").with("id", 7), None)
        .await?;

    let req = &server.requests()[0];
    assert_eq!(req.method(), Method::GET);
    assert_eq!(req.uri().path(), "/api/client/broadcast/poster");
    Ok(())
}

#[tokio::test]
async fn test_poster_with_file_is_multipart() -> Result<()> {
    let server = MockServer::json(json!({"success": true}));
    let mut file = tempfile::Builder::new().suffix(".png").tempfile()?;
    file.write_all(b"PNGDATA")?;
    let path = file.path().to_string_lossy().to_string();
    let params = Params::new().with("site", "mysite").with("id", 7);

    server
        .client()
        .videoclip_poster(params.clone(), Some(&path))
        .await?;

    let req = &server.requests()[0];
    assert_eq!(req.method(), Method::POST);
    assert_eq!(req.uri().path(), "/api/client/videoclip/poster");
    assert!(req.headers()[header::CONTENT_TYPE]
        .to_str()?
        .starts_with("multipart/form-data; boundary="));

    let body = String::from_utf8_lossy(req.body());
    assert!(body.contains("name=\"api_poster\""));
    assert!(body.contains("PNGDATA"));

    // Multipart payloads stay out of the signature.
    assert_eq!(query_value(req, "id").as_deref(), Some("7"));
    assert_eq!(
        query_value(req, "signature"),
        Some(expected_signature(
            Method::POST,
            "api/client/videoclip/poster",
            params,
            None
        ))
    );
    Ok(())
}

#[tokio::test]
async fn test_archive_without_file() -> Result<()> {
    let server = MockServer::json(json!({"success": true}));

    server
        .client()
        .broadcast_archive(Params::new().with("site", "mysite").with("id", 7), None)
        .await?;

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].uri().path(), "/api/client/broadcast/archive");
    Ok(())
}

#[tokio::test]
async fn test_error_document_is_returned() -> Result<()> {
    let server = MockServer::new(|_| {
        respond(
            StatusCode::BAD_REQUEST,
            r#"{"success": false, "errors": ["title is required"]}"#,
        )
    });

    let resp = server
        .client()
        .playlist_create(Params::new().with("site", "mysite"))
        .await?;
    assert!(!resp.is_success());
    assert_eq!(resp.errors(), vec!["title is required".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_non_json_is_transport_error() {
    let server =
        MockServer::new(|_| respond(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>"));

    let err = server.client().sites(Params::new()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_nested_too_deep_is_rejected() {
    let server = MockServer::json(json!({"success": true}));
    let params = Params::new()
        .with("site", "mysite")
        .with("filter", Params::new().with("inner", Params::new().with("a", 1)));

    let err = server.client().broadcasts(params).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_client_is_shared_between_tasks() -> Result<()> {
    let server = MockServer::json(json!({"success": true}));
    let client: Client = server.client();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                client
                    .sections(Params::new().with("site", format!("site-{i}")))
                    .await
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.await??.is_success());
    }

    assert_eq!(server.requests().len(), 4);
    Ok(())
}
