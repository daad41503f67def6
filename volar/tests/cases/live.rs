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

use anyhow::Result;
use log::warn;
use std::env;
use volar::{default_context, Client, Params};

/// Client talking to a real CMS, configured through `VOLAR_*` variables.
fn init_live_client() -> Option<Client> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("VOLAR_TEST").ok().as_deref() != Some("on") {
        return None;
    }

    Some(
        Client::from_env(default_context())
            .expect("VOLAR_API_KEY, VOLAR_SECRET and VOLAR_BASE_URL must be set"),
    )
}

#[tokio::test]
async fn test_live_sites() -> Result<()> {
    let Some(client) = init_live_client() else {
        warn!("VOLAR_TEST is not set, skipped");
        return Ok(());
    };

    let resp = client.sites(Params::new()).await?;
    assert!(resp.get("sites").is_some(), "unexpected response: {resp:?}");
    Ok(())
}

#[tokio::test]
async fn test_live_broadcasts() -> Result<()> {
    let Some(client) = init_live_client() else {
        warn!("VOLAR_TEST is not set, skipped");
        return Ok(());
    };
    let site = env::var("VOLAR_TEST_SITE").expect("env VOLAR_TEST_SITE must set");

    let resp = client
        .broadcasts(Params::new().with("site", site).with("per_page", 5))
        .await?;
    assert!(resp.errors().is_empty(), "unexpected errors: {:?}", resp.errors());
    Ok(())
}
