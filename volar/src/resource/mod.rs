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

//! Per resource operations of the CMS.
//!
//! Every operation takes its parameters by value and checks the required
//! ones before anything is sent.

mod broadcast;
mod playlist;
mod section;
mod site;
mod template;
mod videoclip;

use crate::{Body, Client, Form, Response};
use http::Method;
use std::path::Path;
use volar_core::utils::base_name;
use volar_core::{Error, Params, Result, Value};

const SITE: &str = "site";
const SITES: &str = "sites";

/// Part name the CMS expects poster images under.
const POSTER_PART: &str = "api_poster";

fn require_site(params: &Params) -> Result<()> {
    if params.contains_key(SITE) {
        Ok(())
    } else {
        Err(Error::request_invalid("site is required"))
    }
}

fn require_site_or_sites(params: &Params) -> Result<()> {
    if params.contains_key(SITE) || params.contains_key(SITES) {
        Ok(())
    } else {
        Err(Error::request_invalid(
            "\"site\" or \"sites\" parameter is required",
        ))
    }
}

impl Client {
    async fn list(&self, route: &str, params: Params) -> Result<Response> {
        require_site_or_sites(&params)?;
        self.request(route, Method::GET, params, None).await
    }

    async fn get_with_site(&self, route: &str, params: Params) -> Result<Response> {
        require_site(&params)?;
        self.request(route, Method::GET, params, None).await
    }

    /// `site` stays on the query string, everything else becomes a JSON body.
    async fn post_json(&self, route: &str, mut params: Params) -> Result<Response> {
        let site: Value = params
            .remove(SITE)
            .ok_or_else(|| Error::request_invalid("site is required"))?;
        let body = serde_json::to_string(&params)?;

        self.request(
            route,
            Method::POST,
            Params::new().with(SITE, site),
            Some(Body::Text(body)),
        )
        .await
    }

    async fn poster(
        &self,
        route: &str,
        params: Params,
        file_path: Option<&str>,
    ) -> Result<Response> {
        require_site(&params)?;
        let Some(path) = file_path else {
            return self.request(route, Method::GET, params, None).await;
        };

        let file_name = base_name(Path::new(path))
            .ok_or_else(|| Error::request_invalid(format!("{path} does not name a file")))?;
        let content = self.ctx.file_read(path).await?;
        let form = Form::new().file(POSTER_PART, file_name, content);

        self.request(route, Method::POST, params, Some(Body::Form(form)))
            .await
    }

    async fn archive(
        &self,
        route: &str,
        mut params: Params,
        file_path: Option<&str>,
    ) -> Result<Response> {
        require_site(&params)?;
        if let Some(path) = file_path {
            let upload = self.upload_file(path).await?;
            params.merge(upload.into());
        }

        self.request(route, Method::GET, params, None).await
    }
}
