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

use super::SITE;
use crate::{Client, Response};
use volar_core::{Error, Params, Result};

impl Client {
    /// List the metadata templates of `site`.
    ///
    /// Unlike the other listings `sites` is not accepted here.
    pub async fn templates(&self, params: Params) -> Result<Response> {
        if !params.contains_key(SITE) {
            return Err(Error::request_invalid("\"site\" parameter is required"));
        }
        self.get_with_site("api/client/template", params).await
    }

    /// Create a metadata template.
    ///
    /// `data` is a list of field descriptions, each one a map with `title`,
    /// `type` and optional `options`:
    ///
    /// ```no_run
    /// # async fn run(client: volar::Client) -> volar::Result<()> {
    /// use serde_json::json;
    /// use volar::Params;
    ///
    /// let params = Params::try_from(json!({
    ///     "site": "mysite",
    ///     "title": "Game",
    ///     "data": [
    ///         {"title": "home team", "type": "single-line"},
    ///         {"title": "away team", "type": "single-line"}
    ///     ]
    /// }))?;
    /// client.template_create(params).await?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// The body is JSON, so the field maps are not flattened.
    pub async fn template_create(&self, params: Params) -> Result<Response> {
        self.post_json("api/client/template/create", params).await
    }

    /// Update a metadata template.
    pub async fn template_update(&self, params: Params) -> Result<Response> {
        self.post_json("api/client/template/update", params).await
    }

    /// Delete a metadata template.
    pub async fn template_delete(&self, params: Params) -> Result<Response> {
        self.post_json("api/client/template/delete", params).await
    }
}
