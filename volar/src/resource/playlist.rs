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

use crate::{Client, Response};
use volar_core::{Params, Result};

impl Client {
    /// List playlists of `site` or `sites`.
    pub async fn playlists(&self, params: Params) -> Result<Response> {
        self.list("api/client/playlist", params).await
    }

    /// Create a playlist.
    pub async fn playlist_create(&self, params: Params) -> Result<Response> {
        self.post_json("api/client/playlist/create", params).await
    }

    /// Update a playlist.
    pub async fn playlist_update(&self, params: Params) -> Result<Response> {
        self.post_json("api/client/playlist/update", params).await
    }

    /// Delete a playlist.
    pub async fn playlist_delete(&self, params: Params) -> Result<Response> {
        self.post_json("api/client/playlist/delete", params).await
    }
}
