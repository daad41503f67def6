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
    /// List video clips of `site` or `sites`.
    pub async fn videoclips(&self, params: Params) -> Result<Response> {
        self.list("api/client/videoclip", params).await
    }

    /// Create a video clip.
    pub async fn videoclip_create(&self, params: Params) -> Result<Response> {
        self.post_json("api/client/videoclip/create", params).await
    }

    /// Update a video clip.
    pub async fn videoclip_update(&self, params: Params) -> Result<Response> {
        self.post_json("api/client/videoclip/update", params).await
    }

    /// Delete a video clip.
    pub async fn videoclip_delete(&self, params: Params) -> Result<Response> {
        self.post_json("api/client/videoclip/delete", params).await
    }

    /// Add video clip `id` to playlist `playlist_id`.
    pub async fn videoclip_assign_playlist(&self, params: Params) -> Result<Response> {
        self.get_with_site("api/client/videoclip/assignplaylist", params)
            .await
    }

    /// Remove video clip `id` from playlist `playlist_id`.
    pub async fn videoclip_remove_playlist(&self, params: Params) -> Result<Response> {
        self.get_with_site("api/client/videoclip/removeplaylist", params)
            .await
    }

    /// Set the poster image of a video clip, see [`Client::broadcast_poster`].
    pub async fn videoclip_poster(
        &self,
        params: Params,
        file_path: Option<&str>,
    ) -> Result<Response> {
        self.poster("api/client/videoclip/poster", params, file_path)
            .await
    }

    /// Attach a video file to a video clip, see [`Client::broadcast_archive`].
    pub async fn videoclip_archive(
        &self,
        params: Params,
        file_path: Option<&str>,
    ) -> Result<Response> {
        self.archive("api/client/videoclip/archive", params, file_path)
            .await
    }
}
