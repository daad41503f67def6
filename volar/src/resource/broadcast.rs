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
    /// List broadcasts of `site`, or of every site in the comma separated `sites`.
    ///
    /// ```no_run
    /// # async fn run(client: volar::Client) -> volar::Result<()> {
    /// use volar::Params;
    ///
    /// let resp = client
    ///     .broadcasts(
    ///         Params::new()
    ///             .with("site", "mysite")
    ///             .with("list", "upcoming")
    ///             .with("template_data", Params::new().with("home team", "Hawks")),
    ///     )
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn broadcasts(&self, params: Params) -> Result<Response> {
        self.list("api/client/broadcast", params).await
    }

    /// Create a broadcast.
    ///
    /// Everything but `site` is sent as the JSON body.
    pub async fn broadcast_create(&self, params: Params) -> Result<Response> {
        self.post_json("api/client/broadcast/create", params).await
    }

    /// Update the broadcast identified by `id`.
    pub async fn broadcast_update(&self, params: Params) -> Result<Response> {
        self.post_json("api/client/broadcast/update", params).await
    }

    /// Delete the broadcast identified by `id`.
    pub async fn broadcast_delete(&self, params: Params) -> Result<Response> {
        self.post_json("api/client/broadcast/delete", params).await
    }

    /// Add broadcast `id` to playlist `playlist_id`.
    pub async fn broadcast_assign_playlist(&self, params: Params) -> Result<Response> {
        self.get_with_site("api/client/broadcast/assignplaylist", params)
            .await
    }

    /// Remove broadcast `id` from playlist `playlist_id`.
    pub async fn broadcast_remove_playlist(&self, params: Params) -> Result<Response> {
        self.get_with_site("api/client/broadcast/removeplaylist", params)
            .await
    }

    /// Set the poster image of a broadcast.
    ///
    /// With `file_path` the image is posted as the multipart part
    /// `api_poster`, without it only the parameters are sent.
    pub async fn broadcast_poster(
        &self,
        params: Params,
        file_path: Option<&str>,
    ) -> Result<Response> {
        self.poster("api/client/broadcast/poster", params, file_path)
            .await
    }

    /// Archive a broadcast.
    ///
    /// With `file_path` the file goes through [`Client::upload_file`] first and
    /// the upload fields are merged into `params`.
    pub async fn broadcast_archive(
        &self,
        params: Params,
        file_path: Option<&str>,
    ) -> Result<Response> {
        self.archive("api/client/broadcast/archive", params, file_path)
            .await
    }
}
