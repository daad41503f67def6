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

//! Signed client for the Volar CMS API.
//!
//! Manage sites, broadcasts, video clips, metadata templates, sections and
//! playlists of a Volar CMS, and push large media files straight into the
//! object store behind it.
//!
//! ## Example
//!
//! ```no_run
//! use volar::{default_context, Client, Config, Params};
//!
//! #[tokio::main]
//! async fn main() -> volar::Result<()> {
//!     let client = Client::new(
//!         default_context(),
//!         Config::new("api-key", "secret", "vcloud.volarvideo.com").with_secure(true),
//!     )?;
//!
//!     let resp = client
//!         .broadcast_create(
//!             Params::new()
//!                 .with("site", "mysite")
//!                 .with("title", "My new broadcast")
//!                 .with("date", "2014-05-12 23:00:00"),
//!         )
//!         .await?;
//!     if !resp.is_success() {
//!         eprintln!("rejected: {:?}", resp.errors());
//!     }
//!
//!     let resp = client
//!         .broadcast_archive(
//!             Params::new().with("site", "mysite").with("id", 42),
//!             Some("/videos/game.mp4"),
//!         )
//!         .await?;
//!     println!("{}", resp.value());
//!     Ok(())
//! }
//! ```
//!
//! Every request carries the `api_key` and a `signature` computed from the
//! shared secret, see [`Signer`].

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use http::Method;
pub use volar_core::*;

mod constants;

mod body;
pub use body::{Body, FilePart, Form};

mod config;
pub use config::Config;

mod client;
pub use client::Client;

mod response;
pub use response::Response;

mod upload;
pub use upload::Upload;

mod resource;

/// Object store leg of the upload flow.
pub mod s3 {
    pub use volar_s3::*;
}

/// Create a context backed by reqwest, tokio and the OS environment.
#[cfg(feature = "default-context")]
pub fn default_context() -> Context {
    Context::new()
        .with_file_read(volar_file_read_tokio::TokioFileRead)
        .with_http_send(volar_http_send_reqwest::ReqwestHttpSend::default())
        .with_env(OsEnv)
}
