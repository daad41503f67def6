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

//! Object store leg of the Volar upload flow.
//!
//! The CMS hands out short-lived S3 credentials during the upload handshake.
//! This crate opens a [`Bucket`] session with them and writes the file with a
//! SigV4 signed `PUT`.
//!
//! ```no_run
//! use volar_core::Context;
//! use volar_s3::{Acl, Bucket, Credential, PutObject};
//!
//! # async fn upload(ctx: &Context) -> volar_core::Result<()> {
//! let cred = Credential::new("ASIA...", "secret", Some("token".to_string()));
//! let bucket = Bucket::connect("volar-uploads", cred, None, None)?;
//! let written = bucket
//!     .put_object(
//!         ctx,
//!         PutObject::new("tmp/42/clip.mp4", "...").with_acl(Acl::PublicRead),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::{DEFAULT_REGION, DEFAULT_UPLOAD_TIMEOUT};

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::RequestSigner;

mod put_object;
pub use put_object::{Acl, Bucket, PutObject};
