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

//! Core components for talking to the Volar CMS API.
//!
//! This crate provides the foundational types the `volar` client is built on.
//!
//! ## Overview
//!
//! - **Context**: A container that holds implementations for file reading, HTTP sending, and environment access
//! - **Params**: Request parameters as a tagged [`Value`] tree, and their flattened [`CanonicalParams`] form
//! - **Signer**: Computes the `signature` parameter from the shared secret and the canonical request
//! - **Error**: A single error type whose [`ErrorKind`] tells validation, transport and upload failures apart
//!
//! ## Example
//!
//! ```
//! use http::Method;
//! use volar_core::{Params, Signer};
//!
//! # fn main() -> volar_core::Result<()> {
//! let params = Params::new()
//!     .with("site", "mysite")
//!     .with("filter", Params::new().with("status", "live"));
//!
//! let canonical = params.canonicalize()?;
//! let signature = Signer::new("secret").sign(&Method::GET, "api/client/broadcast", &canonical, None);
//! assert!(signature.len() <= 43);
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time manipulation utilities
//! - [`utils`]: Route normalization and data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::Context;
pub use context::Env;
pub use context::FileRead;
pub use context::HttpSend;
pub use context::NoopEnv;
pub use context::NoopFileRead;
pub use context::NoopHttpSend;
pub use context::OsEnv;
pub use context::RequestTimeout;
pub use context::StaticEnv;

mod error;
pub use error::{Error, ErrorKind, Result};

mod params;
pub use params::{CanonicalParams, Params, Value};

mod signer;
pub use signer::{Signer, SIGNATURE_LEN};
