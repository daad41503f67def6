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

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use volar_core::{Error, Result};

/// JSON document returned by the CMS.
///
/// The document is kept verbatim. Most routes answer with
/// `{"success": bool, "errors": [...], ...}`, which [`Response::is_success`]
/// and [`Response::errors`] read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Response(serde_json::Value);

impl Response {
    /// Wrap a parsed JSON document.
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Borrow the JSON document.
    pub fn value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Take the JSON document.
    pub fn into_value(self) -> serde_json::Value {
        self.0
    }

    /// Look up a top level field.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    /// Returns true if the CMS reported `success: true`.
    pub fn is_success(&self) -> bool {
        match self.0.get("success") {
            Some(serde_json::Value::Bool(v)) => *v,
            Some(serde_json::Value::Number(v)) => v.as_i64() == Some(1),
            _ => false,
        }
    }

    /// Errors reported by the CMS, empty if there are none.
    pub fn errors(&self) -> Vec<String> {
        match self.0.get("errors") {
            Some(serde_json::Value::Array(errors)) => errors
                .iter()
                .map(|v| match v {
                    serde_json::Value::String(s) => s.clone(),
                    v => v.to_string(),
                })
                .collect(),
            Some(serde_json::Value::String(s)) => vec![s.clone()],
            _ => Vec::new(),
        }
    }

    /// Deserialize the document into `T`.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        T::deserialize(&self.0).map_err(|e| {
            Error::transport(format!("unexpected response from CMS: {e}")).with_source(e)
        })
    }
}

impl From<Response> for serde_json::Value {
    fn from(v: Response) -> Self {
        v.0
    }
}
