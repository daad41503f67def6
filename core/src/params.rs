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

//! Request parameters and their canonical, flattened form.
//!
//! CMS parameters are a mapping from names to [`Value`]s which may be scalars,
//! one level of map, or one level of list. Before a request is signed or sent
//! the mapping is flattened into [`CanonicalParams`]:
//!
//! ```text
//! {filter: {status: "live", page: 2}, tags: ["a", "b"], live: true}
//!
//! filter[page]=2
//! filter[status]=live
//! live=1
//! tags[0]=a
//! tags[1]=b
//! ```
//!
//! Pairs are ordered by their flat key in byte order, so `filter2` comes
//! before `filter[page]`. The children of a list stay together in position
//! order and are placed where `name[0]` sorts. Logically equal inputs always
//! flatten to the same sequence.

use crate::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

/// A single parameter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Canonicalized as `1` or `0`.
    Bool(bool),
    /// Integer scalar.
    Int(i64),
    /// Floating point scalar, canonicalized through `Display`.
    Float(f64),
    /// String scalar, canonicalized verbatim.
    String(String),
    /// Ordered sequence, flattened as `name[0]`, `name[1]`, ...
    List(Vec<Value>),
    /// Nested mapping, flattened as `name[child]`.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Canonical string form of a scalar, `None` for containers.
    pub fn to_canonical_string(&self) -> Option<String> {
        match self {
            Value::Bool(true) => Some("1".to_string()),
            Value::Bool(false) => Some("0".to_string()),
            Value::Int(v) => Some(v.to_string()),
            Value::Float(v) => Some(v.to_string()),
            Value::String(v) => Some(v.clone()),
            Value::List(_) | Value::Map(_) => None,
        }
    }

    /// Returns true if this value is a scalar.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::List(_) | Value::Map(_))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Value::Map(v)
    }
}

impl From<Params> for Value {
    fn from(v: Params) -> Self {
        Value::Map(v.0)
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = Error;

    fn try_from(v: serde_json::Value) -> Result<Self> {
        Ok(match v {
            serde_json::Value::Null => {
                return Err(Error::request_invalid(
                    "null is not a supported parameter value",
                ))
            }
            serde_json::Value::Bool(v) => Value::Bool(v),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(v) => Value::Int(v),
                None => Value::Float(n.as_f64().ok_or_else(|| {
                    Error::request_invalid(format!("number {n} is not representable"))
                })?),
            },
            serde_json::Value::String(v) => Value::String(v),
            serde_json::Value::Array(items) => Value::List(
                items
                    .into_iter()
                    .map(Value::try_from)
                    .collect::<Result<_>>()?,
            ),
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| Ok((k, Value::try_from(v)?)))
                    .collect::<Result<_>>()?,
            ),
        })
    }
}

/// Request parameters keyed by name.
///
/// Insertion order carries no meaning: names are kept sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, Value>);

impl Params {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a parameter, returning the previous value under that name.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Get a parameter by name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Remove a parameter by name.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Returns true if a parameter with this name exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of top level parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate parameters in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Merge `other` into this set, overwriting parameters with the same name.
    pub fn merge(&mut self, other: Params) {
        self.0.extend(other.0);
    }

    /// Flatten into the canonical form used for both signing and transmission.
    ///
    /// Returns a `RequestInvalid` error if a container holds another container.
    pub fn canonicalize(&self) -> Result<CanonicalParams> {
        // Each pair carries its sort position: the flat key, or `name[0]` plus
        // the index for list children.
        let mut pairs: Vec<((String, usize), (String, String))> =
            Vec::with_capacity(self.0.len());

        for (key, value) in &self.0 {
            match value {
                Value::Map(children) => {
                    for (child, v) in children {
                        let flat = nested_key(key, child)?;
                        pairs.push(((flat.clone(), 0), (flat, nested_scalar(key, v)?)));
                    }
                }
                Value::List(items) => {
                    let head = nested_key(key, 0)?;
                    for (idx, v) in items.iter().enumerate() {
                        pairs.push((
                            (head.clone(), idx),
                            (nested_key(key, idx)?, nested_scalar(key, v)?),
                        ));
                    }
                }
                scalar => {
                    if let Some(v) = scalar.to_canonical_string() {
                        pairs.push(((key.clone(), 0), (key.clone(), v)));
                    }
                }
            }
        }

        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(CanonicalParams(pairs.into_iter().map(|(_, pair)| pair).collect()))
    }
}

fn nested_key(parent: &str, child: impl std::fmt::Display) -> Result<String> {
    let mut key = String::with_capacity(parent.len() + 8);
    write!(key, "{parent}[{child}]")?;
    Ok(key)
}

fn nested_scalar(parent: &str, value: &Value) -> Result<String> {
    value.to_canonical_string().ok_or_else(|| {
        Error::request_invalid(format!(
            "parameter {parent} is nested more than one level deep, which is not supported"
        ))
    })
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Params(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl IntoIterator for Params {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl TryFrom<serde_json::Value> for Params {
    type Error = Error;

    /// Build parameters from a JSON object, handy with `serde_json::json!`.
    fn try_from(v: serde_json::Value) -> Result<Self> {
        match Value::try_from(v)? {
            Value::Map(map) => Ok(Params(map)),
            _ => Err(Error::request_invalid("parameters must be a JSON object")),
        }
    }
}

/// Flattened parameters in canonical order.
///
/// Every value is a scalar string and every key is a flat name like `name`,
/// `name[child]` or `name[0]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalParams(Vec<(String, String)>);

impl CanonicalParams {
    /// Iterate pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Append a pair after the canonical ones.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// Look up the value of a flat key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Number of flat pairs.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encode as an `application/x-www-form-urlencoded` string.
    pub fn to_query_string(&self) -> String {
        let mut s = form_urlencoded::Serializer::new(String::new());
        for (k, v) in self.iter() {
            s.append_pair(k, v);
        }
        s.finish()
    }
}
