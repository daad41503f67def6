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

use bytes::{BufMut, Bytes, BytesMut};
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Body of a `POST` request.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Literal request body.
    ///
    /// Text bodies are part of the signature.
    Text(String),
    /// Form fields and file attachments.
    ///
    /// Form bodies are never signed.
    Form(Form),
}

impl From<String> for Body {
    fn from(v: String) -> Self {
        Body::Text(v)
    }
}

impl From<&str> for Body {
    fn from(v: &str) -> Self {
        Body::Text(v.to_string())
    }
}

impl From<Form> for Body {
    fn from(v: Form) -> Self {
        Body::Form(v)
    }
}

/// A file attached to a form.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    /// Name of the form part, like `api_poster`.
    pub name: String,
    /// File name announced to the server.
    pub file_name: String,
    /// Content of the file.
    pub content: Bytes,
}

/// Form fields plus optional file attachments.
///
/// Without files the form is sent as `application/x-www-form-urlencoded`,
/// otherwise as `multipart/form-data`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Form {
    fields: Vec<(String, String)>,
    files: Vec<FilePart>,
}

impl Form {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Attach a file.
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Self {
        self.files.push(FilePart {
            name: name.into(),
            file_name: file_name.into(),
            content: content.into(),
        });
        self
    }

    /// Returns true if the form carries file attachments.
    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }

    /// Encode the form, returning the content type and the payload.
    pub(crate) fn encode(&self) -> (String, Bytes) {
        if !self.has_files() {
            let mut s = form_urlencoded::Serializer::new(String::new());
            for (k, v) in &self.fields {
                s.append_pair(k, v);
            }
            return (
                "application/x-www-form-urlencoded".to_string(),
                Bytes::from(s.finish()),
            );
        }

        let boundary = boundary();
        (
            format!("multipart/form-data; boundary={boundary}"),
            self.encode_multipart(&boundary),
        )
    }

    // Built by hand: `HttpSend` only carries `http::Request<Bytes>`, so
    // `reqwest::multipart` cannot be used behind it.
    fn encode_multipart(&self, boundary: &str) -> Bytes {
        let size = self.files.iter().map(|f| f.content.len() + 256).sum::<usize>()
            + self.fields.iter().map(|(k, v)| k.len() + v.len() + 128).sum::<usize>();
        let mut buf = BytesMut::with_capacity(size);

        for (name, value) in &self.fields {
            buf.put_slice(format!("--{boundary}\r\n").as_bytes());
            buf.put_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    quote(name)
                )
                .as_bytes(),
            );
            buf.put_slice(value.as_bytes());
            buf.put_slice(b"\r\n");
        }

        for file in &self.files {
            buf.put_slice(format!("--{boundary}\r\n").as_bytes());
            buf.put_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                    quote(&file.name),
                    quote(&file.file_name)
                )
                .as_bytes(),
            );
            buf.put_slice(b"Content-Type: application/octet-stream\r\n\r\n");
            buf.put_slice(&file.content);
            buf.put_slice(b"\r\n");
        }

        buf.put_slice(format!("--{boundary}--\r\n").as_bytes());
        buf.freeze()
    }
}

fn boundary() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(24)
        .map(char::from)
        .collect();
    format!("volar-{suffix}")
}

// Quotes and line breaks would end the header value early.
fn quote(v: &str) -> String {
    v.replace(['"', '\r', '\n'], "")
}
