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

use bytes::Bytes;
use http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use serde_json::Value;

use crate::download::file_name_from_content_disposition;

/// What a completed request resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A JSON body with a success status code, returned in full.
    Json(Value),
    /// Anything that isn't a JSON envelope.
    File(FileResponse),
}

/// A non JSON response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResponse {
    /// File name taken from `Content-Disposition`.
    pub file_name: Option<String>,
    /// Raw `Content-Type` of the response.
    pub content_type: String,
    /// The body.
    pub data: Bytes,
}

/// Status fields embedded in a JSON response body.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusPayload {
    /// Application status code, `0` means success.
    pub code: i64,
    /// Message supplied by the server.
    pub msg: Option<String>,
    /// Payload of the response.
    pub data: Option<Value>,
}

impl StatusPayload {
    /// Read the status fields from a parsed body.
    ///
    /// Returns `None` if the body carries no numeric `code`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let code = value.get("code")?.as_i64()?;
        let msg = value
            .get("msg")
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        let data = value.get("data").cloned();

        Some(Self { code, msg, data })
    }
}

/// The parts of a response that drive classification.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    /// Raw `Content-Type` header.
    pub content_type: String,
    /// Media type without parameters, lowercased.
    pub essence: String,
    /// File name taken from `Content-Disposition`.
    pub file_name_hint: Option<String>,
}

impl ResponseEnvelope {
    /// Read the envelope from response headers.
    pub fn from_parts(parts: &http::response::Parts) -> Self {
        let content_type = parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase();
        let file_name_hint = parts
            .headers
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(file_name_from_content_disposition);

        Self {
            content_type,
            essence,
            file_name_hint,
        }
    }
}
