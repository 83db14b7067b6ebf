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

//! Sign API requests with x-sign and route their enveloped responses.
//!
//! This crate re-exports `reqgate-core` and bundles the pieces a client needs:
//!
//! - [`x_sign`]: request signing with the x-sign scheme.
//! - [`envelope`]: classification of `{code, msg, data}` responses, the
//!   session expired prompt and forced downloads.
//! - [`Client`]: the pipeline that signs, sends and classifies.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use bytes::Bytes;
//! use reqgate::envelope::Hooks;
//! use reqgate::{CancelToken, Client, MemoryCredentialStore};
//!
//! # async fn example() -> reqgate::Result<()> {
//! let store = Arc::new(MemoryCredentialStore::with_token("my-token"));
//! let client = Client::new(reqgate::default_context(), Hooks::new().with_credentials(store));
//!
//! let cancel = CancelToken::new();
//! let req = http::Request::post("https://api.example.com/api/v1/projects")
//!     .header("content-type", "application/json")
//!     .body(Bytes::from_static(br#"{"name":"demo"}"#))?;
//! let outcome = client.send_with_cancel(req, &cancel).await?;
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub use reqgate_core::*;

/// Request signing with the x-sign scheme.
pub mod x_sign {
    pub use reqgate_x_sign::*;
}

/// Classification of enveloped responses.
pub mod envelope {
    pub use reqgate_envelope::*;
}

mod cancel;
pub use cancel::CancelToken;

mod client;
pub use client::Client;

#[cfg(feature = "default-context")]
mod context;
#[cfg(feature = "default-context")]
pub use context::default_context;
