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

//! Signer for APIs that verify requests with the x-sign scheme.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use reqgate_core::{Context, MemoryCredentialStore, OsEnv, Signer};
//! use reqgate_x_sign::{Config, DefaultCredentialProvider, RequestSigner};
//!
//! # async fn example() -> reqgate_core::Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let store = Arc::new(MemoryCredentialStore::new());
//! let config = Config::new().from_env(&ctx);
//!
//! let signer = Signer::new(
//!     ctx,
//!     DefaultCredentialProvider::new(store, config),
//!     RequestSigner::new(),
//! );
//!
//! let (mut parts, body) = http::Request::post("https://api.example.com/api/v1/projects")
//!     .header("content-type", "application/json")
//!     .body(br#"{"name":"demo"}"#.to_vec())?
//!     .into_parts();
//! signer.sign_or_forward(&mut parts, &body).await;
//! # Ok(())
//! # }
//! ```

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::{RequestSigner, Signature, SigningContext};

mod provide_credential;
pub use provide_credential::*;

mod constants;
pub use constants::{X_SIGN, X_SIGN_HEADERS, X_SIGN_NONCE, X_SIGN_TIMESTAMP};
