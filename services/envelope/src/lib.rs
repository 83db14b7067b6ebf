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

//! Response handling for APIs that wrap results in a `{code, msg, data}` envelope.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use bytes::Bytes;
//! use reqgate_core::{Context, OsEnv};
//! use reqgate_envelope::{Config, Hooks, Outcome, ResponseClassifier, SessionExpiryGate};
//!
//! # async fn example() -> reqgate_core::Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let config = Config::new().from_env(&ctx);
//! let classifier = ResponseClassifier::new(
//!     ctx,
//!     config,
//!     Hooks::new(),
//!     Arc::new(SessionExpiryGate::new()),
//! );
//!
//! let resp = http::Response::builder()
//!     .header("content-type", "application/json")
//!     .body(Bytes::from_static(br#"{"code":0,"data":[]}"#))?;
//! match classifier.classify(resp).await? {
//!     Outcome::Json(body) => println!("{body}"),
//!     Outcome::File(file) => println!("{} bytes", file.data.len()),
//! }
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod config;
pub use config::Config;

mod constants;
pub use constants::{
    CLIENT_KEY_STORAGE_KEY, CODE_INVALID_AUTH, CODE_NO_PERMISSION, CODE_OK, CODE_PROXY_ERROR,
    CODE_SESSION_EXPIRED,
};

mod hooks;
pub use hooks::{
    ConfirmOptions, DialogChoice, Hooks, KeyTranslate, LogNotify, MemorySessionStorage, Navigate,
    NoopNavigate, Notify, SessionStorage, Severity, StaticTranslate, Translate,
};

mod gate;
pub use gate::{SessionExpiryCoordinator, SessionExpiryGate, SessionExpiryPermit};

mod envelope;
pub use envelope::{FileResponse, Outcome, ResponseEnvelope, StatusPayload};

mod download;
pub use download::{file_name_from_content_disposition, DownloadHandler};

mod classify;
pub use classify::ResponseClassifier;

mod transport;
pub use transport::{Disposition, TransportErrorClassifier};
