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

//! Core components for signing API requests and routing their responses.
//!
//! This crate provides the foundational types and traits for the reqgate ecosystem.
//!
//! ## Overview
//!
//! - **Context**: A container that holds implementations for HTTP sending, file writing and environment access
//! - **Traits**: Abstract interfaces for credential loading (`ProvideCredential`), request signing (`SignRequest`)
//!   and request canonicalization (`Canonicalize`)
//! - **Signer**: The orchestrator that loads credentials and signs requests, falling back to
//!   unsigned requests when signing fails
//! - **CredentialStore**: The shared store of the signed-in user's bearer token
//!
//! ## Example
//!
//! ```no_run
//! use reqgate_core::{Context, ProvideCredential, Result, SignRequest, Signer, SigningCredential};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct MyCredential {
//!     token: String,
//! }
//!
//! impl SigningCredential for MyCredential {
//!     fn is_valid(&self) -> bool {
//!         !self.token.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MyLoader;
//!
//! #[async_trait]
//! impl ProvideCredential for MyLoader {
//!     type Credential = MyCredential;
//!
//!     async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
//!         Ok(Some(MyCredential {
//!             token: "my-token".to_string(),
//!         }))
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MyBuilder;
//!
//! #[async_trait]
//! impl SignRequest for MyBuilder {
//!     type Credential = MyCredential;
//!
//!     async fn sign_request(
//!         &self,
//!         _ctx: &Context,
//!         req: &mut http::request::Parts,
//!         _body: &[u8],
//!         cred: Option<&Self::Credential>,
//!     ) -> Result<()> {
//!         if let Some(cred) = cred {
//!             req.headers.insert("authorization", cred.token.parse()?);
//!         }
//!         Ok(())
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let signer = Signer::new(Context::new(), MyLoader, MyBuilder);
//!
//! let (mut parts, body) = http::Request::get("https://example.com")
//!     .body(Vec::new())?
//!     .into_parts();
//! signer.sign(&mut parts, &body).await?;
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod utils;

mod context;
pub use context::{
    Context, Env, FileWrite, HttpSend, NoopEnv, NoopFileWrite, NoopHttpSend, OsEnv, StaticEnv,
};

mod error;
pub use error::{Error, ErrorKind, Result};

mod api;
pub use api::{ProvideCredential, ProvideCredentialChain, SignRequest, SigningCredential};

mod request;
pub use request::{CanonicalHeaders, CanonicalRequest, Canonicalize, DefaultCanonicalizer};

mod signer;
pub use signer::{SignStatus, Signer};

mod store;
pub use store::{CredentialStore, MemoryCredentialStore};
