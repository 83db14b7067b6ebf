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

//! x-sign request signer.

use std::fmt::Write;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use http::header::AUTHORIZATION;
use http::HeaderValue;
use log::debug;
use rand::distributions::Alphanumeric;
use rand::Rng;
use reqgate_core::hash::hex_sha256;
use reqgate_core::{CanonicalRequest, Canonicalize, Context, DefaultCanonicalizer, Result, SignRequest};

use super::constants::*;
use super::credential::Credential;

/// RequestSigner that implements the x-sign scheme.
///
/// Every request gets an `Authorization` header carrying the bearer token
/// (when there is one) and four signature headers:
///
/// - `x-sign`: hex encoded SHA256 of the string to sign
/// - `x-sign-headers`: names of the signed headers joined by `,`
/// - `x-sign-timestamp`: signing time in unix milliseconds
/// - `x-sign-nonce`: a random 16 characters string used only once
///
/// The signature headers are written all together or not at all.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    canonicalizer: Arc<dyn Canonicalize>,
    time: Option<DateTime<Utc>>,
    nonce: Option<String>,
}

impl Default for RequestSigner {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestSigner {
    /// Create a signer with the default canonical rules.
    pub fn new() -> Self {
        Self {
            canonicalizer: Arc::new(DefaultCanonicalizer),
            time: None,
            nonce: None,
        }
    }

    /// Replace the canonical rules.
    ///
    /// The server must verify with exactly the same rules.
    pub fn with_canonicalizer(mut self, canonicalizer: impl Canonicalize) -> Self {
        self.canonicalizer = Arc::new(canonicalizer);
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self
    }

    /// Specify the nonce.
    ///
    /// # Note
    ///
    /// A fixed nonce makes signatures replayable.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_nonce(mut self, nonce: &str) -> Self {
        self.nonce = Some(nonce.to_string());
        self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _ctx: &Context,
        req: &mut http::request::Parts,
        body: &[u8],
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        // Anonymous requests are still signed, they just carry no token.
        insert_authorization(req, credential)?;

        let ctx = SigningContext {
            canonical: CanonicalRequest::build(req, body, self.canonicalizer.as_ref())?,
            timestamp_millis: self.time.unwrap_or_else(Utc::now).timestamp_millis(),
            nonce: self.nonce.clone().unwrap_or_else(generate_nonce),
        };
        let signature = ctx.signature()?;

        // Parse every value before touching the headers.
        let values: [(&'static str, HeaderValue); 4] = [
            (X_SIGN, signature.value.parse()?),
            (X_SIGN_HEADERS, signature.header_names.join(",").parse()?),
            (X_SIGN_TIMESTAMP, ctx.timestamp_millis.to_string().parse()?),
            (X_SIGN_NONCE, ctx.nonce.parse()?),
        ];
        for (name, value) in values {
            req.headers.insert(name, value);
        }

        Ok(())
    }

    async fn authorize_request(
        &self,
        _ctx: &Context,
        req: &mut http::request::Parts,
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        insert_authorization(req, credential)
    }
}

fn insert_authorization(
    req: &mut http::request::Parts,
    credential: Option<&Credential>,
) -> Result<()> {
    if let Some(cred) = credential {
        req.headers.insert(AUTHORIZATION, {
            let mut value: HeaderValue = cred.token.parse()?;
            value.set_sensitive(true);

            value
        });
    }
    Ok(())
}

/// SigningContext is everything one signature is computed from.
///
/// It's built for a single request and dropped right after signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningContext {
    /// Canonical request.
    pub canonical: CanonicalRequest,
    /// Signing time in unix milliseconds.
    pub timestamp_millis: i64,
    /// Random string used only once.
    pub nonce: String,
}

/// Signature computed from a [`SigningContext`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Hex encoded SHA256 digest.
    pub value: String,
    /// Names of the headers covered by `value`.
    pub header_names: Vec<String>,
}

impl SigningContext {
    /// Construct string to sign
    ///
    /// ## Format
    ///
    /// ```text
    /// Method + "\n" +
    /// Path + "\n" +
    /// CanonicalParams + "\n" +
    /// CanonicalBody + "\n" +
    /// CanonicalHeaders + "\n" +
    /// TimestampMillis + "\n" +
    /// Nonce
    /// ```
    pub fn string_to_sign(&self) -> Result<String> {
        let c = &self.canonical;

        let mut s = String::new();
        writeln!(&mut s, "{}", c.method)?;
        writeln!(&mut s, "{}", c.path)?;
        writeln!(&mut s, "{}", c.params)?;
        writeln!(&mut s, "{}", c.body)?;
        writeln!(&mut s, "{}", c.headers.canonical)?;
        writeln!(&mut s, "{}", self.timestamp_millis)?;
        write!(&mut s, "{}", self.nonce)?;

        debug!("string to sign: {}", &s);
        Ok(s)
    }

    /// Compute the signature.
    pub fn signature(&self) -> Result<Signature> {
        Ok(Signature {
            value: hex_sha256(self.string_to_sign()?.as_bytes()),
            header_names: self.canonical.headers.sorted_keys.clone(),
        })
    }
}

fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LENGTH)
        .map(char::from)
        .collect()
}
