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

//! Reqwest-based transport for reqgate.
//!
//! `ReqwestHttpSend` implements `HttpSend` from `reqgate_core` and reports
//! reqwest failures with the error kinds that transport error handling
//! understands: timeouts become [`ErrorKind::Timeout`], everything else
//! becomes [`ErrorKind::Transport`].
//!
//! ```no_run
//! use reqgate_core::Context;
//! use reqgate_http_send_reqwest::ReqwestHttpSend;
//! use reqwest::Client;
//! use std::time::Duration;
//!
//! # fn main() -> anyhow::Result<()> {
//! let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));
//! # Ok(())
//! # }
//! ```
//!
//! [`ErrorKind::Timeout`]: reqgate_core::ErrorKind::Timeout
//! [`ErrorKind::Transport`]: reqgate_core::ErrorKind::Transport

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use log::debug;
use reqgate_core::{Error, HttpSend, Result};
use reqwest::{Client, Request};

/// HttpSend implementation backed by a [`reqwest::Client`].
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req).map_err(|e| {
            Error::request_invalid("failed to convert request").with_source(e)
        })?;
        debug!("sending request: {} {}", req.method(), req.url());

        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(from_reqwest_error)?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(from_reqwest_error)?;
        Ok(http::Response::from_parts(parts, bs))
    }
}

/// Map a reqwest error onto the transport error kinds.
pub fn from_reqwest_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::timeout(format!("request timeout: {err}")).with_source(err)
    } else {
        Error::transport(format!("sending request failed: {err}")).with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqgate_core::{Context, ErrorKind};
    use std::time::Duration;

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("client must build");
        let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));

        // Port 9 on loopback has nothing listening.
        let req = http::Request::get("http://127.0.0.1:9/api")
            .body(Bytes::new())
            .unwrap();
        let err = ctx.http_send(req).await.unwrap_err();
        assert!(err.is_transport_error());
        assert_ne!(err.kind(), ErrorKind::Cancelled);
    }
}
