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

use std::sync::Arc;

use bytes::Bytes;
use log::debug;
use reqgate_core::{Context, Error, Result, SignStatus, Signer};
use reqgate_envelope::{
    Disposition, Hooks, Outcome, ResponseClassifier, SessionExpiryGate, TransportErrorClassifier,
};
use reqgate_x_sign::{Credential, DefaultCredentialProvider, RequestSigner};

use crate::CancelToken;

/// Client sends requests through the whole pipeline: sign, send, classify.
///
/// ```no_run
/// use bytes::Bytes;
/// use reqgate::envelope::{Hooks, Outcome};
/// use reqgate::Client;
///
/// # async fn example() -> reqgate::Result<()> {
/// let client = Client::new(reqgate::default_context(), Hooks::new());
///
/// let req = http::Request::get("https://api.example.com/api/v1/projects?page=1")
///     .body(Bytes::new())?;
/// if let Some(Outcome::Json(body)) = client.send(req).await? {
///     println!("{body}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    ctx: Context,
    signer: Signer<Credential>,
    classifier: ResponseClassifier,
    transport: TransportErrorClassifier,
}

impl Client {
    /// Create a client with the x-sign signer and envelope classifier,
    /// both configured from the env of `ctx`.
    ///
    /// The signer reads its token from the credential store in `hooks`, so
    /// clearing the session during response handling stops signing at once.
    /// `REQGATE_TOKEN` only seeds an empty store here.
    pub fn new(ctx: Context, hooks: Hooks) -> Self {
        let provider = DefaultCredentialProvider::new(
            hooks.credentials().clone(),
            reqgate_x_sign::Config::new().from_env(&ctx),
        );
        let signer = Signer::new(ctx.clone(), provider, RequestSigner::new());
        let classifier = ResponseClassifier::new(
            ctx.clone(),
            reqgate_envelope::Config::new().from_env(&ctx),
            hooks.clone(),
            Arc::new(SessionExpiryGate::new()),
        );

        Self {
            ctx,
            signer,
            classifier,
            transport: TransportErrorClassifier::new(hooks),
        }
    }

    /// Replace the signer.
    pub fn with_signer(mut self, signer: Signer<Credential>) -> Self {
        self.signer = signer;
        self
    }

    /// Replace the response classifier.
    ///
    /// Transport failures are reported through the hooks of the new classifier.
    pub fn with_classifier(mut self, classifier: ResponseClassifier) -> Self {
        self.transport = TransportErrorClassifier::new(classifier.hooks().clone());
        self.classifier = classifier;
        self
    }

    /// Send a request.
    ///
    /// Returns `Ok(None)` only if the request was cancelled.
    pub async fn send(&self, req: http::Request<Bytes>) -> Result<Option<Outcome>> {
        self.send_with_cancel(req, &CancelToken::new()).await
    }

    /// Send a request that can be abandoned through `cancel`.
    pub async fn send_with_cancel(
        &self,
        req: http::Request<Bytes>,
        cancel: &CancelToken,
    ) -> Result<Option<Outcome>> {
        let (mut parts, body) = req.into_parts();
        if let SignStatus::Unsigned(err) = self.signer.sign_or_forward(&mut parts, &body).await {
            debug!("sending {} {} unsigned: {err}", parts.method, parts.uri);
        }
        let req = http::Request::from_parts(parts, body);

        let resp = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Error::cancelled("request cancelled")),
            resp = self.ctx.http_send(req) => resp,
        };

        match resp {
            Ok(resp) => self.classifier.classify(resp).await.map(Some),
            Err(err) => match self.transport.classify(err) {
                Disposition::Suppressed => Ok(None),
                Disposition::Rejected(err) => Err(err),
            },
        }
    }
}
