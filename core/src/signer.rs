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

use crate::{Context, Error, ProvideCredential, Result, SignRequest, SigningCredential};
use log::warn;
use std::sync::Arc;

/// Signer is the main struct used to sign the request.
///
/// Credentials are loaded for every request so that a session cleared by
/// response handling takes effect on the very next call.
#[derive(Clone, Debug)]
pub struct Signer<K: SigningCredential> {
    ctx: Context,
    loader: Arc<dyn ProvideCredential<Credential = K>>,
    builder: Arc<dyn SignRequest<Credential = K>>,
}

/// Result of [`Signer::sign_or_forward`].
#[derive(Debug)]
pub enum SignStatus {
    /// The request carries a complete signature.
    Signed,
    /// Signing failed and the request goes out exactly as the caller built it.
    Unsigned(Error),
}

impl SignStatus {
    /// Check if the request has been signed.
    pub fn is_signed(&self) -> bool {
        matches!(self, SignStatus::Signed)
    }
}

impl<K: SigningCredential> Signer<K> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        loader: impl ProvideCredential<Credential = K>,
        builder: impl SignRequest<Credential = K>,
    ) -> Self {
        Self {
            ctx,
            loader: Arc::new(loader),
            builder: Arc::new(builder),
        }
    }

    /// Get the context used by this signer.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Signing request.
    ///
    /// On error the request headers may be partially updated, use
    /// [`Signer::sign_or_forward`] to keep the request intact.
    pub async fn sign(&self, req: &mut http::request::Parts, body: &[u8]) -> Result<()> {
        let cred = self.authorize(req).await?;

        self.builder
            .sign_request(&self.ctx, req, body, cred.as_ref())
            .await
    }

    /// Signing request without ever blocking it.
    ///
    /// If signing fails, the request is sent unsigned: headers written by
    /// [`SignRequest::authorize_request`] are kept, everything else is
    /// restored to what the caller built. If the credential can't be loaded
    /// or attached, all headers are restored. The failure is logged and
    /// returned in [`SignStatus::Unsigned`] so callers can observe it.
    pub async fn sign_or_forward(&self, req: &mut http::request::Parts, body: &[u8]) -> SignStatus {
        let snapshot = req.headers.clone();
        let cred = match self.authorize(req).await {
            Ok(cred) => cred,
            Err(err) => return Self::forward_unsigned(req, snapshot, err),
        };

        let authorized = req.headers.clone();
        match self
            .builder
            .sign_request(&self.ctx, req, body, cred.as_ref())
            .await
        {
            Ok(()) => SignStatus::Signed,
            Err(err) => Self::forward_unsigned(req, authorized, err),
        }
    }

    /// Load the credential and attach it to the request.
    async fn authorize(&self, req: &mut http::request::Parts) -> Result<Option<K>> {
        let cred = self.loader.provide_credential(&self.ctx).await?;
        if cred.is_some() && !cred.is_valid() {
            return Err(Error::credential_invalid("loaded credential is invalid"));
        }

        self.builder
            .authorize_request(&self.ctx, req, cred.as_ref())
            .await?;
        Ok(cred)
    }

    fn forward_unsigned(
        req: &mut http::request::Parts,
        headers: http::HeaderMap,
        err: Error,
    ) -> SignStatus {
        warn!(
            "signing {} {} failed, forwarding unsigned: {err:?}",
            req.method, req.uri
        );
        req.headers = headers;
        SignStatus::Unsigned(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use http::HeaderValue;

    #[derive(Clone, Debug)]
    struct Token(String);

    impl SigningCredential for Token {
        fn is_valid(&self) -> bool {
            !self.0.is_empty()
        }
    }

    #[derive(Debug)]
    struct Fixed(Option<&'static str>);

    #[async_trait::async_trait]
    impl ProvideCredential for Fixed {
        type Credential = Token;

        async fn provide_credential(&self, _: &Context) -> Result<Option<Token>> {
            Ok(self.0.map(|v| Token(v.to_string())))
        }
    }

    /// Writes one header, then fails if the body is empty.
    #[derive(Debug)]
    struct HalfWay;

    #[async_trait::async_trait]
    impl SignRequest for HalfWay {
        type Credential = Token;

        async fn sign_request(
            &self,
            _: &Context,
            req: &mut http::request::Parts,
            body: &[u8],
            _: Option<&Token>,
        ) -> Result<()> {
            req.headers
                .insert("x-sign", HeaderValue::from_static("partial"));
            if body.is_empty() {
                return Err(Error::request_invalid("empty body"));
            }
            Ok(())
        }

        async fn authorize_request(
            &self,
            _: &Context,
            req: &mut http::request::Parts,
            cred: Option<&Token>,
        ) -> Result<()> {
            if let Some(cred) = cred {
                req.headers.insert("authorization", cred.0.parse()?);
            }
            Ok(())
        }
    }

    #[derive(Debug)]
    struct Failing;

    #[async_trait::async_trait]
    impl ProvideCredential for Failing {
        type Credential = Token;

        async fn provide_credential(&self, _: &Context) -> Result<Option<Token>> {
            Err(Error::unexpected("store unavailable"))
        }
    }

    fn parts() -> http::request::Parts {
        http::Request::get("https://example.com/api")
            .header("x-project-id", "1")
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    #[tokio::test]
    async fn test_sign_or_forward_signed() {
        let signer = Signer::new(Context::new(), Fixed(Some("token")), HalfWay);
        let mut req = parts();

        let status = signer.sign_or_forward(&mut req, b"{}").await;
        assert!(status.is_signed());
        assert_eq!(req.headers["authorization"], "token");
        assert_eq!(req.headers["x-sign"], "partial");
    }

    #[tokio::test]
    async fn test_sign_or_forward_keeps_authorization() {
        let _ = env_logger::builder().is_test(true).try_init();

        let signer = Signer::new(Context::new(), Fixed(Some("token")), HalfWay);
        let mut req = parts();
        let mut expected = req.headers.clone();
        expected.insert("authorization", HeaderValue::from_static("token"));

        let status = signer.sign_or_forward(&mut req, b"").await;
        match status {
            SignStatus::Unsigned(err) => assert_eq!(err.kind(), ErrorKind::RequestInvalid),
            SignStatus::Signed => panic!("signing must fail on empty body"),
        }
        assert_eq!(req.headers, expected);
        assert!(req.headers.get("x-sign").is_none());
    }

    #[tokio::test]
    async fn test_sign_or_forward_restores_headers_on_load_failure() {
        let signer = Signer::new(Context::new(), Failing, HalfWay);
        let mut req = parts();
        let before = req.headers.clone();

        let status = signer.sign_or_forward(&mut req, b"{}").await;
        match status {
            SignStatus::Unsigned(err) => assert_eq!(err.kind(), ErrorKind::Unexpected),
            SignStatus::Signed => panic!("signing must fail without credential"),
        }
        assert_eq!(req.headers, before);
    }

    #[tokio::test]
    async fn test_sign_rejects_invalid_credential() {
        let signer = Signer::new(Context::new(), Fixed(Some("")), HalfWay);
        let mut req = parts();

        let err = signer.sign(&mut req, b"{}").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
    }

    #[tokio::test]
    async fn test_sign_without_credential() {
        let signer = Signer::new(Context::new(), Fixed(None), HalfWay);
        let mut req = parts();

        signer.sign(&mut req, b"{}").await.unwrap();
        assert!(req.headers.get("authorization").is_none());
    }
}
