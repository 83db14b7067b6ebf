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

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http::HeaderMap;
use pretty_assertions::assert_eq;
use reqgate::envelope::{Hooks, Outcome};
use reqgate::x_sign::{X_SIGN, X_SIGN_HEADERS, X_SIGN_NONCE, X_SIGN_TIMESTAMP};
use reqgate::{
    CancelToken, Client, Context, CredentialStore, Error, ErrorKind, HttpSend,
    MemoryCredentialStore, Result, StaticEnv,
};
use serde_json::{json, Value};

#[derive(Debug, Clone)]
enum Reply {
    Json(Value),
    Timeout,
    Hang,
}

#[derive(Debug, Clone)]
struct MockHttpSend {
    reply: Reply,
    seen: Arc<Mutex<Vec<HeaderMap>>>,
}

impl MockHttpSend {
    fn new(reply: Reply) -> Self {
        Self {
            reply,
            seen: Arc::default(),
        }
    }

    fn seen(&self) -> Vec<HeaderMap> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.seen.lock().unwrap().push(req.headers().clone());

        match &self.reply {
            Reply::Json(body) => Ok(http::Response::builder()
                .header("content-type", "application/json")
                .body(Bytes::from(body.to_string()))?),
            Reply::Timeout => Err(Error::timeout("operation timed out")),
            Reply::Hang => std::future::pending().await,
        }
    }
}

fn client(reply: Reply, store: Arc<MemoryCredentialStore>) -> (Client, MockHttpSend) {
    let _ = env_logger::builder().is_test(true).try_init();

    let http = MockHttpSend::new(reply);
    let ctx = Context::new().with_http_send(http.clone());
    let client = Client::new(ctx, Hooks::new().with_credentials(store));
    (client, http)
}

fn get() -> http::Request<Bytes> {
    http::Request::get("https://api.example.com/api/v1/projects?page=1")
        .header("x-project-id", "42")
        .body(Bytes::new())
        .expect("request must be valid")
}

#[tokio::test]
async fn test_send_signs_request() -> anyhow::Result<()> {
    let store = Arc::new(MemoryCredentialStore::with_token("token-1"));
    let body = json!({"code": 0, "data": {"total": 1}});
    let (client, http) = client(Reply::Json(body.clone()), store);

    let outcome = client.send(get()).await?;
    assert_eq!(outcome, Some(Outcome::Json(body)));

    let seen = http.seen();
    assert_eq!(seen.len(), 1);
    let headers = &seen[0];
    assert_eq!(headers["authorization"], "token-1");
    assert_eq!(headers[X_SIGN].len(), 64);
    assert_eq!(headers[X_SIGN_HEADERS], "x-project-id");
    assert_eq!(headers[X_SIGN_NONCE].len(), 16);
    assert!(headers[X_SIGN_TIMESTAMP].to_str()?.parse::<i64>().is_ok());
    Ok(())
}

#[tokio::test]
async fn test_invalid_auth_stops_sending_token() -> anyhow::Result<()> {
    let store = Arc::new(MemoryCredentialStore::with_token("token-1"));
    let (client, http) = client(Reply::Json(json!({"code": 4101})), store.clone());

    let err = client.send(get()).await.expect_err("4101 must be rejected");
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert_eq!(store.token(), None);

    let _ = client.send(get()).await;
    let seen = http.seen();
    assert_eq!(seen.len(), 2);
    assert!(seen[0].contains_key("authorization"));
    assert!(!seen[1].contains_key("authorization"));
    assert!(seen[1].contains_key(X_SIGN));
    Ok(())
}

#[tokio::test]
async fn test_token_from_env() -> anyhow::Result<()> {
    let http = MockHttpSend::new(Reply::Json(json!({"code": 0})));
    let ctx = Context::new()
        .with_http_send(http.clone())
        .with_env(StaticEnv {
            home_dir: None,
            envs: HashMap::from([("REQGATE_TOKEN".to_string(), "env-token".to_string())]),
        });
    let client = Client::new(ctx, Hooks::new());

    client.send(get()).await?;
    assert_eq!(http.seen()[0]["authorization"], "env-token");
    Ok(())
}

#[tokio::test]
async fn test_invalid_auth_drops_env_token() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let http = MockHttpSend::new(Reply::Json(json!({"code": 4101})));
    let ctx = Context::new()
        .with_http_send(http.clone())
        .with_env(StaticEnv {
            home_dir: None,
            envs: HashMap::from([("REQGATE_TOKEN".to_string(), "env-token".to_string())]),
        });
    let store = Arc::new(MemoryCredentialStore::new());
    let client = Client::new(ctx, Hooks::new().with_credentials(store.clone()));

    let err = client.send(get()).await.expect_err("4101 must be rejected");
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert_eq!(store.token(), None);

    let _ = client.send(get()).await;
    let seen = http.seen();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0]["authorization"], "env-token");
    assert!(!seen[1].contains_key("authorization"));
    Ok(())
}

#[tokio::test]
async fn test_binary_upload_keeps_token() -> anyhow::Result<()> {
    let store = Arc::new(MemoryCredentialStore::with_token("user-token"));
    let (client, http) = client(Reply::Json(json!({"code": 0})), store);

    let req = http::Request::post("https://api.example.com/api/v1/files")
        .header("content-type", "image/jpeg")
        .header("x-project-id", "42")
        .body(Bytes::from_static(&[0xff, 0xd8, 0xff, 0xe0]))?;
    client.send(req).await?;

    let seen = http.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0]["authorization"], "user-token");
    for name in [X_SIGN, X_SIGN_HEADERS, X_SIGN_TIMESTAMP, X_SIGN_NONCE] {
        assert!(!seen[0].contains_key(name), "{name} must be absent");
    }
    Ok(())
}

#[tokio::test]
async fn test_cancelled_request_resolves_to_none() -> anyhow::Result<()> {
    let store = Arc::new(MemoryCredentialStore::new());
    let (client, _) = client(Reply::Hang, store);

    let cancel = CancelToken::new();
    let canceller = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            cancel.cancel();
        })
    };

    let outcome = tokio::time::timeout(
        Duration::from_secs(5),
        client.send_with_cancel(get(), &cancel),
    )
    .await?;
    assert_eq!(outcome?, None);
    canceller.await?;
    Ok(())
}

#[tokio::test]
async fn test_timeout_is_rejected() {
    let store = Arc::new(MemoryCredentialStore::new());
    let (client, _) = client(Reply::Timeout, store);

    let err = client
        .send(get())
        .await
        .expect_err("timeout must be rejected");
    assert_eq!(err.kind(), ErrorKind::Timeout);
}
