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

use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use log::{debug, warn};
use reqgate_core::{Context, Error, Result};
use serde_json::Value;

use crate::config::Config;
use crate::constants::*;
use crate::download::DownloadHandler;
use crate::envelope::{FileResponse, Outcome, ResponseEnvelope, StatusPayload};
use crate::gate::{SessionExpiryCoordinator, SessionExpiryGate};
use crate::hooks::{Hooks, Severity};

/// ResponseClassifier turns a completed response into an [`Outcome`] or a rejection.
///
/// JSON bodies are routed on their embedded `code`, forced downloads are
/// written to disk, everything else is handed back as a file.
#[derive(Debug, Clone)]
pub struct ResponseClassifier {
    config: Arc<Config>,
    hooks: Hooks,
    session: SessionExpiryCoordinator,
    downloads: DownloadHandler,
}

impl ResponseClassifier {
    /// Create a new classifier.
    ///
    /// Classifiers that should never show more than one session expired
    /// prompt at a time must share `gate`.
    pub fn new(ctx: Context, config: Config, hooks: Hooks, gate: Arc<SessionExpiryGate>) -> Self {
        let session = SessionExpiryCoordinator::new(gate, hooks.clone(), config.login_path());
        let downloads = DownloadHandler::new(ctx, config.download_dir.as_ref().map(PathBuf::from));

        Self {
            config: Arc::new(config),
            hooks,
            session,
            downloads,
        }
    }

    /// Get the hooks used by this classifier.
    pub fn hooks(&self) -> &Hooks {
        &self.hooks
    }

    /// Classify a completed response.
    pub async fn classify(&self, resp: http::Response<Bytes>) -> Result<Outcome> {
        let (parts, body) = resp.into_parts();
        self.cache_client_key(&parts);

        let envelope = ResponseEnvelope::from_parts(&parts);
        match envelope.essence.as_str() {
            APPLICATION_JSON => self.classify_json(&body),
            APPLICATION_FORCE_DOWNLOAD => {
                let file_name = envelope.file_name_hint.as_deref();
                match self.downloads.deliver(file_name, &body).await {
                    Ok(Some(path)) => debug!("download saved to {}", path.display()),
                    Ok(None) => {}
                    Err(err) => warn!("failed to save download {file_name:?}: {err}"),
                }
                Ok(Self::file(envelope, body))
            }
            _ => Ok(Self::file(envelope, body)),
        }
    }

    fn file(envelope: ResponseEnvelope, data: Bytes) -> Outcome {
        Outcome::File(FileResponse {
            file_name: envelope.file_name_hint,
            content_type: envelope.content_type,
            data,
        })
    }

    fn cache_client_key(&self, parts: &http::response::Parts) {
        if let Some(v) = parts.headers.get(X_CLIENT_KEY).and_then(|v| v.to_str().ok()) {
            self.hooks
                .storage()
                .set(CLIENT_KEY_STORAGE_KEY, v.to_string());
        }
    }

    fn classify_json(&self, body: &[u8]) -> Result<Outcome> {
        let value: Value = serde_json::from_slice(body).map_err(|e| {
            Error::unexpected("failed to decode json response body").with_source(e)
        })?;

        let Some(status) = StatusPayload::from_value(&value) else {
            debug!("json response carries no status code, passing it through");
            return Ok(Outcome::Json(value));
        };

        let code = status.code;
        if code == CODE_OK {
            return Ok(Outcome::Json(value));
        }
        debug!("json response rejected with code {code}");

        if let Some(key) = self.config.message_key(code) {
            let msg = self.hooks.translate(key);
            self.hooks.notify().show_message(&msg, Severity::Error);
            return Err(Error::response_rejected(msg).with_code(code));
        }

        let err = match code {
            CODE_INVALID_AUTH => {
                self.hooks.credentials().clear();
                self.hooks.navigate().navigate_to(self.config.login_path());
                let msg = self.hooks.translate(MSG_NO_PERMISSION);
                self.hooks.notify().show_message(&msg, Severity::Error);
                Error::unauthorized(msg)
            }
            CODE_SESSION_EXPIRED => {
                if self.config.offline {
                    debug!("session expired in offline mode, skip prompt");
                } else {
                    self.session.open();
                }
                Error::session_expired(self.hooks.translate(MSG_SESSION_EXPIRED))
            }
            CODE_PROXY_ERROR => Error::response_rejected(status.msg.unwrap_or_default()),
            CODE_NO_PERMISSION => {
                self.hooks.credentials().clear();
                let msg = status
                    .msg
                    .unwrap_or_else(|| self.hooks.translate(MSG_NO_PERMISSION));
                self.hooks.notify().show_message(&msg, Severity::Error);
                Error::permission_denied(msg)
            }
            _ => {
                let msg = status
                    .msg
                    .unwrap_or_else(|| self.hooks.translate(MSG_REQUEST_FAILED));
                self.hooks.notify().show_message(&msg, Severity::Error);
                Error::response_rejected(msg)
            }
        };

        Err(err.with_code(code))
    }
}
