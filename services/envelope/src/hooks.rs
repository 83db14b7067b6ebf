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
use std::fmt::Debug;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use log::{info, warn};
use reqgate_core::{CredentialStore, MemoryCredentialStore};

/// Severity of a message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational message.
    Info,
    /// Something the user should look at.
    Warning,
    /// The request failed.
    Error,
}

/// The button the user picked in a confirm dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogChoice {
    /// The confirm button.
    Confirm,
    /// The cancel button, or the dialog was dismissed.
    Cancel,
}

/// Labels and severity of a confirm dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmOptions {
    /// Label of the confirm button.
    pub confirm_text: String,
    /// Label of the cancel button.
    pub cancel_text: String,
    /// Severity the dialog is rendered with.
    pub severity: Severity,
}

/// Notify shows messages and dialogs to the user.
#[async_trait]
pub trait Notify: Debug + Send + Sync + 'static {
    /// Show a transient message.
    fn show_message(&self, text: &str, severity: Severity);

    /// Show a confirm dialog and wait for the user's choice.
    async fn confirm(&self, text: &str, title: &str, options: &ConfirmOptions) -> DialogChoice;
}

/// Navigate moves the user to another route of the app.
pub trait Navigate: Debug + Send + Sync + 'static {
    /// Navigate to `path`.
    fn navigate_to(&self, path: &str);
}

/// Translate resolves a message key into user facing text.
pub trait Translate: Debug + Send + Sync + 'static {
    /// Translate `key`.
    fn translate(&self, key: &str) -> String;
}

/// SessionStorage holds volatile client state for the lifetime of a session.
pub trait SessionStorage: Debug + Send + Sync + 'static {
    /// Get the value stored at `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` at `key`.
    fn set(&self, key: &str, value: String);

    /// Drop everything stored.
    fn clear(&self);
}

/// Notify that writes every message to the log and cancels every dialog.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotify;

#[async_trait]
impl Notify for LogNotify {
    fn show_message(&self, text: &str, severity: Severity) {
        match severity {
            Severity::Info => info!("{text}"),
            Severity::Warning | Severity::Error => warn!("{text}"),
        }
    }

    async fn confirm(&self, text: &str, title: &str, _: &ConfirmOptions) -> DialogChoice {
        warn!("{title}: {text}");
        DialogChoice::Cancel
    }
}

/// Navigate that goes nowhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNavigate;

impl Navigate for NoopNavigate {
    fn navigate_to(&self, _: &str) {}
}

/// Translate that returns the key itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyTranslate;

impl Translate for KeyTranslate {
    fn translate(&self, key: &str) -> String {
        key.to_string()
    }
}

/// Translate backed by a static table, falling back to the key.
#[derive(Debug, Clone, Default)]
pub struct StaticTranslate {
    /// Messages by key.
    pub messages: HashMap<String, String>,
}

impl Translate for StaticTranslate {
    fn translate(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

/// SessionStorage kept in memory.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySessionStorage {
    /// Create an empty storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().expect("lock poisoned").get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.values
            .write()
            .expect("lock poisoned")
            .insert(key.to_string(), value);
    }

    fn clear(&self) {
        self.values.write().expect("lock poisoned").clear();
    }
}

/// Hooks bundles everything response handling talks to outside of HTTP.
#[derive(Debug, Clone)]
pub struct Hooks {
    notify: Arc<dyn Notify>,
    navigate: Arc<dyn Navigate>,
    translate: Arc<dyn Translate>,
    credentials: Arc<dyn CredentialStore>,
    storage: Arc<dyn SessionStorage>,
}

impl Default for Hooks {
    fn default() -> Self {
        Self {
            notify: Arc::new(LogNotify),
            navigate: Arc::new(NoopNavigate),
            translate: Arc::new(KeyTranslate),
            credentials: Arc::new(MemoryCredentialStore::new()),
            storage: Arc::new(MemorySessionStorage::new()),
        }
    }
}

impl Hooks {
    /// Create hooks that log messages and keep state in memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the notify implementation.
    pub fn with_notify(mut self, notify: impl Notify) -> Self {
        self.notify = Arc::new(notify);
        self
    }

    /// Replace the navigate implementation.
    pub fn with_navigate(mut self, navigate: impl Navigate) -> Self {
        self.navigate = Arc::new(navigate);
        self
    }

    /// Replace the translate implementation.
    pub fn with_translate(mut self, translate: impl Translate) -> Self {
        self.translate = Arc::new(translate);
        self
    }

    /// Use a shared credential store.
    ///
    /// Pass the same store the request signer reads from so that a cleared
    /// session stops signing immediately.
    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialStore>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Use a shared session storage.
    pub fn with_storage(mut self, storage: Arc<dyn SessionStorage>) -> Self {
        self.storage = storage;
        self
    }

    /// Get the notify implementation.
    pub fn notify(&self) -> &dyn Notify {
        self.notify.as_ref()
    }

    /// Get the navigate implementation.
    pub fn navigate(&self) -> &dyn Navigate {
        self.navigate.as_ref()
    }

    /// Translate `key` into user facing text.
    pub fn translate(&self, key: &str) -> String {
        self.translate.translate(key)
    }

    /// Get the credential store.
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// Get the session storage.
    pub fn storage(&self) -> &Arc<dyn SessionStorage> {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_session_storage() {
        let storage = MemorySessionStorage::new();
        assert_eq!(storage.get("x-client-key"), None);

        storage.set("x-client-key", "abc".to_string());
        assert_eq!(storage.get("x-client-key").as_deref(), Some("abc"));

        storage.clear();
        assert_eq!(storage.get("x-client-key"), None);
    }

    #[test]
    fn test_static_translate_falls_back_to_key() {
        let translate = StaticTranslate {
            messages: HashMap::from([(
                "request.timeout".to_string(),
                "Request timed out".to_string(),
            )]),
        };
        assert_eq!(translate.translate("request.timeout"), "Request timed out");
        assert_eq!(translate.translate("request.failed"), "request.failed");
    }

    #[tokio::test]
    async fn test_default_hooks() {
        let hooks = Hooks::new();
        assert_eq!(hooks.translate("share.expired"), "share.expired");

        let options = ConfirmOptions {
            confirm_text: "ok".to_string(),
            cancel_text: "cancel".to_string(),
            severity: Severity::Warning,
        };
        assert_eq!(
            hooks.notify().confirm("text", "title", &options).await,
            DialogChoice::Cancel
        );
    }
}
