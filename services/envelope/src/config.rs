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

use super::constants::*;
use reqgate_core::Context;

/// Config carries all the configuration for response handling.
#[derive(Debug, Clone)]
pub struct Config {
    /// Route the user is sent to when the session is gone.
    ///
    /// - this field if it's `is_some`
    /// - env value: [`REQGATE_LOGIN_PATH`]
    /// - `/login`
    pub login_path: Option<String>,
    /// Explicit offline mode: there's no server to sign in again, so
    /// session expiry never prompts.
    ///
    /// Env value [`REQGATE_OFFLINE`] turns it on with `true`, `1` or `on`.
    pub offline: bool,
    /// Directory that forced downloads are written into. Downloads are not
    /// materialized when unset.
    ///
    /// - this field if it's `is_some`
    /// - env value: [`REQGATE_DOWNLOAD_DIR`], `~` is expanded
    pub download_dir: Option<String>,
    /// Translation key of the message shown for each registered status code.
    pub message_keys: HashMap<i64, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            login_path: None,
            offline: false,
            download_dir: None,
            message_keys: DOMAIN_MESSAGE_KEYS
                .iter()
                .map(|(code, key)| (*code, key.to_string()))
                .collect(),
        }
    }
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set login_path
    pub fn with_login_path(mut self, login_path: impl Into<String>) -> Self {
        self.login_path = Some(login_path.into());
        self
    }

    /// Set offline
    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set download_dir
    pub fn with_download_dir(mut self, download_dir: impl Into<String>) -> Self {
        self.download_dir = Some(download_dir.into());
        self
    }

    /// Register or replace the message shown for `code`.
    pub fn with_message_key(mut self, code: i64, key: impl Into<String>) -> Self {
        self.message_keys.insert(code, key.into());
        self
    }

    /// Get the route the user is sent to when the session is gone.
    pub fn login_path(&self) -> &str {
        self.login_path.as_deref().unwrap_or(DEFAULT_LOGIN_PATH)
    }

    /// Get the translation key registered for `code`.
    pub fn message_key(&self, code: i64) -> Option<&str> {
        self.message_keys.get(&code).map(String::as_str)
    }

    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if self.login_path.is_none() {
            self.login_path = ctx
                .env_var(REQGATE_LOGIN_PATH)
                .filter(|v| !v.is_empty());
        }
        if let Some(v) = ctx.env_var(REQGATE_OFFLINE) {
            self.offline |= matches!(v.to_lowercase().as_str(), "true" | "1" | "on");
        }
        if self.download_dir.is_none() {
            self.download_dir = ctx
                .env_var(REQGATE_DOWNLOAD_DIR)
                .and_then(|v| ctx.expand_home_dir(&v));
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqgate_core::StaticEnv;
    use std::path::PathBuf;

    fn ctx() -> Context {
        Context::new().with_env(StaticEnv {
            home_dir: Some(PathBuf::from("/home/alice")),
            envs: HashMap::from([
                (REQGATE_LOGIN_PATH.to_string(), "/signin".to_string()),
                (REQGATE_OFFLINE.to_string(), "TRUE".to_string()),
                (REQGATE_DOWNLOAD_DIR.to_string(), "~/Downloads".to_string()),
            ]),
        })
    }

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.login_path(), "/login");
        assert!(!cfg.offline);
        assert_eq!(cfg.download_dir, None);
        assert_eq!(cfg.message_key(2006), Some("share.expired"));
        assert_eq!(cfg.message_key(4100), None);
    }

    #[test]
    fn test_from_env() {
        let cfg = Config::new().from_env(&ctx());
        assert_eq!(cfg.login_path(), "/signin");
        assert!(cfg.offline);
        assert_eq!(cfg.download_dir.as_deref(), Some("/home/alice/Downloads"));
    }

    #[test]
    fn test_explicit_values_win() {
        let cfg = Config::new()
            .with_login_path("/auth")
            .with_download_dir("/tmp/out")
            .with_message_key(2006, "custom.expired")
            .from_env(&ctx());
        assert_eq!(cfg.login_path(), "/auth");
        assert_eq!(cfg.download_dir.as_deref(), Some("/tmp/out"));
        assert_eq!(cfg.message_key(2006), Some("custom.expired"));
    }

    #[test]
    fn test_explicit_default_login_path_wins() {
        let cfg = Config::new().with_login_path("/login").from_env(&ctx());
        assert_eq!(cfg.login_path(), "/login");
    }
}
