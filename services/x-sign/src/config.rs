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

use std::fmt::{Debug, Formatter};

use super::constants::*;
use reqgate_core::{utils::Redact, Context};

/// Config carries all the configuration for x-sign signing.
#[derive(Clone, Default)]
pub struct Config {
    /// `token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`REQGATE_TOKEN`]
    pub token: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(REQGATE_TOKEN) {
            self.token.get_or_insert(v);
        }

        self
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token", &Redact::from(&self.token))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqgate_core::StaticEnv;
    use std::collections::HashMap;

    #[test]
    fn test_from_env_keeps_explicit_value() {
        let ctx = Context::new().with_env(StaticEnv {
            home_dir: None,
            envs: HashMap::from([(REQGATE_TOKEN.to_string(), "from-env".to_string())]),
        });

        let cfg = Config::new().from_env(&ctx);
        assert_eq!(cfg.token.as_deref(), Some("from-env"));

        let cfg = Config::new().with_token("explicit").from_env(&ctx);
        assert_eq!(cfg.token.as_deref(), Some("explicit"));
    }
}
