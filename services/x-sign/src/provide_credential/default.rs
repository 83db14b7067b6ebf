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

use crate::{Config, Credential};
use async_trait::async_trait;
use log::debug;
use reqgate_core::{Context, CredentialStore, ProvideCredential, Result};
use std::sync::Arc;

use super::StoreCredentialProvider;

/// Default loader for x-sign APIs.
///
/// The credential store of the signed-in user is the only source read per
/// request, so clearing the store stops sending the token right away.
///
/// If the store is empty at construction, it's seeded with the token from
/// [`Config`] (which may come from the `REQGATE_TOKEN` env).
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    store: StoreCredentialProvider,
}

impl DefaultCredentialProvider {
    /// Create a new DefaultCredentialProvider
    pub fn new(store: Arc<dyn CredentialStore>, config: Config) -> Self {
        if store.token().is_none() {
            if let Some(token) = config.token.filter(|v| !v.is_empty()) {
                debug!("seeding credential store from config");
                store.set_token(token);
            }
        }

        Self {
            store: StoreCredentialProvider::new(store),
        }
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.store.provide_credential(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::REQGATE_TOKEN;
    use reqgate_core::{MemoryCredentialStore, StaticEnv};
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_store_wins_over_config() -> anyhow::Result<()> {
        let ctx = Context::new();
        let store = Arc::new(MemoryCredentialStore::with_token("from-store"));

        let provider =
            DefaultCredentialProvider::new(store.clone(), Config::new().with_token("from-config"));
        let cred = provider.provide_credential(&ctx).await?;
        assert_eq!(cred.map(|c| c.token).as_deref(), Some("from-store"));
        assert_eq!(store.token().as_deref(), Some("from-store"));

        Ok(())
    }

    #[tokio::test]
    async fn test_cleared_store_has_no_fallback() -> anyhow::Result<()> {
        let ctx = Context::new().with_env(StaticEnv {
            home_dir: None,
            envs: HashMap::from([(REQGATE_TOKEN.to_string(), "from-env".to_string())]),
        });
        let store = Arc::new(MemoryCredentialStore::new());

        let provider =
            DefaultCredentialProvider::new(store.clone(), Config::new().from_env(&ctx));
        let cred = provider.provide_credential(&ctx).await?;
        assert_eq!(cred.map(|c| c.token).as_deref(), Some("from-env"));
        assert_eq!(store.token().as_deref(), Some("from-env"));

        store.clear();
        assert!(provider.provide_credential(&ctx).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_config_token_is_not_seeded() -> anyhow::Result<()> {
        let store = Arc::new(MemoryCredentialStore::new());

        let provider = DefaultCredentialProvider::new(store.clone(), Config::new().with_token(""));
        assert!(provider.provide_credential(&Context::new()).await?.is_none());
        assert_eq!(store.token(), None);

        Ok(())
    }
}
