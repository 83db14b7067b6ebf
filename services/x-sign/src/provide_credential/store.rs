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

use crate::Credential;
use async_trait::async_trait;
use reqgate_core::{Context, CredentialStore, ProvideCredential, Result};
use std::sync::Arc;

/// StoreCredentialProvider reads the token of the signed-in user from a
/// shared [`CredentialStore`].
///
/// The store is read on every call, so clearing it takes effect on the next
/// request.
#[derive(Debug, Clone)]
pub struct StoreCredentialProvider {
    store: Arc<dyn CredentialStore>,
}

impl StoreCredentialProvider {
    /// Create a new StoreCredentialProvider.
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProvideCredential for StoreCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(self.store.token().map(Credential::new))
    }
}
