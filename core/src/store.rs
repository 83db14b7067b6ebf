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
use std::sync::RwLock;

use crate::utils::Redact;

/// CredentialStore holds the bearer token of the signed-in user.
///
/// The store is owned by the application. Signers only read from it, while
/// response handling clears it when the server invalidates the session.
pub trait CredentialStore: Debug + Send + Sync + 'static {
    /// Return the current bearer token, `None` if nobody is signed in.
    fn token(&self) -> Option<String>;

    /// Replace the current bearer token.
    fn set_token(&self, token: String);

    /// Forget the current session.
    fn clear(&self);
}

/// MemoryCredentialStore keeps the token in process memory.
#[derive(Default)]
pub struct MemoryCredentialStore {
    token: RwLock<Option<String>>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn token(&self) -> Option<String> {
        self.token.read().expect("lock poisoned").clone()
    }

    fn set_token(&self, token: String) {
        *self.token.write().expect("lock poisoned") = Some(token);
    }

    fn clear(&self) {
        self.token.write().expect("lock poisoned").take();
    }
}

impl Debug for MemoryCredentialStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let token = self.token();
        f.debug_struct("MemoryCredentialStore")
            .field("token", &Redact::from(&token))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_credential_store() {
        let store = MemoryCredentialStore::new();
        assert_eq!(store.token(), None);

        store.set_token("token-0123456789".to_string());
        assert_eq!(store.token().as_deref(), Some("token-0123456789"));
        assert_eq!(
            format!("{store:?}"),
            "MemoryCredentialStore { token: tok***789 }"
        );

        store.clear();
        assert_eq!(store.token(), None);
    }
}
