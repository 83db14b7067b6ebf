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

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, warn};

use crate::constants::*;
use crate::hooks::{ConfirmOptions, DialogChoice, Hooks, Severity};

/// SessionExpiryGate makes sure only one session expired prompt is open at a time.
///
/// The gate is shared by every classifier of a client. It's closed while a
/// prompt is on screen and reopens once the user answers it.
#[derive(Debug, Default)]
pub struct SessionExpiryGate {
    held: AtomicBool,
}

impl SessionExpiryGate {
    /// Create an open gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to close the gate.
    ///
    /// Returns a permit that reopens the gate on drop, or `None` if another
    /// caller is holding it already.
    pub fn try_acquire(self: &Arc<Self>) -> Option<SessionExpiryPermit> {
        self.held
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SessionExpiryPermit {
                gate: self.clone(),
            })
    }

    /// Check whether a prompt is open.
    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }
}

/// Permit returned by [`SessionExpiryGate::try_acquire`].
#[derive(Debug)]
pub struct SessionExpiryPermit {
    gate: Arc<SessionExpiryGate>,
}

impl SessionExpiryPermit {
    /// Reopen the gate.
    pub fn release(self) {}
}

impl Drop for SessionExpiryPermit {
    fn drop(&mut self) {
        self.gate.held.store(false, Ordering::Release);
    }
}

/// SessionExpiryCoordinator shows the session expired prompt behind a [`SessionExpiryGate`].
#[derive(Debug, Clone)]
pub struct SessionExpiryCoordinator {
    gate: Arc<SessionExpiryGate>,
    hooks: Hooks,
    login_path: String,
}

impl SessionExpiryCoordinator {
    /// Create a new coordinator.
    pub fn new(gate: Arc<SessionExpiryGate>, hooks: Hooks, login_path: impl Into<String>) -> Self {
        Self {
            gate,
            hooks,
            login_path: login_path.into(),
        }
    }

    /// Open the prompt unless one is open already.
    ///
    /// The prompt runs in the background so the caller can reject its request
    /// right away. Returns whether this call opened it.
    pub fn open(&self) -> bool {
        let Some(permit) = self.gate.try_acquire() else {
            debug!("session expired prompt is already open, skip");
            return false;
        };

        self.hooks.credentials().clear();
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!("no async runtime available, session expired prompt is skipped");
            return false;
        };

        let this = self.clone();
        handle.spawn(async move {
            this.run().await;
            permit.release();
        });
        true
    }

    async fn run(&self) {
        let text = self.hooks.translate(MSG_SESSION_EXPIRED);
        let title = self.hooks.translate(MSG_SESSION_EXPIRED_TITLE);
        let options = ConfirmOptions {
            confirm_text: self.hooks.translate(MSG_GO_TO_LOGIN),
            cancel_text: self.hooks.translate(MSG_CANCEL),
            severity: Severity::Warning,
        };

        match self.hooks.notify().confirm(&text, &title, &options).await {
            DialogChoice::Confirm => {
                debug!("user chose to sign in again, navigate to {}", self.login_path);
                self.hooks.storage().clear();
                self.hooks.navigate().navigate_to(&self.login_path);
            }
            DialogChoice::Cancel => {
                debug!("user dismissed session expired prompt");
            }
        }
    }
}
