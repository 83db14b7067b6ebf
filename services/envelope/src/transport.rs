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

use log::debug;
use reqgate_core::{Error, ErrorKind};

use crate::constants::{MSG_SYSTEM_BUSY, MSG_TIMEOUT};
use crate::hooks::{Hooks, Severity};

/// How a transport failure is handed back to the caller.
#[derive(Debug)]
pub enum Disposition {
    /// The caller cancelled the request, nothing is reported.
    Suppressed,
    /// The request failed with this error.
    Rejected(Error),
}

/// TransportErrorClassifier handles requests that never produced a response.
#[derive(Debug, Clone)]
pub struct TransportErrorClassifier {
    hooks: Hooks,
}

impl TransportErrorClassifier {
    /// Create a new classifier.
    pub fn new(hooks: Hooks) -> Self {
        Self { hooks }
    }

    /// Classify a transport failure, telling the user about it unless it was a cancellation.
    pub fn classify(&self, err: Error) -> Disposition {
        if err.kind() == ErrorKind::Cancelled {
            debug!("request cancelled: {err}");
            return Disposition::Suppressed;
        }

        let key = if is_timeout(&err) {
            MSG_TIMEOUT
        } else {
            MSG_SYSTEM_BUSY
        };
        let msg = self.hooks.translate(key);
        self.hooks.notify().show_message(&msg, Severity::Error);

        Disposition::Rejected(err)
    }
}

fn is_timeout(err: &Error) -> bool {
    err.kind() == ErrorKind::Timeout || err.message().to_lowercase().contains("timeout")
}
