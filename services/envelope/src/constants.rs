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

use once_cell::sync::Lazy;

// Content types that drive classification.
pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_FORCE_DOWNLOAD: &str = "application/force-download";

// Response headers.
pub const X_CLIENT_KEY: &str = "x-client-key";

/// Session storage key used to cache the `x-client-key` response header.
pub const CLIENT_KEY_STORAGE_KEY: &str = "x-client-key";

/// Status code of a successful envelope.
pub const CODE_OK: i64 = 0;
/// The user lacks permission, the session is dropped.
pub const CODE_NO_PERMISSION: i64 = 4002;
/// The session expired, the user is asked to sign in again.
pub const CODE_SESSION_EXPIRED: i64 = 4100;
/// The token is invalid, the user is logged out.
pub const CODE_INVALID_AUTH: i64 = 4101;
/// A proxy in front of the API failed.
pub const CODE_PROXY_ERROR: i64 = 4200;

// Translation keys.
pub const MSG_NO_PERMISSION: &str = "request.no_permission";
pub const MSG_SESSION_EXPIRED: &str = "request.session_expired";
pub const MSG_SESSION_EXPIRED_TITLE: &str = "request.session_expired_title";
pub const MSG_GO_TO_LOGIN: &str = "request.go_to_login";
pub const MSG_CANCEL: &str = "request.cancel";
pub const MSG_REQUEST_FAILED: &str = "request.failed";
pub const MSG_TIMEOUT: &str = "request.timeout";
pub const MSG_SYSTEM_BUSY: &str = "request.system_busy";

// Env values used by response handling.
pub const REQGATE_LOGIN_PATH: &str = "REQGATE_LOGIN_PATH";
pub const REQGATE_OFFLINE: &str = "REQGATE_OFFLINE";
pub const REQGATE_DOWNLOAD_DIR: &str = "REQGATE_DOWNLOAD_DIR";

pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_DOWNLOAD_NAME: &str = "download";

/// Share link and captcha codes that map to a fixed message.
pub static DOMAIN_MESSAGE_KEYS: Lazy<HashMap<i64, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (2003, "share.not_exist"),
        (2006, "share.expired"),
        (4005, "share.password_error"),
        (1020, "captcha.required"),
        (1021, "captcha.error"),
        (1022, "captcha.expired"),
        (1023, "captcha.too_frequent"),
    ])
});
