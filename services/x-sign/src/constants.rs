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

// Headers written by the x-sign scheme.
pub const X_SIGN: &str = "x-sign";
pub const X_SIGN_HEADERS: &str = "x-sign-headers";
pub const X_SIGN_TIMESTAMP: &str = "x-sign-timestamp";
pub const X_SIGN_NONCE: &str = "x-sign-nonce";

// Env values used by the x-sign scheme.
pub const REQGATE_TOKEN: &str = "REQGATE_TOKEN";

/// Length of the per-request random nonce.
pub const NONCE_LENGTH: usize = 16;
