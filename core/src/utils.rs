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

//! Utility functions and types.

use std::fmt;

/// Redact hides a secret when it is formatted.
///
/// - `None` is printed as `NONE` and an empty value as `EMPTY`.
/// - Values shorter than 12 bytes are fully hidden.
/// - Longer values keep their first and last three characters so that
///   different tokens can still be told apart in logs.
#[derive(Clone, Copy)]
pub struct Redact<'a>(Option<&'a str>);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(Some(value))
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(Some(value.as_str()))
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        Redact(value.as_deref())
    }
}

impl fmt::Display for Redact<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(v) = self.0 else {
            return f.write_str("NONE");
        };

        let length = v.len();
        if length == 0 {
            f.write_str("EMPTY")
        } else if length < 12 || !v.is_char_boundary(3) || !v.is_char_boundary(length - 3) {
            f.write_str("***")
        } else {
            write!(f, "{}***{}", &v[..3], &v[length - 3..])
        }
    }
}

impl fmt::Debug for Redact<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact() {
        let cases = vec![
            (Some("Short"), "***"),
            (Some("Hello World!"), "Hel***ld!"),
            (Some("eyJhbGciOiJIUzI1NiJ9.payload"), "eyJ***oad"),
            (Some(""), "EMPTY"),
            (None, "NONE"),
        ];

        for (input, expected) in cases {
            assert_eq!(
                format!("{:?}", Redact(input)),
                expected,
                "Failed on input: {input:?}"
            );
        }
    }

    #[test]
    fn test_redact_multibyte() {
        let token = "令牌令牌令牌令牌";
        assert_eq!(format!("{}", Redact::from(token)), "令***牌");
    }
}
