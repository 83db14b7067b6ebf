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

use std::fmt::Debug;

use http::header::CONTENT_TYPE;
use http::request::Parts;
use http::HeaderMap;
use http::Uri;

use crate::Result;

/// Canonicalize turns the parts of a pending request into deterministic
/// strings that signer and server can both recompute.
///
/// Every method must return identical output for identical input. Any error
/// aborts the signing of this request.
pub trait Canonicalize: Debug + Send + Sync + 'static {
    /// Split the uri into its path (without query) and its query pairs.
    fn parse_url(&self, uri: &Uri) -> Result<(String, Vec<(String, String)>)>;

    /// Build the canonical string of query parameters.
    fn params_to_string(&self, params: Vec<(String, String)>) -> Result<String>;

    /// Build the canonical string of the request body.
    ///
    /// Absent body must map to an empty string.
    fn body_to_string(&self, body: &[u8]) -> Result<String>;

    /// Build the canonical string of the headers that take part in signing.
    fn headers_to_string(&self, headers: &HeaderMap) -> Result<CanonicalHeaders>;
}

/// Canonical form of the signed headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalHeaders {
    /// `name:value` lines sorted by name.
    pub canonical: String,
    /// Names of the headers included in `canonical`, in the same order.
    pub sorted_keys: Vec<String>,
}

/// Canonical view of one request, built fresh for every signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    /// Lower-cased HTTP method.
    pub method: String,
    /// Path without query.
    pub path: String,
    /// Canonical query parameters.
    pub params: String,
    /// Canonical body.
    pub body: String,
    /// Canonical headers.
    pub headers: CanonicalHeaders,
}

impl CanonicalRequest {
    /// Build the canonical view of `parts` and `body`.
    ///
    /// `parts` is only read, so a failure here leaves the request untouched.
    pub fn build(parts: &Parts, body: &[u8], canonicalizer: &dyn Canonicalize) -> Result<Self> {
        let (path, query) = canonicalizer.parse_url(&parts.uri)?;

        Ok(CanonicalRequest {
            method: parts.method.as_str().to_lowercase(),
            path,
            params: canonicalizer.params_to_string(query)?,
            body: canonicalizer.body_to_string(body)?,
            headers: canonicalizer.headers_to_string(&parts.headers)?,
        })
    }
}

/// DefaultCanonicalizer implements the canonical rules expected by x-sign servers.
///
/// - params: query pairs are decoded, sorted by key then value and joined as `k=v&k=v`.
/// - body: JSON bodies are re-serialized compactly with sorted object keys,
///   other UTF-8 bodies are used verbatim.
/// - headers: `content-type` and every `x-` header except the `x-sign` family,
///   lower-cased, trimmed and sorted, joined as `name:value` lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCanonicalizer;

const SIGNATURE_HEADER_PREFIX: &str = "x-sign";

impl DefaultCanonicalizer {
    fn is_signed_header(name: &str) -> bool {
        name == CONTENT_TYPE.as_str()
            || (name.starts_with("x-") && !name.starts_with(SIGNATURE_HEADER_PREFIX))
    }
}

impl Canonicalize for DefaultCanonicalizer {
    fn parse_url(&self, uri: &Uri) -> Result<(String, Vec<(String, String)>)> {
        let path = match uri.path() {
            "" => "/".to_string(),
            v => v.to_string(),
        };
        let query = uri
            .query()
            .map(|v| {
                form_urlencoded::parse(v.as_bytes())
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect()
            })
            .unwrap_or_default();

        Ok((path, query))
    }

    fn params_to_string(&self, params: Vec<(String, String)>) -> Result<String> {
        Ok(pairs_to_string(params, "=", "&"))
    }

    fn body_to_string(&self, body: &[u8]) -> Result<String> {
        if body.is_empty() {
            return Ok(String::new());
        }

        match serde_json::from_slice::<serde_json::Value>(body) {
            // serde_json keeps object keys in a BTreeMap, so this output is sorted.
            Ok(value) => Ok(serde_json::to_string(&value)?),
            Err(_) => Ok(std::str::from_utf8(body)?.to_string()),
        }
    }

    fn headers_to_string(&self, headers: &HeaderMap) -> Result<CanonicalHeaders> {
        let mut pairs = Vec::new();
        for name in headers.keys() {
            let name = name.as_str();
            if !Self::is_signed_header(name) {
                continue;
            }

            let mut values = Vec::new();
            for value in headers.get_all(name) {
                values.push(value.to_str()?.trim());
            }
            pairs.push((name.to_string(), values.join(",")));
        }

        pairs.sort();
        let sorted_keys = pairs.iter().map(|(k, _)| k.clone()).collect();

        Ok(CanonicalHeaders {
            canonical: pairs_to_string(pairs, ":", "\n"),
            sorted_keys,
        })
    }
}

/// Convert pairs into a sorted string.
///
/// ```shell
/// [(c, d), (a, b)] => "a:b\nc:d"
/// ```
fn pairs_to_string(mut pairs: Vec<(String, String)>, sep: &str, join: &str) -> String {
    let mut s = String::with_capacity(16);

    pairs.sort();

    for (idx, (k, v)) in pairs.into_iter().enumerate() {
        if idx != 0 {
            s.push_str(join);
        }

        s.push_str(&k);
        s.push_str(sep);
        s.push_str(&v);
    }

    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use http::HeaderValue;
    use pretty_assertions::assert_eq;

    fn parts(uri: &str) -> Parts {
        http::Request::post(uri)
            .header("Content-Type", "application/json")
            .header("X-Project-Id", " 42 ")
            .header("x-sign", "stale")
            .header("Accept", "*/*")
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    #[test]
    fn test_build_canonical_request() -> Result<()> {
        let parts = parts("https://api.example.com/api/v1/apis?page=2&b=x%20y&a=1");
        let body = br#"{"name":"demo","id":7,"nested":{"z":1,"a":2}}"#;

        let req = CanonicalRequest::build(&parts, body, &DefaultCanonicalizer)?;

        assert_eq!(req.method, "post");
        assert_eq!(req.path, "/api/v1/apis");
        assert_eq!(req.params, "a=1&b=x y&page=2");
        assert_eq!(req.body, r#"{"id":7,"name":"demo","nested":{"a":2,"z":1}}"#);
        assert_eq!(
            req.headers,
            CanonicalHeaders {
                canonical: "content-type:application/json\nx-project-id:42".to_string(),
                sorted_keys: vec!["content-type".to_string(), "x-project-id".to_string()],
            }
        );
        Ok(())
    }

    #[test]
    fn test_canonical_request_is_deterministic() -> Result<()> {
        let a = CanonicalRequest::build(
            &parts("https://api.example.com/x?b=2&a=1"),
            br#"{"b":1,"a":2}"#,
            &DefaultCanonicalizer,
        )?;
        let b = CanonicalRequest::build(
            &parts("https://api.example.com/x?a=1&b=2"),
            br#"{ "a": 2, "b": 1 }"#,
            &DefaultCanonicalizer,
        )?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn test_body_to_string() -> Result<()> {
        let c = DefaultCanonicalizer;
        assert_eq!(c.body_to_string(b"")?, "");
        assert_eq!(c.body_to_string(b"plain text")?, "plain text");
        assert_eq!(c.body_to_string(b"[3, 1, 2]")?, "[3,1,2]");

        let err = c.body_to_string(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        Ok(())
    }

    #[test]
    fn test_parse_url_without_path() -> Result<()> {
        let (path, query) = DefaultCanonicalizer.parse_url(&Uri::from_static("https://example.com"))?;
        assert_eq!(path, "/");
        assert!(query.is_empty());
        Ok(())
    }

    #[test]
    fn test_headers_to_string_rejects_opaque_values() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-trace",
            HeaderValue::from_bytes(b"caf\xc3\xa9").expect("header value must be valid"),
        );

        let err = DefaultCanonicalizer.headers_to_string(&headers).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_headers_to_string_joins_repeated_values() -> Result<()> {
        let mut headers = HeaderMap::new();
        headers.append("x-tag", HeaderValue::from_static("a"));
        headers.append("x-tag", HeaderValue::from_static("b"));

        let h = DefaultCanonicalizer.headers_to_string(&headers)?;
        assert_eq!(h.canonical, "x-tag:a,b");
        assert_eq!(h.sorted_keys, vec!["x-tag".to_string()]);
        Ok(())
    }
}
