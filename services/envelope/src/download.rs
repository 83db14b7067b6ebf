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

use std::path::{Path, PathBuf};

use bytes::Bytes;
use log::debug;
use percent_encoding::percent_decode_str;
use reqgate_core::{Context, Result};

use crate::constants::DEFAULT_DOWNLOAD_NAME;

/// Extract the file name from a `Content-Disposition` header value.
///
/// Everything after the first `filename=` is taken, percent-decoded and
/// stripped of surrounding quotes.
///
/// ```
/// use reqgate_envelope::file_name_from_content_disposition;
///
/// assert_eq!(
///     file_name_from_content_disposition("attachment; filename=%E6%8A%A5%E8%A1%A8.csv"),
///     Some("报表.csv".to_string())
/// );
/// ```
pub fn file_name_from_content_disposition(value: &str) -> Option<String> {
    let (_, raw) = value.split_once("filename=")?;
    let name = percent_decode_str(raw.trim()).decode_utf8_lossy();
    let name = name.trim().trim_matches('"');

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// DownloadHandler hands forced downloads to the local file system.
#[derive(Debug, Clone)]
pub struct DownloadHandler {
    ctx: Context,
    dir: Option<PathBuf>,
}

impl DownloadHandler {
    /// Create a new handler that writes into `dir`.
    ///
    /// Nothing is written while `dir` is `None`.
    pub fn new(ctx: Context, dir: Option<PathBuf>) -> Self {
        Self { ctx, dir }
    }

    /// Write `data` as `file_name` into the download directory.
    ///
    /// Returns the path written, or `None` if no download directory is set.
    pub async fn deliver(&self, file_name: Option<&str>, data: &Bytes) -> Result<Option<PathBuf>> {
        let Some(dir) = &self.dir else {
            debug!("no download directory configured, skip writing download");
            return Ok(None);
        };

        let path = dir.join(safe_file_name(file_name));
        debug!("writing {} bytes of download to {}", data.len(), path.display());
        self.ctx.file_write(&path, data.clone()).await?;

        Ok(Some(path))
    }
}

/// Keep only the last component of a server supplied name so that a
/// download can't escape its directory.
fn safe_file_name(file_name: Option<&str>) -> String {
    file_name
        .and_then(|v| Path::new(v).file_name())
        .and_then(|v| v.to_str())
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_DOWNLOAD_NAME)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reqgate_file_write_tokio::TokioFileWrite;
    use test_case::test_case;

    #[test_case("attachment; filename=report.csv", Some("report.csv"); "plain")]
    #[test_case("attachment; filename=\"report.csv\"", Some("report.csv"); "quoted")]
    #[test_case("attachment; filename=my%20report.csv", Some("my report.csv"); "percent encoded")]
    #[test_case("attachment; filename=", None; "empty")]
    #[test_case("inline", None; "missing")]
    fn test_file_name_from_content_disposition(value: &str, expected: Option<&str>) {
        assert_eq!(
            file_name_from_content_disposition(value).as_deref(),
            expected
        );
    }

    #[test_case(Some("report.csv"), "report.csv"; "plain")]
    #[test_case(Some("../../etc/passwd"), "passwd"; "traversal")]
    #[test_case(Some(".."), "download"; "parent only")]
    #[test_case(None, "download"; "missing")]
    fn test_safe_file_name(input: Option<&str>, expected: &str) {
        assert_eq!(safe_file_name(input), expected);
    }

    #[tokio::test]
    async fn test_deliver_writes_file() -> anyhow::Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        let dir = tempfile::tempdir()?;
        let ctx = Context::new().with_file_write(TokioFileWrite);
        let handler = DownloadHandler::new(ctx, Some(dir.path().to_path_buf()));

        let path = handler
            .deliver(Some("report.csv"), &Bytes::from_static(b"id,name\n1,demo\n"))
            .await?;

        let path = path.expect("download must be written");
        assert_eq!(path, dir.path().join("report.csv"));
        assert_eq!(tokio::fs::read(&path).await?, b"id,name\n1,demo\n");
        Ok(())
    }

    #[tokio::test]
    async fn test_deliver_without_dir() -> anyhow::Result<()> {
        let handler = DownloadHandler::new(Context::new(), None);
        let path = handler
            .deliver(Some("report.csv"), &Bytes::from_static(b"data"))
            .await?;
        assert_eq!(path, None);
        Ok(())
    }
}
