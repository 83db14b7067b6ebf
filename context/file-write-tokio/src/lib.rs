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

//! Tokio-based file writing implementation for reqgate.
//!
//! This crate provides `TokioFileWrite`, an async file writer that implements
//! the `FileWrite` trait from `reqgate_core` using Tokio's file system operations.
//!
//! Downloads delivered by `application/force-download` responses are written
//! through this component.
//!
//! ## Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use reqgate_core::{Context, OsEnv};
//! use reqgate_file_write_tokio::TokioFileWrite;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() {
//!     let ctx = Context::new()
//!         .with_file_write(TokioFileWrite)
//!         .with_env(OsEnv);
//!
//!     match ctx
//!         .file_write(Path::new("/tmp/report.csv"), Bytes::from_static(b"a,b\n1,2\n"))
//!         .await
//!     {
//!         Ok(()) => println!("saved"),
//!         Err(e) => eprintln!("failed to write file: {e}"),
//!     }
//! }
//! ```

use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use reqgate_core::{Error, FileWrite, Result};

/// Tokio-based implementation of the `FileWrite` trait.
///
/// Missing parent directories are created before writing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileWrite;

#[async_trait]
impl FileWrite for TokioFileWrite {
    async fn file_write(&self, path: &Path, content: Bytes) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::unexpected("failed to create directory").with_source(e))?;
        }

        tokio::fs::write(path, content)
            .await
            .map_err(|e| Error::unexpected("failed to write file").with_source(e))
    }
}
