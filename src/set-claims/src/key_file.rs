// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Locates the service account key file.

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// The key file name used when no path is configured.
pub const KEY_FILE_NAME: &str = "service-account.json";

/// Returns the path of the service account key file.
///
/// This is `override_path` when set and not empty. Otherwise it is
/// [KEY_FILE_NAME] in the directory containing the running executable.
pub fn resolve(override_path: Option<&Path>) -> PathBuf {
    match override_path.filter(|p| !p.as_os_str().is_empty()) {
        Some(path) => path.to_path_buf(),
        None => default_path(),
    }
}

fn default_path() -> PathBuf {
    let dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(KEY_FILE_NAME)
}

/// Fails with a missing key file error unless `path` exists.
pub fn ensure_exists(path: &Path) -> Result<()> {
    match path.try_exists() {
        Ok(true) => Ok(()),
        _ => {
            tracing::debug!("service account key not found at {}", path.display());
            Err(Error::missing_key_file(path))
        }
    }
}
