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

//! The HTTP client shared by the token exchange and the admin API calls.

use rustls::crypto::CryptoProvider;

/// Creates a `reqwest::Client`.
///
/// `reqwest` is linked without a `rustls` crypto provider. Applications may
/// install their own provider before calling this function; if none is
/// installed, the `ring` provider becomes the process default.
pub fn client() -> std::result::Result<reqwest::Client, reqwest::Error> {
    install_default_provider();
    reqwest::Client::builder().build()
}

pub(crate) fn install_default_provider() {
    if CryptoProvider::get_default().is_none() {
        // Losing the race to another thread is fine, some provider is
        // installed either way.
        let _ = rustls::crypto::ring::default_provider().install_default();
    }
}
