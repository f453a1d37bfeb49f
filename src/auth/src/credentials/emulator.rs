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

//! Credentials for the [Firebase Authentication emulator].
//!
//! The emulator does not validate access tokens, it only requires the admin
//! requests to carry `Authorization: Bearer owner`. These credentials never
//! contact a token endpoint.
//!
//! [Firebase Authentication emulator]: https://firebase.google.com/docs/emulator-suite/connect_auth

use crate::Result;
use crate::constants::EMULATOR_TOKEN;
use crate::credentials::dynamic::CredentialsProvider;
use crate::credentials::{Credentials, build_bearer_headers};
use crate::token::Token;
use http::HeaderMap;

/// A builder for emulator [Credentials].
#[derive(Debug, Default)]
pub struct Builder;

impl Builder {
    /// Returns a [Credentials] instance for the emulator.
    pub fn build(self) -> Credentials {
        Credentials::from(EmulatorCredentials)
    }
}

#[derive(Debug)]
struct EmulatorCredentials;

#[async_trait::async_trait]
impl CredentialsProvider for EmulatorCredentials {
    async fn token(&self) -> Result<Token> {
        Ok(Token {
            token: EMULATOR_TOKEN.to_string(),
            token_type: "Bearer".to_string(),
            expires_at: None,
        })
    }

    async fn headers(&self) -> Result<HeaderMap> {
        build_bearer_headers(&self.token().await?)
    }
}
