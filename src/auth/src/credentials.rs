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

pub mod emulator;
pub mod service_account;

use crate::Result;
use crate::errors;
use crate::token::Token;
use http::HeaderMap;
use http::header::{AUTHORIZATION, HeaderValue};
use std::sync::Arc;

/// An implementation of [crate::credentials::dynamic::CredentialsProvider].
///
/// Represents a [Credentials] used to obtain auth tokens and the
/// corresponding request headers.
///
/// # Example
/// ```
/// # use custom_claims_auth::credentials::emulator;
/// # tokio_test::block_on(async {
/// let credentials = emulator::Builder::default().build();
/// let headers = credentials.headers().await?;
/// assert_eq!(headers["authorization"], "Bearer owner");
/// # Ok::<(), custom_claims_auth::errors::CredentialsError>(())
/// # });
/// ```
///
/// [Credentials]: https://cloud.google.com/docs/authentication#credentials
#[derive(Clone, Debug)]
pub struct Credentials {
    // Shared by every clone of the client that owns the credentials.
    inner: Arc<dyn dynamic::CredentialsProvider>,
}

impl<T> std::convert::From<T> for Credentials
where
    T: dynamic::CredentialsProvider + 'static,
{
    fn from(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }
}

impl Credentials {
    /// Asynchronously retrieves a token.
    pub async fn token(&self) -> Result<Token> {
        self.inner.token().await
    }

    /// Asynchronously constructs the auth headers.
    ///
    /// The `authorization` header value is marked as sensitive.
    pub async fn headers(&self) -> Result<HeaderMap> {
        self.inner.headers().await
    }
}

pub mod dynamic {
    use super::Result;
    use super::Token;
    use http::HeaderMap;

    /// A trait for credential types that can provide access tokens.
    ///
    /// Applications rarely implement this trait. It exists so tests can
    /// substitute their own credentials.
    #[async_trait::async_trait]
    pub trait CredentialsProvider: std::fmt::Debug + Send + Sync {
        /// Asynchronously retrieves a token.
        async fn token(&self) -> Result<Token>;

        /// Asynchronously constructs the auth headers.
        async fn headers(&self) -> Result<HeaderMap>;
    }
}

/// Creates the `authorization` header for `token`.
pub(crate) fn build_bearer_headers(token: &Token) -> Result<HeaderMap> {
    let mut value = HeaderValue::from_str(&format!("{} {}", token.token_type, token.token))
        .map_err(errors::non_retryable)?;
    value.set_sensitive(true);
    let mut headers = HeaderMap::with_capacity(1);
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}
