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

//! Service account credentials for the Identity Toolkit admin API.
//!
//! This crate loads a [service account key], signs a JWT assertion with the
//! key, and exchanges the assertion for an OAuth2 access token carrying the
//! scopes required by the Firebase Authentication admin endpoints. It also
//! provides the fixed credentials accepted by the Firebase Authentication
//! emulator.
//!
//! The resulting [credentials::Credentials] produce the HTTP headers used to
//! authenticate requests to the Identity Toolkit API.
//!
//! [service account key]: https://cloud.google.com/iam/docs/keys-create-delete#creating

pub mod build_errors;
pub mod errors;

/// Types and functions to work with service account [Credentials].
///
/// [Credentials]: https://cloud.google.com/docs/authentication#credentials
pub mod credentials;

/// Types and functions to work with auth [Tokens].
///
/// [Tokens]: https://cloud.google.com/docs/authentication#token
pub mod token;

pub(crate) mod constants;

pub mod http;

/// A `Result` alias where the `Err` case is
/// `custom_claims_auth::errors::CredentialsError`.
pub type Result<T> = std::result::Result<T, crate::errors::CredentialsError>;

/// A `Result` alias where the `Err` case is
/// `custom_claims_auth::build_errors::Error`.
pub type BuildResult<T> = std::result::Result<T, crate::build_errors::Error>;
