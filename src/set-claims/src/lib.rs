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

//! Set custom claims on a Firebase Authentication user.
//!
//! This crate implements the `set-custom-claims` command. It resolves the
//! target user and claims from the command line or the environment, loads a
//! service account key, and replaces the custom claims of the user through
//! the Identity Toolkit admin API.
//!
//! ```no_run
//! # use clap::Parser;
//! # use set_custom_claims::{Args, run};
//! # tokio_test::block_on(async {
//! let args = Args::parse_from(["set-custom-claims", "some-uid", r#"{"admin":true}"#]);
//! let update = run(args).await?;
//! println!("{update}");
//! # Ok::<(), set_custom_claims::Error>(())
//! # });
//! ```

pub mod args;
pub mod claims;
pub mod error;
pub mod identity_toolkit;
pub mod key_file;

pub use args::Args;
pub use claims::CustomClaims;
pub use error::{Error, ErrorCode, ServiceError};

use custom_claims_auth::credentials::emulator;
use custom_claims_auth::credentials::service_account::{self, ServiceAccountKey};

/// A `Result` alias where the `Err` case is `set_custom_claims::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// The outcome of a successful [run].
#[derive(Clone, Debug, PartialEq)]
pub struct ClaimsUpdate {
    /// The user that was updated.
    pub uid: String,
    /// The claims now set on the user, `None` if they were removed with
    /// `null`.
    pub claims: Option<CustomClaims>,
}

impl std::fmt::Display for ClaimsUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Echo `null` as given, the service stores it as `{}`.
        let claims = serde_json::to_string(&self.claims).map_err(|_| std::fmt::Error)?;
        write!(f, "Custom claims set for {}: {claims}", self.uid)
    }
}

/// Sets the custom claims described by `args`.
///
/// The claims are validated before the key file is accessed, and the key
/// file is validated before any network request.
pub async fn run(args: Args) -> Result<ClaimsUpdate> {
    let uid = args.uid();
    let claims = args.claims()?;

    let path = key_file::resolve(args.credentials.as_deref());
    key_file::ensure_exists(&path)?;
    let key = ServiceAccountKey::from_file(&path)
        .await
        .map_err(Error::key_file)?;
    tracing::info!(
        "using service account {} from {}",
        key.client_email,
        path.display()
    );

    let project_id = args
        .project_id()
        .or_else(|| key.project_id.clone().filter(|p| !p.is_empty()))
        .or_else(crate::args::project_id_from_env)
        .ok_or_else(Error::project_id)?;

    let (credentials, endpoint) = match args.emulator_host() {
        Some(host) => {
            tracing::info!("using the Firebase Authentication emulator at {host}");
            (
                emulator::Builder::default().build(),
                identity_toolkit::emulator_endpoint(host),
            )
        }
        None => (
            service_account::Builder::new(key).build(),
            identity_toolkit::DEFAULT_ENDPOINT.to_string(),
        ),
    };

    let client = identity_toolkit::Client::new(credentials, project_id)?.with_endpoint(endpoint);
    let attributes = claims.clone().unwrap_or_default();
    client.set_custom_user_claims(&uid, &attributes).await?;
    tracing::info!("custom claims set for {uid}");
    Ok(ClaimsUpdate { uid, claims })
}
