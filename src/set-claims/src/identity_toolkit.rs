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

//! A minimal client for the [Identity Toolkit] admin API.
//!
//! Only the `accounts:update` method is implemented, and only the custom
//! claims field of it.
//!
//! [Identity Toolkit]: https://cloud.google.com/identity-platform/docs/reference/rest

use crate::claims::CustomClaims;
use crate::error::{ErrorCode, ServiceError};
use crate::{Error, Result};
use custom_claims_auth::credentials::Credentials;
use http::HeaderValue;
use serde::{Deserialize, Serialize};

/// The production endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://identitytoolkit.googleapis.com";

const CLIENT_VERSION: &str = concat!("Rust/SetCustomClaims/", env!("CARGO_PKG_VERSION"));

/// Returns the endpoint served by the Firebase Authentication emulator at
/// `host`.
pub fn emulator_endpoint(host: &str) -> String {
    format!("http://{host}/identitytoolkit.googleapis.com")
}

/// Sends requests to the Identity Toolkit admin API for one project.
#[derive(Clone, Debug)]
pub struct Client {
    inner: reqwest::Client,
    credentials: Credentials,
    endpoint: String,
    project_id: String,
}

impl Client {
    /// Creates a client for `project_id` using [DEFAULT_ENDPOINT].
    pub fn new<T: Into<String>>(credentials: Credentials, project_id: T) -> Result<Self> {
        let inner = custom_claims_auth::http::client().map_err(Error::transport)?;
        Ok(Self {
            inner,
            credentials,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            project_id: project_id.into(),
        })
    }

    /// Changes the endpoint, e.g. to use the emulator.
    pub fn with_endpoint<T: Into<String>>(mut self, endpoint: T) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Replaces the custom claims of `uid` with `claims`.
    pub async fn set_custom_user_claims(&self, uid: &str, claims: &CustomClaims) -> Result<()> {
        let url = format!(
            "{}/v1/projects/{}/accounts:update",
            self.endpoint.trim_end_matches('/'),
            self.project_id
        );
        let custom_attributes = serde_json::to_string(claims).map_err(Error::invalid_claims)?;
        let body = UpdateRequest {
            local_id: uid,
            custom_attributes: &custom_attributes,
        };
        let headers = self
            .credentials
            .headers()
            .await
            .map_err(Error::credentials)?;

        tracing::debug!(%url, "updating custom claims");
        let response = self
            .inner
            .post(&url)
            .headers(headers)
            .header("x-client-version", HeaderValue::from_static(CLIENT_VERSION))
            .json(&body)
            .send()
            .await
            .map_err(Error::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::service(to_service_error(response).await));
        }
        let response = response
            .json::<UpdateResponse>()
            .await
            .map_err(Error::invalid_response)?;
        match response.local_id.as_deref() {
            Some(id) if id == uid => Ok(()),
            Some(id) => Err(Error::invalid_response(format!(
                "expected localId `{uid}`, found `{id}`"
            ))),
            None => Err(Error::invalid_response("missing localId in the response")),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateRequest<'a> {
    local_id: &'a str,
    // The service expects the claims as a JSON string, not as an object.
    custom_attributes: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateResponse {
    local_id: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorStatus,
}

#[derive(Deserialize)]
struct ErrorStatus {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

async fn to_service_error(response: reqwest::Response) -> ServiceError {
    let status = response.status();
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => format!("cannot read response body: {e}"),
    };
    tracing::debug!(%status, %body, "request rejected");
    match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(ErrorEnvelope { error })
            if error.message.is_empty() && !error.status.is_empty() =>
        {
            ServiceError::from_server_message(&error.status, status.as_u16())
        }
        Ok(ErrorEnvelope { error }) if !error.message.is_empty() => {
            let from_message = ServiceError::from_server_message(&error.message, status.as_u16());
            // Some errors only carry a known code in `status`.
            match ErrorCode::from_server_code(&error.status) {
                code if from_message.code() == ErrorCode::InternalError
                    && code != ErrorCode::InternalError =>
                {
                    ServiceError::new(code, error.message, status.as_u16())
                }
                _ => from_message,
            }
        }
        _ => ServiceError::new(
            ErrorCode::InternalError,
            format!("An internal error has occurred. HTTP {status}: {body}"),
            status.as_u16(),
        ),
    }
}
