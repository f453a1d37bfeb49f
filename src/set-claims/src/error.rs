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

//! The error types returned while setting custom claims.

use custom_claims_auth::build_errors::Error as KeyFileError;
use custom_claims_auth::errors::CredentialsError;
use std::path::{Path, PathBuf};

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error type for [run][crate::run] and the Identity Toolkit client.
///
/// Applications should use the `is_*` predicates to classify the error, the
/// variants are not part of the public API.
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub struct Error(ErrorKind);

impl Error {
    /// The service account key file does not exist.
    pub fn is_missing_key_file(&self) -> bool {
        matches!(self.0, ErrorKind::MissingKeyFile(_))
    }

    /// The claims are not valid JSON, or not a JSON object.
    pub fn is_invalid_claims(&self) -> bool {
        matches!(self.0, ErrorKind::InvalidClaims(_))
    }

    /// The key file could not be loaded, or no access token could be
    /// created from it.
    pub fn is_credentials(&self) -> bool {
        matches!(self.0, ErrorKind::KeyFile(_) | ErrorKind::Credentials(_))
    }

    /// Neither the configuration nor the key file provide a project id.
    pub fn is_project_id(&self) -> bool {
        matches!(self.0, ErrorKind::ProjectId)
    }

    /// The service rejected the request.
    pub fn is_service(&self) -> bool {
        matches!(self.0, ErrorKind::Service(_))
    }

    /// The request could not be sent, or the response could not be received.
    pub fn is_transport(&self) -> bool {
        matches!(self.0, ErrorKind::Transport(_))
    }

    /// The service accepted the request but its response was not usable.
    pub fn is_invalid_response(&self) -> bool {
        matches!(self.0, ErrorKind::InvalidResponse(_))
    }

    /// The error returned by the service, if any.
    pub fn service_error(&self) -> Option<&ServiceError> {
        match &self.0 {
            ErrorKind::Service(e) => Some(e),
            _ => None,
        }
    }

    pub(crate) fn missing_key_file(path: &Path) -> Error {
        Error(ErrorKind::MissingKeyFile(path.to_path_buf()))
    }

    pub(crate) fn invalid_claims<T>(source: T) -> Error
    where
        T: Into<BoxError>,
    {
        Error(ErrorKind::InvalidClaims(source.into()))
    }

    pub(crate) fn key_file(source: KeyFileError) -> Error {
        Error(ErrorKind::KeyFile(source))
    }

    pub(crate) fn credentials(source: CredentialsError) -> Error {
        Error(ErrorKind::Credentials(source))
    }

    pub(crate) fn project_id() -> Error {
        Error(ErrorKind::ProjectId)
    }

    pub(crate) fn service(source: ServiceError) -> Error {
        Error(ErrorKind::Service(source))
    }

    pub(crate) fn transport(source: reqwest::Error) -> Error {
        Error(ErrorKind::Transport(source))
    }

    pub(crate) fn invalid_response<T>(source: T) -> Error
    where
        T: Into<BoxError>,
    {
        Error(ErrorKind::InvalidResponse(source.into()))
    }
}

#[derive(thiserror::Error, Debug)]
enum ErrorKind {
    #[error(
        "Service account key not found. Place it at {} or set GOOGLE_APPLICATION_CREDENTIALS.",
        .0.display()
    )]
    MissingKeyFile(PathBuf),
    #[error("invalid claims: {0}")]
    InvalidClaims(#[source] BoxError),
    #[error("cannot load the service account key: {0}")]
    KeyFile(#[source] KeyFileError),
    #[error("{0}")]
    Credentials(#[source] CredentialsError),
    #[error(
        "cannot determine the project id, set --project-id or add `project_id` to the service account key"
    )]
    ProjectId,
    #[error(transparent)]
    Service(ServiceError),
    #[error("cannot send request: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("invalid response from the service: {0}")]
    InvalidResponse(#[source] BoxError),
}

/// The error codes reported by the Identity Toolkit service.
///
/// The codes follow the names used by the Firebase Admin SDKs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorCode {
    UserNotFound,
    InvalidUid,
    ClaimsTooLarge,
    ForbiddenClaim,
    InvalidClaims,
    InsufficientPermission,
    ProjectNotFound,
    InternalError,
}

impl ErrorCode {
    /// Maps the code in a service error message to an [ErrorCode].
    ///
    /// Unknown codes map to [ErrorCode::InternalError].
    pub fn from_server_code(code: &str) -> Self {
        match code {
            "USER_NOT_FOUND" => Self::UserNotFound,
            "INVALID_LOCAL_ID" => Self::InvalidUid,
            "CLAIMS_TOO_LARGE" => Self::ClaimsTooLarge,
            "FORBIDDEN_CLAIM" => Self::ForbiddenClaim,
            "INVALID_CLAIMS" => Self::InvalidClaims,
            "INSUFFICIENT_PERMISSION" | "PERMISSION_DENIED" => Self::InsufficientPermission,
            "PROJECT_NOT_FOUND" => Self::ProjectNotFound,
            _ => Self::InternalError,
        }
    }

    /// The client-side code, e.g. `auth/user-not-found`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserNotFound => "auth/user-not-found",
            Self::InvalidUid => "auth/invalid-uid",
            Self::ClaimsTooLarge => "auth/claims-too-large",
            Self::ForbiddenClaim => "auth/forbidden-claim",
            Self::InvalidClaims => "auth/invalid-claims",
            Self::InsufficientPermission => "auth/insufficient-permission",
            Self::ProjectNotFound => "auth/project-not-found",
            Self::InternalError => "auth/internal-error",
        }
    }

    fn default_message(&self) -> &'static str {
        match self {
            Self::UserNotFound => {
                "There is no user record corresponding to the provided identifier."
            }
            Self::InvalidUid => {
                "The uid must be a non-empty string with at most 128 characters."
            }
            Self::ClaimsTooLarge => "Developer claims maximum payload size exceeded.",
            Self::ForbiddenClaim => {
                "The specified developer claim is reserved and cannot be specified."
            }
            Self::InvalidClaims => "The provided custom claim attributes are invalid.",
            Self::InsufficientPermission => {
                "The credential used has insufficient permission to access the requested resource."
            }
            Self::ProjectNotFound => "No Firebase project was found for the provided credential.",
            Self::InternalError => "An internal error has occurred.",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error returned by the Identity Toolkit service.
#[derive(Clone, Debug, PartialEq)]
pub struct ServiceError {
    code: ErrorCode,
    message: String,
    http_status: u16,
}

impl ServiceError {
    pub(crate) fn new<T: Into<String>>(code: ErrorCode, message: T, http_status: u16) -> Self {
        Self {
            code,
            message: message.into(),
            http_status,
        }
    }

    /// Creates an error from the `message` field of the service's error
    /// envelope.
    ///
    /// The message is a server code optionally followed by ` : ` and
    /// details, e.g. `INVALID_CLAIMS : Claims must be a JSON object`. The
    /// details, when present, replace the default message for the code.
    pub(crate) fn from_server_message(message: &str, http_status: u16) -> Self {
        let (server_code, details) = match message.split_once(" : ") {
            Some((code, details)) => (code.trim(), Some(details.trim())),
            None => (message.trim(), None),
        };
        let code = ErrorCode::from_server_code(server_code);
        let message = match (code, details) {
            (_, Some(d)) if !d.is_empty() => d.to_string(),
            (ErrorCode::InternalError, _) => {
                format!("{} Server code: {server_code}", code.default_message())
            }
            _ => code.default_message().to_string(),
        };
        Self::new(code, message, http_status)
    }

    /// The client-side error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// A human readable description of the error.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The HTTP status code of the response.
    pub fn http_status(&self) -> u16 {
        self.http_status
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

impl std::error::Error for ServiceError {}
