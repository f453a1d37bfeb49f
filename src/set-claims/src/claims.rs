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

use crate::{Error, Result};
use serde_json::{Map, Value};

/// The custom claims attached to a user account.
pub type CustomClaims = Map<String, Value>;

/// The claims used when none are provided: `{"admin": true}`.
pub fn default_claims() -> CustomClaims {
    let mut claims = CustomClaims::new();
    claims.insert("admin".to_string(), Value::Bool(true));
    claims
}

/// Parses the claims from their JSON representation.
///
/// The input must be a JSON object or `null`. `None` means `null`, which
/// removes all custom claims from the user.
pub fn parse(input: &str) -> Result<Option<CustomClaims>> {
    let value = serde_json::from_str::<Value>(input).map_err(Error::invalid_claims)?;
    match value {
        Value::Object(claims) => Ok(Some(claims)),
        Value::Null => Ok(None),
        other => Err(Error::invalid_claims(format!(
            "expected a JSON object, found {}",
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
