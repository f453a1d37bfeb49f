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

use crate::Result;
use crate::claims::{self, CustomClaims};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// The user id used when none is provided.
pub const DEFAULT_UID: &str = "s6xIY9rj5ubIQzhXPOWVFmwI20w2";

const DESCRIPTION: &str = concat!(
    "Sets custom claims on a single Firebase Authentication user.",
    " The program authenticates with a service account key, replaces the",
    " custom claims of the user, and prints the claims that were set."
);

/// Set custom claims on a Firebase Authentication user.
#[derive(Clone, Debug, Default, Parser)]
#[command(version, about, long_about = DESCRIPTION)]
pub struct Args {
    /// The id of the user to update.
    #[arg(env = "TARGET_UID")]
    pub uid: Option<String>,

    /// The custom claims, as a JSON object.
    ///
    /// Use `null` to remove all custom claims. Defaults to `{"admin": true}`.
    #[arg(env = "TARGET_CLAIMS")]
    pub claims: Option<String>,

    /// The path of the service account key file.
    ///
    /// Defaults to `service-account.json` next to the executable.
    #[arg(long, env = "GOOGLE_APPLICATION_CREDENTIALS")]
    pub credentials: Option<PathBuf>,

    /// The project that owns the user.
    ///
    /// Overrides the `project_id` in the key file. When neither is set,
    /// `GOOGLE_CLOUD_PROJECT` and then `GCLOUD_PROJECT` are used.
    #[arg(long)]
    pub project_id: Option<String>,

    /// Send requests to the Firebase Authentication emulator at HOST:PORT.
    #[arg(long, env = "FIREBASE_AUTH_EMULATOR_HOST")]
    pub emulator_host: Option<String>,

    /// Increase the logging verbosity, repeat for more detail.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// The target user id, or [DEFAULT_UID].
    pub fn uid(&self) -> String {
        non_empty(self.uid.as_deref())
            .unwrap_or(DEFAULT_UID)
            .to_string()
    }

    /// The parsed custom claims, or [claims::default_claims].
    ///
    /// Returns `None` when the claims are `null`.
    pub fn claims(&self) -> Result<Option<CustomClaims>> {
        match non_empty(self.claims.as_deref()) {
            Some(input) => claims::parse(input),
            None => Ok(Some(claims::default_claims())),
        }
    }

    /// The project id given on the command line, if any.
    pub fn project_id(&self) -> Option<String> {
        non_empty(self.project_id.as_deref()).map(str::to_string)
    }

    /// The emulator `host:port`, if any.
    pub fn emulator_host(&self) -> Option<&str> {
        non_empty(self.emulator_host.as_deref())
    }

    /// The maximum log level for the given verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

/// The project id from `GOOGLE_CLOUD_PROJECT` or `GCLOUD_PROJECT`, if any.
///
/// Only consulted when neither the command line nor the key file names a
/// project.
pub fn project_id_from_env() -> Option<String> {
    ["GOOGLE_CLOUD_PROJECT", "GCLOUD_PROJECT"]
        .iter()
        .find_map(|name| std::env::var(name).ok().filter(|v| !v.is_empty()))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoped_env::ScopedEnv;
    use serde_json::{Value, json};
    use serial_test::serial;
    use test_case::test_case;

    const ENV_VARS: [&str; 6] = [
        "TARGET_UID",
        "TARGET_CLAIMS",
        "GOOGLE_APPLICATION_CREDENTIALS",
        "GOOGLE_CLOUD_PROJECT",
        "GCLOUD_PROJECT",
        "FIREBASE_AUTH_EMULATOR_HOST",
    ];

    fn clean_env() -> Vec<ScopedEnv<&'static str>> {
        ENV_VARS.iter().map(|v| ScopedEnv::remove(*v)).collect()
    }

    #[test]
    #[serial]
    fn defaults() -> anyhow::Result<()> {
        let _env = clean_env();
        let args = Args::try_parse_from(["program"])?;
        assert_eq!(args.uid(), DEFAULT_UID);
        assert_eq!(args.claims()?.map(Value::Object), Some(json!({"admin": true})));
        assert_eq!(args.credentials, None);
        assert_eq!(args.project_id(), None);
        assert_eq!(args.emulator_host(), None);
        assert_eq!(args.log_level(), tracing::Level::WARN);
        Ok(())
    }

    #[test]
    #[serial]
    fn positional() -> anyhow::Result<()> {
        let _env = clean_env();
        let args = Args::try_parse_from(["program", "U1", r#"{"role":"editor"}"#])?;
        assert_eq!(args.uid(), "U1");
        assert_eq!(args.claims()?.map(Value::Object), Some(json!({"role": "editor"})));
        Ok(())
    }

    #[test]
    #[serial]
    fn from_env() -> anyhow::Result<()> {
        let _env = clean_env();
        let _uid = ScopedEnv::set("TARGET_UID", "env-uid");
        let _claims = ScopedEnv::set("TARGET_CLAIMS", r#"{"tier":"gold"}"#);
        let _creds = ScopedEnv::set("GOOGLE_APPLICATION_CREDENTIALS", "/keys/sa.json");
        let _emulator = ScopedEnv::set("FIREBASE_AUTH_EMULATOR_HOST", "127.0.0.1:9099");
        let args = Args::try_parse_from(["program"])?;
        assert_eq!(args.uid(), "env-uid");
        assert_eq!(args.claims()?.map(Value::Object), Some(json!({"tier": "gold"})));
        assert_eq!(args.credentials, Some(PathBuf::from("/keys/sa.json")));
        assert_eq!(args.emulator_host(), Some("127.0.0.1:9099"));
        Ok(())
    }

    #[test]
    #[serial]
    fn args_override_env() -> anyhow::Result<()> {
        let _env = clean_env();
        let _uid = ScopedEnv::set("TARGET_UID", "env-uid");
        let _claims = ScopedEnv::set("TARGET_CLAIMS", r#"{"tier":"gold"}"#);
        let args = Args::try_parse_from(["program", "arg-uid", r#"{"tier":"silver"}"#])?;
        assert_eq!(args.uid(), "arg-uid");
        assert_eq!(args.claims()?.map(Value::Object), Some(json!({"tier": "silver"})));
        Ok(())
    }

    #[test]
    #[serial]
    fn empty_values_use_defaults() -> anyhow::Result<()> {
        let _env = clean_env();
        let args = Args::try_parse_from(["program", "", ""])?;
        assert_eq!(args.uid(), DEFAULT_UID);
        assert_eq!(args.claims()?.map(Value::Object), Some(json!({"admin": true})));
        Ok(())
    }

    #[test]
    #[serial]
    fn malformed_claims() -> anyhow::Result<()> {
        let _env = clean_env();
        let args = Args::try_parse_from(["program", "U1", "{bad"])?;
        let got = args.claims();
        assert!(got.as_ref().is_err_and(|e| e.is_invalid_claims()), "{got:?}");
        Ok(())
    }

    #[test]
    #[serial]
    fn project_id() -> anyhow::Result<()> {
        let _env = clean_env();
        let args = Args::try_parse_from(["program", "--project-id=flag-project"])?;
        assert_eq!(args.project_id().as_deref(), Some("flag-project"));

        let args = Args::try_parse_from(["program", "--project-id="])?;
        assert_eq!(args.project_id(), None);
        Ok(())
    }

    #[test]
    #[serial]
    fn project_id_env_is_not_the_flag() -> anyhow::Result<()> {
        let _env = clean_env();
        let _google = ScopedEnv::set("GOOGLE_CLOUD_PROJECT", "google-project");
        let _gcloud = ScopedEnv::set("GCLOUD_PROJECT", "gcloud-project");
        let args = Args::try_parse_from(["program"])?;
        assert_eq!(args.project_id(), None);
        Ok(())
    }

    #[test]
    #[serial]
    fn project_id_from_env_order() {
        let _env = clean_env();
        assert_eq!(project_id_from_env(), None);

        let _gcloud = ScopedEnv::set("GCLOUD_PROJECT", "gcloud-project");
        assert_eq!(project_id_from_env().as_deref(), Some("gcloud-project"));

        let _google = ScopedEnv::set("GOOGLE_CLOUD_PROJECT", "google-project");
        assert_eq!(project_id_from_env().as_deref(), Some("google-project"));

        let _empty = ScopedEnv::set("GOOGLE_CLOUD_PROJECT", "");
        assert_eq!(project_id_from_env().as_deref(), Some("gcloud-project"));
    }

    #[test_case(&["program"], tracing::Level::WARN)]
    #[test_case(&["program", "-v"], tracing::Level::INFO)]
    #[test_case(&["program", "-vv"], tracing::Level::DEBUG)]
    #[test_case(&["program", "-vvvv"], tracing::Level::TRACE)]
    #[serial]
    fn log_level(input: &[&str], want: tracing::Level) -> anyhow::Result<()> {
        let _env = clean_env();
        let args = Args::try_parse_from(input)?;
        assert_eq!(args.log_level(), want);
        Ok(())
    }

    #[test]
    #[serial]
    fn too_many_positional() {
        let _env = clean_env();
        let got = Args::try_parse_from(["program", "U1", "{}", "extra"]);
        assert!(got.is_err(), "{got:?}");
    }
}
