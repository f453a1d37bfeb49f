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

use clap::Parser;
use set_custom_claims::Args;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    enable_tracing(&args);
    tracing::debug!("Configuration: {args:?}");

    match set_custom_claims::run(args).await {
        Ok(update) => {
            println!("{update}");
            ExitCode::SUCCESS
        }
        Err(e) if e.is_missing_key_file() => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Failed to set claims: {e}");
            ExitCode::FAILURE
        }
    }
}

fn enable_tracing(args: &Args) {
    let subscriber = tracing_subscriber::fmt()
        .with_level(true)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_max_level(args.log_level())
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("cannot initialize logging: {e}");
    }
}
