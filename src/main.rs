// Copyright 2025 Envoi Storage Team.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::Parser;
use storage_cfn::cli::{run, CliArgs, LogLevel};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::from(args.log_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let verbose = matches!(args.log_level, LogLevel::Debug | LogLevel::Trace);
    if let Err(e) = run(args.command).await {
        if verbose {
            tracing::error!("{:?}", e);
        } else {
            tracing::error!("{}", e);
        }
        std::process::exit(1);
    }
}
