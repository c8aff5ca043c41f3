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

pub mod args;
pub mod commands;
pub mod display;

pub use self::commands::{CliArgs, Commands, Invocation, LogLevel};

use crate::domain::command::{CommandOutput, CommandRegistry, ExecutionContext};
use crate::infrastructure::factory::{AwsClientFactory, ClientFactory};
use display::TableRenderer;

/// Runs one parsed command line against the builtin commands and prints the result.
pub async fn run(command: Commands) -> anyhow::Result<()> {
    let invocation = command.into_invocation()?;
    let registry = CommandRegistry::builtin()?;
    let factory = AwsClientFactory::new();

    let output = execute(&registry, &factory, &invocation).await?;
    println!("{}", TableRenderer::new().render_output(&output));
    Ok(())
}

pub async fn execute(
    registry: &CommandRegistry,
    factory: &dyn ClientFactory,
    invocation: &Invocation,
) -> anyhow::Result<CommandOutput> {
    let ctx = ExecutionContext {
        factory,
        dry_run: invocation.dry_run,
    };
    let output = registry
        .dispatch(invocation.command, &invocation.options, &ctx)
        .await?;
    Ok(output)
}
