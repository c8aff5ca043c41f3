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

// CLI command definitions

use super::args::{
    HammerspaceClusterArgs, InputArgs, QumuloClusterArgs, QumuloLegacyClusterArgs,
    WekaCreateClusterArgs, WekaCreateStackArgs, WekaCreateTemplateArgs,
};
use crate::domain::command::names;
use crate::domain::options::OptionSet;
use crate::shared::error::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(
    name = "storage-cfn",
    version,
    about = "Provision storage clusters on AWS with CloudFormation",
    long_about = "A CLI tool for creating Hammerspace, Qumulo and Weka storage cluster stacks on AWS CloudFormation"
)]
pub struct CliArgs {
    /// Diagnostic verbosity
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Hammerspace global file system
    Hammerspace {
        #[command(subcommand)]
        cloud: HammerspaceCloud,
    },

    /// Qumulo file data platform
    Qumulo {
        #[command(subcommand)]
        cloud: QumuloCloud,
    },

    /// WekaIO data platform
    Weka {
        #[command(subcommand)]
        cloud: WekaCloud,
    },
}

#[derive(Subcommand, Debug)]
pub enum HammerspaceCloud {
    /// Amazon Web Services
    Aws {
        #[command(subcommand)]
        action: HammerspaceAwsAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum HammerspaceAwsAction {
    /// Create a Hammerspace cluster stack
    CreateCluster(HammerspaceClusterArgs),
}

#[derive(Subcommand, Debug)]
pub enum QumuloCloud {
    /// Amazon Web Services
    Aws {
        #[command(subcommand)]
        action: QumuloAwsAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum QumuloAwsAction {
    /// Create a Qumulo Cloud.Next cluster stack
    CreateCluster(QumuloClusterArgs),

    /// Create a Qumulo cluster stack from the legacy template
    CreateClusterLegacy(QumuloLegacyClusterArgs),
}

#[derive(Subcommand, Debug)]
pub enum WekaCloud {
    /// Amazon Web Services
    Aws {
        #[command(subcommand)]
        action: WekaAwsAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum WekaAwsAction {
    /// Generate a CloudFormation template and print its URL
    CreateTemplate(WekaCreateTemplateArgs),

    /// Create a stack from an existing template URL
    CreateStack(WekaCreateStackArgs),

    /// Generate a template, then create a stack from it
    CreateCluster(WekaCreateClusterArgs),
}

/// A parsed command line, ready for the command registry.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub command: &'static str,
    pub options: OptionSet,
    pub dry_run: bool,
}

impl Invocation {
    fn resolve<T: Serialize>(
        command: &'static str,
        flags: &T,
        input: &InputArgs,
        capabilities: &[String],
    ) -> Result<Self> {
        Ok(Self {
            command,
            options: input.resolve(flags, capabilities)?,
            dry_run: input.dry_run,
        })
    }
}

impl Commands {
    pub fn into_invocation(self) -> Result<Invocation> {
        match self {
            Commands::Hammerspace {
                cloud: HammerspaceCloud::Aws { action },
            } => match action {
                HammerspaceAwsAction::CreateCluster(args) => Invocation::resolve(
                    names::HAMMERSPACE_CREATE_CLUSTER,
                    &args,
                    &args.input,
                    &args.stack.capabilities,
                ),
            },
            Commands::Qumulo {
                cloud: QumuloCloud::Aws { action },
            } => match action {
                QumuloAwsAction::CreateCluster(args) => Invocation::resolve(
                    names::QUMULO_CREATE_CLUSTER,
                    &args,
                    &args.input,
                    &args.stack.capabilities,
                ),
                QumuloAwsAction::CreateClusterLegacy(args) => Invocation::resolve(
                    names::QUMULO_CREATE_CLUSTER_LEGACY,
                    &args,
                    &args.input,
                    &args.stack.capabilities,
                ),
            },
            Commands::Weka {
                cloud: WekaCloud::Aws { action },
            } => match action {
                WekaAwsAction::CreateTemplate(args) => {
                    Invocation::resolve(names::WEKA_CREATE_TEMPLATE, &args, &args.input, &[])
                }
                WekaAwsAction::CreateStack(args) => Invocation::resolve(
                    names::WEKA_CREATE_STACK,
                    &args,
                    &args.input,
                    &args.stack.capabilities,
                ),
                WekaAwsAction::CreateCluster(args) => Invocation::resolve(
                    names::WEKA_CREATE_CLUSTER,
                    &args,
                    &args.input,
                    &args.stack.capabilities,
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_qumulo_legacy() {
        let args = CliArgs::try_parse_from([
            "storage-cfn",
            "qumulo",
            "aws",
            "create-cluster-legacy",
            "--cluster-name",
            "c1",
            "--key-pair-name",
            "kp",
            "--vpc-id",
            "vpc-1",
            "--subnet-id",
            "subnet-1",
            "--capability",
            "CAPABILITY_NAMED_IAM",
            "--dry-run",
        ])
        .unwrap();
        assert_eq!(args.log_level, LogLevel::Info);

        let invocation = args.command.into_invocation().unwrap();
        assert_eq!(invocation.command, names::QUMULO_CREATE_CLUSTER_LEGACY);
        assert!(invocation.dry_run);
        assert_eq!(invocation.options.get_string("cluster_name").as_deref(), Some("c1"));
        assert_eq!(
            invocation.options.get_string("capabilities").as_deref(),
            Some("CAPABILITY_NAMED_IAM")
        );
        assert!(invocation.options.is_null("iam_instance_profile"));
    }

    #[test]
    fn test_parse_weka_aliases_and_overrides() {
        let args = CliArgs::try_parse_from([
            "storage-cfn",
            "--log-level",
            "debug",
            "weka",
            "aws",
            "create-stack",
            "--template-url",
            "https://example.com/weka.json",
            "--template-param-key-name",
            "kp",
            "-D",
            "vpc_id=vpc-9",
        ])
        .unwrap();
        assert_eq!(args.log_level, LogLevel::Debug);

        let invocation = args.command.into_invocation().unwrap();
        assert_eq!(invocation.command, names::WEKA_CREATE_STACK);
        assert_eq!(invocation.options.get_string("key_name").as_deref(), Some("kp"));
        assert_eq!(invocation.options.get_string("vpc_id").as_deref(), Some("vpc-9"));
    }

    #[test]
    fn test_invalid_property_rejected() {
        let args = CliArgs::try_parse_from([
            "storage-cfn",
            "weka",
            "aws",
            "create-template",
            "-D",
            "novalue",
        ])
        .unwrap();
        assert!(args.command.into_invocation().unwrap_err().is_config_error());
    }

    #[test]
    fn test_hammerspace_choices_checked_locally() {
        let parse = |flag: &str, value: &str| {
            CliArgs::try_parse_from([
                "storage-cfn",
                "hammerspace",
                "aws",
                "create-cluster",
                flag,
                value,
            ])
        };

        assert!(parse("--anvil-configuration", "cluster").is_ok());
        assert!(parse("--deployment-type", "add").is_ok());
        assert!(parse("--dsx-node-instance-add-volumes", "no").is_ok());

        for (flag, value) in [
            ("--anvil-configuration", "ha"),
            ("--deployment-type", "replace"),
            ("--dsx-node-instance-add-volumes", "maybe"),
        ] {
            let err = parse(flag, value).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
        }
    }
}
