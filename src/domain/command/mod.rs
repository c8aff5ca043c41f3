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

//! Executable stack commands
//!
//! Every command is an independent value implementing [`StackCommand`]. The
//! [`CommandRegistry`] maps the full command path (e.g.
//! `qumulo aws create-cluster`) to its implementation and is the only way
//! the CLI reaches a command.

pub mod create_stack;
pub mod create_template;
pub mod registry;

pub use self::create_stack::{CreateStackCommand, TemplateSource};
pub use self::create_template::CreateTemplateCommand;
pub use self::registry::CommandRegistry;

use crate::domain::mapping::FieldMap;
use crate::domain::options::OptionSet;
use crate::domain::stack::{Capability, StackRequest, TemplateRequest};
use crate::infrastructure::aws::AwsTarget;
use crate::infrastructure::constants::{OPT_AWS_PROFILE, OPT_AWS_REGION, OPT_CAPABILITIES};
use crate::infrastructure::factory::ClientFactory;
use crate::shared::error::Result;

pub mod names {
    pub const HAMMERSPACE_CREATE_CLUSTER: &str = "hammerspace aws create-cluster";
    pub const QUMULO_CREATE_CLUSTER: &str = "qumulo aws create-cluster";
    pub const QUMULO_CREATE_CLUSTER_LEGACY: &str = "qumulo aws create-cluster-legacy";
    pub const WEKA_CREATE_TEMPLATE: &str = "weka aws create-template";
    pub const WEKA_CREATE_STACK: &str = "weka aws create-stack";
    pub const WEKA_CREATE_CLUSTER: &str = "weka aws create-cluster";
}

pub struct ExecutionContext<'a> {
    pub factory: &'a dyn ClientFactory,
    /// Validate and render, but never submit a stack.
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    StackCreated {
        stack_name: String,
        stack_id: String,
    },
    TemplateGenerated {
        url: String,
    },
    /// Stack request that would have been submitted.
    DryRun {
        request: StackRequest,
        masked_keys: Vec<String>,
    },
    /// Template request that would have been sent.
    TemplatePlan {
        version: String,
        request: TemplateRequest,
    },
}

#[async_trait::async_trait]
pub trait StackCommand: Send + Sync {
    fn name(&self) -> &'static str;

    fn about(&self) -> &'static str;

    /// Template parameters this command can emit.
    fn parameter_schema(&self) -> Result<FieldMap>;

    /// Lowest option layer, applied before any user supplied value.
    fn default_options(&self) -> Result<OptionSet>;

    async fn execute(&self, options: &OptionSet, ctx: &ExecutionContext<'_>)
        -> Result<CommandOutput>;
}

pub fn aws_target(options: &OptionSet) -> AwsTarget {
    AwsTarget {
        region: options.get_non_empty(OPT_AWS_REGION),
        profile: options.get_non_empty(OPT_AWS_PROFILE),
    }
}

pub fn capabilities(options: &OptionSet) -> Result<Vec<Capability>> {
    match options.get_non_empty(OPT_CAPABILITIES) {
        Some(list) => Capability::parse_list(&list),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aws_target_ignores_blank_values() {
        let options = OptionSet::new()
            .with(OPT_AWS_REGION, "us-west-2")
            .with(OPT_AWS_PROFILE, "");
        assert_eq!(
            aws_target(&options),
            AwsTarget {
                region: Some("us-west-2".to_string()),
                profile: None,
            }
        );
    }

    #[test]
    fn test_capabilities_from_options() {
        let options = OptionSet::new().with(OPT_CAPABILITIES, "CAPABILITY_IAM,CAPABILITY_AUTO_EXPAND");
        assert_eq!(
            capabilities(&options).unwrap(),
            vec![Capability::Iam, Capability::AutoExpand]
        );
        assert!(capabilities(&OptionSet::new()).unwrap().is_empty());
        assert!(capabilities(&OptionSet::new().with(OPT_CAPABILITIES, "BOGUS")).is_err());
    }
}
