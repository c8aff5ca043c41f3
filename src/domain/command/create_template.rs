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

use super::{CommandOutput, ExecutionContext, StackCommand};
use crate::domain::mapping::FieldMap;
use crate::domain::options::OptionSet;
use crate::domain::stack::{ClusterTopology, TemplateResolver, LATEST_VERSION};
use crate::infrastructure::constants::{OPT_TOKEN, OPT_WEKA_VERSION};
use crate::shared::error::{Result, StackError};

/// Generates a cluster template and reports its URL without creating a stack.
pub struct CreateTemplateCommand {
    name: &'static str,
    about: &'static str,
    topology_defaults: fn() -> OptionSet,
}

impl CreateTemplateCommand {
    pub fn new(name: &'static str, about: &'static str, topology_defaults: fn() -> OptionSet) -> Self {
        Self {
            name,
            about,
            topology_defaults,
        }
    }
}

#[async_trait::async_trait]
impl StackCommand for CreateTemplateCommand {
    fn name(&self) -> &'static str {
        self.name
    }

    fn about(&self) -> &'static str {
        self.about
    }

    /// Topology options shape the request body, not template parameters.
    fn parameter_schema(&self) -> Result<FieldMap> {
        FieldMap::new("template", &[])
    }

    fn default_options(&self) -> Result<OptionSet> {
        Ok((self.topology_defaults)())
    }

    async fn execute(
        &self,
        options: &OptionSet,
        ctx: &ExecutionContext<'_>,
    ) -> Result<CommandOutput> {
        let topology = ClusterTopology::from_options(options)?;
        let version = options.get_non_empty(OPT_WEKA_VERSION);

        if ctx.dry_run {
            return Ok(CommandOutput::TemplatePlan {
                version: version.unwrap_or_else(|| LATEST_VERSION.to_string()),
                request: topology.to_request()?,
            });
        }

        topology.to_request()?;
        let token = options
            .get_non_empty(OPT_TOKEN)
            .ok_or_else(|| StackError::config_error("missing required parameter token"))?;
        let api = ctx.factory.template_api(&token)?;

        let url = TemplateResolver::new(api.as_ref())
            .resolve(version.as_deref(), &topology)
            .await?;
        Ok(CommandOutput::TemplateGenerated { url })
    }
}
