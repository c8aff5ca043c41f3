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

use super::{aws_target, capabilities, CommandOutput, ExecutionContext, StackCommand};
use crate::domain::mapping::{FieldMap, ParameterMapper};
use crate::domain::options::OptionSet;
use crate::domain::products::StackDefaults;
use crate::domain::stack::{ClusterTopology, StackRequestBuilder, TemplateResolver};
use crate::infrastructure::constants::{
    OPT_CFN_ROLE_ARN, OPT_STACK_NAME, OPT_TEMPLATE_URL, OPT_TOKEN, OPT_WEKA_VERSION,
};
use crate::shared::error::{Result, StackError};

/// Where the stack template URL comes from.
#[derive(Debug, Clone, Copy)]
pub enum TemplateSource {
    /// `template_url` option, possibly a product default.
    Provided,
    /// Generated through the template API unless `template_url` is set.
    Generated { topology_defaults: fn() -> OptionSet },
}

pub struct CreateStackCommand {
    name: &'static str,
    about: &'static str,
    schema: fn() -> Result<FieldMap>,
    defaults: StackDefaults,
    template: TemplateSource,
}

impl CreateStackCommand {
    pub fn new(
        name: &'static str,
        about: &'static str,
        schema: fn() -> Result<FieldMap>,
        defaults: StackDefaults,
    ) -> Self {
        Self {
            name,
            about,
            schema,
            defaults,
            template: TemplateSource::Provided,
        }
    }

    pub fn generated(mut self, topology_defaults: fn() -> OptionSet) -> Self {
        self.template = TemplateSource::Generated { topology_defaults };
        self
    }

    async fn generate_template(
        &self,
        options: &OptionSet,
        ctx: &ExecutionContext<'_>,
    ) -> Result<String> {
        let topology = ClusterTopology::from_options(options)?;
        topology.to_request()?;

        let token = options
            .get_non_empty(OPT_TOKEN)
            .ok_or_else(|| StackError::config_error("missing required parameter token"))?;
        let api = ctx.factory.template_api(&token)?;
        let version = options.get_non_empty(OPT_WEKA_VERSION);

        TemplateResolver::new(api.as_ref())
            .resolve(version.as_deref(), &topology)
            .await
    }
}

#[async_trait::async_trait]
impl StackCommand for CreateStackCommand {
    fn name(&self) -> &'static str {
        self.name
    }

    fn about(&self) -> &'static str {
        self.about
    }

    fn parameter_schema(&self) -> Result<FieldMap> {
        (self.schema)()
    }

    fn default_options(&self) -> Result<OptionSet> {
        let mut options = self.defaults.to_options();
        options.overlay(&self.parameter_schema()?.defaults());
        if let TemplateSource::Generated { topology_defaults } = self.template {
            options.overlay(&topology_defaults());
        }
        Ok(options)
    }

    async fn execute(
        &self,
        options: &OptionSet,
        ctx: &ExecutionContext<'_>,
    ) -> Result<CommandOutput> {
        let schema = self.parameter_schema()?;
        let parameters = ParameterMapper::map(options, &schema);

        let mut builder = StackRequestBuilder::new()
            .set_stack_name(options.get_non_empty(OPT_STACK_NAME))
            .parameters(parameters)
            .require(schema.required_keys())
            .set_role_arn(options.get_non_empty(OPT_CFN_ROLE_ARN))
            .capabilities(capabilities(options)?)
            .set_template_url(options.get_non_empty(OPT_TEMPLATE_URL));

        // Fail on local inputs before spending a round trip on generation.
        builder.validate_inputs()?;

        if let TemplateSource::Generated { .. } = self.template {
            if !builder.has_template_url() {
                let url = self.generate_template(options, ctx).await?;
                builder = builder.template_url(url);
            }
        }

        if ctx.dry_run {
            let request = builder.build()?;
            let masked_keys = request
                .parameters
                .keys()
                .into_iter()
                .filter(|key| schema.is_sensitive(key))
                .map(str::to_string)
                .collect();
            return Ok(CommandOutput::DryRun {
                request,
                masked_keys,
            });
        }

        // Nothing below runs without a complete request.
        let request = builder.clone().build()?;
        let client = ctx.factory.stack_client(&aws_target(options)).await?;
        let stack_id = builder.submit(client.as_ref()).await?;
        tracing::info!("Created stack '{}': {}", request.stack_name, stack_id);

        Ok(CommandOutput::StackCreated {
            stack_name: request.stack_name,
            stack_id,
        })
    }
}
