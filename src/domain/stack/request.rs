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

use crate::domain::mapping::ParameterList;
use crate::infrastructure::aws::StackClient;
use crate::shared::error::{Result, StackError};
use std::fmt;
use std::str::FromStr;

/// Acknowledgements the stack needs to create privileged resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Iam,
    NamedIam,
    AutoExpand,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Iam => "CAPABILITY_IAM",
            Capability::NamedIam => "CAPABILITY_NAMED_IAM",
            Capability::AutoExpand => "CAPABILITY_AUTO_EXPAND",
        }
    }

    /// Parses a comma separated capability list, e.g. `CAPABILITY_IAM,named_iam`.
    pub fn parse_list(input: &str) -> Result<Vec<Capability>> {
        let mut capabilities = Vec::new();
        for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let capability = token.parse::<Capability>()?;
            if !capabilities.contains(&capability) {
                capabilities.push(capability);
            }
        }
        Ok(capabilities)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = StackError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        let name = normalized
            .strip_prefix("CAPABILITY_")
            .unwrap_or(normalized.as_str());
        match name {
            "IAM" => Ok(Capability::Iam),
            "NAMED_IAM" => Ok(Capability::NamedIam),
            "AUTO_EXPAND" => Ok(Capability::AutoExpand),
            _ => Err(StackError::config_error(format!(
                "Invalid capability: {}",
                s
            ))),
        }
    }
}

/// A validated, ready to submit stack creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackRequest {
    pub stack_name: String,
    pub template_url: String,
    pub parameters: ParameterList,
    pub role_arn: Option<String>,
    pub capabilities: Vec<Capability>,
}

#[derive(Debug, Clone, Default)]
pub struct StackRequestBuilder {
    stack_name: Option<String>,
    template_url: Option<String>,
    parameters: ParameterList,
    role_arn: Option<String>,
    capabilities: Vec<Capability>,
    required_keys: Vec<String>,
}

impl StackRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stack_name(mut self, name: impl Into<String>) -> Self {
        self.stack_name = Some(name.into());
        self
    }

    pub fn set_stack_name(mut self, name: Option<String>) -> Self {
        self.stack_name = name;
        self
    }

    pub fn template_url(mut self, url: impl Into<String>) -> Self {
        self.template_url = Some(url.into());
        self
    }

    pub fn set_template_url(mut self, url: Option<String>) -> Self {
        self.template_url = url;
        self
    }

    pub fn has_template_url(&self) -> bool {
        self.template_url
            .as_deref()
            .map(|url| !url.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn parameters(mut self, parameters: ParameterList) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn set_role_arn(mut self, role_arn: Option<String>) -> Self {
        self.role_arn = role_arn;
        self
    }

    pub fn capabilities(mut self, capabilities: Vec<Capability>) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Parameter keys that must be present in the final parameter list.
    pub fn require<'a>(mut self, keys: impl IntoIterator<Item = &'a str>) -> Self {
        self.required_keys
            .extend(keys.into_iter().map(|k| k.to_string()));
        self
    }

    /// Everything except the template URL, so callers can fail fast before
    /// spending a network round trip on template generation.
    pub fn validate_inputs(&self) -> Result<()> {
        let has_name = self
            .stack_name
            .as_deref()
            .map(|name| !name.trim().is_empty())
            .unwrap_or(false);
        if !has_name {
            return Err(StackError::config_error("stack name is required"));
        }

        let missing: Vec<String> = self
            .required_keys
            .iter()
            .filter(|key| !self.parameters.contains_key(key))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(StackError::MissingParameters(missing));
        }

        Ok(())
    }

    pub fn build(self) -> Result<StackRequest> {
        self.validate_inputs()?;

        let template_url = match self.template_url {
            Some(url) if !url.trim().is_empty() => url,
            _ => {
                return Err(StackError::config_error(
                    "missing required parameter template_url",
                ))
            }
        };

        Ok(StackRequest {
            stack_name: self.stack_name.unwrap_or_default(),
            template_url,
            parameters: self.parameters,
            role_arn: self.role_arn.filter(|arn| !arn.trim().is_empty()),
            capabilities: self.capabilities,
        })
    }

    /// Builds the request and issues a single create call. Returns the stack id.
    pub async fn submit(self, client: &dyn StackClient) -> Result<String> {
        let request = self.build()?;
        tracing::info!(
            "Creating stack '{}' from {} with {} parameters",
            request.stack_name,
            request.template_url,
            request.parameters.len()
        );
        client.create_stack(&request).await
    }
}
