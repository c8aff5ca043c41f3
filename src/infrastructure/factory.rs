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

use crate::infrastructure::aws::{AwsTarget, CloudFormationStackClient, StackClient};
use crate::infrastructure::weka::{TemplateApi, WekaApiClient, DEFAULT_BASE_URL};
use crate::shared::error::Result;

/// Builds the remote clients a command needs. Commands only ask for a
/// client once their inputs are validated.
#[async_trait::async_trait]
pub trait ClientFactory: Send + Sync {
    async fn stack_client(&self, target: &AwsTarget) -> Result<Box<dyn StackClient>>;

    fn template_api(&self, token: &str) -> Result<Box<dyn TemplateApi>>;
}

pub struct AwsClientFactory {
    weka_base_url: String,
}

impl AwsClientFactory {
    pub fn new() -> Self {
        Self {
            weka_base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_weka_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.weka_base_url = base_url.into();
        self
    }
}

impl Default for AwsClientFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ClientFactory for AwsClientFactory {
    async fn stack_client(&self, target: &AwsTarget) -> Result<Box<dyn StackClient>> {
        Ok(Box::new(CloudFormationStackClient::new(target).await))
    }

    fn template_api(&self, token: &str) -> Result<Box<dyn TemplateApi>> {
        Ok(Box::new(WekaApiClient::with_base_url(
            token,
            &self.weka_base_url,
        )?))
    }
}
