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

use crate::domain::stack::StackRequest;
use crate::shared::error::{Result, StackError};
use aws_config::{BehaviorVersion, Region};
use aws_sdk_cloudformation::error::DisplayErrorContext;
use aws_sdk_cloudformation::types::{Capability, Parameter};

/// Region and named profile used to resolve AWS credentials. `None` falls
/// back to the default provider chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AwsTarget {
    pub region: Option<String>,
    pub profile: Option<String>,
}

#[async_trait::async_trait]
pub trait StackClient: Send + Sync {
    /// Issues one `CreateStack` call and returns the stack id.
    async fn create_stack(&self, request: &StackRequest) -> Result<String>;
}

pub struct CloudFormationStackClient {
    client: aws_sdk_cloudformation::Client,
}

impl CloudFormationStackClient {
    pub async fn new(target: &AwsTarget) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &target.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &target.profile {
            loader = loader.profile_name(profile);
        }
        let sdk_config = loader.load().await;

        tracing::debug!(
            "Using AWS region {}",
            sdk_config
                .region()
                .map(|r| r.as_ref().to_string())
                .unwrap_or_else(|| "<default>".to_string())
        );

        Self {
            client: aws_sdk_cloudformation::Client::new(&sdk_config),
        }
    }
}

#[async_trait::async_trait]
impl StackClient for CloudFormationStackClient {
    async fn create_stack(&self, request: &StackRequest) -> Result<String> {
        let parameters = request
            .parameters
            .iter()
            .map(|p| {
                Parameter::builder()
                    .parameter_key(p.key.as_str())
                    .parameter_value(p.value.render())
                    .build()
            })
            .collect::<Vec<_>>();
        let capabilities = request
            .capabilities
            .iter()
            .map(|c| Capability::from(c.as_str()))
            .collect::<Vec<_>>();

        let output = self
            .client
            .create_stack()
            .stack_name(&request.stack_name)
            .template_url(&request.template_url)
            .set_parameters(Some(parameters))
            .set_capabilities(Some(capabilities))
            .set_role_arn(request.role_arn.clone())
            .send()
            .await
            .map_err(|e| StackError::CloudFormation(DisplayErrorContext(&e).to_string()))?;

        output
            .stack_id()
            .map(str::to_string)
            .ok_or_else(|| StackError::MissingStackId(request.stack_name.clone()))
    }
}
