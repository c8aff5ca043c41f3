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

//! Template generation through the vendor template API
//!
//! The vendor builds a CloudFormation template for a requested cluster
//! topology and returns its URL. A missing or `latest` version is resolved
//! against the first page of the release listing first.

use crate::domain::options::OptionSet;
use crate::infrastructure::weka::TemplateApi;
use crate::shared::error::{Result, StackError};
use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: &str = "latest";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseDescriptor {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseListing {
    #[serde(default)]
    pub objects: Vec<ReleaseDescriptor>,
}

impl ReleaseListing {
    pub fn latest(&self) -> Result<&str> {
        self.objects
            .first()
            .map(|release| release.id.as_str())
            .ok_or(StackError::NoReleasesAvailable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Client,
    Backend,
}

/// One node group of the requested cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeGroup {
    pub role: NodeRole,
    pub instance_type: Option<String>,
    pub count: Option<u32>,
    pub ami_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterEntry {
    pub role: NodeRole,
    pub instance_type: String,
    pub count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ami_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateRequest {
    pub cluster: Vec<ClusterEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratedTemplate {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterTopology {
    pub groups: Vec<NodeGroup>,
}

impl ClusterTopology {
    /// Reads `client_*` and `backend_*` options; clients come first.
    pub fn from_options(options: &OptionSet) -> Result<Self> {
        let client = NodeGroup {
            role: NodeRole::Client,
            instance_type: options.get_non_empty("client_instance_type"),
            count: options.get_u32("client_instance_count")?,
            ami_id: options.get_non_empty("client_ami_id"),
        };
        let backend = NodeGroup {
            role: NodeRole::Backend,
            instance_type: options.get_non_empty("backend_instance_type"),
            count: options.get_u32("backend_instance_count")?,
            ami_id: None,
        };

        Ok(Self {
            groups: vec![client, backend],
        })
    }

    /// Groups without a count (or with a zero count) are left out.
    pub fn to_request(&self) -> Result<TemplateRequest> {
        let mut cluster = Vec::new();

        for group in &self.groups {
            let count = match group.count {
                Some(count) if count > 0 => count,
                _ => continue,
            };
            let instance_type = group.instance_type.clone().ok_or_else(|| {
                StackError::config_error(format!(
                    "{} instance type is required when {} instance count is set",
                    group.role.as_str(),
                    group.role.as_str()
                ))
            })?;
            let ami_id = match group.role {
                NodeRole::Client => group.ami_id.clone(),
                NodeRole::Backend => None,
            };

            cluster.push(ClusterEntry {
                role: group.role,
                instance_type,
                count,
                ami_id,
            });
        }

        if cluster.is_empty() {
            return Err(StackError::config_error(
                "at least one of backend or client instance count must be greater than zero",
            ));
        }

        Ok(TemplateRequest { cluster })
    }
}

impl NodeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeRole::Client => "client",
            NodeRole::Backend => "backend",
        }
    }
}

pub struct TemplateResolver<'a> {
    api: &'a dyn TemplateApi,
}

impl<'a> TemplateResolver<'a> {
    pub fn new(api: &'a dyn TemplateApi) -> Self {
        Self { api }
    }

    pub async fn resolve_version(&self, version: Option<&str>) -> Result<String> {
        match version.map(str::trim) {
            Some(v) if !v.is_empty() && v != LATEST_VERSION => {
                validate_version(v)?;
                Ok(v.to_string())
            }
            _ => {
                let listing = self.api.list_releases(1).await?;
                let latest = listing.latest()?.to_string();
                tracing::info!("Resolved latest template release to {}", latest);
                Ok(latest)
            }
        }
    }

    /// Generates a template for `topology` and returns its URL.
    pub async fn resolve(&self, version: Option<&str>, topology: &ClusterTopology) -> Result<String> {
        // Topology problems are configuration errors; report them before any request.
        let request = topology.to_request()?;
        let version = self.resolve_version(version).await?;

        tracing::debug!(
            "Generating template {} for {} node groups",
            version,
            request.cluster.len()
        );
        let generated = self.api.generate_template(&version, &request).await?;
        tracing::info!("Generated template: {}", generated.url);
        Ok(generated.url)
    }
}

/// A version names one path segment of the generation endpoint.
fn validate_version(version: &str) -> Result<()> {
    let invalid = matches!(version, "." | "..")
        || version
            .chars()
            .any(|c| matches!(c, '/' | '\\' | '?' | '#') || c.is_control());
    if invalid {
        return Err(StackError::config_error(format!(
            "Invalid template version '{}'",
            version
        )));
    }
    Ok(())
}
