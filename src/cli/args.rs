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

//! Per product command line arguments
//!
//! Argument structs carry no clap defaults. Defaults live in the parameter
//! tables, so a params file can fill anything the command line leaves out.
//! Every struct serializes to a flat option table.

use crate::domain::options::{load_params_file, parse_dynamic_options, OptionSet};
use crate::infrastructure::constants::OPT_CAPABILITIES;
use crate::shared::error::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Options shared by every stack creating command
#[derive(Args, Serialize, Debug, Clone, Default)]
pub struct StackArgs {
    /// Stack name (defaults to the product name)
    #[arg(long)]
    pub stack_name: Option<String>,

    /// The URL to the CloudFormation template
    #[arg(long)]
    pub template_url: Option<String>,

    /// AWS region (defaults to the AWS SDK region chain)
    #[arg(long)]
    pub aws_region: Option<String>,

    /// AWS named profile
    #[arg(long)]
    pub aws_profile: Option<String>,

    /// IAM role CloudFormation assumes when creating the stack
    #[arg(long)]
    pub cfn_role_arn: Option<String>,

    /// Capability to acknowledge, repeatable (default: CAPABILITY_IAM)
    #[arg(long = "capability", value_name = "CAPABILITY")]
    #[serde(skip)]
    pub capabilities: Vec<String>,
}

/// Option sources and run mode
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Flat TOML, YAML or JSON table of options, applied below command line flags
    #[arg(long, value_name = "PATH")]
    pub params_file: Option<PathBuf>,

    /// Override any option (-D key=value), applied above command line flags
    ///
    /// Example: -Dq_node_count=6 -Dstack_name=qumulo-dev
    #[arg(short = 'D', value_name = "KEY=VALUE")]
    pub properties: Vec<String>,

    /// Validate and print the request without creating anything
    #[arg(long)]
    pub dry_run: bool,
}

impl InputArgs {
    /// Layers params file < `flags` < `-D` properties.
    pub fn resolve<T: Serialize>(&self, flags: &T, capabilities: &[String]) -> Result<OptionSet> {
        let mut options = match &self.params_file {
            Some(path) => load_params_file(path)?,
            None => OptionSet::new(),
        };

        options.overlay(&OptionSet::from_serializable(flags)?);
        if !capabilities.is_empty() {
            options.insert(OPT_CAPABILITIES, capabilities.join(","));
        }
        options.overlay(&parse_dynamic_options(&self.properties)?);
        Ok(options)
    }
}

#[derive(Args, Serialize, Debug, Clone, Default)]
pub struct HammerspaceClusterArgs {
    #[command(flatten)]
    #[serde(flatten)]
    pub stack: StackArgs,

    #[command(flatten)]
    #[serde(skip)]
    pub input: InputArgs,

    /// Deployment type (add, new)
    #[arg(long, value_parser = ["add", "new"])]
    pub deployment_type: Option<String>,

    /// Anvil configuration (standalone, cluster)
    #[arg(long, value_parser = ["standalone", "cluster"])]
    pub anvil_configuration: Option<String>,

    /// Anvil IP address
    #[arg(long)]
    pub anvil_ip_address: Option<String>,

    /// Anvil instance type [default: m5.2xlarge]
    #[arg(long)]
    pub anvil_instance_type: Option<String>,

    /// Anvil metadata disk size in GB [default: 2000]
    #[arg(long)]
    pub anvil_instance_disk_size: Option<u32>,

    /// DSX node instance type [default: c5.24xlarge]
    #[arg(long)]
    pub dsx_node_instance_type: Option<String>,

    /// DSX node count [default: 8]
    #[arg(long)]
    pub dsx_node_instance_count: Option<u32>,

    /// DSX data disk size in GB [default: 16384]
    #[arg(long)]
    pub dsx_node_instance_disk_size: Option<u32>,

    /// Add DSX data volumes (yes, no)
    #[arg(long, value_parser = ["yes", "no"])]
    pub dsx_node_instance_add_volumes: Option<String>,

    /// Cluster VPC ID
    #[arg(long)]
    pub cluster_vpc_id: Option<String>,

    /// Cluster availability zone
    #[arg(long)]
    pub cluster_availability_zone: Option<String>,

    /// Cluster subnet ID
    #[arg(long)]
    pub cluster_subnet_id: Option<String>,

    /// HA subnet CIDR
    #[arg(long)]
    pub ha_subnet_cidr: Option<String>,
}

#[derive(Args, Serialize, Debug, Clone, Default)]
pub struct QumuloClusterArgs {
    #[command(flatten)]
    #[serde(flatten)]
    pub stack: StackArgs,

    #[command(flatten)]
    #[serde(skip)]
    pub input: InputArgs,

    /// Qumulo software S3 bucket name (required)
    #[arg(long)]
    pub qs_s3_bucket_name: Option<String>,

    /// Qumulo software S3 key prefix (required)
    #[arg(long)]
    pub qs_s3_key_prefix: Option<String>,

    /// Qumulo software S3 region (required)
    #[arg(long)]
    pub qs_s3_region: Option<String>,

    /// Existing EC2 key pair for SSH access (required)
    #[arg(long)]
    pub key_pair_name: Option<String>,

    /// Environment type (required)
    #[arg(long)]
    pub env_type: Option<String>,

    /// Qumulo cluster VPC ID (required)
    #[arg(long)]
    pub vpc_id: Option<String>,

    /// Security group CIDR 1 [default: 10.0.0.0/16]
    #[arg(long)]
    pub security_group_cidr_1: Option<String>,

    #[arg(long)]
    pub security_group_cidr_2: Option<String>,

    #[arg(long)]
    pub security_group_cidr_3: Option<String>,

    #[arg(long)]
    pub security_group_cidr_4: Option<String>,

    /// Private subnet ID (required)
    #[arg(long)]
    pub private_subnet_id: Option<String>,

    /// Qumulo public management (YES, NO)
    #[arg(long)]
    pub q_public_mgmt: Option<String>,

    /// Qumulo public replication (YES, NO)
    #[arg(long)]
    pub q_public_repl: Option<String>,

    /// Public subnet ID
    #[arg(long)]
    pub public_subnet_id: Option<String>,

    /// Deploy an AWS network load balancer (YES, NO)
    #[arg(long)]
    pub q_nlb: Option<String>,

    /// Comma separated private subnet IDs for the network load balancer
    #[arg(long)]
    pub q_nlb_private_subnet_ids: Option<String>,

    /// Domain name for a Route 53 hosted zone
    #[arg(long)]
    pub domain_name: Option<String>,

    /// Route 53 record name for the cluster floating IP addresses
    #[arg(long)]
    pub q_float_record_name: Option<String>,

    /// Qumulo AMI ID
    #[arg(long)]
    pub q_ami_id: Option<String>,

    #[arg(long)]
    pub q_shared_ami: Option<String>,

    /// Debian or RPM package (DEB, RPM)
    #[arg(long)]
    pub q_debian_package: Option<String>,

    /// S3 bucket for persistent storage [default: auto-create]
    #[arg(long)]
    pub q_persistent_bucket_name: Option<String>,

    /// Qumulo EC2 instance type [default: m6idn.xlarge]
    #[arg(long)]
    pub q_instance_type: Option<String>,

    /// Number of Qumulo EC2 instances [default: 4]
    #[arg(long)]
    pub q_node_count: Option<String>,

    /// Write cache configuration [default: 64GiB-Write-Cache]
    #[arg(long)]
    pub q_disk_config: Option<String>,

    #[arg(long)]
    pub q_write_cache_type: Option<String>,

    #[arg(long)]
    pub q_write_cache_tput: Option<String>,

    #[arg(long)]
    pub q_write_cache_iops: Option<String>,

    #[arg(long)]
    pub q_boot_dkv_type: Option<String>,

    /// Qumulo software version [default: 3.2.0]
    #[arg(long)]
    pub q_cluster_version: Option<String>,

    /// Qumulo cluster name (required)
    #[arg(long)]
    pub q_cluster_name: Option<String>,

    /// Qumulo cluster administrator password (required)
    #[arg(long)]
    pub q_cluster_admin_pwd: Option<String>,

    /// EBS volumes encryption key
    #[arg(long)]
    pub volumes_encryption_key: Option<String>,

    /// Permissions boundary policy name
    #[arg(long)]
    pub q_permissions_boundary: Option<String>,

    /// Send audit-log messages to CloudWatch Logs (YES, NO)
    #[arg(long)]
    pub q_audit_log: Option<String>,

    /// Termination protection (YES, NO)
    #[arg(long)]
    pub term_protection: Option<String>,
}

#[derive(Args, Serialize, Debug, Clone, Default)]
pub struct QumuloLegacyClusterArgs {
    #[command(flatten)]
    #[serde(flatten)]
    pub stack: StackArgs,

    #[command(flatten)]
    #[serde(skip)]
    pub input: InputArgs,

    /// Qumulo cluster name, 2-15 alphanumeric characters and - (required)
    #[arg(long)]
    pub cluster_name: Option<String>,

    /// Existing EC2 key pair for SSH access (required)
    #[arg(long)]
    pub key_pair_name: Option<String>,

    /// Qumulo cluster VPC ID (required)
    #[arg(long)]
    pub vpc_id: Option<String>,

    /// Subnet ID (required)
    #[arg(long)]
    pub subnet_id: Option<String>,

    /// Name (not the ARN) of the IAM instance profile assigned to each node
    #[arg(long, alias = "iam-instance-profile-name")]
    pub iam_instance_profile: Option<String>,

    /// EC2 instance type for Qumulo nodes [default: c5n.xlarge]
    #[arg(long)]
    pub instance_type: Option<String>,

    /// Security group CIDR [default: 0.0.0.0/0]
    #[arg(long)]
    pub security_group_cidr: Option<String>,

    /// EBS volumes encryption key
    #[arg(long)]
    pub volumes_encryption_key: Option<String>,
}

/// Weka template API options
#[derive(Args, Serialize, Debug, Clone, Default)]
pub struct WekaTemplateArgs {
    /// get.weka.io API token
    #[arg(long)]
    pub token: Option<String>,

    /// Weka release to generate the template for [default: latest]
    #[arg(long)]
    pub weka_version: Option<String>,

    /// Backend instance type [default: i3en.2xlarge]
    #[arg(long)]
    pub backend_instance_type: Option<String>,

    /// Backend instance count [default: 6]
    #[arg(long)]
    pub backend_instance_count: Option<u32>,

    /// Client instance type
    #[arg(long)]
    pub client_instance_type: Option<String>,

    /// Client instance count
    #[arg(long)]
    pub client_instance_count: Option<u32>,

    /// Client AMI ID
    #[arg(long)]
    pub client_ami_id: Option<String>,
}

/// Weka stack template parameters
#[derive(Args, Serialize, Debug, Clone, Default)]
pub struct WekaStackParams {
    /// Key pair for connecting to the new instances (required)
    #[arg(long, alias = "template-param-key-name")]
    pub key_name: Option<String>,

    /// Subnet the cluster is installed in (required)
    #[arg(long, alias = "template-param-subnet-id")]
    pub subnet_id: Option<String>,

    /// VPC ID (required)
    #[arg(long, alias = "template-param-vpc-id")]
    pub vpc_id: Option<String>,
}

#[derive(Args, Serialize, Debug, Clone, Default)]
pub struct WekaCreateTemplateArgs {
    #[command(flatten)]
    #[serde(flatten)]
    pub template: WekaTemplateArgs,

    #[command(flatten)]
    #[serde(skip)]
    pub input: InputArgs,
}

#[derive(Args, Serialize, Debug, Clone, Default)]
pub struct WekaCreateStackArgs {
    #[command(flatten)]
    #[serde(flatten)]
    pub stack: StackArgs,

    #[command(flatten)]
    #[serde(skip)]
    pub input: InputArgs,

    #[command(flatten)]
    #[serde(flatten)]
    pub params: WekaStackParams,
}

#[derive(Args, Serialize, Debug, Clone, Default)]
pub struct WekaCreateClusterArgs {
    #[command(flatten)]
    #[serde(flatten)]
    pub stack: StackArgs,

    #[command(flatten)]
    #[serde(skip)]
    pub input: InputArgs,

    #[command(flatten)]
    #[serde(flatten)]
    pub template: WekaTemplateArgs,

    #[command(flatten)]
    #[serde(flatten)]
    pub params: WekaStackParams,
}
