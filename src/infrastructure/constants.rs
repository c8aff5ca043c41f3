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

/// Stack level option names
pub const OPT_STACK_NAME: &str = "stack_name";
pub const OPT_TEMPLATE_URL: &str = "template_url";
pub const OPT_AWS_REGION: &str = "aws_region";
pub const OPT_AWS_PROFILE: &str = "aws_profile";
pub const OPT_CFN_ROLE_ARN: &str = "cfn_role_arn";
pub const OPT_CAPABILITIES: &str = "capabilities";

/// Weka template API option names
pub const OPT_TOKEN: &str = "token";
pub const OPT_WEKA_VERSION: &str = "weka_version";

/// Default stack names
pub const HAMMERSPACE_STACK_NAME: &str = "Hammerspace";
pub const QUMULO_STACK_NAME: &str = "Qumulo";
pub const WEKA_STACK_NAME: &str = "Weka";

/// Published template locations
pub const HAMMERSPACE_TEMPLATE_URL: &str =
    "https://s3-external-1.amazonaws.com/cf-templates-waavb54hs3ff-us-east-1/2023356joQ-template12fq1v0pwupd";
pub const QUMULO_TEMPLATE_URL: &str =
    "https://envoi-prod-files-public.s3.amazonaws.com/qumulo/cloud-formation/templates/qumulo.cfn-template.json";

/// Weka cluster topology defaults
pub const WEKA_BACKEND_INSTANCE_TYPE: &str = "i3en.2xlarge";
pub const WEKA_BACKEND_INSTANCE_COUNT: u32 = 6;

/// Capability acknowledged for every product template
pub const DEFAULT_CAPABILITIES: &str = "CAPABILITY_IAM";

/// Mask shown instead of sensitive parameter values
pub const SENSITIVE_MASK: &str = "******";
