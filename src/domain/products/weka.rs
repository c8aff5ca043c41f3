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

use super::StackDefaults;
use crate::domain::mapping::{FieldMap, FieldSpec};
use crate::domain::options::OptionSet;
use crate::infrastructure::constants::{
    WEKA_BACKEND_INSTANCE_COUNT, WEKA_BACKEND_INSTANCE_TYPE, WEKA_STACK_NAME,
};
use crate::shared::error::Result;

/// Weka templates are generated per cluster, so there is no default URL.
pub const DEFAULTS: StackDefaults = StackDefaults::new(WEKA_STACK_NAME);

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::scalar("key_name", "KeyName").required(),
    FieldSpec::scalar("subnet_id", "SubnetId").required(),
    FieldSpec::scalar("vpc_id", "VpcId").required(),
];

pub fn field_map() -> Result<FieldMap> {
    FieldMap::new("weka", FIELDS)
}

/// Topology defaults for template generation.
pub fn topology_defaults() -> OptionSet {
    OptionSet::new()
        .with("backend_instance_type", WEKA_BACKEND_INSTANCE_TYPE)
        .with("backend_instance_count", WEKA_BACKEND_INSTANCE_COUNT)
}
