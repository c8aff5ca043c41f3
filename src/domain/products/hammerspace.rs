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
use crate::infrastructure::constants::{HAMMERSPACE_STACK_NAME, HAMMERSPACE_TEMPLATE_URL};
use crate::shared::error::Result;

pub const DEFAULTS: StackDefaults =
    StackDefaults::new(HAMMERSPACE_STACK_NAME).with_template_url(HAMMERSPACE_TEMPLATE_URL);

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::scalar("deployment_type", "DeploymentType"),
    FieldSpec::scalar("anvil_configuration", "AnvilConfiguration").default_value("standalone"),
    FieldSpec::scalar("anvil_instance_type", "AnvilInstanceType").default_value("m5.2xlarge"),
    FieldSpec::scalar("dsx_node_instance_type", "DsxInstanceType").default_value("c5.24xlarge"),
    FieldSpec::scalar("dsx_node_instance_count", "DsxInstanceCount").default_value("8"),
    FieldSpec::scalar("anvil_instance_disk_size", "AnvilMetaDiskSize").default_value("2000"),
    FieldSpec::scalar("dsx_node_instance_disk_size", "DsxDataDiskSize").default_value("16384"),
    FieldSpec::scalar("dsx_node_instance_add_volumes", "DsxAddVols").default_value("yes"),
    FieldSpec::scalar("cluster_vpc_id", "VpcId"),
    FieldSpec::scalar("cluster_availability_zone", "AvailZone1"),
    FieldSpec::scalar("cluster_subnet_id", "Subnet1Id"),
    FieldSpec::scalar("ha_subnet_cidr", "HaSubnet1Cidr"),
    FieldSpec::scalar("anvil_ip_address", "ClusterIp").default_value("0.0.0.0"),
];

pub fn field_map() -> Result<FieldMap> {
    FieldMap::new("hammerspace", FIELDS)
}
