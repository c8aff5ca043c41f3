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
use crate::infrastructure::constants::{QUMULO_STACK_NAME, QUMULO_TEMPLATE_URL};
use crate::shared::error::Result;

pub const DEFAULTS: StackDefaults =
    StackDefaults::new(QUMULO_STACK_NAME).with_template_url(QUMULO_TEMPLATE_URL);

/// Cloud.Next, existing VPC, single AZ.
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::scalar("qs_s3_bucket_name", "QSS3BucketName").required(),
    FieldSpec::scalar("qs_s3_key_prefix", "QSS3KeyPrefix").required(),
    FieldSpec::scalar("qs_s3_region", "QSS3BucketRegion").required(),
    FieldSpec::scalar("key_pair_name", "KeyPair").required(),
    FieldSpec::scalar("env_type", "EnvType").required(),
    FieldSpec::scalar("vpc_id", "VPCId").required(),
    FieldSpec::scalar("security_group_cidr_1", "QSgCidr1").default_value("10.0.0.0/16"),
    FieldSpec::scalar("security_group_cidr_2", "QSgCidr2").default_value(""),
    FieldSpec::scalar("security_group_cidr_3", "QSgCidr3").default_value(""),
    FieldSpec::scalar("security_group_cidr_4", "QSgCidr4").default_value(""),
    FieldSpec::scalar("private_subnet_id", "PrivateSubnetID").required(),
    FieldSpec::scalar("q_public_mgmt", "QPublicMgmt").default_value("NO"),
    FieldSpec::scalar("q_public_repl", "QPublicRepl").default_value("NO"),
    FieldSpec::scalar("public_subnet_id", "PublicSubnetID"),
    FieldSpec::scalar("q_nlb", "QNlb").default_value("NO"),
    FieldSpec::list("q_nlb_private_subnet_ids", "QNlbPrivateSubnetIDs"),
    FieldSpec::scalar("domain_name", "DomainName"),
    FieldSpec::scalar("q_float_record_name", "QFloatRecordName"),
    FieldSpec::scalar("q_ami_id", "QAmiID"),
    FieldSpec::scalar("q_shared_ami", "QSharedAmi").default_value("NO"),
    FieldSpec::scalar("q_debian_package", "QDebianPackage").default_value("DEB"),
    FieldSpec::scalar("q_persistent_bucket_name", "QPersistentBucketName")
        .default_value("auto-create"),
    FieldSpec::scalar("q_instance_type", "QInstanceType").default_value("m6idn.xlarge"),
    FieldSpec::scalar("q_node_count", "QNodeCount").default_value("4"),
    FieldSpec::scalar("q_disk_config", "QDiskConfig").default_value("64GiB-Write-Cache"),
    FieldSpec::scalar("q_write_cache_type", "QWriteCacheType").default_value("gp3"),
    FieldSpec::scalar("q_write_cache_tput", "QWriteCacheTput").default_value("Use Qumulo Default"),
    FieldSpec::scalar("q_write_cache_iops", "QWriteCacheIops").default_value("Use Qumulo Default"),
    FieldSpec::scalar("q_boot_dkv_type", "QBootDKVType").default_value("gp3"),
    FieldSpec::scalar("q_cluster_version", "QClusterVersion").default_value("3.2.0"),
    FieldSpec::scalar("q_cluster_name", "QClusterName").required(),
    FieldSpec::scalar("q_cluster_admin_pwd", "QClusterAdminPwd")
        .required()
        .sensitive(),
    FieldSpec::scalar("volumes_encryption_key", "VolumesEncryptionKey").default_value(""),
    FieldSpec::scalar("q_permissions_boundary", "QPermissionsBoundary").default_value(""),
    FieldSpec::scalar("q_audit_log", "QAuditLog").default_value("NO"),
    FieldSpec::scalar("term_protection", "TermProtection").default_value("NO"),
];

/// Single instance type cluster template that predates Cloud.Next.
pub const LEGACY_FIELDS: &[FieldSpec] = &[
    FieldSpec::scalar("cluster_name", "ClusterName").required(),
    FieldSpec::scalar("iam_instance_profile", "IamInstanceProfile"),
    FieldSpec::scalar("instance_type", "InstanceType").default_value("c5n.xlarge"),
    FieldSpec::scalar("key_pair_name", "KeyName").required(),
    FieldSpec::scalar("vpc_id", "VpcId").required(),
    FieldSpec::scalar("subnet_id", "SubnetId").required(),
    FieldSpec::scalar("security_group_cidr", "SgCidr").default_value("0.0.0.0/0"),
    FieldSpec::scalar("volumes_encryption_key", "VolumesEncryptionKey").default_value(""),
];

pub fn field_map() -> Result<FieldMap> {
    FieldMap::new("qumulo", FIELDS)
}

pub fn legacy_field_map() -> Result<FieldMap> {
    FieldMap::new("qumulo-legacy", LEGACY_FIELDS)
}
