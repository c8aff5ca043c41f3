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

use crate::domain::options::OptionSet;
use crate::shared::error::{Result, StackError};
use regex::Regex;
use std::collections::HashSet;

/// CloudFormation parameter names are alphanumeric only.
const PARAMETER_KEY_PATTERN: &str = "^[A-Za-z0-9]+$";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Scalar,
    /// Comma separated input, emitted as a list of trimmed, non-empty tokens.
    DelimitedList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub option: &'static str,
    pub key: &'static str,
    pub kind: FieldKind,
    pub default: Option<&'static str>,
    pub required: bool,
    pub sensitive: bool,
}

impl FieldSpec {
    pub const fn scalar(option: &'static str, key: &'static str) -> Self {
        Self {
            option,
            key,
            kind: FieldKind::Scalar,
            default: None,
            required: false,
            sensitive: false,
        }
    }

    pub const fn list(option: &'static str, key: &'static str) -> Self {
        Self {
            kind: FieldKind::DelimitedList,
            ..Self::scalar(option, key)
        }
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub const fn default_value(self, value: &'static str) -> Self {
        Self {
            default: Some(value),
            ..self
        }
    }

    /// Value is masked in dry-run output and never logged.
    pub const fn sensitive(self) -> Self {
        Self {
            sensitive: true,
            ..self
        }
    }
}

/// Ordered option name to template parameter table for one template.
#[derive(Debug, Clone)]
pub struct FieldMap {
    name: &'static str,
    fields: Vec<FieldSpec>,
}

impl FieldMap {
    pub fn new(name: &'static str, fields: &[FieldSpec]) -> Result<Self> {
        let key_pattern = Regex::new(PARAMETER_KEY_PATTERN)
            .map_err(|e| StackError::InvalidFieldMap(e.to_string()))?;

        let mut keys = HashSet::new();
        let mut options = HashSet::new();

        for field in fields {
            if !key_pattern.is_match(field.key) {
                return Err(StackError::InvalidFieldMap(format!(
                    "{}: '{}' is not a valid parameter name",
                    name, field.key
                )));
            }
            if field.option.trim().is_empty() {
                return Err(StackError::InvalidFieldMap(format!(
                    "{}: parameter '{}' has an empty option name",
                    name, field.key
                )));
            }
            if !keys.insert(field.key) {
                return Err(StackError::InvalidFieldMap(format!(
                    "{}: duplicate parameter '{}'",
                    name, field.key
                )));
            }
            if !options.insert(field.option) {
                return Err(StackError::InvalidFieldMap(format!(
                    "{}: option '{}' is mapped twice",
                    name, field.option
                )));
            }
        }

        Ok(Self {
            name,
            fields: fields.to_vec(),
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_for_key(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn is_sensitive(&self, key: &str) -> bool {
        self.field_for_key(key).map(|f| f.sensitive).unwrap_or(false)
    }

    pub fn required_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|f| f.required).map(|f| f.key)
    }

    /// Template defaults as the lowest option layer.
    pub fn defaults(&self) -> OptionSet {
        let mut set = OptionSet::new();
        for field in &self.fields {
            if let Some(default) = field.default {
                set.insert(field.option, default);
            }
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_flags() {
        let spec = FieldSpec::list("nlb_subnet_ids", "NlbSubnetIDs")
            .required()
            .default_value("")
            .sensitive();

        assert_eq!(spec.kind, FieldKind::DelimitedList);
        assert!(spec.required);
        assert!(spec.sensitive);
        assert_eq!(spec.default, Some(""));
    }

    #[test]
    fn test_rejects_invalid_key() {
        let err = FieldMap::new("bad", &[FieldSpec::scalar("vpc_id", "Vpc-Id")]).unwrap_err();
        assert!(matches!(err, StackError::InvalidFieldMap(_)));
    }

    #[test]
    fn test_rejects_duplicate_key() {
        let err = FieldMap::new(
            "dup",
            &[
                FieldSpec::scalar("vpc_id", "VpcId"),
                FieldSpec::scalar("other_vpc_id", "VpcId"),
            ],
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate parameter 'VpcId'"));
    }

    #[test]
    fn test_rejects_duplicate_option() {
        let err = FieldMap::new(
            "dup",
            &[
                FieldSpec::scalar("vpc_id", "VpcId"),
                FieldSpec::scalar("vpc_id", "VPCId"),
            ],
        )
        .unwrap_err();
        assert!(err.to_string().contains("mapped twice"));
    }

    #[test]
    fn test_defaults_and_required_keys() {
        let map = FieldMap::new(
            "test",
            &[
                FieldSpec::scalar("cluster_name", "ClusterName").required(),
                FieldSpec::scalar("instance_type", "InstanceType").default_value("c5n.xlarge"),
                FieldSpec::scalar("vpc_id", "VpcId").required(),
            ],
        )
        .unwrap();

        let required: Vec<_> = map.required_keys().collect();
        assert_eq!(required, vec!["ClusterName", "VpcId"]);

        let defaults = map.defaults();
        assert_eq!(defaults.len(), 1);
        assert_eq!(
            defaults.get_string("instance_type").as_deref(),
            Some("c5n.xlarge")
        );
    }
}
