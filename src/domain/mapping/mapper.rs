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

use super::field_map::{FieldKind, FieldMap};
use crate::domain::options::{OptionSet, OptionValue};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterValue {
    Scalar(String),
    List(Vec<String>),
}

impl ParameterValue {
    /// Wire form; lists use CloudFormation's comma delimited encoding.
    pub fn render(&self) -> String {
        match self {
            ParameterValue::Scalar(value) => value.clone(),
            ParameterValue::List(items) => items.join(","),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateParameter {
    pub key: String,
    pub value: ParameterValue,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterList {
    parameters: Vec<TemplateParameter>,
}

impl ParameterList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TemplateParameter> {
        self.parameters.iter()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&ParameterValue> {
        self.parameters
            .iter()
            .find(|p| p.key == key)
            .map(|p| &p.value)
    }

    pub fn keys(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.key.as_str()).collect()
    }

    /// `(key, rendered value)` pairs in order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.parameters
            .iter()
            .map(|p| (p.key.clone(), p.value.render()))
            .collect()
    }

    // Keys come from a validated FieldMap, so a key never repeats.
    fn push(&mut self, key: &str, value: ParameterValue) {
        self.parameters.push(TemplateParameter {
            key: key.to_string(),
            value,
        });
    }
}

impl<'a> IntoIterator for &'a ParameterList {
    type Item = &'a TemplateParameter;
    type IntoIter = std::slice::Iter<'a, TemplateParameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.parameters.iter()
    }
}

pub struct ParameterMapper;

impl ParameterMapper {
    pub fn map(options: &OptionSet, field_map: &FieldMap) -> ParameterList {
        let mut parameters = ParameterList::new();

        for field in field_map.fields() {
            let Some(value) = options.get(field.option) else {
                continue;
            };

            let value = match field.kind {
                FieldKind::Scalar => ParameterValue::Scalar(value.to_string()),
                FieldKind::DelimitedList => ParameterValue::List(split_list(value)),
            };
            parameters.push(field.key, value);
        }

        tracing::debug!(
            "Mapped {} of {} {} parameters",
            parameters.len(),
            field_map.len(),
            field_map.name()
        );
        parameters
    }
}

fn split_list(value: &OptionValue) -> Vec<String> {
    value
        .to_string()
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
