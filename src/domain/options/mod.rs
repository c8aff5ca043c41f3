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

//! Resolved command options
//!
//! An [`OptionSet`] distinguishes three states per option name: unset (the
//! name is not in the set), explicitly null, and set to a scalar value. Only
//! the last one is "present" for parameter mapping.

pub mod loader;

pub use self::loader::{load_params_file, parse_dynamic_options};

use crate::shared::error::{Result, StackError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Str(s) => f.write_str(s),
            OptionValue::Int(n) => write!(f, "{}", n),
            OptionValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        OptionValue::Int(i64::from(value))
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionState {
    Null,
    Value(OptionValue),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    values: BTreeMap<String, OptionState>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly used by tests and product defaults.
    pub fn with(mut self, name: &str, value: impl Into<OptionValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<OptionValue>) {
        self.values
            .insert(normalize_name(name), OptionState::Value(value.into()));
    }

    pub fn insert_null(&mut self, name: &str) {
        self.values.insert(normalize_name(name), OptionState::Null);
    }

    /// `None` means the option was never provided at all.
    pub fn state(&self, name: &str) -> Option<&OptionState> {
        self.values.get(&normalize_name(name))
    }

    pub fn is_unset(&self, name: &str) -> bool {
        self.state(name).is_none()
    }

    pub fn is_null(&self, name: &str) -> bool {
        matches!(self.state(name), Some(OptionState::Null))
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        match self.state(name) {
            Some(OptionState::Value(value)) => Some(value),
            _ => None,
        }
    }

    pub fn is_present(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get_string(&self, name: &str) -> Option<String> {
        self.get(name).map(|v| v.to_string())
    }

    /// Present, non-empty string value.
    pub fn get_non_empty(&self, name: &str) -> Option<String> {
        self.get_string(name).filter(|s| !s.trim().is_empty())
    }

    pub fn get_u32(&self, name: &str) -> Result<Option<u32>> {
        match self.get(name) {
            None => Ok(None),
            Some(OptionValue::Int(n)) => u32::try_from(*n).map(Some).map_err(|_| {
                StackError::config_error(format!("option '{}' is out of range: {}", name, n))
            }),
            Some(OptionValue::Str(s)) => s.trim().parse::<u32>().map(Some).map_err(|_| {
                StackError::config_error(format!(
                    "option '{}' must be a non-negative integer, got '{}'",
                    name, s
                ))
            }),
            Some(OptionValue::Bool(b)) => Err(StackError::config_error(format!(
                "option '{}' must be a non-negative integer, got '{}'",
                name, b
            ))),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionState)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Layers `other` on top of `self`. A value in `other` wins; a null in
    /// `other` only fills names that `self` never had.
    pub fn overlay(&mut self, other: &OptionSet) {
        for (name, state) in &other.values {
            match state {
                OptionState::Value(_) => {
                    self.values.insert(name.clone(), state.clone());
                }
                OptionState::Null => {
                    self.values
                        .entry(name.clone())
                        .or_insert(OptionState::Null);
                }
            }
        }
    }

    /// Flattens any serializable struct (typically a clap argument struct)
    /// into an option set. `None` fields become explicit nulls.
    pub fn from_serializable<T: Serialize>(source: &T) -> Result<Self> {
        let value = serde_json::to_value(source)?;
        Self::from_json_object(value)
    }

    pub fn from_json_object(value: serde_json::Value) -> Result<Self> {
        let object = match value {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => return Ok(Self::new()),
            other => {
                return Err(StackError::config_error(format!(
                    "expected a table of options, got {}",
                    other
                )))
            }
        };

        let mut set = Self::new();
        for (name, value) in object {
            match value {
                serde_json::Value::Null => set.insert_null(&name),
                serde_json::Value::Bool(b) => set.insert(&name, b),
                serde_json::Value::Number(n) => match n.as_i64() {
                    Some(i) => set.insert(&name, i),
                    None => set.insert(&name, n.to_string()),
                },
                serde_json::Value::String(s) => set.insert(&name, s),
                serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                    return Err(StackError::config_error(format!(
                        "option '{}' must be a scalar value",
                        name
                    )))
                }
            }
        }
        Ok(set)
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().replace('-', "_")
}
