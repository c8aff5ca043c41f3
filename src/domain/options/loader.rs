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

use super::OptionSet;
use crate::shared::error::{Result, StackError};
use std::fs::read_to_string;
use std::path::Path;

/// Load a flat table of options from a TOML, YAML or JSON file.
pub fn load_params_file<P: AsRef<Path>>(path: P) -> Result<OptionSet> {
    let path = path.as_ref();
    let content = read_to_string(path).map_err(|e| {
        StackError::config_error(format!(
            "Failed to read params file {}: {}",
            path.display(),
            e
        ))
    })?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let value: serde_json::Value = match extension.as_str() {
        "toml" => {
            let table: toml::Value = toml::from_str(&content)?;
            serde_json::to_value(table)?
        }
        "yaml" | "yml" => serde_yaml::from_str(&content)?,
        "json" => serde_json::from_str(&content)?,
        _ => {
            return Err(StackError::config_error(format!(
                "Unsupported params file format '{}' (expected .toml, .yaml, .yml or .json)",
                path.display()
            )))
        }
    };

    tracing::debug!("Loaded params file {}", path.display());
    OptionSet::from_json_object(value)
}

/// Parse `-D key=value` overrides into an option set.
pub fn parse_dynamic_options(properties: &[String]) -> Result<OptionSet> {
    let mut set = OptionSet::new();

    for property in properties {
        let (key, value) = property.split_once('=').ok_or_else(|| {
            StackError::config_error(format!(
                "Invalid option format: '{}'. Expected 'key=value'",
                property
            ))
        })?;

        let key = key.trim();
        if key.is_empty() {
            return Err(StackError::config_error(format!(
                "Empty key in option: '{}'",
                property
            )));
        }

        set.insert(key, value.trim());
    }

    Ok(set)
}
