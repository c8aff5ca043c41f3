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

use thiserror::Error;
pub type Result<T> = std::result::Result<T, StackError>;

#[derive(Error, Debug)]
pub enum StackError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid field map: {0}")]
    InvalidFieldMap(String),

    #[error("Missing required parameters: {}", .0.join(", "))]
    MissingParameters(Vec<String>),

    #[error("No template releases available")]
    NoReleasesAvailable,

    #[error("Template API error (HTTP {status}): {message}")]
    TemplateApi { status: u16, message: String },

    #[error("Unexpected template API response: {0}")]
    UnexpectedResponse(String),

    #[error("CloudFormation error: {0}")]
    CloudFormation(String),

    #[error("CloudFormation did not return a stack id for '{0}'")]
    MissingStackId(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl StackError {
    pub fn config_error(context: impl Into<String>) -> Self {
        Self::ConfigError(context.into())
    }

    pub fn template_api(status: u16, message: impl Into<String>) -> Self {
        Self::TemplateApi {
            status,
            message: message.into(),
        }
    }

    /// True for errors raised before anything was sent over the network.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigError(_) | Self::InvalidFieldMap(_) | Self::MissingParameters(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameters_message() {
        let err = StackError::MissingParameters(vec!["VpcId".to_string(), "KeyName".to_string()]);
        assert_eq!(err.to_string(), "Missing required parameters: VpcId, KeyName");
        assert!(err.is_config_error());
    }

    #[test]
    fn test_template_api_is_not_config_error() {
        let err = StackError::template_api(403, "forbidden");
        assert_eq!(err.to_string(), "Template API error (HTTP 403): forbidden");
        assert!(!err.is_config_error());
    }
}
