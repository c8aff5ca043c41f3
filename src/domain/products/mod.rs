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

//! Per product template parameter tables and stack defaults

pub mod hammerspace;
pub mod qumulo;
pub mod weka;

use crate::domain::options::OptionSet;
use crate::infrastructure::constants::{
    DEFAULT_CAPABILITIES, OPT_CAPABILITIES, OPT_STACK_NAME, OPT_TEMPLATE_URL,
};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Product {
    Hammerspace,
    Qumulo,
    Weka,
}

impl Product {
    pub fn as_str(&self) -> &'static str {
        match self {
            Product::Hammerspace => "hammerspace",
            Product::Qumulo => "qumulo",
            Product::Weka => "weka",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stack level defaults that sit below every user supplied layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackDefaults {
    pub stack_name: &'static str,
    pub template_url: Option<&'static str>,
    pub capabilities: &'static str,
}

impl StackDefaults {
    pub const fn new(stack_name: &'static str) -> Self {
        Self {
            stack_name,
            template_url: None,
            capabilities: DEFAULT_CAPABILITIES,
        }
    }

    pub const fn with_template_url(self, url: &'static str) -> Self {
        Self {
            template_url: Some(url),
            ..self
        }
    }

    pub fn to_options(&self) -> OptionSet {
        let mut options = OptionSet::new()
            .with(OPT_STACK_NAME, self.stack_name)
            .with(OPT_CAPABILITIES, self.capabilities);
        if let Some(url) = self.template_url {
            options.insert(OPT_TEMPLATE_URL, url);
        }
        options
    }
}
