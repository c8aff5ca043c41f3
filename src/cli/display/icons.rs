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

//! Status icons for CLI output

use crate::domain::command::CommandOutput;

/// Status icons for different outcomes
pub struct StatusIcon;

impl StatusIcon {
    /// Stack or template created
    pub const SUCCESS: &'static str = "✓";

    /// Nothing was submitted
    pub const DRY_RUN: &'static str = "○";

    pub fn for_output(output: &CommandOutput) -> &'static str {
        match output {
            CommandOutput::StackCreated { .. } | CommandOutput::TemplateGenerated { .. } => {
                Self::SUCCESS
            }
            CommandOutput::DryRun { .. } | CommandOutput::TemplatePlan { .. } => Self::DRY_RUN,
        }
    }
}
