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

//! Table rendering for CLI output

use super::colors::table_color_to_colored_str;
use super::{ColorTheme, StatusIcon};
use crate::domain::command::CommandOutput;
use crate::domain::stack::{StackRequest, TemplateRequest};
use crate::infrastructure::constants::SENSITIVE_MASK;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};

/// Table renderer for formatted output
pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    pub fn render_output(&self, output: &CommandOutput) -> String {
        let icon = StatusIcon::for_output(output);
        match output {
            CommandOutput::StackCreated {
                stack_name,
                stack_id,
            } => format!(
                "{} Stack '{}' created\nStack ID {}",
                icon.color(table_color_to_colored_str(self.theme.success)),
                stack_name,
                stack_id
            ),
            CommandOutput::TemplateGenerated { url } => format!(
                "{} Template generated\n{}",
                icon.color(table_color_to_colored_str(self.theme.success)),
                url
            ),
            CommandOutput::DryRun {
                request,
                masked_keys,
            } => self.render_stack_request(request, masked_keys),
            CommandOutput::TemplatePlan { version, request } => {
                self.render_template_plan(version, request)
            }
        }
    }

    /// Render a stack request as a parameter table; `masked_keys` values are hidden
    pub fn render_stack_request(&self, request: &StackRequest, masked_keys: &[String]) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("PARAMETER").set_alignment(CellAlignment::Left),
                Cell::new("VALUE").set_alignment(CellAlignment::Left),
            ]);

        for (key, value) in request.parameters.to_pairs() {
            let masked = masked_keys.iter().any(|k| *k == key);
            let shown = if masked {
                SENSITIVE_MASK.to_string()
            } else {
                value
            };
            let color = self.theme.get_value_color(&shown, masked);
            table.add_row(vec![Cell::new(key), Cell::new(shown).fg(color)]);
        }

        let capabilities = request
            .capabilities
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let mut output = String::new();
        output.push_str(&format!(
            "{} Dry run, stack '{}' was not created {}\n",
            StatusIcon::DRY_RUN.color(table_color_to_colored_str(self.theme.warning)),
            request.stack_name,
            format!("[{} parameters]", request.parameters.len()).bright_black()
        ));
        output.push_str(&format!("Template:     {}\n", request.template_url));
        if let Some(role_arn) = &request.role_arn {
            output.push_str(&format!("Role ARN:     {}\n", role_arn));
        }
        if !capabilities.is_empty() {
            output.push_str(&format!("Capabilities: {}\n", capabilities));
        }
        output.push_str(&table.to_string());
        output
    }

    pub fn render_template_plan(&self, version: &str, request: &TemplateRequest) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("ROLE"),
                Cell::new("INSTANCE TYPE"),
                Cell::new("COUNT").set_alignment(CellAlignment::Right),
                Cell::new("AMI"),
            ]);

        for entry in &request.cluster {
            table.add_row(vec![
                Cell::new(entry.role.as_str()).fg(self.theme.info),
                Cell::new(&entry.instance_type),
                Cell::new(entry.count).set_alignment(CellAlignment::Right),
                Cell::new(entry.ami_id.as_deref().unwrap_or("-")).fg(self.theme.muted),
            ]);
        }

        format!(
            "{} Dry run, template {} was not generated\n{}",
            StatusIcon::DRY_RUN.color(table_color_to_colored_str(self.theme.warning)),
            version,
            table
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mapping::{FieldMap, FieldSpec, ParameterMapper};
    use crate::domain::options::OptionSet;
    use crate::domain::stack::{Capability, ClusterTopology, StackRequestBuilder};

    fn request() -> StackRequest {
        let map = FieldMap::new(
            "test",
            &[
                FieldSpec::scalar("q_cluster_name", "QClusterName"),
                FieldSpec::scalar("q_cluster_admin_pwd", "QClusterAdminPwd").sensitive(),
            ],
        )
        .unwrap();
        let options = OptionSet::new()
            .with("q_cluster_name", "c1")
            .with("q_cluster_admin_pwd", "hunter22");

        StackRequestBuilder::new()
            .stack_name("Qumulo")
            .template_url("https://example.com/q.json")
            .parameters(ParameterMapper::map(&options, &map))
            .capabilities(vec![Capability::Iam])
            .build()
            .unwrap()
    }

    #[test]
    fn test_dry_run_masks_sensitive_values() {
        let renderer = TableRenderer::new();
        let output = renderer.render_stack_request(&request(), &["QClusterAdminPwd".to_string()]);

        assert!(output.contains("QClusterName"));
        assert!(output.contains("c1"));
        assert!(output.contains(SENSITIVE_MASK));
        assert!(!output.contains("hunter22"));
        assert!(output.contains("CAPABILITY_IAM"));
    }

    #[test]
    fn test_render_stack_created() {
        let renderer = TableRenderer::new();
        let output = renderer.render_output(&CommandOutput::StackCreated {
            stack_name: "Weka".to_string(),
            stack_id: "arn:aws:cloudformation:us-east-1:123:stack/Weka/1".to_string(),
        });
        assert!(output.contains("Stack ID arn:aws:cloudformation:us-east-1:123:stack/Weka/1"));
    }

    #[test]
    fn test_render_template_plan() {
        let topology = ClusterTopology::from_options(
            &OptionSet::new()
                .with("backend_instance_type", "i3en.2xlarge")
                .with("backend_instance_count", 6u32),
        )
        .unwrap();
        let renderer = TableRenderer::new();
        let output = renderer.render_template_plan("latest", &topology.to_request().unwrap());

        assert!(output.contains("backend"));
        assert!(output.contains("i3en.2xlarge"));
    }
}
