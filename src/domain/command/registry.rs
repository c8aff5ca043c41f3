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

use super::{names, CommandOutput, CreateStackCommand, CreateTemplateCommand, ExecutionContext, StackCommand};
use crate::domain::options::OptionSet;
use crate::domain::products::{hammerspace, qumulo, weka};
use crate::shared::error::{Result, StackError};
use std::collections::BTreeMap;

/// Explicit command table, built once at startup and handed to the dispatcher.
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<&'static str, Box<dyn StackCommand>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, command: Box<dyn StackCommand>) -> Result<()> {
        let name = command.name();
        if self.commands.contains_key(name) {
            return Err(StackError::config_error(format!(
                "command '{}' is already registered",
                name
            )));
        }
        // Surface a broken parameter table at startup rather than mid-run.
        command.parameter_schema()?;
        self.commands.insert(name, command);
        Ok(())
    }

    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();

        registry.register(Box::new(CreateStackCommand::new(
            names::HAMMERSPACE_CREATE_CLUSTER,
            "Create a Hammerspace cluster stack",
            hammerspace::field_map,
            hammerspace::DEFAULTS,
        )))?;
        registry.register(Box::new(CreateStackCommand::new(
            names::QUMULO_CREATE_CLUSTER,
            "Create a Qumulo Cloud.Next cluster stack",
            qumulo::field_map,
            qumulo::DEFAULTS,
        )))?;
        registry.register(Box::new(CreateStackCommand::new(
            names::QUMULO_CREATE_CLUSTER_LEGACY,
            "Create a Qumulo cluster stack from the legacy template",
            qumulo::legacy_field_map,
            qumulo::DEFAULTS,
        )))?;
        registry.register(Box::new(CreateTemplateCommand::new(
            names::WEKA_CREATE_TEMPLATE,
            "Generate a Weka CloudFormation template",
            weka::topology_defaults,
        )))?;
        registry.register(Box::new(CreateStackCommand::new(
            names::WEKA_CREATE_STACK,
            "Create a Weka stack from an existing template",
            weka::field_map,
            weka::DEFAULTS,
        )))?;
        registry.register(Box::new(
            CreateStackCommand::new(
                names::WEKA_CREATE_CLUSTER,
                "Generate a Weka template and create a stack from it",
                weka::field_map,
                weka::DEFAULTS,
            )
            .generated(weka::topology_defaults),
        ))?;

        Ok(registry)
    }

    pub fn get(&self, name: &str) -> Option<&dyn StackCommand> {
        self.commands.get(name).map(|command| command.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.commands.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Runs `name` with `options` layered over the command defaults.
    pub async fn dispatch(
        &self,
        name: &str,
        options: &OptionSet,
        ctx: &ExecutionContext<'_>,
    ) -> Result<CommandOutput> {
        let command = self
            .get(name)
            .ok_or_else(|| StackError::UnknownCommand(name.to_string()))?;

        let mut resolved = command.default_options()?;
        resolved.overlay(options);

        tracing::debug!("Dispatching '{}' with {} options", name, resolved.len());
        command.execute(&resolved, ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_commands() {
        let registry = CommandRegistry::builtin().unwrap();
        assert_eq!(
            registry.names(),
            vec![
                "hammerspace aws create-cluster",
                "qumulo aws create-cluster",
                "qumulo aws create-cluster-legacy",
                "weka aws create-cluster",
                "weka aws create-stack",
                "weka aws create-template",
            ]
        );
        assert_eq!(
            registry.get(names::WEKA_CREATE_STACK).map(|c| c.about()),
            Some("Create a Weka stack from an existing template")
        );
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = CommandRegistry::new();
        let command = || {
            Box::new(CreateStackCommand::new(
                names::WEKA_CREATE_STACK,
                "test",
                weka::field_map,
                weka::DEFAULTS,
            ))
        };

        registry.register(command()).unwrap();
        assert!(registry.register(command()).unwrap_err().is_config_error());
        assert_eq!(registry.len(), 1);
    }
}
