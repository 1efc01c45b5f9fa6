//! Command factory: dialect lookup by command name plus shell settings.

use std::collections::HashMap;
use std::sync::Arc;

use crate::command::Command;
use crate::config::Config;
use crate::dialect::{Dialect, FabricCommand, Plain};
use crate::operation::Operation;
use crate::shell::{Shell, ShellSettings};

/// Hands out fresh commands, each carrying the dialect registered for its name.
#[derive(Debug, Clone)]
pub struct Clom {
    dialects: HashMap<String, Arc<dyn Dialect>>,
    shell: ShellSettings,
}

impl Clom {
    /// Build the factory from configuration.
    pub fn from_config(config: &Config) -> Self {
        let mut dialects: HashMap<String, Arc<dyn Dialect>> = HashMap::new();
        for name in &config.dialects.fabric {
            dialects.insert(name.clone(), Arc::new(FabricCommand));
        }
        Self {
            dialects,
            shell: ShellSettings::from_config(config),
        }
    }

    /// Register (or replace) the dialect used for commands named `name`.
    pub fn register(&mut self, name: impl Into<String>, dialect: Arc<dyn Dialect>) {
        self.dialects.insert(name.into(), dialect);
    }

    /// A new command named `name`.
    pub fn command(&self, name: &str) -> Command {
        let dialect = self
            .dialects
            .get(name)
            .cloned()
            .unwrap_or_else(|| Arc::new(Plain));
        Command::with_dialect(name, dialect)
    }

    /// A shell runner for `operation` using the configured interpreter.
    pub fn shell(&self, operation: &dyn Operation) -> Shell {
        Shell::new(operation.clone_box(), self.shell.clone())
    }

    pub fn shell_settings(&self) -> &ShellSettings {
        &self.shell
    }
}

impl Default for Clom {
    fn default() -> Self {
        Self::from_config(&Config::default_config())
    }
}
