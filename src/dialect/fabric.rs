use std::sync::Arc;

use crate::arg::escape_literal;
use crate::command::Command;
use crate::dialect::{Dialect, Plain, escaped_args};
use crate::error::Result;

/// The `fab` command itself. Renders like [`Plain`], but its sub-commands
/// are [`FabricTask`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct FabricCommand;

impl Dialect for FabricCommand {
    fn build_action(&self, command: &Command, s: &mut Vec<String>) -> Result<()> {
        Plain.build_action(command, s)
    }

    fn build_args(&self, command: &Command, s: &mut Vec<String>) -> Result<()> {
        Plain.build_args(command, s)
    }

    fn subcommand_dialect(&self) -> Arc<dyn Dialect> {
        Arc::new(FabricTask)
    }
}

/// A Fabric task. Arguments are folded into the action as `task:a,b`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FabricTask;

impl Dialect for FabricTask {
    fn build_action(&self, command: &Command, s: &mut Vec<String>) -> Result<()> {
        let name = escape_literal(&command.name().into());
        let args = escaped_args(command)?;
        if args.is_empty() {
            s.push(name);
        } else {
            s.push(format!("{name}:{}", args.join(",")));
        }
        Ok(())
    }

    fn build_args(&self, _command: &Command, _s: &mut Vec<String>) -> Result<()> {
        Ok(())
    }

    fn subcommand_dialect(&self) -> Arc<dyn Dialect> {
        Arc::new(FabricTask)
    }
}
