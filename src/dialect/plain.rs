use std::sync::Arc;

use crate::arg::escape_literal;
use crate::command::Command;
use crate::dialect::{Dialect, escaped_args};
use crate::error::Result;

/// `name [options] [args]`, the way almost every tool reads its arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl Dialect for Plain {
    fn build_action(&self, command: &Command, s: &mut Vec<String>) -> Result<()> {
        s.push(escape_literal(&command.name().into()));
        Ok(())
    }

    fn build_args(&self, command: &Command, s: &mut Vec<String>) -> Result<()> {
        s.extend(escaped_args(command)?);
        Ok(())
    }

    fn subcommand_dialect(&self) -> Arc<dyn Dialect> {
        Arc::new(Plain)
    }
}
