//! Dialects: how a command renders its own name and positional arguments.
//!
//! The parent chain and option rendering are shared by every command; a
//! dialect only replaces the "name + arguments" step. Tools with their own
//! sub-command syntax get their own `Dialect` implementation.

/// Fabric tasks: `fab deploy:dev,test`.
pub mod fabric;
/// The default: name, then space-separated arguments.
pub mod plain;

use std::fmt;
use std::sync::Arc;

use crate::command::Command;
use crate::error::Result;

pub use fabric::{FabricCommand, FabricTask};
pub use plain::Plain;

/// Rendering hooks for a command's action and arguments.
pub trait Dialect: fmt::Debug + Send + Sync {
    /// Append the command's own name (and any arguments folded into it).
    fn build_action(&self, command: &Command, s: &mut Vec<String>) -> Result<()>;

    /// Append the positional arguments that follow the options.
    fn build_args(&self, command: &Command, s: &mut Vec<String>) -> Result<()>;

    /// Dialect given to sub-commands created from this one.
    fn subcommand_dialect(&self) -> Arc<dyn Dialect>;
}

/// Escaped positional arguments of `command`, with unset ones dropped.
pub(crate) fn escaped_args(command: &Command) -> Result<Vec<String>> {
    command
        .args()
        .iter()
        .filter(|a| !a.is_unset())
        .map(|a| a.escape())
        .collect()
}
