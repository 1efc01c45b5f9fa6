//! Error type shared by rendering and execution.

use thiserror::Error;

/// Everything that can go wrong while rendering or running an operation.
#[derive(Debug, Error)]
pub enum Error {
    /// A keyword option was given `false`, which has no rendering.
    #[error("keyword options such as {name} can not have false values")]
    InvalidOption { name: String },

    /// Two operations (or an operation and an unsupported value) were combined.
    #[error("invalid combination: {0}")]
    InvalidCombination(String),

    /// The shell exited with a nonzero status.
    #[error(
        "Error while executing \"{command}\" ({code}):\n{}",
        failure_detail(.stdout, .stderr, .captured)
    )]
    ExecutionFailure {
        command: String,
        code: i32,
        stdout: String,
        stderr: String,
        /// Whether the streams were captured at all.
        captured: bool,
    },

    /// `first()` or `last()` on a result without any output lines.
    #[error("command output contains no lines")]
    EmptyResult,

    /// The shell interpreter could not be spawned.
    #[error("failed to spawn shell: {0}")]
    Spawn(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Exit code of a failed execution.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Error::ExecutionFailure { code, .. } => Some(*code),
            _ => None,
        }
    }
}

fn failure_detail<'a>(stdout: &'a str, stderr: &'a str, captured: &bool) -> &'a str {
    if !*captured {
        "Error not captured, see console."
    } else if stderr.is_empty() {
        stdout
    } else {
        stderr
    }
}
