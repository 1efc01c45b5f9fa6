//! Running rendered operations through a shell interpreter.

mod result;

pub use result::{CommandResult, Line, Lines};

use std::path::PathBuf;
use std::process::{self, ExitStatus, Stdio};

use log::{debug, info};

use crate::command::Call;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::{self, Mode};
use crate::operation::Operation;

/// How the interpreter is launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellSettings {
    /// Interpreter binary, e.g. `/bin/sh`.
    pub program: String,
    /// Flag that makes the interpreter read a command string, e.g. `-c`.
    pub flag: String,
    /// Where execution records are appended, if anywhere.
    pub execution_log: Option<PathBuf>,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            program: "/bin/sh".into(),
            flag: "-c".into(),
            execution_log: None,
        }
    }
}

impl ShellSettings {
    pub fn from_config(config: &Config) -> Self {
        let execution_log = config
            .logging
            .execution_log
            .then(|| logging::expand_path(&config.logging.path));
        Self {
            program: config.shell.program.clone(),
            flag: config.shell.flag.clone(),
            execution_log,
        }
    }
}

/// Runs one operation on the system shell.
///
/// ```no_run
/// use clom::Operation;
///
/// let result = clom::command("echo").shell().invoke_with(&clom::Call::new().arg("foo"))?;
/// assert_eq!(result, "foo");
/// # Ok::<(), clom::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Shell {
    operation: Box<dyn Operation>,
    settings: ShellSettings,
}

impl Shell {
    pub fn new(operation: Box<dyn Operation>, settings: ShellSettings) -> Self {
        Self {
            operation,
            settings,
        }
    }

    pub fn settings(&self) -> &ShellSettings {
        &self.settings
    }

    /// Run and capture output. See [`invoke_with`](Self::invoke_with).
    pub fn invoke(&self) -> Result<CommandResult> {
        self.invoke_with(&Call::new())
    }

    /// Apply `call`, run, wait, and capture both streams (trimmed).
    ///
    /// A nonzero exit status becomes [`Error::ExecutionFailure`]. Background
    /// operations detach, so they run through
    /// [`execute_only_with`](Self::execute_only_with) instead.
    pub fn invoke_with(&self, call: &Call) -> Result<CommandResult> {
        if self.operation.is_background() {
            return self.execute_only_with(call);
        }

        let cmd = self.operation.as_string_with(call)?;
        info!("Executing command: {cmd}");

        let output = self
            .process(&cmd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;
        let code = exit_code(output.status);
        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        self.record(Mode::Capture, &cmd, code);

        if code == 0 {
            Ok(CommandResult::new(code, stdout, stderr))
        } else {
            debug!("command exited with {code}: {cmd}");
            Err(Error::ExecutionFailure {
                command: cmd,
                code,
                stdout,
                stderr,
                captured: true,
            })
        }
    }

    /// Run without capturing. See [`execute_only_with`](Self::execute_only_with).
    pub fn execute_only(&self) -> Result<CommandResult> {
        self.execute_only_with(&Call::new())
    }

    /// Apply `call` and run with the caller's standard streams.
    ///
    /// Use this when output is large or irrelevant.
    pub fn execute_only_with(&self, call: &Call) -> Result<CommandResult> {
        let cmd = self.operation.as_string_with(call)?;
        info!("Executing command (capture off): {cmd}");

        let status = self
            .process(&cmd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;
        let code = exit_code(status);
        self.record(Mode::Inherit, &cmd, code);

        if code == 0 {
            Ok(CommandResult::empty(code))
        } else {
            debug!("command exited with {code}: {cmd}");
            Err(Error::ExecutionFailure {
                command: cmd,
                code,
                stdout: String::new(),
                stderr: String::new(),
                captured: false,
            })
        }
    }

    /// Run and return the first line of output.
    pub fn first(&self) -> Result<Line> {
        self.invoke()?.first(true)
    }

    pub fn first_with(&self, call: &Call) -> Result<Line> {
        self.invoke_with(call)?.first(true)
    }

    /// Run and return the last line of output.
    pub fn last(&self) -> Result<Line> {
        self.invoke()?.last(true)
    }

    pub fn last_with(&self, call: &Call) -> Result<Line> {
        self.invoke_with(call)?.last(true)
    }

    /// Run and return every line of output.
    pub fn all(&self) -> Result<Vec<String>> {
        Ok(self.invoke()?.all(true))
    }

    pub fn all_with(&self, call: &Call) -> Result<Vec<String>> {
        Ok(self.invoke_with(call)?.all(true))
    }

    /// Run and iterate over the trimmed output lines.
    pub fn iter(&self) -> Result<std::vec::IntoIter<String>> {
        Ok(self.all()?.into_iter())
    }

    fn process(&self, cmd: &str) -> process::Command {
        let mut command = process::Command::new(&self.settings.program);
        command.arg(&self.settings.flag).arg(cmd);
        command
    }

    fn record(&self, mode: Mode, cmd: &str, code: i32) {
        if let Some(path) = &self.settings.execution_log {
            logging::log_execution(path, mode, cmd, code);
        }
    }
}

/// Exit code, or the negated signal number for a killed process.
#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|s| -s))
        .unwrap_or(-1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}
