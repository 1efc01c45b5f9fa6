//! clom: build POSIX shell command lines as immutable values, then run them.
//!
//! Commands are composed with builder methods that each return a new value,
//! so a partially configured command can be reused as a template. Rendering
//! walks the value tree into one deterministic string with every argument
//! escaped; [`Shell`] hands that string to `/bin/sh -c` and returns a
//! [`CommandResult`].
//!
//! ```
//! use clom::{Operation, STDERR, command, or};
//!
//! let grep = command("grep")
//!     .with_opts(["--file", "myfile.txt"])
//!     .with_opt("m", 2)
//!     .with_args(["*.pyc", "test.txt"]);
//! assert_eq!(grep, "grep --file myfile.txt -m 2 '*.pyc' test.txt");
//!
//! let fallback = or!(grep, command("true")).hide_output(STDERR);
//! assert_eq!(
//!     fallback.render().unwrap(),
//!     "( grep --file myfile.txt -m 2 '*.pyc' test.txt || true ) 2> /dev/null"
//! );
//! ```
//!
//! # Architecture
//!
//! - **[`arg`]** — Argument values, the `Unset` sentinel, and escaping.
//! - **[`operation`]** — Environment, redirects, pipes, backgrounding, rendering.
//! - **[`command`]** — Named commands with options, arguments and sub-commands.
//! - **[`conjunction`]** — `&&` / `||` groups.
//! - **[`dialect`]** — Per-tool rendering of a command's name and arguments.
//! - **[`shell`]** — Process execution and line-oriented results.
//! - **[`registry`]** — The [`Clom`] command factory.
//! - **[`config`]** — Configuration loading: embedded defaults + user overlay merge.
//! - **[`logging`]** — Terminal logger setup and the execution record log.

/// Argument values and escaping policies.
pub mod arg;
/// Named commands and trailing calls.
pub mod command;
/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// AND / OR groups of operations.
pub mod conjunction;
/// Rendering dialects for tool-specific sub-command syntax.
pub mod dialect;
/// Crate error type.
pub mod error;
/// Logger setup and execution records.
pub mod logging;
/// The operation contract shared by commands and conjunctions.
pub mod operation;
/// Command factory.
pub mod registry;
/// Shell invocation and results.
pub mod shell;

pub use arg::{Arg, Fd, STDERR, STDIN, STDOUT, UNSET, Value};
pub use command::{Call, Command};
pub use conjunction::{Conjunction, Joiner};
pub use error::{Error, Result};
pub use operation::{Fragment, NULL_SINK, Operation};
pub use registry::Clom;
pub use shell::{CommandResult, Line, Shell, ShellSettings};

/// A new command from the default configuration's factory.
///
/// For user configuration, build a [`Clom`] from [`config::Config::load`].
pub fn command(name: &str) -> Command {
    static DEFAULT: std::sync::OnceLock<Clom> = std::sync::OnceLock::new();
    DEFAULT.get_or_init(Clom::default).command(name)
}
