//! Behavior shared by every renderable entity: environment, redirects,
//! pipes, backgrounding, and serialization.
//!
//! Builder methods never touch the receiver. Each one clones the value,
//! including its redirect, environment and pipe collections, and changes
//! the clone.

mod redirect;

pub use redirect::{Direction, Redirect, Target};

use std::fmt;

use crate::arg::{Fd, Value, escape_literal};
use crate::command::{Call, Command};
use crate::conjunction::Conjunction;
use crate::error::{Error, Result};
use crate::shell::{Shell, ShellSettings};

/// The platform's discard device.
pub const NULL_SINK: &str = "/dev/null";

/// Prefix that keeps a backgrounded command alive after the shell exits.
const BACKGROUND_LAUNCHER: &str = "nohup";

/// State carried by every operation.
#[derive(Debug, Clone, Default)]
pub struct OperationState {
    redirects: Vec<(Fd, Redirect)>,
    pipe_to: Vec<Box<dyn Operation>>,
    env: Vec<(String, Value)>,
    background: bool,
}

impl OperationState {
    pub fn is_background(&self) -> bool {
        self.background
    }

    /// The redirect configured for `fd`, if any.
    pub fn redirect_for(&self, fd: Fd) -> Option<&Redirect> {
        self.redirects
            .iter()
            .find(|(f, _)| *f == fd)
            .map(|(_, r)| r)
    }

    /// Environment assignments in insertion order.
    pub fn env(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.env.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn pipes(&self) -> &[Box<dyn Operation>] {
        &self.pipe_to
    }

    /// Later redirects of the same descriptor replace earlier ones in place.
    fn set_redirect(&mut self, fd: Fd, redirect: Redirect) {
        match self.redirects.iter_mut().find(|(f, _)| *f == fd) {
            Some(slot) => slot.1 = redirect,
            None => self.redirects.push((fd, redirect)),
        }
    }

    fn set_env(&mut self, name: String, value: Value) {
        match self.env.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.env.push((name, value)),
        }
    }

    pub(crate) fn set_stdin(&mut self, filename: String) {
        self.set_redirect(
            crate::arg::STDIN,
            Redirect::new(Direction::Read, Target::File(filename)),
        );
    }
}

/// Text or an operation, for string concatenation.
#[derive(Debug, Clone)]
pub enum Fragment {
    Text(String),
    Operation(Box<dyn Operation>),
}

impl From<&str> for Fragment {
    fn from(s: &str) -> Self {
        Fragment::Text(s.to_string())
    }
}

impl From<String> for Fragment {
    fn from(s: String) -> Self {
        Fragment::Text(s)
    }
}

impl From<Command> for Fragment {
    fn from(c: Command) -> Self {
        Fragment::Operation(Box::new(c))
    }
}

impl From<Conjunction> for Fragment {
    fn from(c: Conjunction) -> Self {
        Fragment::Operation(Box::new(c))
    }
}

impl Fragment {
    fn into_text(self) -> Result<String> {
        match self {
            Fragment::Text(s) => Ok(s),
            Fragment::Operation(op) => Err(Error::InvalidCombination(format!(
                "can not concatenate two operations (`{}`)",
                op.render()?
            ))),
        }
    }
}

/// A composable unit of a command line.
///
/// Implementors supply their state and the core tokens; everything else
/// (builders, rendering, equality, execution) comes from the provided methods.
pub trait Operation: fmt::Debug + Send + Sync {
    fn state(&self) -> &OperationState;

    fn state_mut(&mut self) -> &mut OperationState;

    /// Append the tokens specific to this kind of operation.
    fn build_command(&self, s: &mut Vec<String>) -> Result<()>;

    fn clone_box(&self) -> Box<dyn Operation>;

    /// Apply trailing arguments and options as a final call.
    ///
    /// Only commands accept arguments; other operations accept an empty call.
    fn apply_call(&self, call: &Call) -> Result<Box<dyn Operation>> {
        if call.is_empty() {
            Ok(self.clone_box())
        } else {
            Err(Error::InvalidCombination(
                "trailing arguments can only be applied to a command".into(),
            ))
        }
    }

    /// Build the full command line.
    fn render(&self) -> Result<String> {
        let state = self.state();
        let mut s = Vec::new();

        if state.background {
            s.push(BACKGROUND_LAUNCHER.to_string());
        }

        if !state.env.is_empty() {
            s.push("env".to_string());
            for (name, value) in &state.env {
                s.push(format!("{name}={}", escape_literal(value)));
            }
        }

        self.build_command(&mut s)?;

        for (fd, redirect) in &state.redirects {
            redirect.build(*fd, &mut s);
        }

        for op in &state.pipe_to {
            s.push("|".to_string());
            s.push(op.render()?);
        }

        if state.background {
            s.push(format!("> {NULL_SINK} 2>&1 &"));
        }

        Ok(s.join(" "))
    }

    fn as_string(&self) -> Result<String> {
        self.render()
    }

    fn as_string_with(&self, call: &Call) -> Result<String> {
        self.apply_call(call)?.render()
    }

    fn is_background(&self) -> bool {
        self.state().background
    }

    /// Whether this operation renders exactly as `other`.
    fn equals_rendered(&self, other: &str) -> bool {
        self.render().is_ok_and(|s| s == other)
    }

    /// This operation's rendering followed by `right`.
    fn concat(&self, right: impl Into<Fragment>) -> Result<String>
    where
        Self: Sized,
    {
        let tail = right.into().into_text()?;
        Ok(self.render()? + &tail)
    }

    /// `left` followed by this operation's rendering.
    fn prepend(&self, left: impl Into<Fragment>) -> Result<String>
    where
        Self: Sized,
    {
        let head = left.into().into_text()?;
        Ok(head + &self.render()?)
    }

    /// A shell runner for this operation using the default settings
    /// (`/bin/sh -c`, no execution log).
    ///
    /// Configuration loaded into a [`Clom`](crate::Clom) is not consulted
    /// here; use [`Clom::shell`](crate::Clom::shell) to run with it.
    fn shell(&self) -> Shell {
        Shell::new(self.clone_box(), ShellSettings::default())
    }

    /// Run in the background, detached and with all output discarded.
    fn background(&self) -> Self
    where
        Self: Sized + Clone,
    {
        let mut op = self.clone();
        op.state_mut().background = true;
        op
    }

    /// Pipe this operation's output into `to`.
    fn pipe_to(&self, to: impl Operation + 'static) -> Self
    where
        Self: Sized + Clone,
    {
        let mut op = self.clone();
        op.state_mut().pipe_to.push(Box::new(to));
        op
    }

    /// Append `fd`'s output to `filename` (`>>`).
    fn append_to_file(&self, filename: impl Into<String>, fd: Fd) -> Self
    where
        Self: Sized + Clone,
    {
        let mut op = self.clone();
        op.state_mut().set_redirect(
            fd,
            Redirect::new(Direction::Append, Target::File(filename.into())),
        );
        op
    }

    /// Replace `filename`'s contents with `fd`'s output (`>`).
    fn output_to_file(&self, filename: impl Into<String>, fd: Fd) -> Self
    where
        Self: Sized + Clone,
    {
        let mut op = self.clone();
        op.state_mut().set_redirect(
            fd,
            Redirect::new(Direction::Write, Target::File(filename.into())),
        );
        op
    }

    /// Merge `from_fd` into `to_fd` (`>&`).
    fn redirect(&self, from_fd: Fd, to_fd: Fd) -> Self
    where
        Self: Sized + Clone,
    {
        let mut op = self.clone();
        op.state_mut()
            .set_redirect(from_fd, Redirect::new(Direction::DupOut, Target::Fd(to_fd)));
        op
    }

    /// Send `fd` to the null sink.
    fn hide_output(&self, fd: Fd) -> Self
    where
        Self: Sized + Clone,
    {
        self.output_to_file(NULL_SINK, fd)
    }

    /// Run with extra environment variables; the last value per name wins.
    fn with_env<I, K, V>(&self, vars: I) -> Self
    where
        Self: Sized + Clone,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut op = self.clone();
        for (name, value) in vars {
            op.state_mut().set_env(name.into(), value.into());
        }
        op
    }
}

impl Clone for Box<dyn Operation> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Display, render-equality and `|` piping for a concrete operation type.
macro_rules! operation_sugar {
    ($t:ty) => {
        impl ::std::fmt::Display for $t {
            /// Fails with `fmt::Error` when the operation can not be rendered.
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                let rendered = $crate::operation::Operation::render(self)
                    .map_err(|_| ::std::fmt::Error)?;
                f.write_str(&rendered)
            }
        }

        impl PartialEq for $t {
            fn eq(&self, other: &Self) -> bool {
                match (
                    $crate::operation::Operation::render(self),
                    $crate::operation::Operation::render(other),
                ) {
                    (Ok(a), Ok(b)) => a == b,
                    _ => false,
                }
            }
        }

        impl PartialEq<str> for $t {
            fn eq(&self, other: &str) -> bool {
                $crate::operation::Operation::equals_rendered(self, other)
            }
        }

        impl PartialEq<&str> for $t {
            fn eq(&self, other: &&str) -> bool {
                $crate::operation::Operation::equals_rendered(self, other)
            }
        }

        impl PartialEq<$t> for &str {
            fn eq(&self, other: &$t) -> bool {
                $crate::operation::Operation::equals_rendered(other, self)
            }
        }

        impl<O: $crate::operation::Operation + 'static> ::std::ops::BitOr<O> for $t {
            type Output = $t;

            fn bitor(self, rhs: O) -> $t {
                $crate::operation::Operation::pipe_to(&self, rhs)
            }
        }
    };
}

pub(crate) use operation_sugar;
