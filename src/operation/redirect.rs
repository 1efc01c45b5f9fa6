//! File descriptor redirections.

use crate::arg::{Fd, STDIN, STDOUT, escape_literal};

/// Redirection operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `>` — truncate and write
    Write,
    /// `>>` — append
    Append,
    /// `<` — read
    Read,
    /// `>&` — duplicate an output descriptor
    DupOut,
}

impl Direction {
    /// The operator's shell syntax.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Write => ">",
            Direction::Append => ">>",
            Direction::Read => "<",
            Direction::DupOut => ">&",
        }
    }

    /// Descriptor the shell assumes when none is written.
    fn implied_fd(self) -> Option<Fd> {
        match self {
            Direction::Write | Direction::Append => Some(STDOUT),
            Direction::Read => Some(STDIN),
            Direction::DupOut => None,
        }
    }
}

/// Where a redirected stream goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    File(String),
    Fd(Fd),
}

/// A redirection of one descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub direction: Direction,
    pub target: Target,
}

impl Redirect {
    pub fn new(direction: Direction, target: Target) -> Self {
        Self { direction, target }
    }

    /// Append the tokens redirecting `fd` to `s`.
    ///
    /// A descriptor target is fused into the operator token (`2>&1`); a
    /// file target follows as its own escaped token (`2> err.log`).
    pub(crate) fn build(&self, fd: Fd, s: &mut Vec<String>) {
        let op = self.direction.as_str();
        let prefix = if self.direction.implied_fd() == Some(fd) {
            String::new()
        } else {
            fd.to_string()
        };
        match &self.target {
            Target::Fd(to) => s.push(format!("{prefix}{op}{to}")),
            Target::File(name) => {
                s.push(format!("{prefix}{op}"));
                s.push(escape_literal(&name.as_str().into()));
            }
        }
    }
}
