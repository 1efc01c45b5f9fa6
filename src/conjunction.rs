//! AND / OR groups of operations.

use crate::error::Result;
use crate::operation::{Operation, OperationState, operation_sugar};

/// Shell operator joining the members of a [`Conjunction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joiner {
    /// `&&` — run next only if previous succeeded
    And,
    /// `||` — run next only if previous failed
    Or,
}

impl Joiner {
    /// The operator's shell syntax.
    pub fn as_str(self) -> &'static str {
        match self {
            Joiner::And => "&&",
            Joiner::Or => "||",
        }
    }
}

/// Operations combined with `&&` or `||`, rendered as `( a && b )`.
///
/// Members keep their own environment, redirects and pipes, and may be
/// conjunctions themselves.
#[derive(Debug, Clone)]
pub struct Conjunction {
    joiner: Joiner,
    operations: Vec<Box<dyn Operation>>,
    state: OperationState,
}

impl Conjunction {
    pub fn new<I>(joiner: Joiner, operations: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Operation>>,
    {
        Self {
            joiner,
            operations: operations.into_iter().collect(),
            state: OperationState::default(),
        }
    }

    /// Members that must all succeed.
    pub fn and<I>(operations: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Operation>>,
    {
        Self::new(Joiner::And, operations)
    }

    /// Members tried until one succeeds.
    pub fn or<I>(operations: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Operation>>,
    {
        Self::new(Joiner::Or, operations)
    }

    pub fn joiner(&self) -> Joiner {
        self.joiner
    }

    pub fn operations(&self) -> &[Box<dyn Operation>] {
        &self.operations
    }
}

impl Operation for Conjunction {
    fn state(&self) -> &OperationState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut OperationState {
        &mut self.state
    }

    fn build_command(&self, s: &mut Vec<String>) -> Result<()> {
        let sep = format!(" {} ", self.joiner.as_str());
        let members = self
            .operations
            .iter()
            .map(|op| op.render())
            .collect::<Result<Vec<_>>>()?;
        s.push("(".to_string());
        s.push(members.join(&sep));
        s.push(")".to_string());
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn Operation> {
        Box::new(self.clone())
    }
}

operation_sugar!(Conjunction);

/// Build a [`Conjunction`] joined by `&&`.
///
/// ```
/// use clom::{and, command};
///
/// let both = and!(command("make"), command("make").call(["install"]));
/// assert_eq!(both, "( make && make install )");
/// ```
#[macro_export]
macro_rules! and {
    ($($op:expr),+ $(,)?) => {
        $crate::Conjunction::and(::std::vec![
            $(::std::boxed::Box::new($op) as ::std::boxed::Box<dyn $crate::Operation>),+
        ])
    };
}

/// Build a [`Conjunction`] joined by `||`.
///
/// ```
/// use clom::{command, or};
///
/// let either = or!(command("test").call(["-f", "a"]), command("touch").call(["a"]));
/// assert_eq!(either, "( test -f a || touch a )");
/// ```
#[macro_export]
macro_rules! or {
    ($($op:expr),+ $(,)?) => {
        $crate::Conjunction::or(::std::vec![
            $(::std::boxed::Box::new($op) as ::std::boxed::Box<dyn $crate::Operation>),+
        ])
    };
}
