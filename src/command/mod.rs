//! Named executables with options, arguments and a parent chain.

mod call;

pub use call::Call;

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::arg::Arg;
use crate::dialect::{Dialect, Plain};
use crate::error::{Error, Result};
use crate::operation::{Operation, OperationState, operation_sugar};

/// A command line command.
///
/// `git.subcommand("status")` yields a new command whose parent is a copy
/// of `git`, so chains like `vagrant --list ssh_config --help` are built
/// one word at a time.
#[derive(Debug, Clone)]
pub struct Command {
    name: String,
    parent: Option<Box<Command>>,
    dialect: Arc<dyn Dialect>,
    list_opts: Vec<Arg>,
    /// Sorted by name so rendering is independent of insertion order.
    kw_opts: BTreeMap<String, Arg>,
    args: Vec<Arg>,
    state: OperationState,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_dialect(name, Arc::new(Plain))
    }

    pub fn with_dialect(name: impl Into<String>, dialect: Arc<dyn Dialect>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            dialect,
            list_opts: Vec::new(),
            kw_opts: BTreeMap::new(),
            args: Vec::new(),
            state: OperationState::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Command> {
        self.parent.as_deref()
    }

    /// Positional arguments, including unset ones.
    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// Append options that are escaped and rendered as-is, in order.
    pub fn with_opts<I, A>(&self, opts: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Arg>,
    {
        let mut cmd = self.clone();
        cmd.list_opts.extend(opts.into_iter().map(Into::into));
        cmd
    }

    /// Set a keyword option, rendered as `-n value` or `--name value`.
    ///
    /// `true` renders the flag alone. `false` fails at render time.
    pub fn with_opt(&self, name: impl Into<String>, value: impl Into<Arg>) -> Self {
        let mut cmd = self.clone();
        cmd.kw_opts.insert(name.into(), value.into());
        cmd
    }

    /// Merge several keyword options.
    pub fn with_kw_opts<I, K, V>(&self, opts: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Arg>,
    {
        let mut cmd = self.clone();
        cmd.kw_opts
            .extend(opts.into_iter().map(|(k, v)| (k.into(), v.into())));
        cmd
    }

    /// Append positional arguments. Plain values are escaped as literals.
    pub fn with_args<I, A>(&self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Arg>,
    {
        let mut cmd = self.clone();
        cmd.args.extend(args.into_iter().map(Into::into));
        cmd
    }

    /// A sub-command named `name`, owning a copy of this command as parent.
    pub fn subcommand(&self, name: impl Into<String>) -> Command {
        let mut sub = Command::with_dialect(name, self.dialect.subcommand_dialect());
        sub.parent = Some(Box::new(self.clone()));
        sub
    }

    /// Shorthand for [`with_args`](Self::with_args).
    pub fn call<I, A>(&self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Arg>,
    {
        self.with_args(args)
    }

    /// Merge a call's keyword options and arguments.
    pub fn call_with(&self, call: &Call) -> Self {
        let mut cmd = self.clone();
        cmd.kw_opts.extend(call.opts.iter().cloned());
        cmd.args.extend(call.args.iter().cloned());
        cmd
    }

    /// Read standard input from `filename`.
    pub fn from_file(&self, filename: impl Into<String>) -> Self {
        let mut cmd = self.clone();
        cmd.state.set_stdin(filename.into());
        cmd
    }

    fn build_options(&self, s: &mut Vec<String>) -> Result<()> {
        for opt in self.list_opts.iter().filter(|o| !o.is_unset()) {
            s.push(opt.escape()?);
        }

        for (name, value) in &self.kw_opts {
            if value.is_unset() {
                continue;
            }
            let flag = if name.starts_with('-') {
                name.clone()
            } else if name.chars().count() == 1 {
                format!("-{name}")
            } else {
                format!("--{name}")
            };
            match value.as_flag() {
                Some(true) => s.push(flag),
                Some(false) => return Err(Error::InvalidOption { name: flag }),
                None => {
                    s.push(flag);
                    s.push(value.escape()?);
                }
            }
        }
        Ok(())
    }
}

impl Operation for Command {
    fn state(&self) -> &OperationState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut OperationState {
        &mut self.state
    }

    fn build_command(&self, s: &mut Vec<String>) -> Result<()> {
        if let Some(parent) = &self.parent {
            s.push(parent.render()?);
        }
        self.dialect.build_action(self, s)?;
        self.build_options(s)?;
        self.dialect.build_args(self, s)
    }

    fn clone_box(&self) -> Box<dyn Operation> {
        Box::new(self.clone())
    }

    fn apply_call(&self, call: &Call) -> Result<Box<dyn Operation>> {
        Ok(Box::new(self.call_with(call)))
    }
}

operation_sugar!(Command);
