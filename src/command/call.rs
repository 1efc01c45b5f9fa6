use crate::arg::Arg;

/// Trailing arguments and keyword options applied as a final call.
///
/// ```
/// use clom::{Call, Operation};
///
/// let grep = clom::command("grep");
/// let call = Call::new().opt("m", 2).arg("*.pyc");
/// assert_eq!(grep.as_string_with(&call).unwrap(), "grep -m 2 '*.pyc'");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Call {
    pub(crate) args: Vec<Arg>,
    pub(crate) opts: Vec<(String, Arg)>,
}

impl Call {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg(mut self, value: impl Into<Arg>) -> Self {
        self.args.push(value.into());
        self
    }

    pub fn args<I, A>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Arg>,
    {
        self.args.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn opt(mut self, name: impl Into<String>, value: impl Into<Arg>) -> Self {
        self.opts.push((name.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty() && self.opts.is_empty()
    }
}
