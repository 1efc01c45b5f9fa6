//! Argument values and the escaping policies that turn them into tokens.
//!
//! Every value placed on a command line is an [`Arg`]. Plain Rust values
//! convert into [`Arg::Literal`], which quotes anything the shell could
//! interpret. [`Arg::Raw`] and [`Arg::Default`] opt out of full escaping,
//! and [`Arg::Unset`] marks a slot that is skipped when rendering.

use std::fmt;

use crate::command::Command;
use crate::conjunction::Conjunction;
use crate::error::Result;
use crate::operation::Operation;

/// A file descriptor number.
pub type Fd = u32;

/// Standard input.
pub const STDIN: Fd = 0;
/// Standard output.
pub const STDOUT: Fd = 1;
/// Standard error.
pub const STDERR: Fd = 2;

/// Placeholder for an argument that was never given a value.
pub const UNSET: Arg = Arg::Unset;

/// A plain value carried by [`Arg::Literal`] and [`Arg::Default`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i128),
    Float(f64),
    Text(String),
}

impl Value {
    fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::Int(n as i128)
            }
        })*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);

impl From<f32> for Value {
    /// Keeps the shortest decimal form of the `f32`, not its widened bits.
    fn from(x: f32) -> Self {
        Value::Float(x.to_string().parse().unwrap_or(f64::from(x)))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// A single command-line argument and the way it is escaped.
#[derive(Debug, Clone)]
pub enum Arg {
    /// Emitted verbatim. The caller vouches for its safety.
    Raw(String),
    /// Fully escaped: never interpolated or glob-expanded by the shell.
    Literal(Value),
    /// Minimally escaped: double-quoted only when it contains a space.
    Default(Value),
    /// Another operation, embedded as `"$( ... )"`.
    Substitution(Box<dyn Operation>),
    /// Never rendered.
    Unset,
}

impl Arg {
    pub fn raw(value: impl fmt::Display) -> Self {
        Arg::Raw(value.to_string())
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Arg::Literal(value.into())
    }

    pub fn minimal(value: impl Into<Value>) -> Self {
        Arg::Default(value.into())
    }

    pub fn substitution(operation: impl Operation + 'static) -> Self {
        Arg::Substitution(Box::new(operation))
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Arg::Unset)
    }

    /// The boolean carried by a literal or minimal argument, if any.
    pub(crate) fn as_flag(&self) -> Option<bool> {
        match self {
            Arg::Literal(Value::Bool(b)) | Arg::Default(Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Render this argument as a single token.
    ///
    /// `Unset` renders as an empty string; callers skip it before getting here.
    pub fn escape(&self) -> Result<String> {
        Ok(match self {
            Arg::Raw(s) => s.clone(),
            Arg::Literal(v) => escape_literal(v),
            Arg::Default(v) => escape_minimal(v),
            Arg::Substitution(op) => format!("\"$({})\"", op.render()?),
            Arg::Unset => String::new(),
        })
    }
}

/// Characters that never need quoting.
fn is_safe(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '@' | '%' | '_' | '-' | '+' | '=' | ':' | ',' | '.' | '/')
}

/// Quote `value` so the shell reads it back byte for byte.
///
/// Numbers are left bare and an empty value becomes `''`. Anything with a
/// character outside the safe set is single-quoted, with embedded quotes
/// written as `'\''`.
pub fn escape_literal(value: &Value) -> String {
    if value.is_number() {
        return value.to_string();
    }
    if value.is_empty() {
        return "''".to_string();
    }
    let text = value.to_string();
    if text.chars().all(is_safe) {
        return text;
    }
    format!("'{}'", text.replace('\'', r"'\''"))
}

/// Wrap `value` in double quotes if it contains a space; no other escaping.
pub fn escape_minimal(value: &Value) -> String {
    let text = value.to_string();
    if text.contains(' ') {
        format!("\"{text}\"")
    } else {
        text
    }
}

macro_rules! arg_from_value {
    ($($t:ty),*) => {
        $(impl From<$t> for Arg {
            fn from(v: $t) -> Self {
                Arg::Literal(v.into())
            }
        })*
    };
}

arg_from_value!(
    i8, i16, i32, i64, u8, u16, u32, u64, isize, usize, f32, f64, bool, &str, &String, String,
    Value
);

impl<T: Into<Value>> From<Option<T>> for Arg {
    fn from(v: Option<T>) -> Self {
        Arg::Literal(v.into())
    }
}

impl From<Command> for Arg {
    fn from(command: Command) -> Self {
        Arg::substitution(command)
    }
}

impl From<Conjunction> for Arg {
    fn from(conjunction: Conjunction) -> Self {
        Arg::substitution(conjunction)
    }
}
