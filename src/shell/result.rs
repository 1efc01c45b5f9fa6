//! Captured output of one shell invocation.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};

/// Exit status and output of a finished command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandResult {
    return_code: i32,
    stdout: String,
    stderr: String,
}

impl CommandResult {
    pub fn new(return_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            return_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// A result with no captured output.
    pub fn empty(return_code: i32) -> Self {
        Self::new(return_code, "", "")
    }

    pub fn return_code(&self) -> i32 {
        self.return_code
    }

    /// Alias for [`return_code`](Self::return_code).
    pub fn code(&self) -> i32 {
        self.return_code
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Lines of standard output, optionally trimmed.
    ///
    /// Empty output has no lines. Every call starts from the first line.
    pub fn lines(&self, trim: bool) -> Lines<'_> {
        let inner = if self.stdout.is_empty() {
            None
        } else {
            Some(self.stdout.split('\n'))
        };
        Lines { inner, trim }
    }

    /// Trimmed lines of standard output.
    pub fn iter(&self) -> Lines<'_> {
        self.lines(true)
    }

    /// The first line of output.
    pub fn first(&self, trim: bool) -> Result<Line> {
        self.lines(trim)
            .next()
            .map(|text| Line::new(text, self.return_code))
            .ok_or(Error::EmptyResult)
    }

    /// The last line of output.
    pub fn last(&self, trim: bool) -> Result<Line> {
        self.lines(trim)
            .last()
            .map(|text| Line::new(text, self.return_code))
            .ok_or(Error::EmptyResult)
    }

    /// Every line of output, in order.
    pub fn all(&self, trim: bool) -> Vec<String> {
        self.lines(trim).map(str::to_string).collect()
    }
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stdout)
    }
}

impl PartialEq<&str> for CommandResult {
    fn eq(&self, other: &&str) -> bool {
        self.stdout == *other
    }
}

impl PartialEq<str> for CommandResult {
    fn eq(&self, other: &str) -> bool {
        self.stdout == other
    }
}

impl<'a> IntoIterator for &'a CommandResult {
    type Item = &'a str;
    type IntoIter = Lines<'a>;

    fn into_iter(self) -> Lines<'a> {
        self.iter()
    }
}

/// Iterator over the lines of a [`CommandResult`].
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    inner: Option<std::str::Split<'a, char>>,
    trim: bool,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let line = self.inner.as_mut()?.next()?;
        Some(if self.trim { line.trim() } else { line })
    }
}

/// One line of output, tagged with the exit code of the command that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    text: String,
    return_code: i32,
}

impl Line {
    pub fn new(text: impl Into<String>, return_code: i32) -> Self {
        Self {
            text: text.into(),
            return_code,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn return_code(&self) -> i32 {
        self.return_code
    }

    /// Alias for [`return_code`](Self::return_code).
    pub fn code(&self) -> i32 {
        self.return_code
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl PartialEq<&str> for Line {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl AsRef<str> for Line {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(stdout: &str) -> CommandResult {
        CommandResult::new(0, stdout, "")
    }

    #[test]
    fn iterates_trimmed_lines() {
        let r = result("a\n  b \nc");
        let lines: Vec<&str> = r.iter().collect();
        assert_eq!(lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn iteration_restarts() {
        let r = result("a\nb");
        assert_eq!(r.iter().count(), 2);
        assert_eq!((&r).into_iter().count(), 2);
    }

    #[test]
    fn untrimmed_lines() {
        let r = result("a\n  b ");
        assert_eq!(r.all(false), vec!["a", "  b "]);
        assert_eq!(r.all(true), vec!["a", "b"]);
    }

    #[test]
    fn first_and_last_carry_code() {
        let r = CommandResult::new(3, "one\ntwo\nthree", "");
        let first = r.first(true).unwrap();
        let last = r.last(true).unwrap();
        assert_eq!(first, "one");
        assert_eq!(last, "three");
        assert_eq!(first.return_code(), 3);
        assert_eq!(last.code(), 3);
    }

    #[test]
    fn empty_output_has_no_lines() {
        let r = CommandResult::empty(0);
        assert_eq!(r.iter().count(), 0);
        assert!(matches!(r.first(true), Err(Error::EmptyResult)));
        assert!(matches!(r.last(false), Err(Error::EmptyResult)));
        assert!(r.all(true).is_empty());
    }

    #[test]
    fn compares_against_stdout() {
        let r = result("foo");
        assert_eq!(r, "foo");
        assert_eq!(r.to_string(), "foo");
        assert_eq!(r, result("foo"));
    }
}
