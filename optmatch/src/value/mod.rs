//! Value consumption: reading validated values at a cursor.
//!
//! A [`Scanner`] pairs a token stream with a cursor. [`Scanner::value`]
//! reads one value through a [`ValueSpec`]; [`Scanner::value_times`]
//! repeats any single-value reader between a minimum and a maximum number
//! of times. A failed attempt only rolls back its own token, never the run
//! of values already accepted.

mod check;

pub use check::{Check, Rejection, ValueSpec};

use thiserror::Error;

use crate::cursor::{Cursor, TokenStream};

/// Failure to read a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ValueError {
    /// No token remained and no default was supplied.
    #[error("run out of input")]
    OutOfInput,
    /// A check in the chain refused the value.
    #[error("value {value:?} rejected by {check}{}", reason_suffix(.reason.as_deref()))]
    Rejected {
        /// Display name of the rejecting check.
        check: String,
        /// Value as seen by the rejecting check.
        value: String,
        /// Explanation supplied by a custom check.
        reason: Option<String>,
    },
    /// Fewer values than required were accepted.
    #[error("expected at least {min} value(s) but accepted {found}: {reason}")]
    TooFew {
        /// Required minimum.
        min: usize,
        /// Values accepted before the run ended.
        found: usize,
        /// Why the run ended.
        reason: String,
    },
}

fn reason_suffix(reason: Option<&str>) -> String {
    reason.map(|text| format!(": {text}")).unwrap_or_default()
}

impl From<Rejection> for ValueError {
    fn from(rejection: Rejection) -> Self {
        Self::Rejected {
            check: rejection.check,
            value: rejection.value,
            reason: rejection.reason,
        }
    }
}

/// Cursor over a [`TokenStream`] used by matchers and takers.
///
/// Cloning a scanner yields an independent cursor over the same stream.
///
/// # Examples
///
/// ```
/// use optmatch::{Check, Scanner, TokenStream, ValueSpec};
///
/// let tokens = TokenStream::new(["12", "34", "ab", "56"]);
/// let mut scanner = Scanner::new(&tokens);
/// let digits = ValueSpec::new().check(Check::regex("^[0-9]+$").expect("valid pattern"));
///
/// let values = scanner.value_many(&digits);
/// assert_eq!(values, ["12", "34"]);
/// assert_eq!(scanner.cursor().index(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Scanner<'a> {
    stream: &'a TokenStream,
    cursor: Cursor,
}

impl<'a> Scanner<'a> {
    /// Scanner positioned at the start of `stream`.
    #[must_use]
    pub const fn new(stream: &'a TokenStream) -> Self {
        Self::at(stream, Cursor::START)
    }

    /// Scanner positioned at `cursor`.
    #[must_use]
    pub const fn at(stream: &'a TokenStream, cursor: Cursor) -> Self {
        Self { stream, cursor }
    }

    /// Current cursor.
    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Moves the cursor to `cursor`.
    pub const fn seek(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    /// The stream being scanned.
    #[must_use]
    pub const fn stream(&self) -> &'a TokenStream {
        self.stream
    }

    /// Whether every token has been consumed.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.stream.is_exhausted(self.cursor)
    }

    /// Unconsumed text of the current token.
    #[must_use]
    pub fn peek(&self) -> Option<&'a str> {
        self.stream.remainder(self.cursor)
    }

    /// Reads one value according to `spec`.
    ///
    /// The candidate is the rest of the current token. When no token remains
    /// the default from `spec` is used without moving the cursor. The candidate
    /// is folded through the check chain; on success the cursor moves to the
    /// next token (or stays put for a default), on failure it is left where
    /// it was.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::OutOfInput`] when no value is available and
    /// [`ValueError::Rejected`] when a check refuses the value.
    pub fn value(&mut self, spec: &ValueSpec) -> Result<String, ValueError> {
        let start = self.cursor;
        let available = self
            .peek()
            .filter(|_| !(spec.is_attached() && start.is_token_start()));
        let (candidate, prospective) = match (available, spec.default_value()) {
            (Some(rest), _) => (rest.to_owned(), start.next_token()),
            (None, Some(default)) => (default.to_owned(), start),
            (None, None) => return Err(ValueError::OutOfInput),
        };
        let value = spec.validate(candidate, start)?;
        self.cursor = prospective;
        Ok(value)
    }

    /// Repeats `value_fn` until it fails or `max` values are collected.
    ///
    /// The cursor is left after the last successful read. When fewer than
    /// `min` values were accepted the cursor returns to where it was before
    /// the first attempt. A read that succeeds without moving the cursor
    /// ends the run.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::TooFew`] when fewer than `min` values were read.
    pub fn value_times<F>(
        &mut self,
        min: usize,
        max: Option<usize>,
        mut value_fn: F,
    ) -> Result<Vec<String>, ValueError>
    where
        F: FnMut(&mut Self) -> Result<String, ValueError>,
    {
        let start = self.cursor;
        let mut values = Vec::new();
        let mut stop_reason = None;
        while max.is_none_or(|limit| values.len() < limit) {
            let before = self.cursor;
            match value_fn(self) {
                Ok(value) => {
                    values.push(value);
                    if self.cursor == before {
                        break;
                    }
                }
                Err(err) => {
                    self.cursor = before;
                    stop_reason = Some(err);
                    break;
                }
            }
        }
        if values.len() < min {
            self.cursor = start;
            return Err(ValueError::TooFew {
                min,
                found: values.len(),
                reason: stop_reason.map_or_else(
                    || "input stopped advancing".to_owned(),
                    |err| err.to_string(),
                ),
            });
        }
        Ok(values)
    }

    /// Reads as many values as `spec` accepts, possibly none.
    pub fn value_many(&mut self, spec: &ValueSpec) -> Vec<String> {
        self.value_times(0, None, |scanner| scanner.value(spec))
            .unwrap_or_default()
    }
}
