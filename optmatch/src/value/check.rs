//! Value checks and the `ValueSpec` chains built from them.

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::cursor::{Cursor, is_option_shaped};

const INTEGER_PATTERN: &str = r"^[-+]?[0-9]+$";
const FLOAT_PATTERN: &str = r"^[-+]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][-+]?[0-9]+)?$";

#[expect(clippy::expect_used, reason = "the pattern is a checked constant")]
static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(INTEGER_PATTERN).expect("integer pattern compiles"));

#[expect(clippy::expect_used, reason = "the pattern is a checked constant")]
static FLOAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(FLOAT_PATTERN).expect("float pattern compiles"));

type CheckFn = dyn Fn(&str) -> Result<String, String> + Send + Sync;

/// One step of a value validation chain.
///
/// A check either passes a (possibly transformed) value on to the next
/// check or rejects it. Later checks see the transformed value.
#[derive(Clone)]
#[non_exhaustive]
pub enum Check {
    /// Accepts only option-shaped tokens read from a token start.
    IsOption,
    /// Rejects option-shaped tokens read from a token start.
    NonOption,
    /// Accepts values the expression matches anywhere.
    Regex(Regex),
    /// Normalises boolean spellings to `"1"` or `"0"`.
    Bool,
    /// Accepts only the given literal.
    Eq(String),
    /// Rejects the given literal.
    Ne(String),
    /// Caller-supplied check. The closure returns the value to pass on or a
    /// reason for rejecting it.
    Custom {
        /// Name used when reporting rejections.
        name: String,
        /// The check itself.
        check: Arc<CheckFn>,
    },
}

impl Check {
    /// Check accepting signed decimal integers.
    #[must_use]
    pub fn integer() -> Self {
        Self::Regex(INTEGER.clone())
    }

    /// Check accepting decimal floating-point numbers, including integers and
    /// exponent forms.
    #[must_use]
    pub fn float() -> Self {
        Self::Regex(FLOAT.clone())
    }

    /// Compiles `pattern` into a [`Check::Regex`].
    ///
    /// # Errors
    ///
    /// Returns the compilation error when `pattern` is not a valid regular
    /// expression.
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self::Regex)
    }

    /// Wraps a closure as a named [`Check::Custom`].
    #[must_use]
    pub fn custom<N, F>(name: N, check: F) -> Self
    where
        N: Into<String>,
        F: Fn(&str) -> Result<String, String> + Send + Sync + 'static,
    {
        Self::Custom {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    /// Applies the check to `value`, which was read starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] when the value fails the check.
    pub fn apply(&self, value: String, start: Cursor) -> Result<String, Rejection> {
        let option_shaped = start.is_token_start() && is_option_shaped(&value);
        let passed = match self {
            Self::IsOption => option_shaped,
            Self::NonOption => !option_shaped,
            Self::Regex(regex) => regex.is_match(&value),
            Self::Eq(expected) => value == *expected,
            Self::Ne(unwanted) => value != *unwanted,
            Self::Bool => {
                return normalise_bool(&value)
                    .map(str::to_owned)
                    .ok_or_else(|| self.reject(value, None));
            }
            Self::Custom { check, .. } => {
                return check(&value).map_err(|reason| self.reject(value, Some(reason)));
            }
        };
        if passed {
            Ok(value)
        } else {
            Err(self.reject(value, None))
        }
    }

    fn reject(&self, value: String, reason: Option<String>) -> Rejection {
        Rejection {
            check: self.to_string(),
            value,
            reason,
        }
    }
}

fn normalise_bool(value: &str) -> Option<&'static str> {
    match value {
        "t" | "true" | "True" | "TRUE" | "1" => Some("1"),
        "f" | "false" | "False" | "FALSE" | "0" => Some("0"),
        _ => None,
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IsOption => f.write_str("is-option"),
            Self::NonOption => f.write_str("non-option"),
            Self::Regex(regex) => write!(f, "regex({})", regex.as_str()),
            Self::Bool => f.write_str("bool"),
            Self::Eq(expected) => write!(f, "eq({expected})"),
            Self::Ne(unwanted) => write!(f, "ne({unwanted})"),
            Self::Custom { name, .. } => f.write_str(name),
        }
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Check({self})")
    }
}

/// A value turned down by a [`Check`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejection {
    /// Display name of the rejecting check.
    pub check: String,
    /// Value as the check saw it.
    pub value: String,
    /// Explanation supplied by a custom check.
    pub reason: Option<String>,
}

/// How to read a single value: the check chain plus its modifiers.
///
/// # Examples
///
/// ```
/// use optmatch::{Check, ValueSpec};
///
/// let port = ValueSpec::new().check(Check::NonOption).check(Check::integer());
/// assert_eq!(port.checks().len(), 2);
///
/// let switch = ValueSpec::boolean();
/// assert_eq!(switch.default_value(), Some("1"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ValueSpec {
    checks: Vec<Check>,
    default: Option<String>,
    attached: bool,
}

impl ValueSpec {
    /// Value spec that accepts any token unchanged.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            checks: Vec::new(),
            default: None,
            attached: false,
        }
    }

    /// Appends `check` to the chain.
    #[must_use]
    pub fn check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    /// Uses `default` instead of failing when no input remains. The cursor
    /// does not move in that case.
    #[must_use]
    pub fn optional(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Only reads a value attached to the current token, such as the text
    /// after `=`. At a token boundary the input counts as exhausted.
    #[must_use]
    pub const fn attached(mut self) -> Self {
        self.attached = true;
        self
    }

    /// Rejects option-shaped tokens.
    #[must_use]
    pub fn non_option() -> Self {
        Self::new().check(Check::NonOption)
    }

    /// Accepts signed decimal integers.
    #[must_use]
    pub fn integer() -> Self {
        Self::new().check(Check::integer())
    }

    /// Accepts decimal floating-point numbers.
    #[must_use]
    pub fn float() -> Self {
        Self::new().check(Check::float())
    }

    /// Reads an attached boolean, defaulting to true when none is given.
    #[must_use]
    pub fn boolean() -> Self {
        Self::new().check(Check::Bool).optional("1").attached()
    }

    /// The check chain in application order.
    #[must_use]
    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// Value used when the input is exhausted, if any.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Whether only attached values are read.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.attached
    }

    /// Runs `value` through every check in order.
    ///
    /// # Errors
    ///
    /// Returns the first [`Rejection`] raised by the chain.
    pub fn validate(&self, value: String, start: Cursor) -> Result<String, Rejection> {
        self.checks
            .iter()
            .try_fold(value, |current, check| check.apply(current, start))
    }
}
