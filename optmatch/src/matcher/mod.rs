//! Matchers decide whether an option applies at the current cursor.
//!
//! Every matcher reports a [`Priority`] and leaves the probing scanner at
//! the cursor its option's taker should start from.

mod alias;

pub use alias::AliasSet;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::DefinitionError;
use crate::value::Scanner;

/// Rank of a match. Higher tiers win resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u32)]
pub enum Priority {
    /// No match.
    None = 0,
    /// A bundled single-character flag such as `-c0`.
    Single = 100,
    /// A positional argument.
    Position = 1_000,
    /// An unambiguous truncation of an alias.
    Prefix = 10_000,
    /// An exact alias.
    Exact = 100_000,
}

impl Priority {
    /// Numeric rank of the tier.
    #[must_use]
    pub const fn rank(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Single => "single",
            Self::Position => "position",
            Self::Prefix => "prefix",
            Self::Exact => "exact",
        };
        f.write_str(name)
    }
}

type MatchFn = dyn Fn(&mut Scanner<'_>) -> Priority + Send + Sync;

/// How an option recognises its tokens.
#[derive(Clone)]
#[non_exhaustive]
pub enum Matcher {
    /// Matches any of a set of alias tokens.
    Aliases(AliasSet),
    /// Matches a non-option token at a fixed priority without consuming it.
    Positional(Priority),
    /// Caller-supplied matcher.
    Custom {
        /// Label shown in help output and diagnostics.
        name: String,
        /// The matcher itself.
        evaluate: Arc<MatchFn>,
    },
}

impl Matcher {
    /// Alias matcher built from a declaration such as `"-t --train-file"`.
    ///
    /// # Errors
    ///
    /// Propagates [`AliasSet::parse`] failures.
    pub fn aliases(declaration: &str) -> Result<Self, DefinitionError> {
        AliasSet::parse(declaration).map(Self::Aliases)
    }

    /// Positional matcher reporting `priority`.
    #[must_use]
    pub const fn positional(priority: Priority) -> Self {
        Self::Positional(priority)
    }

    /// Wraps a closure as a named custom matcher.
    #[must_use]
    pub fn custom<N, F>(name: N, evaluate: F) -> Self
    where
        N: Into<String>,
        F: Fn(&mut Scanner<'_>) -> Priority + Send + Sync + 'static,
    {
        Self::Custom {
            name: name.into(),
            evaluate: Arc::new(evaluate),
        }
    }

    /// Tests the stream at the scanner's cursor.
    ///
    /// On a match the scanner is left where the taker should begin.
    pub fn evaluate(&self, scanner: &mut Scanner<'_>) -> Priority {
        match self {
            Self::Aliases(aliases) => aliases.evaluate(scanner),
            Self::Positional(priority) => {
                let positional = !scanner.is_exhausted()
                    && !scanner.stream().is_option_at(scanner.cursor());
                if positional { *priority } else { Priority::None }
            }
            Self::Custom { evaluate, .. } => evaluate(scanner),
        }
    }

    /// Labels describing the matcher, as stored in the option's record.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        match self {
            Self::Aliases(aliases) => aliases.as_slice().to_vec(),
            Self::Positional(_) => Vec::new(),
            Self::Custom { name, .. } => vec![name.clone()],
        }
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aliases(aliases) => f
                .debug_tuple("Aliases")
                .field(&aliases.as_slice())
                .finish(),
            Self::Positional(priority) => f.debug_tuple("Positional").field(priority).finish(),
            Self::Custom { name, .. } => f
                .debug_struct("Custom")
                .field("name", name)
                .finish_non_exhaustive(),
        }
    }
}

/// Conversion into a [`Matcher`], accepting alias declarations as sugar.
pub trait IntoMatcher {
    /// Performs the conversion.
    ///
    /// # Errors
    ///
    /// Returns a [`DefinitionError`] when an alias declaration is
    /// malformed.
    fn into_matcher(self) -> Result<Matcher, DefinitionError>;
}

impl IntoMatcher for Matcher {
    fn into_matcher(self) -> Result<Matcher, DefinitionError> {
        Ok(self)
    }
}

impl IntoMatcher for &str {
    fn into_matcher(self) -> Result<Matcher, DefinitionError> {
        Matcher::aliases(self)
    }
}

impl IntoMatcher for String {
    fn into_matcher(self) -> Result<Matcher, DefinitionError> {
        Matcher::aliases(&self)
    }
}

#[cfg(test)]
mod tests;
