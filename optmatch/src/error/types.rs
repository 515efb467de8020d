//! Error enums raised while registering and resolving options.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::cursor::{Cursor, TokenStream};
use crate::value::ValueError;

/// Failure of one parse invocation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// No registered option recognised the token at the cursor.
    #[error("no option matches {token:?} at position {position}")]
    NoMatch {
        /// Token under the cursor.
        token: String,
        /// Cursor where resolution happened.
        position: Cursor,
    },

    /// Two or more options tied for the highest priority.
    #[error("{token:?} at position {position} is ambiguous between {}", .candidates.join(", "))]
    Ambiguous {
        /// Token under the cursor.
        token: String,
        /// Labels of the tied options.
        candidates: Vec<String>,
        /// Cursor where resolution happened.
        position: Cursor,
    },

    /// The winning option's taker failed.
    #[error("{option} failed at position {position}: {detail}")]
    Take {
        /// Label of the option whose taker failed.
        option: String,
        /// Description of the failure.
        detail: String,
        /// Cursor at the point of failure.
        position: Cursor,
    },

    /// A help taker rendered the option summary.
    #[error("help requested")]
    DisplayHelp {
        /// Rendered help text.
        text: String,
    },

    /// A configuration line failed to parse.
    #[error("{path}:{line_number}: {line}: {source}")]
    Config {
        /// File containing the line.
        path: Utf8PathBuf,
        /// One-based line number.
        line_number: usize,
        /// The offending line, as written.
        line: String,
        /// Error raised while parsing the line.
        #[source]
        source: Box<ParseError>,
    },

    /// A nested parse run by a taker failed.
    ///
    /// The source's cursor addresses `tokens`, not the outer stream.
    #[error("nested parse failed: {source}")]
    Nested {
        /// Tokens the nested parse read.
        tokens: TokenStream,
        /// Error raised by the nested parse.
        #[source]
        source: Box<ParseError>,
    },

    /// A configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that could not be read.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A configuration line had unbalanced quoting.
    #[error("unbalanced quoting in {line:?}")]
    Tokenize {
        /// The line that could not be split.
        line: String,
    },

    /// A configuration file included itself, directly or indirectly.
    #[error("cyclic include detected: {cycle}")]
    CyclicInclude {
        /// Chain of files forming the cycle.
        cycle: String,
    },
}

/// Why resolution failed to pick an option.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchFailure {
    /// No option recognised the token.
    None,
    /// Several options tied at the top priority.
    Multiple,
}

/// Classification of a [`ParseError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Resolution failed before any taker ran.
    Match(MatchFailure),
    /// The selected option's taker failed.
    Take,
    /// The user asked for help.
    DisplayHelp,
    /// Configuration input could not be read or split.
    Input,
}

/// Failure reported by a taker.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TakeError {
    /// Reading a value failed.
    #[error(transparent)]
    Value(#[from] ValueError),

    /// The taker rejected its input for another reason.
    #[error("{0}")]
    Message(String),

    /// A parse run by the taker failed; the error propagates as is.
    #[error(transparent)]
    Nested(Box<ParseError>),
}

impl From<ParseError> for TakeError {
    fn from(err: ParseError) -> Self {
        Self::Nested(Box::new(err))
    }
}

/// Failure to register an option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DefinitionError {
    /// An alias declaration named no aliases.
    #[error("alias declaration {declaration:?} names no aliases")]
    EmptyAliasList {
        /// The declaration as given.
        declaration: String,
    },

    /// An alias contained `=`, which is reserved for inline values.
    #[error("alias {alias:?} must not contain '='")]
    InvalidAlias {
        /// The offending alias.
        alias: String,
    },

    /// A binding name was not an identifier.
    #[error("binding name {name:?} must be an identifier")]
    InvalidBinding {
        /// The offending name.
        name: String,
    },

    /// A flag's initial value failed the flag's own validator.
    #[error("default {value:?} for flag {flag} is not a valid {kind}")]
    InvalidDefault {
        /// Flag binding name.
        flag: String,
        /// Rejected initial value.
        value: String,
        /// Expected value kind.
        kind: String,
    },

    /// A flag reused a binding already written by an option that is not
    /// the same flag.
    #[error("binding {binding:?} is already written by another option")]
    BindingInUse {
        /// The contested binding name.
        binding: String,
    },
}
