//! Error types produced while registering and parsing options.

mod helpers;
mod types;

pub use types::{DefinitionError, ErrorKind, MatchFailure, ParseError, TakeError};

/// Result alias for parse invocations.
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests;
