//! Classification helpers for [`ParseError`].

use crate::cursor::Cursor;

use super::{ErrorKind, MatchFailure, ParseError};

impl ParseError {
    /// Classifies the error, looking through configuration-line and nested
    /// parse wrappers.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoMatch { .. } => ErrorKind::Match(MatchFailure::None),
            Self::Ambiguous { .. } => ErrorKind::Match(MatchFailure::Multiple),
            Self::Take { .. } => ErrorKind::Take,
            Self::DisplayHelp { .. } => ErrorKind::DisplayHelp,
            Self::Config { source, .. } | Self::Nested { source, .. } => source.kind(),
            Self::Io { .. } | Self::Tokenize { .. } | Self::CyclicInclude { .. } => {
                ErrorKind::Input
            }
        }
    }

    /// Cursor at which the innermost engine failure happened, if any.
    ///
    /// For configuration-line failures the cursor addresses the tokens of
    /// the offending line, and for nested failures the nested tokens.
    #[must_use]
    pub fn position(&self) -> Option<Cursor> {
        match self {
            Self::NoMatch { position, .. }
            | Self::Ambiguous { position, .. }
            | Self::Take { position, .. } => Some(*position),
            Self::Config { source, .. } | Self::Nested { source, .. } => source.position(),
            _ => None,
        }
    }

    /// Returns `true` when the error is a help request rather than a failure.
    ///
    /// Entry points use this to print the help text to standard output and
    /// exit instead of reporting a diagnostic.
    #[must_use]
    pub fn is_display_request(&self) -> bool {
        self.help_text().is_some()
    }

    /// Rendered help text carried by a help request.
    #[must_use]
    pub fn help_text(&self) -> Option<&str> {
        match self {
            Self::DisplayHelp { text } => Some(text),
            Self::Config { source, .. } | Self::Nested { source, .. } => source.help_text(),
            _ => None,
        }
    }
}
