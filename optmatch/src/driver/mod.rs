//! Resolution and the parse loop.
//!
//! Each step evaluates every registered matcher at the current cursor on its
//! own scanner, keeps the candidates that matched, and selects the single
//! highest-priority one. A tie at the top is an error; the engine never
//! guesses. The winner's taker then runs from the cursor its matcher left,
//! and the loop repeats until the stream is exhausted.

mod file;
mod render;

pub use render::{HELP_EXIT, PARSE_FAILURE_EXIT, render_failure, report};

pub(crate) use file::{IncludeStack, run_file};

use std::cmp::Reverse;

use camino::Utf8Path;
use tracing::{debug, trace};

use crate::bindings::Bindings;
use crate::cursor::{Cursor, TokenStream};
use crate::error::{ParseError, ParseResult, TakeError};
use crate::matcher::Priority;
use crate::registry::{OptionEntry, Registry, TakeContext};
use crate::store::RecordPos;
use crate::value::Scanner;

/// Outcome of resolving one step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Record position of the winning option.
    pub pos: RecordPos,
    /// Label of the winning option.
    pub label: String,
    /// Priority the winner matched with.
    pub priority: Priority,
    /// Cursor the winner's taker starts from.
    pub cursor: Cursor,
}

struct Selected<'r> {
    entry: &'r OptionEntry,
    priority: Priority,
    cursor: Cursor,
}

fn select<'r>(
    registry: &'r Registry,
    tokens: &TokenStream,
    cursor: Cursor,
) -> ParseResult<Selected<'r>> {
    let mut candidates: Vec<Selected<'r>> = registry
        .entries()
        .iter()
        .filter_map(|entry| {
            let mut scanner = Scanner::at(tokens, cursor);
            let priority = entry.matcher.evaluate(&mut scanner);
            trace!(option = %entry.label, %priority, "evaluated");
            (priority > Priority::None).then(|| Selected {
                entry,
                priority,
                cursor: scanner.cursor(),
            })
        })
        .collect();
    candidates.sort_by_key(|candidate| Reverse(candidate.priority));
    let token = || tokens.remainder(cursor).unwrap_or_default().to_owned();
    let mut ranked = candidates.into_iter();
    let Some(winner) = ranked.next() else {
        return Err(ParseError::NoMatch {
            token: token(),
            position: cursor,
        });
    };
    let tied: Vec<String> = ranked
        .take_while(|candidate| candidate.priority == winner.priority)
        .map(|candidate| candidate.entry.label.clone())
        .collect();
    if !tied.is_empty() {
        let mut labels = vec![winner.entry.label.clone()];
        labels.extend(tied);
        return Err(ParseError::Ambiguous {
            token: token(),
            candidates: labels,
            position: cursor,
        });
    }
    Ok(winner)
}

pub(crate) fn run(
    registry: &Registry,
    bindings: &mut Bindings,
    includes: &mut IncludeStack,
    tokens: &TokenStream,
) -> ParseResult<()> {
    let mut cursor = Cursor::START;
    loop {
        if tokens.is_spent(cursor) {
            cursor = cursor.next_token();
        }
        if tokens.is_exhausted(cursor) {
            debug!(tokens = tokens.len(), "parse complete");
            return Ok(());
        }
        let selected = select(registry, tokens, cursor)?;
        let option = &selected.entry.label;
        debug!(%option, priority = %selected.priority, %cursor, "resolved");
        let mut cx = TakeContext {
            scanner: Scanner::at(tokens, selected.cursor),
            bindings: &mut *bindings,
            registry,
            includes: &mut *includes,
        };
        let outcome = selected.entry.taker.take(&mut cx);
        let end = cx.scanner.cursor();
        match outcome {
            Ok(()) => {}
            Err(TakeError::Nested(err)) => return Err(*err),
            Err(err) => {
                return Err(ParseError::Take {
                    option: option.clone(),
                    detail: err.to_string(),
                    position: end,
                });
            }
        }
        if end <= cursor {
            return Err(ParseError::Take {
                option: option.clone(),
                detail: "no progress".to_owned(),
                position: end,
            });
        }
        cursor = end;
    }
}

impl Registry {
    /// Parses `tokens`, writing results into `bindings`.
    ///
    /// # Errors
    ///
    /// Returns the first resolution or taker failure. Bindings written by
    /// steps before the failure are kept.
    pub fn parse(&self, bindings: &mut Bindings, tokens: &TokenStream) -> ParseResult<()> {
        run(self, bindings, &mut IncludeStack::default(), tokens)
    }

    /// Parses each line of the configuration file at `path` as an
    /// independent token stream sharing `bindings`.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Io`] when the file cannot be read and
    /// [`ParseError::Config`] carrying the offending line when one fails.
    pub fn parse_file(
        &self,
        bindings: &mut Bindings,
        path: impl AsRef<Utf8Path>,
    ) -> ParseResult<()> {
        run_file(self, bindings, &mut IncludeStack::default(), path.as_ref())
    }

    /// Splits `line` into shell words and parses them.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Tokenize`] on unbalanced quoting, otherwise
    /// the parse failure.
    pub fn parse_line(&self, bindings: &mut Bindings, line: &str) -> ParseResult<()> {
        let tokens = TokenStream::split_line(line).ok_or_else(|| ParseError::Tokenize {
            line: line.to_owned(),
        })?;
        self.parse(bindings, &tokens)
    }

    /// Resolves the option that would run at `cursor` without running it.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::NoMatch`] or [`ParseError::Ambiguous`].
    pub fn resolve(&self, tokens: &TokenStream, cursor: Cursor) -> ParseResult<Resolution> {
        let selected = select(self, tokens, cursor)?;
        Ok(Resolution {
            pos: selected.entry.pos,
            label: selected.entry.label.clone(),
            priority: selected.priority,
            cursor: selected.cursor,
        })
    }
}
