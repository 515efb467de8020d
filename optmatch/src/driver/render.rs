//! Human-readable failure reports for command-line entry points.

use std::io::{self, Write};

use crate::cursor::{Cursor, TokenStream};
use crate::error::ParseError;

/// Exit status used when parsing fails.
pub const PARSE_FAILURE_EXIT: i32 = 2;

/// Exit status used after help has been displayed.
pub const HELP_EXIT: i32 = 1;

/// Renders `err` followed by the token stream with the failing token
/// marked.
///
/// For configuration-line failures the offending line's own tokens are
/// shown instead of `tokens`, and for nested failures the nested tokens.
///
/// # Examples
///
/// ```
/// use optmatch::{Cursor, ParseError, TokenStream, render_failure};
///
/// let tokens = TokenStream::new(["--sum", "1", "--bogus"]);
/// let err = ParseError::NoMatch {
///     token: "--bogus".to_owned(),
///     position: Cursor::at_token(2),
/// };
/// let report = render_failure(&err, &tokens);
/// assert!(report.starts_with("error: no option matches"));
/// assert!(report.ends_with("  --sum 1 --bogus\n          ^^^^^^^\n"));
/// ```
#[must_use]
pub fn render_failure(err: &ParseError, tokens: &TokenStream) -> String {
    let mut report = format!("error: {err}\n");
    let shown = innermost_tokens(err, tokens);
    if let (Some(stream), Some(cursor)) = (shown, err.position()) {
        report.push_str(&mark(&stream, cursor));
    }
    report
}

/// Writes the outcome of a failed parse for a user and returns the exit
/// status to use.
///
/// Help requests go to standard output with [`HELP_EXIT`]; failures go to
/// standard error as rendered by [`render_failure`] with
/// [`PARSE_FAILURE_EXIT`].
#[must_use = "the exit status should be passed to the process"]
pub fn report(err: &ParseError, tokens: &TokenStream) -> i32 {
    let (written, status) = err.help_text().map_or_else(
        || {
            let rendered = render_failure(err, tokens);
            (write!(io::stderr().lock(), "{rendered}"), PARSE_FAILURE_EXIT)
        },
        |text| (writeln!(io::stdout().lock(), "{text}"), HELP_EXIT),
    );
    if let Err(write_err) = written {
        tracing::warn!(error = %write_err, "failed to write parse report");
    }
    status
}

/// Tokens the innermost cursor addresses.
fn innermost_tokens(err: &ParseError, outer: &TokenStream) -> Option<TokenStream> {
    let mut current = err;
    let mut shown = Some(outer.clone());
    loop {
        match current {
            ParseError::Config { line, source, .. } => {
                shown = TokenStream::split_line(line);
                current = &**source;
            }
            ParseError::Nested { tokens, source } => {
                shown = Some(tokens.clone());
                current = &**source;
            }
            _ => return shown,
        }
    }
}

/// Two lines: the tokens joined by spaces, then carets under the addressed
/// part of the token at `cursor`, or one caret past the end when the
/// stream ran out.
fn mark(tokens: &TokenStream, cursor: Cursor) -> String {
    let preceding: usize = tokens
        .iter()
        .take(cursor.index())
        .map(|token| token.chars().count() + 1)
        .sum();
    let (skipped, width) = tokens.get(cursor.index()).map_or((0, 1), |token| {
        let read = token.get(..cursor.offset()).map_or(0, |head| head.chars().count());
        (read, token.chars().count().saturating_sub(read).max(1))
    });
    let joined = tokens.iter().collect::<Vec<_>>().join(" ");
    format!(
        "  {joined}\n  {}{}\n",
        " ".repeat(preceding + skipped),
        "^".repeat(width)
    )
}
