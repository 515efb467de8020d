//! Configuration files: one independent parse per line.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::bindings::Bindings;
use crate::cursor::TokenStream;
use crate::error::{ParseError, ParseResult};
use crate::registry::Registry;

use super::run;

/// Chain of configuration files currently being parsed, outermost first.
#[derive(Debug, Default)]
pub(crate) struct IncludeStack {
    chain: Vec<Utf8PathBuf>,
}

impl IncludeStack {
    /// Resolves `path` against the directory of the innermost open file.
    pub(crate) fn resolve(&self, path: &Utf8Path) -> Utf8PathBuf {
        if path.is_absolute() {
            return path.to_owned();
        }
        self.chain
            .last()
            .and_then(|current| current.parent())
            .map_or_else(|| path.to_owned(), |dir| dir.join(path))
    }

    /// Runs `operation` with `path` pushed on the chain.
    ///
    /// Paths are compared in canonical form; re-entering a file already on
    /// the chain fails before `operation` runs.
    fn within<T, F>(&mut self, path: &Utf8Path, operation: F) -> ParseResult<T>
    where
        F: FnOnce(&Utf8Path, &mut Self) -> ParseResult<T>,
    {
        let canonical = path
            .canonicalize_utf8()
            .map_err(|source| ParseError::Io {
                path: path.to_owned(),
                source,
            })?;
        if self.chain.contains(&canonical) {
            let mut cycle: Vec<String> = self.chain.iter().map(ToString::to_string).collect();
            cycle.push(canonical.to_string());
            return Err(ParseError::CyclicInclude {
                cycle: cycle.join(" -> "),
            });
        }
        self.chain.push(canonical.clone());
        let result = operation(&canonical, self);
        self.chain.pop();
        result
    }
}

pub(crate) fn run_file(
    registry: &Registry,
    bindings: &mut Bindings,
    includes: &mut IncludeStack,
    path: &Utf8Path,
) -> ParseResult<()> {
    includes.within(path, |canonical, stack| {
        debug!(path = %canonical, "parsing configuration file");
        let text = fs::read_to_string(canonical).map_err(|source| ParseError::Io {
            path: canonical.to_owned(),
            source,
        })?;
        let result = run_lines(registry, bindings, stack, canonical, &text);
        debug!(path = %canonical, ok = result.is_ok(), "finished configuration file");
        result
    })
}

fn run_lines(
    registry: &Registry,
    bindings: &mut Bindings,
    includes: &mut IncludeStack,
    origin: &Utf8Path,
    text: &str,
) -> ParseResult<()> {
    let lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| is_directive(line));
    for (index, line) in lines {
        let wrap = |err: ParseError| match err {
            nested @ ParseError::Config { .. } => nested,
            other => ParseError::Config {
                path: origin.to_owned(),
                line_number: index + 1,
                line: line.to_owned(),
                source: Box::new(other),
            },
        };
        let tokens = TokenStream::split_line(line).ok_or_else(|| {
            wrap(ParseError::Tokenize {
                line: line.to_owned(),
            })
        })?;
        run(registry, bindings, includes, &tokens).map_err(wrap)?;
    }
    Ok(())
}

/// Whether a configuration line carries tokens: neither blank nor a
/// `#` comment.
fn is_directive(line: &str) -> bool {
    let trimmed = line.trim_start();
    !trimmed.is_empty() && !trimmed.starts_with('#')
}
