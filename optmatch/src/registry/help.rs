//! Plain-text help rendering for registered options.
//!
//! Each option renders as an indented alias column followed by its wrapped
//! documentation. Aliases wider than the column push the description onto
//! the following line.

use std::io;
use std::path::PathBuf;

use camino::{Utf8Path, Utf8PathBuf};

use super::Registry;

const INDENT: usize = 2;
const ALIAS_WIDTH: usize = 24;
const LINE_WIDTH: usize = 80;

/// Renders `usage` followed by a summary of every registered option.
#[must_use]
pub fn render_help(registry: &Registry, usage: Option<&str>) -> String {
    let mut output = String::new();
    if let Some(text) = usage.map(str::trim_end).filter(|trimmed| !trimmed.is_empty()) {
        output.push_str(text);
        output.push_str("\n\n");
    }
    for doc in registry.doc_metadata() {
        output.push_str(&render_entry(&doc.aliases.join(", "), &doc.doc));
    }
    output
}

fn render_entry(label: &str, doc: &[String]) -> String {
    let margin = " ".repeat(INDENT + ALIAS_WIDTH);
    let mut lines: Vec<String> = doc
        .iter()
        .flat_map(|line| wrap(line, LINE_WIDTH - INDENT - ALIAS_WIDTH))
        .collect();
    let mut output = " ".repeat(INDENT);
    output.push_str(label);
    if label.len() < ALIAS_WIDTH && !lines.is_empty() {
        let first = lines.remove(0);
        output.push_str(&" ".repeat(ALIAS_WIDTH - label.len()));
        output.push_str(&first);
    }
    output.push('\n');
    for line in lines {
        output.push_str(&margin);
        output.push_str(&line);
        output.push('\n');
    }
    output
}

/// Greedy word wrap; words longer than `width` get a line to themselves.
pub(crate) fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Extracts the leading `#` comment block of a script.
///
/// A `#!` interpreter line is skipped. The block ends at the first line
/// not starting with `#`; one space after each `#` is removed.
pub(crate) fn leading_comment_block(source: &str) -> Option<String> {
    let block: Vec<&str> = source
        .lines()
        .skip_while(|line| line.starts_with("#!"))
        .map_while(|line| line.strip_prefix('#'))
        .map(|line| line.strip_prefix(' ').unwrap_or(line))
        .collect();
    let joined = block.join("\n");
    let text = joined.trim();
    (!text.is_empty()).then(|| text.to_owned())
}

/// Usage text read from the leading comment block of the invoking program.
pub(crate) fn invoking_program_usage() -> Option<String> {
    let argv0 = std::env::args_os().next().map(PathBuf::from)?;
    let program = Utf8PathBuf::from_path_buf(argv0).ok()?;
    program_usage(&program)
}

/// Usage text read from the leading comment block of the script at `path`.
///
/// Unreadable and non-text files yield no usage.
pub(crate) fn program_usage(path: &Utf8Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(source) => leading_comment_block(&source),
        Err(err) if err.kind() == io::ErrorKind::InvalidData => {
            tracing::debug!(path = %path, "invoking program is not text; no usage block");
            None
        }
        Err(err) => {
            tracing::warn!(path = %path, error = %err, "cannot read usage from invoking program");
            None
        }
    }
}
